//! Effect settings
//!
//! Persisted as JSON in LocalStorage on the web; defaults everywhere else.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::effects::EffectKind;
use crate::sim::{FlowFieldConfig, SpeedRange};

/// Bouncing balls tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallsConfig {
    pub count: usize,
    pub radius: f32,
    /// Per-axis speed range, also used when a collision re-rolls a heading
    pub speed: SpeedRange,
    /// Next-step center distance that counts as a collision
    pub collision_distance: f32,
}

impl Default for BallsConfig {
    fn default() -> Self {
        Self {
            count: BALL_COUNT,
            radius: BALL_RADIUS,
            speed: SpeedRange::default(),
            collision_distance: BALL_RADIUS * 2.0,
        }
    }
}

/// Particle trail tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    pub hue: f32,
    /// Opacity lost per tick
    pub fade_rate: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub speed: SpeedRange,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            hue: PARTICLE_HUE,
            fade_rate: PARTICLE_FADE_RATE,
            min_radius: PARTICLE_MIN_RADIUS,
            max_radius: PARTICLE_MAX_RADIUS,
            speed: SpeedRange::default(),
        }
    }
}

/// Tendril tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TendrilsConfig {
    /// Population is drawn from `[min_count, max_count)`
    pub min_count: usize,
    pub max_count: usize,
    pub head_radius: f32,
    pub opacity: f32,
    /// Starting hue (degrees)
    pub hue: f32,
}

impl Default for TendrilsConfig {
    fn default() -> Self {
        Self {
            min_count: TENDRIL_MIN_COUNT,
            max_count: TENDRIL_MAX_COUNT,
            head_radius: TENDRIL_HEAD_RADIUS,
            opacity: TENDRIL_OPACITY,
            hue: PARTICLE_HUE,
        }
    }
}

/// All effect settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Effect to start with
    pub effect: EffectKind,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,

    pub balls: BallsConfig,
    pub particles: ParticlesConfig,
    pub tendrils: TendrilsConfig,
    /// Flow field config used before the first click
    pub flow_field: FlowFieldConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            effect: EffectKind::default(),
            seed: None,
            balls: BallsConfig::default(),
            particles: ParticlesConfig::default(),
            tendrils: TendrilsConfig::default(),
            flow_field: FlowFieldConfig::startup(),
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Settings for one effect, everything else default
    pub fn for_effect(effect: EffectKind) -> Self {
        Self {
            effect,
            ..Self::default()
        }
    }

    /// Repair values that would break an effect
    pub fn sanitized(mut self) -> Self {
        if self.particles.min_radius > self.particles.max_radius {
            log::warn!("Particle radius range inverted, swapping");
            std::mem::swap(&mut self.particles.min_radius, &mut self.particles.max_radius);
        }
        if self.tendrils.min_count > self.tendrils.max_count {
            log::warn!("Tendril count range inverted, swapping");
            std::mem::swap(&mut self.tendrils.min_count, &mut self.tendrils.max_count);
        }
        for speed in [&mut self.balls.speed, &mut self.particles.speed] {
            if speed.min > speed.max {
                log::warn!("Speed range inverted, swapping");
                std::mem::swap(&mut speed.min, &mut speed.max);
            }
        }
        if self.flow_field.cell_size.is_nan() || self.flow_field.cell_size <= 0.0 {
            log::warn!(
                "Flow field cell size {} is not positive, using default",
                self.flow_field.cell_size
            );
            self.flow_field.cell_size = FlowFieldConfig::startup().cell_size;
        }
        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "canvas_fx_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
