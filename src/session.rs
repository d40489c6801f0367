//! Process-wide context
//!
//! One `Session` is created at startup and owned by the frame callback chain.
//! It holds the running effect, the surface bounds, the last pointer position
//! and frame statistics.

use glam::Vec2;

use crate::Bounds;
use crate::effects::{Effect, EffectKind, FrameClock};
use crate::platform::InputEvent;
use crate::renderer::Surface;
use crate::settings::Settings;

/// Frames in the FPS window
const FPS_WINDOW: usize = 60;

/// Callback rate over the last [`FPS_WINDOW`] frames
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames: u64,
    fps: u32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames: 0,
            fps: 0,
        }
    }
}

impl FrameStats {
    /// Record a callback timestamp (ms)
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames += 1;

        // Oldest sample is the slot we write next
        if self.frames >= FPS_WINDOW as u64 {
            let oldest = self.frame_times[self.frame_index];
            let elapsed = time - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

pub struct Session {
    settings: Settings,
    bounds: Bounds,
    pointer: Vec2,
    effect: Box<dyn Effect>,
    seed: u64,
    last_timestamp_ms: Option<f64>,
    stats: FrameStats,
    /// Frames that actually drew
    drawn: u64,
}

impl Session {
    pub fn new(settings: Settings, bounds: Bounds, seed: u64) -> Self {
        let effect = settings.effect.create(&settings, bounds, seed);
        Self {
            settings,
            bounds,
            pointer: bounds.center(),
            effect,
            seed,
            last_timestamp_ms: None,
            stats: FrameStats::default(),
            drawn: 0,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.effect.kind()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Last known pointer position
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn drawn_frames(&self) -> u64 {
        self.drawn
    }

    /// Replace the running effect with a fresh one
    pub fn switch_effect(&mut self, kind: EffectKind) {
        self.settings.effect = kind;
        self.effect = kind.create(&self.settings, self.bounds, self.seed);
        self.last_timestamp_ms = None;
    }

    pub fn resize(&mut self, bounds: Bounds) {
        log::info!("Resize {}x{} -> {}x{}", self.bounds.width, self.bounds.height, bounds.width, bounds.height);
        self.bounds = bounds;
        self.effect.resize(bounds);
        self.last_timestamp_ms = None;
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        if let Some(p) = event.pointer() {
            self.pointer = p;
        }
        self.effect.handle_input(event);
    }

    /// Run one frame callback. Returns true when the effect drew.
    pub fn frame(&mut self, timestamp_ms: f64, surface: &mut dyn Surface) -> bool {
        let elapsed_ms = self
            .last_timestamp_ms
            .map_or(0.0, |last| (timestamp_ms - last).max(0.0));
        self.last_timestamp_ms = Some(timestamp_ms);

        self.stats.record(timestamp_ms);
        if self.stats.frames() % FPS_WINDOW as u64 == 0 {
            log::debug!("{}: {} fps", self.effect.kind().as_str(), self.stats.fps());
        }

        let drew = self.effect.frame(
            FrameClock {
                timestamp_ms,
                elapsed_ms,
            },
            surface,
        );
        if drew {
            self.drawn += 1;
        }
        drew
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Key;
    use crate::renderer::{DrawCommand, Recorder};

    #[test]
    fn test_fps_at_sixty_hertz() {
        let mut stats = FrameStats::default();
        for i in 0..120 {
            stats.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(stats.fps(), 60);
        assert_eq!(stats.frames(), 120);
    }

    #[test]
    fn test_no_fps_before_window_fills() {
        let mut stats = FrameStats::default();
        for i in 0..10 {
            stats.record(i as f64 * 16.0);
        }
        assert_eq!(stats.fps(), 0);
    }

    #[test]
    fn test_pointer_tracks_events() {
        let bounds = Bounds::new(200, 100);
        let mut session = Session::new(Settings::default(), bounds, 1);
        assert_eq!(session.pointer(), Vec2::new(100.0, 50.0));
        session.handle_input(&InputEvent::PointerMove(Vec2::new(1.0, 2.0)));
        assert_eq!(session.pointer(), Vec2::new(1.0, 2.0));
        session.handle_input(&InputEvent::KeyDown(Key::ArrowUp));
        assert_eq!(session.pointer(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_flow_field_skips_fast_callbacks() {
        let bounds = Bounds::new(64, 64);
        let mut session = Session::new(Settings::for_effect(EffectKind::FlowField), bounds, 1);
        let mut surface = Recorder::new(bounds);
        // 100 Hz host: every second callback crosses the interval
        for i in 1..=120 {
            session.frame(i as f64 * 10.0, &mut surface);
        }
        assert_eq!(session.stats().frames(), 120);
        assert_eq!(session.drawn_frames(), 60);
    }

    #[test]
    fn test_switch_and_resize() {
        let mut session = Session::new(Settings::default(), Bounds::new(300, 300), 2);
        assert_eq!(session.kind(), EffectKind::Balls);
        session.switch_effect(EffectKind::Particles);
        assert_eq!(session.kind(), EffectKind::Particles);
        assert_eq!(session.settings().effect, EffectKind::Particles);

        session.resize(Bounds::new(0, 0));
        let mut surface = Recorder::new(Bounds::new(0, 0));
        assert!(session.frame(10.0, &mut surface));
        assert!(session.frame(26.0, &mut surface));
        assert_eq!(surface.commands()[0], DrawCommand::Clear);
    }
}
