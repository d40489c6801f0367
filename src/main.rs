//! Canvas FX entry point
//!
//! Web: wires DOM events to a [`Session`] and drives it from
//! `requestAnimationFrame`. Native: runs an effect headless against a
//! recording surface at a simulated 60 Hz.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use canvas_fx::platform::{CanvasSurface, InputEvent, Key};
    use canvas_fx::{Bounds, EffectKind, Session, Settings};

    /// Everything the frame callback chain owns
    struct Runner {
        session: Session,
        surface: CanvasSurface,
        /// Pending animation frame request
        frame_handle: Option<i32>,
    }

    fn window_bounds(window: &Window) -> Bounds {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Bounds::new(width.max(0.0) as u32, height.max(0.0) as u32)
    }

    fn effect_from_hash(window: &Window) -> Option<EffectKind> {
        let hash = window.location().hash().ok()?;
        EffectKind::from_str(&hash)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Canvas FX starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let mut settings = Settings::load();
        if let Some(kind) = effect_from_hash(&window) {
            settings.effect = kind;
        }
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let bounds = window_bounds(&window);
        let mut surface = CanvasSurface::new(canvas.clone())?;
        surface.resize(bounds);

        let runner = Rc::new(RefCell::new(Runner {
            session: Session::new(settings, bounds, seed),
            surface,
            frame_handle: None,
        }));

        setup_input_handlers(&window, &canvas, runner.clone());
        setup_resize(&window, runner.clone());
        setup_hash_change(&window, runner.clone());

        request_animation_frame(runner);

        log::info!("Canvas FX running (seed {})", seed);
        Ok(())
    }

    fn request_animation_frame(runner: Rc<RefCell<Runner>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let chain = runner.clone();
        let closure = Closure::once(move |time: f64| {
            frame_loop(chain, time);
        });
        let handle = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
        runner.borrow_mut().frame_handle = handle.ok();
    }

    fn frame_loop(runner: Rc<RefCell<Runner>>, time: f64) {
        {
            let mut r = runner.borrow_mut();
            r.frame_handle = None;
            let Runner {
                session, surface, ..
            } = &mut *r;
            session.frame(time, surface);
        }

        request_animation_frame(runner);
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, runner: Rc<RefCell<Runner>>) {
        // Mouse down
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let p = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                runner.borrow_mut().session.handle_input(&InputEvent::PointerDown(p));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let p = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                runner.borrow_mut().session.handle_input(&InputEvent::PointerMove(p));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_name(&event.key()) {
                    runner.borrow_mut().session.handle_input(&InputEvent::KeyDown(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Resize drops the pending frame, rebuilds the effect and restarts the loop
    fn setup_resize(window: &Window, runner: Rc<RefCell<Runner>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let bounds = window_bounds(&window);
            {
                let mut r = runner.borrow_mut();
                if let Some(handle) = r.frame_handle.take() {
                    let _ = window.cancel_animation_frame(handle);
                }
                r.surface.resize(bounds);
                r.session.resize(bounds);
            }
            request_animation_frame(runner.clone());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// `#balls`, `#particles`, `#flow-field`, `#tendrils`
    fn setup_hash_change(window: &Window, runner: Rc<RefCell<Runner>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(kind) = web_sys::window().and_then(|w| effect_from_hash(&w)) else {
                return;
            };
            let mut r = runner.borrow_mut();
            if r.session.kind() != kind {
                r.session.switch_effect(kind);
                r.session.settings().save();
            }
        });
        let _ = window
            .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use serde::Serialize;

    use canvas_fx::consts::FRAME_INTERVAL_MS;
    use canvas_fx::platform::{InputEvent, Key};
    use canvas_fx::renderer::{Recorder, Surface};
    use canvas_fx::{Bounds, EffectKind, Session, Settings};

    const BOUNDS: Bounds = Bounds::new(800, 600);
    const DEFAULT_FRAMES: u64 = 600;

    /// Printed once the run finishes
    #[derive(Debug, Serialize)]
    struct Summary {
        effect: &'static str,
        seed: u64,
        frames: u64,
        drawn_frames: u64,
        draw_calls: usize,
        last_frame_draw_calls: usize,
        max_save_depth: usize,
    }

    /// Run options from `canvas-fx [effect] [frames] [seed]`
    struct Options {
        effect: Option<EffectKind>,
        frames: u64,
        seed: Option<u64>,
    }

    fn parse_args(args: &[String]) -> Result<Options, String> {
        let effect = match args.first() {
            Some(name) => Some(
                EffectKind::from_str(name).ok_or_else(|| format!("unknown effect: {}", name))?,
            ),
            None => None,
        };
        let frames = match args.get(1) {
            Some(n) => n.parse().map_err(|e| format!("bad frame count {}: {}", n, e))?,
            None => DEFAULT_FRAMES,
        };
        let seed = match args.get(2) {
            Some(s) => Some(s.parse().map_err(|e| format!("bad seed {}: {}", s, e))?),
            None => None,
        };
        Ok(Options {
            effect,
            frames,
            seed,
        })
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run(args: &[String]) -> Result<(), String> {
        let options = parse_args(args)?;
        let mut settings = Settings::load();
        if let Some(effect) = options.effect {
            settings.effect = effect;
        }
        let seed = options.seed.or(settings.seed).unwrap_or_else(clock_seed);

        let mut session = Session::new(settings, BOUNDS, seed);
        let mut surface = Recorder::new(BOUNDS);
        let mut draw_calls = 0;
        let mut last_frame_draw_calls = 0;
        let mut max_save_depth = 0;

        for frame in 0..options.frames {
            // Poke the effect halfway through: a press, then a mode change
            if frame == options.frames / 2 {
                let center = surface.bounds().center();
                session.handle_input(&InputEvent::PointerDown(center + Vec2::new(40.0, -30.0)));
                session.handle_input(&InputEvent::KeyDown(Key::ArrowRight));
            }

            let time = (frame + 1) as f64 * FRAME_INTERVAL_MS;
            if session.frame(time, &mut surface) {
                last_frame_draw_calls = surface.draw_count();
                draw_calls += last_frame_draw_calls;
            }
            max_save_depth = max_save_depth.max(surface.max_depth());
            if surface.depth() != 0 {
                log::warn!("Frame {} left {} unbalanced save(s)", frame, surface.depth());
            }
            surface = Recorder::new(BOUNDS);
        }

        let summary = Summary {
            effect: session.kind().as_str(),
            seed,
            frames: options.frames,
            drawn_frames: session.drawn_frames(),
            draw_calls,
            last_frame_draw_calls,
            max_save_depth,
        };
        log::info!("{} fps over the last window", session.stats().fps());
        let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{}", json);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas FX (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = headless::run(&args) {
        log::error!("{}", e);
        eprintln!("usage: canvas-fx [balls|particles|flow-field|tendrils] [frames] [seed]");
        std::process::exit(2);
    }
}
