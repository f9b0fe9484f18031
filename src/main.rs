//! Ski Slalom entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use ski_slalom::consts::*;
    use ski_slalom::course;
    use ski_slalom::input::InputState;
    use ski_slalom::platform::KeyboardListeners;
    use ski_slalom::renderer::RenderState;
    use ski_slalom::settings::Settings;
    use ski_slalom::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: Rc<RefCell<InputState>>,
        render_state: Option<RenderState>,
        last_time: f64,
        document: Document,
        /// Phase shown by the overlay, to touch the DOM only on change
        shown_phase: Option<GamePhase>,
    }

    impl Game {
        fn new(state: GameState, input: Rc<RefCell<InputState>>, document: Document) -> Self {
            Self {
                state,
                input,
                render_state: None,
                last_time: 0.0,
                document,
                shown_phase: None,
            }
        }

        /// One simulation step for this frame
        fn update(&mut self, _t: f64, dt: f32) {
            let input = TickInput {
                lateral: self.input.borrow().lateral_intent(),
            };
            if let Some(GameEvent::GameOver { reason, obstacle }) = tick(&mut self.state, &input, dt) {
                log::info!(
                    "Game Over! Reason: {} ({:?}), Distance: {}m, Time: {:.1}s",
                    reason.as_str(),
                    obstacle,
                    self.state.lifecycle.distance(),
                    self.state.elapsed
                );
            }
        }

        /// Draw the frame (always after `update`)
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn reset(&mut self) {
            self.state.reset();
            self.input.borrow_mut().clear();
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }

        /// Update HUD and game over overlay in DOM
        fn update_hud(&mut self) {
            let lifecycle = &self.state.lifecycle;
            self.set_text("distance", &lifecycle.distance().to_string());
            self.set_text("gates", &lifecycle.gates_passed().to_string());

            let phase = lifecycle.phase();
            if self.shown_phase == Some(phase) {
                return;
            }
            match phase {
                GamePhase::Playing => self.set_hidden("game-over", true),
                GamePhase::GameOver => {
                    self.set_text("final-distance", &lifecycle.distance().to_string());
                    self.set_text("final-gates", &lifecycle.gates_passed().to_string());
                    let message = lifecycle
                        .failure_reason()
                        .map(|r| r.message())
                        .unwrap_or("Game over.");
                    self.set_text("fail-reason", message);
                    self.set_hidden("game-over", false);
                }
            }
            self.shown_phase = Some(phase);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ski Slalom starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let (width, height) = fit_canvas(&window, &canvas);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let state = course::new_game(&settings, seed);

        let input = Rc::new(RefCell::new(InputState::new()));
        let listeners = KeyboardListeners::attach(&document, input.clone())
            .expect("Failed to attach keyboard listeners");
        let game = Rc::new(RefCell::new(Game::new(state, input, document.clone())));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {e}"),
        }

        setup_restart(game.clone());
        setup_resize(canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game, Rc::new(listeners));

        log::info!("Ski Slalom running!");
    }

    /// Size the canvas backing store to its CSS size times the pixel ratio
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    // The listener guard rides along with the frame loop so it lives exactly
    // as long as the loop does.
    fn request_animation_frame(game: Rc<RefCell<Game>>, listeners: Rc<KeyboardListeners>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, listeners, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, listeners: Rc<KeyboardListeners>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                DEFAULT_FRAME_DT
            };
            g.last_time = time;

            g.update(time / 1000.0, dt.clamp(0.0, MAX_FRAME_DT));
            g.render();
            g.update_hud();
        }

        request_animation_frame(game, listeners);
    }

    fn setup_restart(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter / R restart after a crash
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            if g.state.phase() == GamePhase::GameOver
                && matches!(event.code().as_str(), "Enter" | "KeyR")
            {
                g.reset();
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&window_clone, &canvas);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless run: the autopilot skis the course until it crashes or time runs out
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ski_slalom::consts::DEFAULT_FRAME_DT;
    use ski_slalom::course;
    use ski_slalom::settings::Settings;
    use ski_slalom::sim::{GameEvent, TickInput, autopilot, tick};

    env_logger::init();
    log::info!("Ski Slalom (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load_file(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or(1);
    let mut state = course::new_game(&settings, seed);

    // One simulated minute
    for _ in 0..60 * 60 {
        let input = TickInput {
            lateral: autopilot::steer(&state),
        };
        match tick(&mut state, &input, DEFAULT_FRAME_DT) {
            Some(GameEvent::GatePassed { index }) => log::info!("Gate {} passed", index + 1),
            Some(GameEvent::GameOver { reason, obstacle }) => {
                log::info!("Run ended by {} {:?}", reason.as_str(), obstacle);
                break;
            }
            None => {}
        }
    }

    let lifecycle = &state.lifecycle;
    println!(
        "Distance: {} m, gates passed: {}, time: {:.1} s, {}",
        lifecycle.distance(),
        lifecycle.gates_passed(),
        state.elapsed,
        lifecycle
            .failure_reason()
            .map(|r| r.message())
            .unwrap_or("still skiing")
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
