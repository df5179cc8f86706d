//! Droppy Airplane entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use droppy_airplane::audio::AudioManager;
    use droppy_airplane::consts::*;
    use droppy_airplane::platform::{FrameOutcome, InputEvent, ScorePlacement};
    use droppy_airplane::renderer::{RenderState, SceneCanvas};
    use droppy_airplane::sim::{GameState, draw, tick};
    use droppy_airplane::{Settings, Tuning};

    /// Longest frame the simulation will integrate in one step (seconds)
    const MAX_FRAME_DT: f32 = 0.1;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        canvas: SceneCanvas,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        /// Input gathered since the last frame
        pending: Vec<InputEvent>,
        last_time: f64,
        running: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(tuning: Tuning, settings: Settings, seed: u64) -> Self {
            Self {
                state: GameState::new(tuning, seed),
                canvas: SceneCanvas::new(),
                render_state: None,
                audio: AudioManager::new(settings.clone()),
                settings,
                pending: Vec::new(),
                last_time: 0.0,
                running: true,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one frame of simulation
        fn update(&mut self, dt: f32, time: f64) -> FrameOutcome {
            let dt = dt.clamp(0.0, MAX_FRAME_DT);
            let events = std::mem::take(&mut self.pending);
            let outcome = tick(&mut self.state, &events, dt, &mut self.audio);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            outcome
        }

        /// Render the current frame
        fn render(&mut self) {
            draw(&self.state, &mut self.canvas);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.canvas.frame()) {
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

        /// Mirror the canvas overlay state into the DOM
        fn update_hud(&self, document: &Document) {
            let hud = self.canvas.hud();
            let score = hud.score.to_string();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&score));
            }
            if let Some(el) = document.get_element_by_id("hud-score") {
                let class = match hud.placement {
                    ScorePlacement::Hud => "hud-item",
                    ScorePlacement::UnderMenu => "hud-item hidden",
                };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Restart menu with the final score underneath
            if let Some(el) = document.get_element_by_id("game-over") {
                if hud.menu_visible {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&score));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// Read an optional inline JSON config block from the page
    fn inline_json(document: &Document, id: &str) -> Option<String> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty())
    }

    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = inline_json(document, "droppy-tuning") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring page tuning: {:#}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Droppy Airplane starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store matches the logical window, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (WINDOW_WIDTH as f64 * dpr) as u32;
        let height = (WINDOW_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = load_tuning(&document);
        let settings = inline_json(&document, "droppy-settings")
            .map(|json| Settings::from_json_or_default(&json))
            .unwrap_or_default();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, settings, seed)));
        log::info!("Game initialized with seed: {}", game.borrow().state.seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Droppy Airplane running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Click or touch: jump / restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.pending.push(InputEvent::PointerDown);
            });
            canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => g.pending.push(InputEvent::PointerDown),
                    "Escape" => g.pending.push(InputEvent::Quit),
                    "m" | "M" => {
                        let muted = !g.settings.muted;
                        g.settings.muted = muted;
                        g.audio.set_muted(muted);
                        log::info!("Muted: {}", muted);
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if !g.running {
                return;
            }

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / FRAMES_PER_SECOND as f32
            };
            g.last_time = time;

            if g.update(dt, time) == FrameOutcome::Quit {
                g.running = false;
                log::info!("Stopped");
                return;
            }
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};

    use droppy_airplane::Tuning;
    use droppy_airplane::consts::*;
    use droppy_airplane::platform::{FrameOutcome, InputEvent, Silent};
    use droppy_airplane::renderer::SceneCanvas;
    use droppy_airplane::sim::{GameEvent, GamePhase, GameState, Orientation, draw, tick};

    /// Path to an optional tuning JSON file
    const TUNING_ENV: &str = "DROPPY_AIRPLANE_TUNING";
    /// Simulated seconds the demo runs before quitting
    const DEMO_SECONDS: u32 = 60;
    /// Pause on the game-over screen before the autopilot restarts
    const RESTART_DELAY: f64 = 1.0;

    fn load_tuning() -> Result<Tuning> {
        let Some(path) = std::env::var_os(TUNING_ENV).map(PathBuf::from) else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read tuning file {}", path.display()))?;
        let tuning = Tuning::from_json(&json)
            .with_context(|| format!("Invalid tuning file {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Height the autopilot tries to hold, steering around the next obstacle
    fn target_height(state: &GameState, player_x: f32) -> f32 {
        let mut target = WINDOW_HEIGHT * 0.5;
        let next = state
            .world
            .obstacles()
            .filter(|o| o.position.x + o.mask().width() as f32 > player_x)
            .min_by(|a, b| a.position.x.total_cmp(&b.position.x));
        if let Some(obstacle) = next {
            let clearance = PLAYER_HEIGHT as f32 * 1.5;
            target = match obstacle.orientation {
                Orientation::Bottom => target.min(obstacle.position.y - clearance),
                Orientation::Top => {
                    target.max(obstacle.position.y + obstacle.mask().height() as f32 + clearance)
                }
            };
        }
        target
    }

    /// Tap whenever the plane sinks below its target height
    fn autopilot(state: &GameState, game_over_at: f64) -> Option<InputEvent> {
        match state.phase {
            GamePhase::Active => {
                let player = state.player()?;
                let sinking = player.velocity_y >= 0.0;
                (sinking && player.position.y > target_height(state, player.position.x))
                    .then_some(InputEvent::PointerDown)
            }
            GamePhase::GameOver => {
                (state.clock - game_over_at >= RESTART_DELAY).then_some(InputEvent::PointerDown)
            }
        }
    }

    /// Headless run: fixed frame step, autopilot input, frames built but not shown
    pub fn run() -> Result<()> {
        log::info!("Droppy Airplane (native) starting...");

        let tuning = load_tuning().unwrap_or_else(|e| {
            log::warn!("{:#}; using default tuning", e);
            Tuning::default()
        });
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock is before the Unix epoch")?
            .as_millis() as u64;

        let mut state = GameState::new(tuning, seed);
        let mut canvas = SceneCanvas::new();
        let mut audio = Silent;
        log::info!("Game initialized with seed: {}", state.seed);

        let dt = 1.0 / FRAMES_PER_SECOND as f32;
        let last_frame = DEMO_SECONDS * FRAMES_PER_SECOND;
        let mut game_over_at = 0.0;
        let mut runs = 1;
        let mut best = 0;

        for frame in 0..=last_frame {
            let input: Vec<InputEvent> = if frame == last_frame {
                vec![InputEvent::Quit]
            } else {
                autopilot(&state, game_over_at).into_iter().collect()
            };

            if tick(&mut state, &input, dt, &mut audio) == FrameOutcome::Quit {
                break;
            }

            for event in &state.events {
                match *event {
                    GameEvent::Crashed { score } => {
                        best = best.max(score);
                        game_over_at = state.clock;
                    }
                    GameEvent::Restarted => runs += 1,
                    _ => {}
                }
            }

            draw(&state, &mut canvas);
        }

        best = best.max(state.score);
        log::info!(
            "Demo finished: {} run(s), best {} s, {} frames drawn",
            runs,
            best,
            canvas.frames_presented()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
