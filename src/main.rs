//! Neon Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, KeyboardEvent};

    use neon_dodge::hud::{HudSnapshot, Overlay};
    use neon_dodge::persistence::LocalStorageStore;
    use neon_dodge::platform::{KeyPhase, button_command, key_command};
    use neon_dodge::renderer::CanvasRenderer;
    use neon_dodge::sim::{Command, GameEvent};
    use neon_dodge::{Session, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        renderer: CanvasRenderer,
        settings: Settings,
        /// Timestamp of the latest animation frame, used to stamp input commands
        last_frame_ms: f64,
        /// Last HUD text written, to skip redundant DOM writes
        last_hud: Option<HudSnapshot>,
        overlay_dirty: bool,
    }

    impl Game {
        fn command(&mut self, command: Command) {
            let now = self.last_frame_ms;
            if self.session.handle(command, now) {
                self.overlay_dirty = true;
            }
            if let Command::SelectDifficulty(difficulty) = command {
                self.settings.difficulty = difficulty;
                self.settings.save();
                highlight_difficulty(difficulty.as_str());
            }
        }

        fn update(&mut self, time: f64) {
            self.last_frame_ms = time;
            let events = self.session.frame(time);
            if events.iter().any(|e| matches!(e, GameEvent::GameOver(_))) {
                self.overlay_dirty = true;
            }
        }

        fn render(&self) {
            if let Err(e) = self.renderer.render(self.session.state()) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = document() else { return };

            let hud = HudSnapshot::capture(self.session.state(), self.session.high_score());
            if self.last_hud.as_ref() != Some(&hud) {
                set_text(&document, "score", &hud.score);
                set_text(&document, "high-score", &hud.high_score);
                set_text(&document, "lives", &hud.lives);
                set_text(&document, "shield", &hud.shield);
                self.last_hud = Some(hud);
            }

            if self.overlay_dirty {
                self.overlay_dirty = false;
                let overlay = Overlay::for_phase(
                    self.session.state().phase,
                    self.session.last_summary(),
                );
                if let Some(el) = document.get_element_by_id("overlay") {
                    match overlay {
                        Some(overlay) => {
                            set_text(&document, "overlay-title", &overlay.title);
                            set_text(&document, "overlay-text", &overlay.body);
                            let _ = el.class_list().remove_1("hidden");
                        }
                        None => {
                            let _ = el.class_list().add_1("hidden");
                        }
                    }
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn difficulty_buttons() -> Vec<Element> {
        let Some(list) = document().and_then(|d| d.query_selector_all(".diff-btn").ok()) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn highlight_difficulty(key: &str) {
        for btn in difficulty_buttons() {
            let active = btn.get_attribute("data-diff").as_deref() == Some(key);
            let _ = btn.class_list().toggle_with_force("active", active);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Dodge starting...");

        let document = document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let width = canvas.width() as f32;
        let height = canvas.height() as f32;
        // Optional balance override in the canvas markup
        let mut tuning = match canvas.get_attribute("data-tuning") {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        tuning.field_width = width;
        tuning.field_height = height;
        if let Err(e) = tuning.validate() {
            log::error!("Canvas too small for the game: {}", e);
            return;
        }

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, tuning, settings.difficulty, LocalStorageStore::default());
        highlight_difficulty(settings.difficulty.as_str());

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer: CanvasRenderer::new(ctx, width as f64, height as f64),
            settings,
            last_frame_ms: 0.0,
            last_hud: None,
            overlay_dirty: true,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_start_button(game.clone());
        setup_difficulty_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Neon Dodge running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        for (kind, phase) in [("keydown", KeyPhase::Down), ("keyup", KeyPhase::Up)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(command) = key_command(&event.key(), &event.code(), phase) {
                    if command == Command::StartOrRestart {
                        event.prevent_default();
                    }
                    game.borrow_mut().command(command);
                }
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("start-btn")) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().command(Command::StartOrRestart);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_difficulty_buttons(game: Rc<RefCell<Game>>) {
        for btn in difficulty_buttons() {
            let game = game.clone();
            let key = btn.get_attribute("data-diff").unwrap_or_default();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                match button_command(&key) {
                    Ok(command) => game.borrow_mut().command(command),
                    Err(e) => log::warn!("Ignoring difficulty button: {}", e),
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Dodge (native) starting...");
    log::info!("Native mode has no canvas - run with `trunk serve` for the web version");

    println!("\nRunning headless demo...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one scripted run per difficulty and print the results
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use neon_dodge::persistence::MemoryStore;
    use neon_dodge::sim::{Command, Difficulty, GameEvent};
    use neon_dodge::{Session, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    let mut best = 0;

    for (i, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        let store = MemoryStore::with_high_score(best);
        let mut session = Session::new(2024 + i as u64, Tuning::default(), difficulty, store);
        let mut now = 0.0;
        session.handle(Command::StartOrRestart, now);

        let mut pickups = 0;
        for frame in 0..MAX_FRAMES {
            now += FRAME_MS;
            // Sweep back and forth across the field
            let command = if (frame / 90) % 2 == 0 {
                Command::MoveLeft
            } else {
                Command::MoveRight
            };
            session.handle(command, now);

            let events = session.frame(now);
            pickups += events
                .iter()
                .filter(|e| matches!(e, GameEvent::ItemCollected(_)))
                .count();
            if !session.state().is_running() {
                break;
            }
        }

        match session.last_summary() {
            Some(summary) => println!(
                "✓ {:<6} score {:>5}{}  ({} pickups)",
                summary.label(),
                summary.score,
                if summary.new_record { "  new record" } else { "" },
                pickups
            ),
            None => println!(
                "✓ {:<6} survived {} s with score {} ({} pickups)",
                difficulty.label(),
                MAX_FRAMES / 60,
                session.state().display_score(),
                pickups
            ),
        }
        best = session.high_score();
    }

    println!("Best score: {}", best);
}
