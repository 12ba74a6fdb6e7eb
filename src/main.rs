//! Dodge Shooter entry point
//!
//! Web: wires DOM events, LocalStorage and the canvas to a `Session`.
//! Native: runs a headless auto-piloted session and prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, EventTarget, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
        KeyboardEvent, TouchEvent,
    };

    use dodge_shooter::persistence::LocalStorageStore;
    use dodge_shooter::platform::InputLatch;
    use dodge_shooter::renderer::CanvasRenderer;
    use dodge_shooter::{FrameOutcome, GameHooks, GamePhase, Session, Tuning};

    /// Frame time assumed for the first tick after (re)starting
    const FIRST_FRAME_MS: f32 = 1000.0 / 60.0;

    const RESTART_BOX_ID: &str = "restart-box";

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn set_display(id: &str, value: &str) {
        let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
            return;
        };
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            let _ = el.style().set_property("display", value);
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    /// DOM dialogs and score labels
    struct DomHooks;

    impl GameHooks for DomHooks {
        fn on_game_start(&mut self) {
            set_display("game-dialog", "none");
        }

        fn on_score_changed(&mut self, score: u64, high_score: u64) {
            set_text("current-score", &format!("Score: {}", score));
            set_text("high-score", &format!("High Score: {}", high_score));
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore, DomHooks>,
        renderer: CanvasRenderer,
        input: InputLatch,
        last_time: f64,
    }

    impl Game {
        fn render(&self, time: f64) {
            self.renderer.draw(&self.session.snapshot(), time);
        }

        /// Restart the frame clock so a long pause is not one huge delta
        fn rewind_clock(&mut self) {
            self.last_time = 0.0;
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dodge Shooter starting...");

        let document = document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let tuning = Tuning::for_field(canvas.width() as f32, canvas.height() as f32);
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(tuning, seed, LocalStorageStore, DomHooks);
        set_text("high-score", &format!("High Score: {}", session.high_score()));

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer: CanvasRenderer::new(ctx),
            input: InputLatch::new(),
            last_time: 0.0,
        }));

        set_display("game-dialog", "block");
        setup_keyboard(game.clone())?;
        setup_touch_buttons(game.clone())?;
        setup_dialog_buttons(game)?;

        log::info!("Waiting for start (seed {})", seed);
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_down(event.key_code());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(event.key_code());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn on_touch(
        id: &str,
        event_name: &str,
        game: Rc<RefCell<Game>>,
        action: fn(&mut InputLatch),
    ) -> Result<(), JsValue> {
        let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Touch button #{} missing", id);
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            action(&mut game.borrow_mut().input);
        });
        btn.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_touch_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        on_touch("btn-left", "touchstart", game.clone(), |i| i.touch_left(true))?;
        on_touch("btn-left", "touchend", game.clone(), |i| i.touch_left(false))?;
        on_touch("btn-right", "touchstart", game.clone(), |i| i.touch_right(true))?;
        on_touch("btn-right", "touchend", game.clone(), |i| i.touch_right(false))?;
        on_touch("btn-fire", "touchstart", game, |i| i.touch_fire())
    }

    fn listen_click(target: &EventTarget, mut handler: impl FnMut() + 'static) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn on_click(id: &str, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
        let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Button #{} missing", id);
            return Ok(());
        };
        listen_click(&btn, handler)
    }

    fn setup_dialog_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        on_click("start", move || {
            {
                let mut g = game.borrow_mut();
                if g.session.phase() != GamePhase::Paused {
                    return;
                }
                g.session.start();
                g.rewind_clock();
            }
            request_animation_frame(game.clone());
        })
    }

    /// Game-over dialog, built under `#game-area` each time a game ends
    fn show_restart_box(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = document().ok_or("no document")?;
        let area = document
            .get_element_by_id("game-area")
            .ok_or("no #game-area")?;
        remove_restart_box();

        let restart_box = document.create_element("div")?;
        restart_box.set_id(RESTART_BOX_ID);

        let message = document.create_element("p")?;
        message.set_text_content(Some("Game over! Play again?"));
        restart_box.append_child(&message)?;

        let yes: HtmlButtonElement = document.create_element("button")?.dyn_into()?;
        yes.set_text_content(Some("Yes"));
        {
            let game = game.clone();
            listen_click(&yes, move || restart(&game))?;
        }
        restart_box.append_child(&yes)?;

        let no: HtmlButtonElement = document.create_element("button")?.dyn_into()?;
        no.set_text_content(Some("No"));
        listen_click(&no, move || decline(&game))?;
        restart_box.append_child(&no)?;

        area.append_child(&restart_box)?;
        Ok(())
    }

    fn remove_restart_box() {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(RESTART_BOX_ID)) {
            el.remove();
        }
    }

    fn restart(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.session.phase() != GamePhase::Ended {
                return;
            }
            remove_restart_box();
            g.session.restart();
            g.input.clear();
            g.rewind_clock();
        }
        request_animation_frame(game.clone());
    }

    fn decline(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if g.session.phase() != GamePhase::Ended {
            return;
        }
        g.session.terminate();
        if let Some(body) = document().and_then(|d| d.body()) {
            body.set_inner_html("<h1 style=\"text-align:center; margin-top:200px;\">Thanks for playing!</h1>");
        }
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

    /// One tick plus its render pass. Reschedules only while running.
    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let outcome = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                FIRST_FRAME_MS
            };
            g.last_time = time;

            let input = g.input.take();
            let outcome = g.session.frame(&input, dt);
            g.render(time);

            outcome
        };

        match outcome {
            Ok(FrameOutcome::Advanced) => request_animation_frame(game),
            Ok(FrameOutcome::Ended) => {
                if let Err(e) = show_restart_box(game) {
                    log::error!("Could not show restart dialog: {:?}", e);
                }
            }
            Ok(FrameOutcome::Skipped) => {}
            Err(e) => {
                log::error!("Simulation halted: {}", e);
                set_text("game-error", &e.to_string());
                set_display("game-error", "block");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use dodge_shooter::game::NoHooks;
    use dodge_shooter::persistence::MemoryStore;
    use dodge_shooter::sim::{Bounded, Player, SimError, SimulationState, TickInput};
    use dodge_shooter::{FrameOutcome, Session, Tuning};

    /// Frame time fed to every headless tick
    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Auto-pilot pulls the trigger this often (ticks)
    const FIRE_EVERY: u64 = 15;
    /// How far above the player the auto-pilot looks for threats
    const LOOKAHEAD: f32 = 200.0;

    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub seed: u64,
        pub ticks: u64,
        pub games: u32,
        pub last_score: u64,
        pub high_score: u64,
        pub phase: String,
        pub player: Player,
    }

    /// Sidestep the nearest obstacle overhead, fire on a fixed cadence
    fn autopilot(state: &SimulationState) -> TickInput {
        let player = state.player.bounds();
        let fire = state.time_ticks % FIRE_EVERY == 0;

        let threat = state
            .obstacles
            .iter()
            .map(|o| o.bounds())
            .filter(|o| {
                o.bottom() > player.pos.y - LOOKAHEAD
                    && o.pos.x < player.right() + 10.0
                    && o.right() > player.pos.x - 10.0
            })
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        match threat {
            Some(o) => {
                let go_left = o.center().x > player.center().x;
                TickInput {
                    left: go_left,
                    right: !go_left,
                    fire,
                }
            }
            None => TickInput {
                fire,
                ..Default::default()
            },
        }
    }

    pub fn run(tuning: Tuning, seed: u64, max_ticks: u64) -> Result<RunSummary, SimError> {
        let mut session = Session::new(tuning, seed, MemoryStore::new(), NoHooks);
        session.start();

        let mut ticks = 0;
        let mut games = 1;
        while ticks < max_ticks {
            let input = autopilot(session.state());
            match session.frame(&input, FRAME_MS)? {
                FrameOutcome::Advanced => {}
                FrameOutcome::Ended => {
                    log::info!("Game {} over at score {}", games, session.state().score);
                    if ticks + 1 < max_ticks {
                        session.restart();
                        games += 1;
                    }
                }
                FrameOutcome::Skipped => break,
            }
            ticks += 1;
        }

        Ok(RunSummary {
            seed,
            ticks,
            games,
            last_score: session.state().score,
            high_score: session.high_score(),
            phase: format!("{:?}", session.phase()),
            player: session.state().player.clone(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use dodge_shooter::Tuning;

    env_logger::init();
    log::info!("Dodge Shooter (native) starting headless run...");

    // Usage: dodge-shooter [tuning.json] [ticks] [seed]
    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) if path != "-" => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        _ => Tuning::default(),
    };
    let ticks = args.next().map(|s| s.parse()).transpose()?.unwrap_or(10_000);
    let seed = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);

    let summary = headless::run(tuning, seed, ticks)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
