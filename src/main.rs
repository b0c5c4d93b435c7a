//! Bot Intercept entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

    use bot_intercept::render::{CanvasSurface, ICON_FONT_FAMILY, ICON_FONT_URL};
    use bot_intercept::sim::Key;
    use bot_intercept::timers::{HostTimeout, host_timeout};
    use bot_intercept::{Session, Settings, StartupError, Tuning, Viewport};

    /// Game instance holding all state
    struct Game {
        session: Session,
        surface: CanvasSurface,
        /// Whether an animation frame is pending
        loop_running: bool,
        /// setTimeout handle and deadline servicing the session timers
        timer: Option<(i32, f64)>,
        /// Shared by every setTimeout; lives as long as the game
        timer_callback: Option<Closure<dyn FnMut()>>,
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Bot Intercept starting...");

        start().await.map_err(|e| {
            log::error!("Startup failed: {e}");
            JsValue::from_str(&e.to_string())
        })
    }

    async fn start() -> Result<(), StartupError> {
        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameboard")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(StartupError::NoCanvas)?;

        let settings = Settings::load();
        let tuning = Tuning::from_json_or_default(canvas.get_attribute("data-tuning").as_deref());

        // Icons are font glyphs; nothing may draw before the font is ready
        load_icon_font(&document).await?;
        log::info!("Icon font loaded");

        let surface = CanvasSurface::new(canvas)?;
        let now = js_sys::Date::now();
        let session = Session::new(settings, tuning, viewport(&window), now, now as u64);

        let game = Rc::new(RefCell::new(Game {
            session,
            surface,
            loop_running: false,
            timer: None,
            timer_callback: None,
        }));

        install_timer_callback(&game);
        setup_input_handlers(&window, game.clone());
        setup_resize_handler(&window, game.clone());
        arm_timer(&game);

        log::info!("Bot Intercept running!");
        Ok(())
    }

    async fn load_icon_font(document: &Document) -> Result<(), StartupError> {
        let font_err = |e: JsValue| StartupError::FontLoad(format!("{:?}", e));

        let font =
            web_sys::FontFace::new_with_str(ICON_FONT_FAMILY, ICON_FONT_URL).map_err(font_err)?;
        let promise = font.load().map_err(font_err)?;
        JsFuture::from(promise).await.map_err(font_err)?;
        document.fonts().add(&font).map_err(font_err)?;
        Ok(())
    }

    fn viewport(window: &Window) -> Viewport {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Viewport::new(width as f32, height as f32)
    }

    fn setup_input_handlers(window: &Window, game: Rc<RefCell<Game>>) {
        // Key down: movement, or start a new episode
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_code(&event.code());
                let started = game.borrow_mut().session.key_down(key);
                if started {
                    log::info!("Game started");
                    let already_running = game.borrow().loop_running;
                    if !already_running {
                        game.borrow_mut().loop_running = true;
                        game_loop(game.clone());
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_code(&event.code());
                game.borrow_mut().session.key_up(key);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(window: &Window, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let now = js_sys::Date::now();
            game.borrow_mut()
                .session
                .resize(viewport(&window_clone), now);
            arm_timer(&game);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Callback fired by the session timeout: run due timers, then re-arm
    fn install_timer_callback(game: &Rc<RefCell<Game>>) {
        let weak = Rc::downgrade(game);
        let callback = Closure::<dyn FnMut()>::new(move || {
            let Some(game) = weak.upgrade() else {
                return;
            };
            {
                let mut g = game.borrow_mut();
                g.timer = None;
                let Game { session, surface, .. } = &mut *g;
                session.poll_timers(js_sys::Date::now(), surface);
            }
            arm_timer(&game);
        });
        game.borrow_mut().timer_callback = Some(callback);
    }

    /// Make sure a timeout is pending for the session's earliest deadline
    fn arm_timer(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let armed = game.borrow().timer;
        let next = game.borrow().session.next_deadline();
        let step = host_timeout(armed.map(|(_, at)| at), next);
        if step == HostTimeout::Keep {
            return;
        }
        if let Some((handle, _)) = armed {
            window.clear_timeout_with_handle(handle);
            game.borrow_mut().timer = None;
        }
        let HostTimeout::Arm(deadline) = step else {
            return;
        };

        let delay = (deadline - js_sys::Date::now()).max(0.0);
        let result = {
            let g = game.borrow();
            let Some(callback) = g.timer_callback.as_ref() else {
                return;
            };
            window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay.ceil() as i32,
            )
        };
        match result {
            Ok(handle) => game.borrow_mut().timer = Some((handle, deadline)),
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let Game { session, surface, .. } = &mut *g;
            let keep_going = session.frame(js_sys::Date::now(), surface);
            g.loop_running = keep_going;
            keep_going
        };

        // Game over queues the end overlay
        arm_timer(&game);

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bot_intercept::Tuning;
    use bot_intercept::headless::run_autopilot;

    env_logger::init();
    log::info!("Bot Intercept (native) starting...");
    log::info!("Browser build runs with `trunk serve`; playing a headless autopilot episode");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let summary = run_autopilot(seed, 60 * 60 * 5, Tuning::default());

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize run summary: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
