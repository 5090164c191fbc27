//! Flick Fish entry point
//!
//! Handles platform-specific initialization and starts the game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec3;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, DeviceMotionEvent, Document, HtmlCanvasElement, TouchEvent,
        Window,
    };

    use flick_fish::consts::MAX_DPR;
    use flick_fish::platform::MotionSupport;
    use flick_fish::platform::web::{
        Session, WebHostParts, detect_motion_support, request_permission,
    };
    use flick_fish::renderer::SceneRenderer;
    use flick_fish::{Game, GameError, HostEvent, Tuning};

    fn platform(what: &str) -> GameError {
        GameError::Platform(what.to_string())
    }

    /// Motion sensors are only exposed to secure contexts
    fn is_secure(window: &Window) -> bool {
        let location = window.location();
        let protocol = location.protocol().unwrap_or_default();
        let hostname = location.hostname().unwrap_or_default();
        protocol == "https:" || hostname == "localhost"
    }

    fn show_overlay(document: &Document) {
        if let Some(overlay) = document.get_element_by_id("overlay") {
            let _ = overlay.remove_attribute("hidden");
        }
    }

    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("{e} - using defaults");
                Tuning::default()
            }
        }
    }

    fn device_pixel_ratio(window: &Window) -> f64 {
        window.device_pixel_ratio().min(MAX_DPR)
    }

    /// Size the canvas backing store to the viewport, returns device pixels
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = device_pixel_ratio(window);
        let css_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let css_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let width = (css_w * dpr) as u32;
        let height = (css_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    pub async fn run() -> Result<(), GameError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Flick Fish starting...");

        let window = web_sys::window().ok_or_else(|| platform("no window"))?;
        let document = window.document().ok_or_else(|| platform("no document"))?;

        if !is_secure(&window) {
            show_overlay(&document);
            return Err(platform("insecure context: serve over https or localhost"));
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or_else(|| platform("no canvas"))?
            .dyn_into()
            .map_err(|_| platform("#game is not a canvas"))?;

        let (width, height) = fit_canvas(&window, &canvas);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::Platform(format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::Platform(format!("no GPU adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let renderer = SceneRenderer::new(
            surface,
            &adapter,
            width,
            height,
            device_pixel_ratio(&window) as f32,
        )
        .await
        .map_err(|e| GameError::Platform(format!("failed to create device: {e}")))?;

        let tuning = load_tuning(&document);
        let support = detect_motion_support();
        let seed = js_sys::Date::now() as u64;
        log::info!("Motion support: {support:?}");

        let parts = WebHostParts {
            window: window.clone(),
            status: document.get_element_by_id("msg"),
            renderer,
        };
        let session = Session::new(parts, |host| Game::new(host, support, &tuning, seed));

        setup_touch(&canvas, Rc::clone(&session));
        setup_motion(&window, Rc::clone(&session));
        setup_resize(&window, &canvas, Rc::clone(&session));
        if support == MotionSupport::NeedsPermission {
            setup_permission_button(&document, Rc::clone(&session));
        }

        session.start();

        log::info!("Flick Fish running!");
        Ok(())
    }

    fn setup_touch(canvas: &HtmlCanvasElement, session: Rc<Session>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
            session.with_host(|host| host.resume_audio());
            session.post(HostEvent::Tap);
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            closure.as_ref().unchecked_ref(),
            &options,
        );
        closure.forget();
    }

    fn setup_motion(window: &Window, session: Rc<Session>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceMotionEvent| {
            let Some(accel) = event.acceleration_including_gravity() else {
                return;
            };
            let sample = Vec3::new(
                accel.x().unwrap_or(0.0) as f32,
                accel.y().unwrap_or(0.0) as f32,
                accel.z().unwrap_or(0.0) as f32,
            );
            session.post(HostEvent::Motion(sample));
        });
        let _ = window
            .add_event_listener_with_callback("devicemotion", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(window: &Window, canvas: &HtmlCanvasElement, session: Rc<Session>) {
        let window_clone = window.clone();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let (width, height) = fit_canvas(&window_clone, &canvas);
            session.with_host(|host| host.resize(width, height));
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// iOS only grants motion access from a user gesture, and only once
    fn setup_permission_button(document: &Document, session: Rc<Session>) {
        let Some(btn) = document.get_element_by_id("permitBtn") else {
            log::warn!("Motion needs permission but #permitBtn is missing");
            return;
        };
        let _ = btn.remove_attribute("hidden");

        let asked = Cell::new(false);
        let btn_clone = btn.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            if asked.replace(true) {
                return;
            }
            let _ = btn_clone.set_attribute("hidden", "");
            session.with_host(|host| host.resume_audio());

            let answer = request_permission();
            let session = Rc::clone(&session);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = answer.await;
                log::info!("Motion permission: {outcome:?}");
                session.post(HostEvent::Permission(outcome));
            });
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Flick Fish failed to start: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flick Fish (native) starting...");
    log::info!("Native mode plays a scripted headless session - run with `trunk serve` for the web version");

    demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a few flick-and-pull rounds against the virtual clock
#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use flick_fish::platform::MotionSupport;
    use flick_fish::platform::headless::HeadlessHost;
    use flick_fish::{Game, HostEvent, Tuning};
    use glam::Vec3;

    const ROUNDS: u32 = 8;
    const SEED: u64 = 0x5eed_f154;

    let mut game = Game::new(HeadlessHost::new(), MotionSupport::Available, &Tuning::default(), SEED);
    game.start();

    for round in 0..ROUNDS {
        // Let both gesture cooldowns lapse
        game.advance(1000.0);

        let flick = -16.0 - round as f32;
        game.dispatch(HostEvent::Motion(Vec3::new(0.0, 0.0, flick)));
        game.advance_until_bite();
        game.advance(250.0);
        game.dispatch(HostEvent::Motion(Vec3::new(0.0, 0.0, 18.0)));
    }

    let stats = game.host().stats();
    println!(
        "\nCaught {} of {ROUNDS} fish ({} frames rendered)",
        game.state().score,
        stats.frames_rendered
    );
}
