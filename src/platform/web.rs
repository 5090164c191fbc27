//! Browser host
//!
//! Every browser callback (timer, animation frame, motion sample, tap,
//! permission answer) is turned into a [`HostEvent`] and posted to the
//! [`Session`], which feeds them to the game strictly one at a time.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Window};

use super::{
    Clock, Feedback, FeedbackPattern, FrameClock, FrameHandle, MotionSupport, OrientationSensor,
    PermissionOutcome, Renderer, StatusSink, TimerHandle, Timers,
};
use crate::audio::ToneAudio;
use crate::game::{Game, HostEvent};
use crate::renderer::{FrameState, SceneRenderer};

#[wasm_bindgen(inline_js = "
    export function motion_support() {
        if (typeof DeviceMotionEvent === 'undefined') return 0;
        if (typeof DeviceMotionEvent.requestPermission === 'function') return 1;
        return 2;
    }

    export function request_motion_permission() {
        try {
            return DeviceMotionEvent.requestPermission();
        } catch (e) {
            return Promise.reject(e);
        }
    }
")]
extern "C" {
    fn motion_support() -> u32;
    fn request_motion_permission() -> js_sys::Promise;
}

pub fn detect_motion_support() -> MotionSupport {
    match motion_support() {
        0 => MotionSupport::Absent,
        1 => MotionSupport::NeedsPermission,
        _ => MotionSupport::Available,
    }
}

/// Ask for motion access. Must be called from a user gesture handler: the
/// browser request is issued synchronously, only the answer is awaited.
pub fn request_permission() -> impl Future<Output = PermissionOutcome> {
    let promise = request_motion_permission();
    async move {
        match JsFuture::from(promise).await {
            Ok(answer) if answer.as_string().as_deref() == Some("granted") => {
                PermissionOutcome::Granted
            }
            Ok(answer) => {
                log::info!("Motion permission answer: {answer:?}");
                PermissionOutcome::Denied
            }
            Err(e) => PermissionOutcome::Error(format!("{e:?}")),
        }
    }
}

// ============================================================================
// SESSION (single-threaded event queue)
// ============================================================================

pub struct Session {
    game: RefCell<Game<WebHost>>,
    queue: RefCell<VecDeque<HostEvent>>,
}

impl Session {
    /// Build the game around a host that can post back into this session
    pub fn new(
        host: WebHostParts,
        build: impl FnOnce(WebHost) -> Game<WebHost>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|session: &Weak<Session>| Session {
            game: RefCell::new(build(WebHost::new(session.clone(), host))),
            queue: RefCell::new(VecDeque::new()),
        })
    }

    /// Queue an event and process the queue unless a dispatch is already
    /// running further up the stack (it will pick the event up).
    pub fn post(&self, event: HostEvent) {
        self.queue.borrow_mut().push_back(event);

        let Ok(mut game) = self.game.try_borrow_mut() else {
            return;
        };
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else { break };
            game.dispatch(event);
        }
    }

    pub fn start(&self) {
        self.game.borrow_mut().start();
    }

    /// Run host-side maintenance (resize, audio unlock) outside dispatch
    pub fn with_host<R>(&self, f: impl FnOnce(&mut WebHost) -> R) -> Option<R> {
        let mut game = self.game.try_borrow_mut().ok()?;
        Some(f(game.host_mut()))
    }
}

// ============================================================================
// WEB HOST
// ============================================================================

/// DOM/GPU handles the host is built from
pub struct WebHostParts {
    pub window: Window,
    pub status: Option<Element>,
    pub renderer: SceneRenderer,
}

pub struct WebHost {
    session: Weak<Session>,
    window: Window,
    status: Option<Element>,
    renderer: SceneRenderer,
    audio: ToneAudio,
    can_vibrate: bool,
    next_id: u32,
    /// Our handle id -> browser timeout id
    timers: Rc<RefCell<HashMap<u32, i32>>>,
    /// Our handle id -> browser animation frame id
    frames: Rc<RefCell<HashMap<u32, i32>>>,
}

impl WebHost {
    fn new(session: Weak<Session>, parts: WebHostParts) -> Self {
        let can_vibrate =
            js_sys::Reflect::has(&parts.window.navigator(), &JsValue::from_str("vibrate"))
                .unwrap_or(false);
        if !can_vibrate {
            log::info!("No vibration support - using tone feedback");
        }

        Self {
            session,
            window: parts.window,
            status: parts.status,
            renderer: parts.renderer,
            audio: ToneAudio::new(),
            can_vibrate,
            next_id: 0,
            timers: Rc::new(RefCell::new(HashMap::new())),
            frames: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    pub fn resume_audio(&self) {
        self.audio.resume();
    }

    fn next_id(&mut self) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }

    fn vibrate(&self, pattern: FeedbackPattern) -> bool {
        let navigator = self.window.navigator();
        match pattern.vibration_ms() {
            [ms] => navigator.vibrate_with_duration(*ms),
            steps => {
                let steps: js_sys::Array = steps.iter().map(|&ms| JsValue::from(ms)).collect();
                navigator.vibrate_with_pattern(&steps)
            }
        }
    }
}

impl Clock for WebHost {
    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

impl OrientationSensor for WebHost {
    fn orientation_angle(&self) -> i32 {
        let screen_angle = self
            .window
            .screen()
            .ok()
            .and_then(|screen| screen.orientation().angle().ok())
            .map(i32::from);

        // Older iOS only has the deprecated window.orientation
        screen_angle
            .or_else(|| {
                js_sys::Reflect::get(&self.window, &JsValue::from_str("orientation"))
                    .ok()
                    .and_then(|v| v.as_f64())
                    .map(|a| a as i32)
            })
            .unwrap_or(0)
    }
}

impl Timers for WebHost {
    fn schedule_once(&mut self, delay_ms: f64) -> TimerHandle {
        let id = self.next_id();
        let handle = TimerHandle(id);
        let session = self.session.clone();
        let timers = Rc::clone(&self.timers);

        let callback = Closure::once_into_js(move || {
            timers.borrow_mut().remove(&id);
            if let Some(session) = session.upgrade() {
                session.post(HostEvent::TimerFired(handle));
            }
        });

        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms.round() as i32,
            ) {
            Ok(browser_id) => {
                self.timers.borrow_mut().insert(id, browser_id);
            }
            Err(e) => log::error!("setTimeout failed: {e:?}"),
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(browser_id) = self.timers.borrow_mut().remove(&handle.0) {
            self.window.clear_timeout_with_handle(browser_id);
        }
    }
}

impl FrameClock for WebHost {
    fn schedule_frame(&mut self) -> FrameHandle {
        let id = self.next_id();
        let handle = FrameHandle(id);
        let session = self.session.clone();
        let frames = Rc::clone(&self.frames);

        let callback = Closure::once_into_js(move |_time: f64| {
            frames.borrow_mut().remove(&id);
            if let Some(session) = session.upgrade() {
                session.post(HostEvent::Frame(handle));
            }
        });

        match self.window.request_animation_frame(callback.unchecked_ref()) {
            Ok(browser_id) => {
                self.frames.borrow_mut().insert(id, browser_id);
            }
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(browser_id) = self.frames.borrow_mut().remove(&handle.0) {
            let _ = self.window.cancel_animation_frame(browser_id);
        }
    }
}

impl Feedback for WebHost {
    fn notify(&mut self, pattern: FeedbackPattern) {
        if !(self.can_vibrate && self.vibrate(pattern)) {
            self.audio.play(pattern);
        }
    }
}

impl Renderer for WebHost {
    fn render(&mut self, frame: &FrameState) {
        match self.renderer.render(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl StatusSink for WebHost {
    fn set_status(&mut self, text: &str) {
        if let Some(el) = &self.status {
            el.set_text_content(Some(text));
        }
    }
}
