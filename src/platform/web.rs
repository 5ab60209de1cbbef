//! Browser entry point
//!
//! Everything here is single-threaded and callback driven. The frame
//! callback and key listeners share the `App` through `Rc<RefCell<_>>`;
//! `MazeHandle::teardown` breaks those cycles.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, Window};

use crate::frame::{FrameDriver, FrameLoop, FrameScheduler};
use crate::render::{DisplayList, Painter};
use crate::renderer::{CanvasTransform, RenderState};
use crate::settings::Settings;

type FrameCallback = Closure<dyn FnMut(f64)>;
type KeyCallback = Closure<dyn FnMut(KeyboardEvent)>;

/// `requestAnimationFrame` as a frame scheduler
pub struct AnimationFrames {
    window: Window,
    /// Filled once the app exists; emptied on teardown
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameScheduler for AnimationFrames {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {e:?}");
        }
    }
}

/// Game instance holding all state
struct App {
    driver: FrameDriver,
    frames: FrameLoop<AnimationFrames>,
    /// `None` when no GPU surface could be created; frames are skipped
    gpu: Option<RenderState>,
    /// Element that receives the overlay text, if the page has one
    overlay: Option<Element>,
    display: DisplayList,
}

impl App {
    fn on_frame(&mut self, timestamp: f64) {
        let Self {
            driver,
            frames,
            gpu,
            overlay,
            display,
        } = self;

        frames.on_frame(|| {
            let painter = match gpu {
                Some(_) => Some(&mut *display as &mut dyn Painter),
                None => None,
            };
            driver.frame(timestamp, painter);

            if let Some(gpu) = gpu.as_mut() {
                present(gpu, display);
                update_overlay(overlay.as_ref(), display);
            }
        });
    }
}

/// Submit the recorded frame to the GPU
fn present(gpu: &mut RenderState, display: &DisplayList) {
    match gpu.render(display) {
        Ok(_) => {}
        Err(wgpu::SurfaceError::Lost) => {
            gpu.resize(gpu.size.0, gpu.size.1);
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            log::error!("Out of memory!");
        }
        Err(e) => log::warn!("Render error: {:?}", e),
    }
}

/// Mirror the text commands into the overlay element
fn update_overlay(overlay: Option<&Element>, display: &DisplayList) {
    if let Some(el) = overlay {
        let text = display.text_lines().collect::<Vec<_>>().join("\n");
        el.set_text_content(Some(&text));
    }
}

/// Key listeners registered on the window
struct Listeners {
    window: Window,
    keydown: KeyCallback,
    keyup: KeyCallback,
}

impl Listeners {
    fn attach(window: &Window, app: &Rc<RefCell<App>>) -> Result<Self, JsValue> {
        let keydown = {
            let app = app.clone();
            KeyCallback::new(move |event: KeyboardEvent| {
                if app.borrow_mut().driver.key_down(&event.key()) {
                    event.prevent_default();
                }
            })
        };
        let keyup = {
            let app = app.clone();
            KeyCallback::new(move |event: KeyboardEvent| {
                if app.borrow_mut().driver.key_up(&event.key()) {
                    event.prevent_default();
                }
            })
        };

        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;

        Ok(Self {
            window: window.clone(),
            keydown,
            keyup,
        })
    }

    fn detach(self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("keyup", self.keyup.as_ref().unchecked_ref());
    }
}

/// A running game; call `teardown` (or `free`) to stop it
#[wasm_bindgen]
pub struct MazeHandle {
    app: Rc<RefCell<App>>,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    listeners: Option<Listeners>,
}

#[wasm_bindgen]
impl MazeHandle {
    /// Stop the frame loop and remove every listener
    ///
    /// The pending animation frame is cancelled exactly once; later calls
    /// do nothing.
    pub fn teardown(&mut self) {
        let Some(listeners) = self.listeners.take() else {
            return;
        };
        self.app.borrow_mut().frames.teardown();
        listeners.detach();
        self.frame_callback.borrow_mut().take();
        log::info!("Echo Maze stopped");
    }

    /// Same as pressing R
    pub fn reset(&self) {
        self.app.borrow_mut().driver.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.app.borrow().frames.is_running()
    }
}

impl Drop for MazeHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn init_gpu(canvas: HtmlCanvasElement, settings: &Settings) -> Result<RenderState, String> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });

    let (width, height) = (canvas.width(), canvas.height());
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
        .map_err(|e| format!("failed to create surface: {e}"))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| format!("failed to get adapter: {e}"))?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    RenderState::new(
        surface,
        &adapter,
        width,
        height,
        CanvasTransform::new(settings.canvas_width, settings.canvas_height),
    )
    .await
    .map_err(|e| format!("failed to create device: {e}"))
}

/// Start the game on the canvas with id `canvas_id`
///
/// Text goes to the element `<canvas_id>-overlay` when the page has one.
#[wasm_bindgen]
pub async fn start(canvas_id: String) -> Result<MazeHandle, JsValue> {
    console_error_panic_hook::set_once();
    // A second start on the same page finds the logger already installed
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Echo Maze starting...");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(&canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{canvas_id}`")))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("`{canvas_id}` is not a canvas")))?;

    let settings = Settings::load();
    canvas.set_width(settings.canvas_width as u32);
    canvas.set_height(settings.canvas_height as u32);

    let gpu = match init_gpu(canvas, &settings).await {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            log::error!("No drawing surface, frames will be skipped: {e}");
            None
        }
    };

    let frame_callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let app = Rc::new(RefCell::new(App {
        driver: FrameDriver::new(&settings),
        frames: FrameLoop::new(AnimationFrames {
            window: window.clone(),
            callback: frame_callback.clone(),
        }),
        gpu,
        overlay: document.get_element_by_id(&format!("{canvas_id}-overlay")),
        display: DisplayList::new(),
    }));

    {
        let app = app.clone();
        *frame_callback.borrow_mut() = Some(FrameCallback::new(move |timestamp: f64| {
            app.borrow_mut().on_frame(timestamp);
        }));
    }

    let listeners = match Listeners::attach(&window, &app) {
        Ok(listeners) => listeners,
        Err(e) => {
            frame_callback.borrow_mut().take();
            return Err(e);
        }
    };
    app.borrow_mut().frames.start();

    log::info!("Echo Maze running!");

    Ok(MazeHandle {
        app,
        frame_callback,
        listeners: Some(listeners),
    })
}
