use crate::assets::{LoadedImages, SharedRegistry, FONT};
use crate::audio::TrackPlayer;
use crate::core::{
    layout, Camera, Driver, EffectCommand, FrameOutput, FrameSink, InputQueue,
    InteractiveObject, LineCurve, Mesh, ObjectRegistry,
};
use crate::overlay;
use crate::render;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub driver: Driver<LineCurve>,
    pub queue: Rc<RefCell<InputQueue>>,
    pub assets: SharedRegistry,
    pub objects: Rc<RefCell<ObjectRegistry>>,
    pub images: LoadedImages,
    pub player: Rc<RefCell<TrackPlayer>>,
    pub document: web::Document,
    pub gpu: Option<render::GpuState<'a>>,
    pub markers_shown: bool,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let input = self.queue.borrow_mut().take_frame();
        self.upload_pictures();
        self.show_markers();

        let assets = self.assets.borrow();
        let objects = self.objects.borrow();
        let mut sink = SceneSink {
            gpu: self.gpu.as_mut(),
            player: &self.player,
            document: &self.document,
        };
        self.driver.tick(input, &*assets, &objects, &mut sink);
    }

    // images wait in the queue until the renderer exists
    fn upload_pictures(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        let pending: Vec<_> = self.images.borrow_mut().drain(..).collect();
        for (index, image) in pending {
            match gpu.add_picture(&layout::picture_object(index), &image) {
                Ok(()) => log::debug!("[frame] picture {} uploaded", index),
                Err(e) => log::error!("[frame] picture {} not shown: {:?}", index, e),
            }
        }
    }

    // marker bars appear once the font is in
    fn show_markers(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        if self.markers_shown || !self.assets.borrow().is_ready(FONT) {
            return;
        }
        self.markers_shown = true;
        let mesh: Mesh = layout::marker_mesh(self.driver.path(), self.driver.table());
        log::debug!("[frame] {} segment markers placed", self.driver.table().len());
        gpu.set_markers(&mesh);
    }
}

/// Applies one tick's side effects to the renderer, the audio player and the DOM.
struct SceneSink<'s, 'a> {
    gpu: Option<&'s mut render::GpuState<'a>>,
    player: &'s RefCell<TrackPlayer>,
    document: &'s web::Document,
}

impl FrameSink for SceneSink<'_, '_> {
    fn apply_effect(&mut self, command: &EffectCommand) {
        match *command {
            EffectCommand::SetTubeColor(c) => {
                if let Some(g) = self.gpu.as_mut() {
                    g.set_tube_color(c);
                }
            }
            EffectCommand::SetBackgroundColor(c) => {
                if let Some(g) = self.gpu.as_mut() {
                    g.set_clear_color(c);
                }
            }
            EffectCommand::StartTrack(_) => {
                self.player.borrow_mut().apply(command);
                overlay::set_toggle_label(self.document, true);
            }
            _ => self.player.borrow_mut().apply(command),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(g) = self.gpu.as_mut() {
            g.resize_if_needed(width, height);
        }
    }

    fn show_picked(&mut self, object: &InteractiveObject) {
        overlay::show_popup(self.document, object.position);
    }

    fn playback_changed(&mut self, playing: bool) {
        overlay::set_toggle_label(self.document, playing);
    }

    fn draw(&mut self, camera: &Camera, _frame: &FrameOutput) {
        if let Some(g) = self.gpu.as_mut() {
            g.set_camera(camera);
            if let Err(e) = g.render() {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    tube: &Mesh,
    fog_density: f32,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, tube, fog_density).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
