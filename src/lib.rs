#![cfg(target_arch = "wasm32")]
use crate::core::{
    tube_mesh, AssetRegistry, Driver, Frames, InputQueue, ObjectRegistry, TunnelParams,
    FRAME_SAMPLES,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod labels;
mod overlay;
mod render;

static STARTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tunnel-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    events::wire_start_key(&document, || {
        if STARTED.swap(true, Ordering::SeqCst) {
            return;
        }
        spawn_local(async move {
            if let Err(e) = start_scene().await {
                log::error!("scene start error: {:?}", e);
            }
        });
    });
    Ok(())
}

async fn start_scene() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let params = TunnelParams::default();
    let driver = Driver::straight(params.clone(), width, height)?;

    // Enter keypress is the user gesture that lets the context start running
    let audio_ctx = web::AudioContext::new().map_err(dom::js_err)?;
    _ = audio_ctx.resume();
    let player = Rc::new(RefCell::new(audio::TrackPlayer::new(
        audio_ctx,
        params.audio_track_count,
    )?));

    let registry: assets::SharedRegistry = Rc::new(RefCell::new(AssetRegistry::new()));
    let objects = Rc::new(RefCell::new(ObjectRegistry::new()));
    assets::register_all(&mut registry.borrow_mut(), &params)?;
    log::info!(
        "[assets] {} registered",
        registry.borrow().progress().total
    );
    let images: assets::LoadedImages = Rc::new(RefCell::new(Vec::new()));
    assets::load_textures(
        registry.clone(),
        objects.clone(),
        images.clone(),
        params.picture_count,
    );
    audio::load_tracks(player.clone(), registry.clone(), params.audio_track_count);
    assets::load_font(registry.clone());

    let queue = Rc::new(RefCell::new(InputQueue::new()));
    events::wire_input_handlers(events::InputWiring {
        document: document.clone(),
        canvas: canvas.clone(),
        queue: queue.clone(),
    });

    let curve = driver.path().curve();
    let frames = Frames::build(curve, FRAME_SAMPLES);
    let tube = tube_mesh(
        curve,
        &frames,
        params.tubular_segments,
        params.radial_segments,
        params.tube_radius,
    );
    let gpu = frame::init_gpu(&canvas, &tube, params.fog_density).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        driver,
        queue,
        assets: registry,
        objects,
        images,
        player,
        document,
        gpu,
        markers_shown: false,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
