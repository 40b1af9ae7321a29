//! Browser-side asset loading feeding the shared readiness registry.

use crate::constants::FONT_URL;
use crate::core::{layout, AssetError, AssetId, AssetRegistry, ObjectRegistry, TunnelParams};
use crate::dom::{self, js_err};
use crate::labels;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type SharedRegistry = Rc<RefCell<AssetRegistry>>;

/// Decoded pictures waiting for the renderer, keyed by picture index.
pub type LoadedImages = Rc<RefCell<Vec<(usize, web::HtmlImageElement)>>>;

pub const FONT: AssetId = AssetId::font(0);

/// Register everything up front so progress totals are stable.
pub fn register_all(registry: &mut AssetRegistry, params: &TunnelParams) -> Result<(), AssetError> {
    for i in 0..params.picture_count {
        registry.register(AssetId::texture(i), layout::texture_url(i))?;
    }
    for i in 0..params.audio_track_count {
        registry.register(AssetId::audio(i), layout::audio_url(i))?;
    }
    registry.register(FONT, FONT_URL)?;
    Ok(())
}

/// Record a load outcome and report progress.
pub fn settle(registry: &SharedRegistry, id: AssetId, outcome: Result<(), String>) {
    let mut reg = registry.borrow_mut();
    let url = reg.url(id).unwrap_or_default().to_string();
    let result = match outcome {
        Ok(()) => reg.mark_ready(id),
        Err(reason) => {
            log::error!("There was an error loading {}: {}", url, reason);
            reg.mark_failed(id, reason)
        }
    };
    match result {
        Ok(p) => {
            log::info!("{}", labels::progress_line(&url, p.loaded, p.total));
            if p.is_complete() {
                if p.failed == 0 {
                    log::info!("All assets loaded.");
                } else {
                    log::warn!("All assets settled; {} failed.", p.failed);
                }
            }
        }
        Err(e) => log::warn!("[assets] {}", e),
    }
}

/// Load picture images; each ready image adds its pickable panel and is
/// queued for upload.
pub fn load_textures(
    registry: SharedRegistry,
    objects: Rc<RefCell<ObjectRegistry>>,
    loaded: LoadedImages,
    count: usize,
) {
    for i in 0..count {
        let img = match web::HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                settle(&registry, AssetId::texture(i), Err(format!("{:?}", e)));
                continue;
            }
        };

        let reg_ok = registry.clone();
        let objects_ok = objects.clone();
        let loaded_ok = loaded.clone();
        let img_keep = img.clone();
        let onload = Closure::wrap(Box::new(move || {
            loaded_ok.borrow_mut().push((i, img_keep.clone()));
            objects_ok.borrow_mut().register(layout::picture_object(i));
            settle(&reg_ok, AssetId::texture(i), Ok(()));
        }) as Box<dyn FnMut()>);

        let reg_err = registry.clone();
        let onerror = Closure::wrap(Box::new(move || {
            settle(&reg_err, AssetId::texture(i), Err("image failed to load".into()));
        }) as Box<dyn FnMut()>);

        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();
        img.set_src(&layout::texture_url(i));
    }
}

/// The font only gates marker visibility; its glyphs are not rasterized.
pub fn load_font(registry: SharedRegistry) {
    spawn_local(async move {
        let outcome = async {
            let resp = dom::fetch_ok(FONT_URL).await?;
            wasm_bindgen_futures::JsFuture::from(resp.json().map_err(js_err)?)
                .await
                .map_err(js_err)?;
            anyhow::Ok(())
        }
        .await;
        settle(&registry, FONT, outcome.map_err(|e| e.to_string()));
    });
}
