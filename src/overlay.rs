use crate::constants::{LOADING_SCREEN_ID, TOGGLE_AUDIO_ID};
use crate::labels;
use glam::Vec3;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn hide_loading_screen(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_SCREEN_ID) {
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_loading_screen_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(LOADING_SCREEN_ID)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

#[inline]
pub fn set_toggle_label(document: &web::Document, playing: bool) {
    if let Some(el) = document.get_element_by_id(TOGGLE_AUDIO_ID) {
        el.set_text_content(Some(labels::toggle_label(playing)));
    }
}

/// Centred white box naming the clicked picture's position, closed by its button.
pub fn show_popup(document: &web::Document, position: Vec3) {
    let Some(body) = document.body() else {
        return;
    };
    let Ok(popup) = document.create_element("div") else {
        return;
    };
    _ = popup.set_attribute(
        "style",
        "position:absolute; left:50%; top:50%; transform:translate(-50%, -50%); \
         padding:20px; background-color:white; border:1px solid black;",
    );
    popup.set_inner_html(&labels::popup_html(position));

    if let Ok(close) = document.create_element("button") {
        close.set_inner_html("Close");
        let popup_for_close = popup.clone();
        let closure = Closure::wrap(Box::new(move || {
            popup_for_close.remove();
        }) as Box<dyn FnMut()>);
        _ = close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
        _ = popup.append_child(&close);
    }
    _ = body.append_child(&popup);
}
