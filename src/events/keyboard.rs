use crate::input;
use crate::overlay;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Enter on the loading screen hides it and calls `on_start`.
///
/// `on_start` may fire more than once if the page re-shows the loading
/// screen; callers guard their own start-up.
pub fn wire_start_key(document: &web::Document, mut on_start: impl FnMut() + 'static) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if !input::is_start_key(&ev.key(), ev.key_code()) {
            return;
        }
        if overlay::is_loading_screen_hidden(&doc) {
            return;
        }
        log::info!("Enter key pressed, starting scene");
        overlay::hide_loading_screen(&doc);
        on_start();
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
