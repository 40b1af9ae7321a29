use crate::constants::TOGGLE_AUDIO_ID;
use crate::core::{InputEvent, InputQueue};
use crate::dom;
use crate::input;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub queue: Rc<RefCell<InputQueue>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_wheel(&w);
    wire_click(&w);
    wire_resize(&w);
    wire_toggle_audio(&w);
}

fn wire_wheel(w: &InputWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let queue = w.queue.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        queue.borrow_mut().push(InputEvent::Wheel {
            delta_y: ev.delta_y() as f32,
        });
    }) as Box<dyn FnMut(_)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

// On the canvas only, so clicks on the toggle button or an open popup never pick.
fn wire_click(w: &InputWiring) {
    let canvas = w.canvas.clone();
    let queue = w.queue.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let rect = canvas.get_bounding_client_rect();
        let pos = input::client_to_canvas_px(
            Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
            [
                rect.left() as f32,
                rect.top() as f32,
                rect.width() as f32,
                rect.height() as f32,
            ],
            (canvas.width(), canvas.height()),
        );
        queue
            .borrow_mut()
            .push(InputEvent::Click { x: pos.x, y: pos.y });
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(w: &InputWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let canvas = w.canvas.clone();
    let queue = w.queue.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = dom::sync_canvas_backing_size(&canvas);
        queue
            .borrow_mut()
            .push(InputEvent::Resize { width, height });
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_toggle_audio(w: &InputWiring) {
    let queue = w.queue.clone();
    dom::add_click_listener(&w.document, TOGGLE_AUDIO_ID, move || {
        queue.borrow_mut().push(InputEvent::ToggleAudio);
    });
}
