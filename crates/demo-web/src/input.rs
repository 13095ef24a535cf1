//! Orbit-control input: left drag rotates, right (or shift) drag pans, the
//! wheel dollies.

use demo_render::DemoApp;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub mode: Option<DragMode>,
    pub last: Vec2,
    pub pointer_id: i32,
}

#[inline]
pub fn drag_mode(button: i16, shift: bool) -> Option<DragMode> {
    match button {
        0 if shift => Some(DragMode::Pan),
        0 => Some(DragMode::Rotate),
        2 => Some(DragMode::Pan),
        _ => None,
    }
}

/// Pointer position in CSS pixels relative to the canvas.
#[inline]
pub fn pointer_css_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(_)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

pub fn attach(canvas: &web::HtmlCanvasElement, app: Rc<RefCell<DemoApp<'static>>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    let target: &web::EventTarget = canvas.as_ref();

    {
        let drag = drag.clone();
        let canvas_m = canvas.clone();
        listen(target, "pointerdown", move |ev: web::PointerEvent| {
            let Some(mode) = drag_mode(ev.button(), ev.shift_key()) else {
                return;
            };
            let mut ds = drag.borrow_mut();
            ds.mode = Some(mode);
            ds.last = pointer_css_px(&ev, &canvas_m);
            ds.pointer_id = ev.pointer_id();
            canvas_m.set_pointer_capture(ev.pointer_id()).ok();
            ev.prevent_default();
        });
    }

    {
        let drag = drag.clone();
        let app = app.clone();
        let canvas_m = canvas.clone();
        listen(target, "pointermove", move |ev: web::PointerEvent| {
            let mut ds = drag.borrow_mut();
            let Some(mode) = ds.mode else {
                return;
            };
            if ev.pointer_id() != ds.pointer_id {
                return;
            }
            let pos = pointer_css_px(&ev, &canvas_m);
            let delta = pos - ds.last;
            ds.last = pos;
            let mut app = app.borrow_mut();
            match mode {
                DragMode::Rotate => app.orbit(delta.x, delta.y),
                DragMode::Pan => app.pan(delta.x, delta.y),
            }
        });
    }

    for event in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        let canvas_m = canvas.clone();
        listen(target, event, move |ev: web::PointerEvent| {
            let mut ds = drag.borrow_mut();
            if ds.mode.is_some() && ev.pointer_id() == ds.pointer_id {
                ds.mode = None;
                canvas_m.release_pointer_capture(ev.pointer_id()).ok();
            }
        });
    }

    {
        let app = app.clone();
        listen(target, "wheel", move |ev: web::WheelEvent| {
            app.borrow_mut().zoom(ev.delta_y() as f32);
            ev.prevent_default();
        });
    }

    // right-drag pans; keep the browser menu out of the way
    listen(target, "contextmenu", |ev: web::MouseEvent| ev.prevent_default());
}
