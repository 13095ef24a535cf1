use crate::dom::CanvasSurface;
use demo_core::Experience;
use demo_render::DemoApp;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebExperience = Experience<CanvasSurface, DemoApp<'static>>;

/// Drive `experience.tick()` from `requestAnimationFrame` until the surface
/// is lost for good.
pub fn start_loop(experience: Rc<RefCell<WebExperience>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut experience = experience.borrow_mut();
        experience.tick();
        if experience.hooks().borrow().is_surface_lost() {
            log::error!("[render] surface lost; stopping the frame loop");
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
