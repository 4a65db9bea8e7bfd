use std::cell::RefCell;
use std::rc::Rc;

use flip_core::Session;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

/// Runtime state shared by the browser callbacks through `Rc<RefCell<_>>`.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub session: Session,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
