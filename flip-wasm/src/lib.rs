//! Browser front end: renders a [`flip_core::Session`] onto a canvas and
//! wires the page controls to it.

use std::cell::RefCell;
use std::rc::Rc;

use flip_core::{Click, EngineConfig, FlipError, LevelRepository, MoveOutcome, Session, Side};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, Document, Element, HtmlElement, HtmlTextAreaElement, MouseEvent, Url};

mod canvas;
mod constants;
mod state;
mod storage;
mod upload;
mod utils;

use canvas::{draw_board, event_cell, init_canvas};
use constants::PERFECT_SCORE;
use state::{STATE, State};
use storage::{load_progress, save_progress};
use utils::{
    asset_url, config_from_query, escape_html, fetch_text_with_fallbacks, init_logging, log,
    start_level_from_query,
};

const BUNDLED_LEVELS: &str = include_str!("../../levels.json");

fn draw(state: &State) {
    draw_board(&state.ctx, &state.canvas, &state.session.view());
}

/// Redraw the board and every DOM element that mirrors session state.
fn refresh(state: &State) {
    update_status_dom(state);
    update_level_list(state);
    draw(state);
}

fn update_status_dom(state: &State) {
    let Some(el) = state.document.get_element_by_id("status") else {
        return;
    };
    let view = state.session.view();
    let mut text = format!("Moves: {} / Par: {}", view.moves, view.par);
    if let Some(best) = view.best_moves {
        text.push_str(&format!(" / Best: {}", best));
    }
    if view.cleared {
        text.push_str(" / Cleared!");
    }
    if let Some(side) = view.turn {
        let who = match side {
            Side::White => "White",
            Side::Black => "Black",
        };
        text.push_str(&format!(" / {} to move", who));
    }
    el.set_text_content(Some(&text));

    set_disabled(&state.document, "undoBtn", !view.can_undo);
    set_disabled(&state.document, "nextBtn", !view.has_next || !view.cleared);
}

fn set_disabled(doc: &Document, id: &str, disabled: bool) {
    if let Some(el) = doc.get_element_by_id(id) {
        if disabled {
            let _ = el.set_attribute("disabled", "");
        } else {
            let _ = el.remove_attribute("disabled");
        }
    }
}

fn update_level_list(state: &State) {
    let Some(el) = state.document.get_element_by_id("levelList") else {
        return;
    };
    let repo = state.session.repository();
    let current = state.session.current_index();
    let mut html = String::new();
    for (i, level) in repo.levels().iter().enumerate() {
        let unlocked = repo.is_unlocked(i);
        let mut class = String::from("levelCard");
        if !unlocked {
            class.push_str(" locked");
        }
        if current == Some(i) {
            class.push_str(" current");
        }
        let score = match level.best_moves {
            Some(best) if level.is_perfect() => format!(
                "<span style=\"color:{}\">{} / {}</span>",
                PERFECT_SCORE, best, level.par
            ),
            Some(best) => format!("{} / {}", best, level.par),
            None => format!("- / {}", level.par),
        };
        let style = if unlocked { "" } else { " style=\"opacity:.4\"" };
        html.push_str(&format!(
            "<div class=\"{}\" data-index=\"{}\"{}><div>{}. {}</div><div>{}</div></div>",
            class,
            i,
            style,
            i + 1,
            escape_html(&level.id),
            score
        ));
    }
    el.set_inner_html(&html);
}

fn update_editor(state: &State) {
    if let Some(el) = state.document.get_element_by_id("levelEditor")
        && let Ok(area) = el.dyn_into::<HtmlTextAreaElement>()
    {
        area.set_value(&state.session.level().to_compact_json());
    }
}

fn persist_progress(state: &State) {
    if let Err(e) = save_progress(&state.window, &state.session.repository().progress()) {
        log(&format!("Failed to save progress: {:?}", e));
    }
}

/// Parse `text` as a custom level and play it; alerts when it is malformed.
pub(crate) fn load_custom_text(state: &mut State, text: &str) {
    match state.session.load_custom(text) {
        Ok(()) => {
            update_editor(state);
            refresh(state);
        }
        Err(e) => {
            log(&format!("Rejected custom level: {e}"));
            let _ = state.window.alert_with_message(&e.to_string());
        }
    }
}

fn open_level(state: &mut State, index: usize) {
    match state.session.load_level(index) {
        Ok(()) => {
            update_editor(state);
            refresh(state);
        }
        Err(FlipError::LevelLocked { .. }) => {
            let _ = state
                .window
                .alert_with_message("Clear the previous level to unlock this one.");
        }
        Err(e) => log(&format!("Failed to open level {}: {e}", index + 1)),
    }
}

/// Build a session from a level pack, merging stored best scores and
/// honouring `?level=`.
fn session_from_pack(
    window: &web_sys::Window,
    text: &str,
    config: EngineConfig,
) -> Result<Session, FlipError> {
    let mut repo = LevelRepository::from_json(text)?;
    let matched = repo.apply_progress(&load_progress(window));
    tracing::debug!(levels = repo.len(), matched, "level pack ready");
    let mut session = Session::new(repo, config)?;
    let search = window.location().search().unwrap_or_default();
    if let Some(index) = start_level_from_query(&search)
        && let Err(e) = session.load_level(index)
    {
        log(&format!("Ignoring ?level={}: {e}", index + 1));
    }
    Ok(session)
}

fn save_text_as_file(document: &Document, filename: &str, text: &str) -> Result<(), JsValue> {
    let array = Array::new();
    array.push(&JsValue::from_str(text));
    let blob = Blob::new_with_str_sequence(&array)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let a = document.create_element("a")?.dyn_into::<HtmlElement>()?;
    a.set_attribute("href", &url)?;
    a.set_attribute("download", filename)?;
    a.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}

fn on_button(
    doc: &Document,
    id: &str,
    state: &Rc<RefCell<State>>,
    action: fn(&mut State),
) -> Result<(), JsValue> {
    if let Some(btn) = doc.get_element_by_id(id) {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            action(&mut st.borrow_mut());
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
    Ok(())
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    upload::attach_file_input(state.clone())?;

    on_button(&doc, "undoBtn", &state, |s| {
        if s.session.undo() {
            refresh(s);
        }
    })?;
    on_button(&doc, "restartBtn", &state, |s| {
        s.session.restart();
        refresh(s);
    })?;
    on_button(&doc, "nextBtn", &state, |s| match s.session.load_next_level() {
        Ok(true) => {
            update_editor(s);
            refresh(s);
        }
        Ok(false) => log("No next level"),
        Err(e) => log(&format!("Cannot advance: {e}")),
    })?;
    on_button(&doc, "loadLevelBtn", &state, |s| {
        let text = s
            .document
            .get_element_by_id("levelEditor")
            .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
            .map(|area| area.value())
            .unwrap_or_default();
        load_custom_text(s, &text);
    })?;
    on_button(&doc, "exportLevelBtn", &state, |s| {
        let level = s.session.level();
        let name = format!("{}.json", level.id);
        if let Err(e) = save_text_as_file(&s.document, &name, &level.to_compact_json()) {
            log(&format!("Export failed: {:?}", e));
        }
    })?;

    // Level cards are rebuilt on every refresh, so listen on the container.
    if let Some(list) = doc.get_element_by_id("levelList") {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let Some(card) = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".levelCard").ok().flatten())
            else {
                return;
            };
            if let Some(index) = card
                .get_attribute("data-index")
                .and_then(|v| v.parse::<usize>().ok())
            {
                open_level(&mut st.borrow_mut(), index);
            }
        }));
        list.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let (x, y) = event_cell(&e, &s.canvas);
            match s.session.click(x, y) {
                Click::Move(MoveOutcome::Moved(report)) => {
                    if report.new_best {
                        persist_progress(&s);
                    }
                    refresh(&s);
                }
                Click::Select(_) => draw(&s),
                Click::Move(_) | Click::Ignored => {}
            }
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_logging();
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = init_canvas(&document)?;

    let search = window.location().search().unwrap_or_default();
    let config = config_from_query(&search);
    let session = session_from_pack(&window, BUNDLED_LEVELS, config)
        .map_err(|e| JsValue::from_str(&format!("bundled levels: {e}")))?;

    let state = Rc::new(RefCell::new(State {
        window: window.clone(),
        document,
        canvas,
        ctx,
        session,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    attach_ui(state.clone())?;
    {
        let s = state.borrow();
        update_editor(&s);
        refresh(&s);
    }

    // A served levels.json takes precedence over the bundled copy.
    wasm_bindgen_futures::spawn_local(async move {
        let Some(text) = fetch_text_with_fallbacks(
            &window,
            &[&asset_url("levels.json"), "/levels.json", "levels.json"],
        )
        .await
        else {
            log("Using bundled levels");
            return;
        };
        if text == BUNDLED_LEVELS {
            return;
        }
        let mut s = state.borrow_mut();
        match session_from_pack(&window, &text, *s.session.config()) {
            Ok(session) => {
                s.session = session;
                update_editor(&s);
                refresh(&s);
            }
            Err(e) => log(&format!("Served levels.json rejected: {e}")),
        }
    });
    Ok(())
}

/// Snapshot of the live board as JSON, for page scripts.
#[wasm_bindgen]
pub fn board_view_json() -> Option<String> {
    STATE.with(|st| {
        let st = st.borrow();
        let s = st.as_ref()?.try_borrow().ok()?;
        serde_json::to_string(&s.session.view()).ok()
    })
}
