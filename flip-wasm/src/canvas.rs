use flip_core::{BoardView, Cell, Side};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent};

use crate::constants::*;

// Non-deprecated helpers to set canvas styles via property assignment.
pub fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(color),
    );
}

pub fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(color),
    );
}

pub fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id("board")
        .ok_or_else(|| JsValue::from_str("canvas #board not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

/// Board cell under the pointer, accounting for CSS scaling of the canvas.
pub fn event_cell(e: &MouseEvent, cv: &HtmlCanvasElement) -> (i32, i32) {
    let rect = cv.get_bounding_client_rect();
    let sx = cv.width() as f64 / rect.width().max(1.0);
    let sy = cv.height() as f64 / rect.height().max(1.0);
    let px = (e.client_x() as f64 - rect.left()) * sx;
    let py = (e.client_y() as f64 - rect.top()) * sy;
    ((px / CELL_SIZE).floor() as i32, (py / CELL_SIZE).floor() as i32)
}

fn cell_origin(x: i32, y: i32) -> (f64, f64) {
    (x as f64 * CELL_SIZE, y as f64 * CELL_SIZE)
}

pub fn draw_board(ctx: &CanvasRenderingContext2d, cv: &HtmlCanvasElement, view: &BoardView) {
    let w = (view.width as f64 * CELL_SIZE) as u32;
    let h = (view.height as f64 * CELL_SIZE) as u32;
    if cv.width() != w {
        cv.set_width(w);
    }
    if cv.height() != h {
        cv.set_height(h);
    }
    ctx.clear_rect(0.0, 0.0, w as f64, h as f64);

    set_stroke_style(ctx, GRID_LINE);
    ctx.set_line_width(1.0);
    for (y, row) in view.grid.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let (px, py) = cell_origin(x as i32, y as i32);
            let color = match cell {
                Cell::Wall => WALL_SQUARE,
                Cell::Light => LIGHT_SQUARE,
                Cell::Dark => DARK_SQUARE,
            };
            set_fill_style(ctx, color);
            ctx.fill_rect(px, py, CELL_SIZE, CELL_SIZE);
            if !cell.is_wall() {
                ctx.stroke_rect(px, py, CELL_SIZE, CELL_SIZE);
            }
        }
    }

    if let Some((sx, sy)) = view.selected {
        let (px, py) = cell_origin(sx, sy);
        set_stroke_style(ctx, SELECTED_OUTLINE);
        ctx.set_line_width(3.0);
        ctx.stroke_rect(px + 1.5, py + 1.5, CELL_SIZE - 3.0, CELL_SIZE - 3.0);
    }

    let size = (CELL_SIZE * 0.6).round();
    ctx.set_font(&format!("bold {}px sans-serif", size));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for p in &view.pieces {
        let (px, py) = cell_origin(p.x, p.y);
        let (fill, outline) = match p.color {
            Some(Side::Black) => ("#111", "#fff"),
            _ => ("#fff", "#111"),
        };
        let (cx, cy) = (px + CELL_SIZE / 2.0, py + CELL_SIZE / 2.0);
        let label = p.kind.letter().to_string();
        ctx.set_line_width((size / 6.0).clamp(2.0, 5.0));
        set_stroke_style(ctx, outline);
        let _ = ctx.stroke_text(&label, cx, cy);
        set_fill_style(ctx, fill);
        let _ = ctx.fill_text(&label, cx, cy);
    }

    for &(tx, ty) in &view.targets {
        let (px, py) = cell_origin(tx, ty);
        let on_dark = view.grid.get(tx, ty) == Some(Cell::Dark);
        set_fill_style(ctx, if on_dark { HINT_ON_DARK } else { HINT_ON_LIGHT });
        ctx.begin_path();
        let _ = ctx.arc(
            px + CELL_SIZE / 2.0,
            py + CELL_SIZE / 2.0,
            HINT_RADIUS,
            0.0,
            std::f64::consts::PI * 2.0,
        );
        ctx.fill();
    }
}
