//! Best-score persistence in `localStorage`.

use flip_core::Progress;
use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

use crate::constants::PROGRESS_KEY;

fn storage(window: &Window) -> Option<Storage> {
    window.local_storage().ok().flatten()
}

/// Stored progress; empty when storage is unavailable or unreadable.
pub fn load_progress(window: &Window) -> Vec<Progress> {
    let Some(text) = storage(window).and_then(|s| s.get_item(PROGRESS_KEY).ok().flatten()) else {
        return Vec::new();
    };
    match serde_json::from_str(&text) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("discarding unreadable progress: {e}");
            Vec::new()
        }
    }
}

pub fn save_progress(window: &Window, progress: &[Progress]) -> Result<(), JsValue> {
    let storage = storage(window).ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
    let text = serde_json::to_string(progress).map_err(|e| JsValue::from_str(&e.to_string()))?;
    storage.set_item(PROGRESS_KEY, &text)
}
