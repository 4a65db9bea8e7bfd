use std::io;

use flip_core::{EngineConfig, KnightRule};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Buffers one formatted event and hands it to the console when dropped.
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            log(String::from_utf8_lossy(&self.buf).trim_end());
        }
    }
}

pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buf: Vec::new() }
    }
}

/// Route `tracing` events from the engine to the browser console.
/// The wasm target has no wall clock, so timestamps are left out.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .try_init();
}

/// Build an absolute URL for an asset, taking into account the optional
/// `window.__BASE_URL` which is set by the host page.
pub fn asset_url(path: &str) -> String {
    let p = path.trim();
    if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("data:") {
        return p.to_string();
    }
    let base = web_sys::window()
        .and_then(|w| {
            let v = js_sys::Reflect::get(&w, &JsValue::from_str("__BASE_URL")).ok()?;
            v.as_string()
        })
        .unwrap_or_else(|| "/".to_string());
    let base = if base.ends_with('/') {
        base
    } else {
        format!("{}/", base)
    };
    format!("{}{}", base, p.trim_start_matches('/'))
}

/// Fetch a text resource trying a list of fallback URLs in order.
pub async fn fetch_text_with_fallbacks(window: &Window, urls: &[&str]) -> Option<String> {
    for url in urls {
        let resp_value =
            match wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(url)).await {
                Ok(v) => v,
                Err(_) => continue,
            };
        let resp: web_sys::Response = match resp_value.dyn_into() {
            Ok(r) => r,
            Err(_) => continue,
        };
        if !resp.ok() {
            continue;
        }
        if let Ok(text_promise) = resp.text()
            && let Ok(text_js) = wasm_bindgen_futures::JsFuture::from(text_promise).await
            && let Some(s) = text_js.as_string()
        {
            return Some(s);
        }
    }
    None
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}

/// Escape text for interpolation into `innerHTML`.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Engine options from the page URL, e.g. `?knight=skip`.
pub fn config_from_query(search: &str) -> EngineConfig {
    let knight_rule = match get_query_param(search, "knight").as_deref() {
        Some("skip") | Some("none") => KnightRule::NoToggle,
        _ => KnightRule::ToggleLanding,
    };
    EngineConfig::default().with_knight_rule(knight_rule)
}

/// Zero-based level index from a one-based `?level=` parameter.
pub fn start_level_from_query(search: &str) -> Option<usize> {
    get_query_param(search, "level")?
        .trim()
        .parse::<usize>()
        .ok()?
        .checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_are_decoded() {
        assert_eq!(
            get_query_param("?level=3&name=a%20b+c", "name").as_deref(),
            Some("a b c")
        );
        assert_eq!(get_query_param("?level=3", "level").as_deref(), Some("3"));
        assert_eq!(get_query_param("?level=3", "knight"), None);
    }

    #[test]
    fn start_level_is_one_based() {
        assert_eq!(start_level_from_query("?level=1"), Some(0));
        assert_eq!(start_level_from_query("?level=4"), Some(3));
        assert_eq!(start_level_from_query("?level=0"), None);
        assert_eq!(start_level_from_query("?level=abc"), None);
        assert_eq!(start_level_from_query(""), None);
    }

    #[test]
    fn knight_rule_from_query() {
        assert_eq!(
            config_from_query("?knight=skip").knight_rule,
            KnightRule::NoToggle
        );
        assert_eq!(config_from_query("?x=1"), EngineConfig::default());
    }

    #[test]
    fn level_ids_are_escaped_for_markup() {
        assert_eq!(escape_html("intro-1"), "intro-1");
        assert_eq!(
            escape_html(r#"<img src=x onerror="a&b">"#),
            "&lt;img src=x onerror=&quot;a&amp;b&quot;&gt;"
        );
    }
}
