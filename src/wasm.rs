//! WASM bindings for rendering HTML mail bodies in the browser.

use wasm_bindgen::prelude::*;

use crate::{Renderer, RendererConfig};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Render HTML to plain text.
///
/// `width` of 0 disables wrapping. Lines end in CRLF.
#[wasm_bindgen]
pub fn html_to_text(
    html: &str,
    width: usize,
    include_links: bool,
    include_alt_text: bool,
) -> Result<String, JsValue> {
    let config = RendererConfig::builder()
        .max_line_length(width)
        .include_hyperlink_urls(include_links)
        .include_alt_text(include_alt_text)
        .build()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(Renderer::new(config).render(html))
}

/// Render raw HTML bytes of unknown charset with the default configuration.
#[wasm_bindgen]
pub fn bytes_to_text(data: &[u8]) -> String {
    Renderer::default().render_bytes(data)
}
