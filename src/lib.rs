//! # mailtext
//!
//! Renders HTML as the plain-text alternative of a multipart mail message,
//! the way mail clients do when they generate `text/plain` from `text/html`.
//!
//! ## Features
//!
//! - Greedy word wrapping at a configurable width (76 by default, RFC 2049)
//! - Nested list bullets and ordinals with per-level indentation
//! - Optional ` <url>` annotations after links and `[alt]` text for images
//! - Horizontal rules, table rows and cells, definition lists
//! - Charset detection for raw bytes
//!
//! ## Quick Start
//!
//! ```
//! use mailtext::html_to_text;
//!
//! let text = html_to_text("<p>Hello,</p><ul><li>one</li><li>two</li></ul>");
//! assert_eq!(text, "\r\nHello,\r\n\r\n* one\r\n* two");
//! ```
//!
//! ## Configuration
//!
//! ```
//! use mailtext::{Renderer, RendererConfig};
//!
//! let config = RendererConfig::builder()
//!     .max_line_length(20)
//!     .line_ending("\n")
//!     .include_alt_text(true)
//!     .build()
//!     .unwrap();
//!
//! let text = Renderer::new(config).render(r#"<img src="s.gif" alt="Smiley face">"#);
//! assert_eq!(text, "[Smiley face]");
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod render;
pub mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{RendererConfig, RendererConfigBuilder};
pub use dom::{Document, NodeId};
pub use error::{Error, Result};
pub use render::Renderer;

/// Render `html` with the default configuration.
pub fn html_to_text(html: &str) -> String {
    Renderer::default().render(html)
}
