//! Formatting parameters for [`Renderer`](crate::Renderer).
//!
//! Defaults follow the plain-text mail RFCs: lines of at most 76 characters
//! (RFC 2049) terminated by CRLF (RFC 1521).

use url::Url;

use crate::error::{Error, Result};

/// Maximum line length for mail bodies per RFC 2049.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 76;
/// Rule length used when wrapping is disabled and no explicit length is set.
pub const DEFAULT_HR_LINE_LENGTH: usize = 72;
pub const DEFAULT_LIST_INDENT_SIZE: usize = 6;
/// Line terminator per RFC 1521.
pub const DEFAULT_LINE_ENDING: &str = "\r\n";
pub const DEFAULT_LIST_BULLETS: [char; 4] = ['*', 'o', '+', '#'];
pub const DEFAULT_TABLE_CELL_SEPARATOR: &str = "\t";

/// Immutable formatting configuration.
///
/// Construct with [`RendererConfig::builder`] or take the defaults. A built
/// config is always valid: it has at least one bullet and a non-empty line
/// ending. It can be shared freely between concurrent renders.
///
/// ```
/// use mailtext::RendererConfig;
///
/// let config = RendererConfig::builder()
///     .max_line_length(40)
///     .include_hyperlink_urls(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.hr_line_length(), 36);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    max_line_length: usize,
    hr_line_length: usize,
    list_indent_size: usize,
    line_ending: String,
    include_hyperlink_urls: bool,
    include_alt_text: bool,
    convert_non_breaking_spaces: bool,
    list_bullets: Vec<char>,
    table_cell_separator: String,
    base_url: Option<Url>,
}

impl RendererConfig {
    pub fn builder() -> RendererConfigBuilder {
        RendererConfigBuilder::default()
    }

    /// Maximum characters per line. `0` disables wrapping.
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Number of dashes drawn for `<hr>`.
    pub fn hr_line_length(&self) -> usize {
        self.hr_line_length
    }

    /// Spaces of indentation per list nesting level.
    pub fn list_indent_size(&self) -> usize {
        self.list_indent_size
    }

    pub fn line_ending(&self) -> &str {
        &self.line_ending
    }

    /// Whether links are followed by ` <url>`.
    pub fn include_hyperlink_urls(&self) -> bool {
        self.include_hyperlink_urls
    }

    /// Whether images render as `[alt]`.
    pub fn include_alt_text(&self) -> bool {
        self.include_alt_text
    }

    pub fn convert_non_breaking_spaces(&self) -> bool {
        self.convert_non_breaking_spaces
    }

    pub fn list_bullets(&self) -> &[char] {
        &self.list_bullets
    }

    /// Bullet for an unordered list at nesting `depth`, cycling through the
    /// configured bullets.
    pub fn bullet(&self, depth: usize) -> char {
        self.list_bullets[depth % self.list_bullets.len()]
    }

    pub fn table_cell_separator(&self) -> &str {
        &self.table_cell_separator
    }

    /// Base that relative link targets are resolved against.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Whether text is wrapped at all.
    pub fn wraps(&self) -> bool {
        self.max_line_length > 0
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            hr_line_length: derived_hr_line_length(DEFAULT_MAX_LINE_LENGTH),
            list_indent_size: DEFAULT_LIST_INDENT_SIZE,
            line_ending: DEFAULT_LINE_ENDING.to_string(),
            include_hyperlink_urls: false,
            include_alt_text: false,
            convert_non_breaking_spaces: true,
            list_bullets: DEFAULT_LIST_BULLETS.to_vec(),
            table_cell_separator: DEFAULT_TABLE_CELL_SEPARATOR.to_string(),
            base_url: None,
        }
    }
}

/// Rule length that fits a line of `max_line_length` with a little margin.
fn derived_hr_line_length(max_line_length: usize) -> usize {
    max_line_length.saturating_sub(4).max(2)
}

/// Collects options for a [`RendererConfig`].
///
/// Unless [`hr_line_length`](Self::hr_line_length) is set explicitly, the rule
/// length is derived from the last non-zero maximum line length, whatever
/// order the setters were called in. Disabling wrapping keeps the rule length
/// derived so far.
#[derive(Debug, Clone)]
pub struct RendererConfigBuilder {
    max_line_length: usize,
    hr_line_length: Option<usize>,
    derived_hr_line_length: usize,
    list_indent_size: usize,
    line_ending: String,
    include_hyperlink_urls: bool,
    include_alt_text: bool,
    convert_non_breaking_spaces: bool,
    list_bullets: Vec<char>,
    table_cell_separator: String,
    base_url: Option<Url>,
}

impl Default for RendererConfigBuilder {
    fn default() -> Self {
        let defaults = RendererConfig::default();
        Self {
            max_line_length: defaults.max_line_length,
            hr_line_length: None,
            derived_hr_line_length: defaults.hr_line_length,
            list_indent_size: defaults.list_indent_size,
            line_ending: defaults.line_ending,
            include_hyperlink_urls: defaults.include_hyperlink_urls,
            include_alt_text: defaults.include_alt_text,
            convert_non_breaking_spaces: defaults.convert_non_breaking_spaces,
            list_bullets: defaults.list_bullets,
            table_cell_separator: defaults.table_cell_separator,
            base_url: defaults.base_url,
        }
    }
}

impl RendererConfigBuilder {
    pub fn max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        if max_line_length > 0 {
            self.derived_hr_line_length = derived_hr_line_length(max_line_length);
        }
        self
    }

    pub fn hr_line_length(mut self, hr_line_length: usize) -> Self {
        self.hr_line_length = Some(hr_line_length);
        self
    }

    pub fn list_indent_size(mut self, list_indent_size: usize) -> Self {
        self.list_indent_size = list_indent_size;
        self
    }

    pub fn line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.line_ending = line_ending.into();
        self
    }

    pub fn include_hyperlink_urls(mut self, include: bool) -> Self {
        self.include_hyperlink_urls = include;
        self
    }

    pub fn include_alt_text(mut self, include: bool) -> Self {
        self.include_alt_text = include;
        self
    }

    pub fn convert_non_breaking_spaces(mut self, convert: bool) -> Self {
        self.convert_non_breaking_spaces = convert;
        self
    }

    pub fn list_bullets(mut self, bullets: impl IntoIterator<Item = char>) -> Self {
        self.list_bullets = bullets.into_iter().collect();
        self
    }

    pub fn table_cell_separator(mut self, separator: impl Into<String>) -> Self {
        self.table_cell_separator = separator.into();
        self
    }

    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Validate the options and freeze them.
    pub fn build(self) -> Result<RendererConfig> {
        if self.list_bullets.is_empty() {
            tracing::debug!("rejecting config without list bullets");
            return Err(Error::InvalidConfig(
                "at least one list bullet is required".to_string(),
            ));
        }
        if self.line_ending.is_empty() {
            tracing::debug!("rejecting config with empty line ending");
            return Err(Error::InvalidConfig(
                "line ending must not be empty".to_string(),
            ));
        }

        let hr_line_length = self.hr_line_length.unwrap_or(self.derived_hr_line_length);

        Ok(RendererConfig {
            max_line_length: self.max_line_length,
            hr_line_length,
            list_indent_size: self.list_indent_size,
            line_ending: self.line_ending,
            include_hyperlink_urls: self.include_hyperlink_urls,
            include_alt_text: self.include_alt_text,
            convert_non_breaking_spaces: self.convert_non_breaking_spaces,
            list_bullets: self.list_bullets,
            table_cell_separator: self.table_cell_separator,
            base_url: self.base_url,
        })
    }
}
