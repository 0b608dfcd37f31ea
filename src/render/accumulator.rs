//! Output buffer with greedy word wrapping.

use crate::config::RendererConfig;

/// Growing plain-text output plus the width of the line being written.
///
/// Everything the renderer emits goes through [`append`](Self::append), which
/// enforces three rules:
///
/// - A lone `" "` is dropped when the output is empty or already ends in a
///   space or line break, so separators never pile up.
/// - Text that fits on the current line is copied verbatim.
/// - Text that does not fit is split on whitespace and laid out greedily,
///   breaking before any word that, with its trailing space, would cross the
///   limit. A word longer than the limit is never split; it gets a line of
///   its own.
///
/// The width counter is the number of characters written since the last line
/// ending, so emitting a line ending starts a fresh line.
#[derive(Debug)]
pub struct TextAccumulator<'a> {
    buf: String,
    width: usize,
    wraps: bool,
    max_line_length: usize,
    line_ending: &'a str,
}

impl<'a> TextAccumulator<'a> {
    pub fn new(config: &'a RendererConfig) -> Self {
        Self {
            buf: String::new(),
            width: 0,
            wraps: config.wraps(),
            max_line_length: config.max_line_length(),
            line_ending: config.line_ending(),
        }
    }

    pub fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if text == " " && self.at_separator() {
            return;
        }
        if !self.wraps {
            self.push(text);
            return;
        }

        let mut lines = text.split(self.line_ending);
        if let Some(first) = lines.next() {
            self.append_line(first);
        }
        for line in lines {
            self.push(self.line_ending);
            self.append_line(line);
        }
    }

    /// Emit one line ending.
    pub fn line_break(&mut self) {
        self.push(self.line_ending);
    }

    /// Characters on the current line so far.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn at_separator(&self) -> bool {
        match self.buf.chars().next_back() {
            None => true,
            Some(last) => last == ' ' || last == '\n' || self.line_ending.contains(last),
        }
    }

    /// Append text holding no line ending.
    fn append_line(&mut self, text: &str) {
        let len = text.chars().count();
        if self.width + len <= self.max_line_length {
            self.buf.push_str(text);
            self.width += len;
        } else {
            self.wrap(text);
        }
    }

    fn wrap(&mut self, text: &str) {
        let words = split_words(text);
        let last = words.len().saturating_sub(1);

        for (i, word) in words.iter().enumerate() {
            let word_len = word.chars().count();
            let spaced = i < last;
            // Non-last words are measured with their trailing space.
            let needed = word_len + usize::from(spaced);
            if word_len > 0 && self.width > 0 && self.width + needed > self.max_line_length {
                self.buf.push_str(self.line_ending);
                self.width = 0;
            }

            self.buf.push_str(word);
            self.width += word_len;

            // A word that fills the line exactly drops its separator.
            if spaced && self.width < self.max_line_length {
                self.buf.push(' ');
                self.width += 1;
            }
        }
    }

    fn push(&mut self, text: &str) {
        self.buf.push_str(text);
        match text.rfind(self.line_ending) {
            Some(pos) => self.width = text[pos + self.line_ending.len()..].chars().count(),
            None => self.width += text.chars().count(),
        }
    }
}

/// Split on whitespace runs. Leading or trailing whitespace yields an empty
/// first or last word, so the spacing around the text survives the split.
fn split_words(text: &str) -> Vec<&str> {
    let mut words: Vec<&str> = text
        .split(|c: char| c.is_ascii_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return words;
    }
    if text.starts_with(|c: char| c.is_ascii_whitespace()) {
        words.insert(0, "");
    }
    if text.ends_with(|c: char| c.is_ascii_whitespace()) {
        words.push("");
    }
    words
}
