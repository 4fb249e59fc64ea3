//! Mirror layout
//!
//! Lays text out the way the element would render it, using the element's
//! own text metrics, so the box of any character can be read back. This is
//! the off-screen clone the caret is measured against.

use unicode_width::UnicodeWidthChar;

use crate::element::{ElementStyle, InputKind, TextInput, WhiteSpace, WordWrap};

/// Marker glyph inserted at the measured offset
pub const CARET_MARKER: char = '|';

/// Columns a tab advances by
const TAB_SIZE: usize = 8;

/// Box of one laid-out character, relative to the mirror's padding edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub line: usize,
}

/// An off-screen copy of an element's text styling
#[derive(Debug, Clone)]
pub struct Mirror {
    style: ElementStyle,
    wrap_width: Option<f64>,
}

impl Mirror {
    /// Mirror an element. Only text areas carry their width over; single-line
    /// inputs never wrap.
    pub fn for_element(element: &TextInput) -> Self {
        let wraps = element.kind() != InputKind::Input
            && element.style.white_space == WhiteSpace::PreWrap;
        let wrap_width = wraps.then(|| element.style.content_width());
        Self {
            style: element.style.clone(),
            wrap_width,
        }
    }

    /// A mirror with an explicit wrap width (`None` for no wrapping)
    pub fn with_wrap_width(style: &ElementStyle, wrap_width: Option<f64>) -> Self {
        Self {
            style: style.clone(),
            wrap_width,
        }
    }

    pub fn char_width(&self, c: char) -> f64 {
        let cells = match c {
            '\t' => TAB_SIZE,
            '\n' => 0,
            _ => c.width().unwrap_or(0),
        };
        cells as f64 * self.style.char_width + self.style.letter_spacing
    }

    pub fn text_width(&self, text: &str) -> f64 {
        text.chars().map(|c| self.char_width(c)).sum()
    }

    /// Lay out `text`, returning one box per char
    ///
    /// Line breaks get a zero-width, zero-height box at the end of their line.
    pub fn layout(&self, text: &str) -> Vec<GlyphBox> {
        let chars: Vec<char> = text.chars().collect();
        let mut boxes = Vec::with_capacity(chars.len());
        let mut cursor = LineCursor::default();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] == '\n' {
                boxes.push(self.glyph(&cursor, 0.0, 0.0));
                cursor.break_line();
                i += 1;
                continue;
            }

            // A word plus the whitespace hanging after it
            let word_end = (i..chars.len())
                .find(|&j| chars[j].is_whitespace())
                .unwrap_or(chars.len());
            let space_end = (word_end..chars.len())
                .find(|&j| !chars[j].is_whitespace() || chars[j] == '\n')
                .unwrap_or(chars.len());

            let word_width: f64 = chars[i..word_end].iter().map(|&c| self.char_width(c)).sum();
            if let Some(max) = self.wrap_width
                && cursor.x > 0.0
                && cursor.x + word_width > max
            {
                cursor.break_line();
            }

            for &c in &chars[i..word_end] {
                let w = self.char_width(c);
                if let Some(max) = self.wrap_width
                    && self.style.word_wrap == WordWrap::BreakWord
                    && cursor.x > 0.0
                    && cursor.x + w > max
                {
                    cursor.break_line();
                }
                boxes.push(self.glyph(&cursor, w, self.style.line_height));
                cursor.x += w;
            }
            for &c in &chars[word_end..space_end] {
                let w = self.char_width(c);
                boxes.push(self.glyph(&cursor, w, self.style.line_height));
                cursor.x += w;
            }
            i = space_end;
        }

        boxes
    }

    fn glyph(&self, cursor: &LineCursor, width: f64, height: f64) -> GlyphBox {
        GlyphBox {
            left: self.style.padding.left + cursor.x,
            top: self.style.padding.top + cursor.line as f64 * self.style.line_height,
            width,
            height,
            line: cursor.line,
        }
    }

    /// Number of lines `text` occupies
    pub fn line_count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        let trailing_break = usize::from(text.ends_with('\n'));
        self.layout(text)
            .last()
            .map(|b| b.line + 1 + trailing_break)
            .unwrap_or(0)
    }

    /// Box of a marker placed between `before` and `after`
    pub fn measure_marker(&self, before: &str, after: &str) -> GlyphBox {
        let mut text = String::with_capacity(before.len() + after.len() + 1);
        text.push_str(before);
        text.push(CARET_MARKER);
        text.push_str(after);
        let index = before.chars().count();
        self.layout(&text)
            .get(index)
            .copied()
            .unwrap_or(GlyphBox {
                left: self.style.padding.left,
                top: self.style.padding.top,
                width: 0.0,
                height: self.style.line_height,
                line: 0,
            })
    }
}

#[derive(Debug, Default)]
struct LineCursor {
    x: f64,
    line: usize,
}

impl LineCursor {
    fn break_line(&mut self) {
        self.x = 0.0;
        self.line += 1;
    }
}

#[cfg(test)]
#[path = "mirror_tests.rs"]
mod mirror_tests;
