//! Computed text styling of an element
//!
//! Lengths are in pixels. A terminal host uses one pixel per cell, so the
//! same geometry code serves both.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhiteSpace {
    /// Preserve whitespace and wrap at the content width (text areas)
    #[default]
    PreWrap,
    /// Preserve whitespace, never wrap (single-line inputs)
    Pre,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordWrap {
    Normal,
    /// Break inside a word that is wider than the line
    #[default]
    BreakWord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub font_family: String,
    pub font_size: f64,
    pub line_height: f64,
    /// Advance of a single-width character
    pub char_width: f64,
    pub letter_spacing: f64,
    pub padding: Edges,
    pub border: Edges,
    pub width: f64,
    pub height: f64,
    pub box_sizing: BoxSizing,
    pub white_space: WhiteSpace,
    pub word_wrap: WordWrap,
    pub caret_color: Color,
    pub z_index: i32,
}

impl ElementStyle {
    /// Style of a terminal cell grid: one pixel per cell, no padding
    pub fn terminal(width: u16, height: u16) -> Self {
        Self {
            font_family: "monospace".to_string(),
            font_size: 1.0,
            line_height: 1.0,
            char_width: 1.0,
            letter_spacing: 0.0,
            padding: Edges::default(),
            border: Edges::default(),
            width: f64::from(width),
            height: f64::from(height),
            box_sizing: BoxSizing::ContentBox,
            white_space: WhiteSpace::PreWrap,
            word_wrap: WordWrap::BreakWord,
            caret_color: Color::White,
            z_index: 0,
        }
    }

    /// CSS `font` shorthand
    pub fn font(&self) -> String {
        format!(
            "{}px/{}px {}",
            self.font_size, self.line_height, self.font_family
        )
    }

    /// Width available to text inside padding and border
    pub fn content_width(&self) -> f64 {
        let inner = match self.box_sizing {
            BoxSizing::ContentBox => self.width,
            BoxSizing::BorderBox => self.width - self.padding.horizontal() - self.border.horizontal(),
        };
        inner.max(0.0)
    }

    /// Height inside the border (padding included)
    pub fn client_height(&self) -> f64 {
        let inner = match self.box_sizing {
            BoxSizing::ContentBox => self.height + self.padding.vertical(),
            BoxSizing::BorderBox => self.height - self.border.vertical(),
        };
        inner.max(0.0)
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 16.0,
            line_height: 20.0,
            char_width: 8.0,
            letter_spacing: 0.0,
            padding: Edges::uniform(4.0),
            border: Edges::uniform(1.0),
            width: 400.0,
            height: 120.0,
            box_sizing: BoxSizing::ContentBox,
            white_space: WhiteSpace::PreWrap,
            word_wrap: WordWrap::BreakWord,
            caret_color: Color::Black,
            z_index: 0,
        }
    }
}
