use ratatui::style::Color;

use crate::caret::CaretOffset;

/// Stand-in caret drawn where the real caret was before an inline suggestion
/// selected the text after it
#[derive(Debug, Clone, PartialEq)]
pub struct FakeCaret {
    pub visible: bool,
    pub top: f64,
    pub left: f64,
    pub height: f64,
    pub z_index: i32,
    pub color: Color,
}

impl FakeCaret {
    pub fn new() -> Self {
        Self {
            visible: false,
            top: 0.0,
            left: 0.0,
            height: 0.0,
            z_index: 0,
            color: Color::Reset,
        }
    }

    pub fn show(&mut self, offset: &CaretOffset) {
        self.visible = true;
        self.top = offset.top;
        self.left = offset.left;
        self.height = offset.height;
        self.z_index = offset.style.z_index;
        self.color = offset.style.caret_color;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

impl Default for FakeCaret {
    fn default() -> Self {
        Self::new()
    }
}
