//! Caret geometry
//!
//! Text inputs expose no API for where their caret is drawn. These helpers
//! find out by laying the text out in a [`Mirror`] with the element's own
//! metrics and reading back the box of a marker placed at the caret.

mod editable;
pub mod mirror;

pub use mirror::{GlyphBox, Mirror};

use crate::element::{ElementStyle, InputKind, TextInput, chars};

/// Caret geometry relative to the element's padding edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretPosition {
    pub top: f64,
    pub left: f64,
    pub height: f64,
    /// Current selection start of the element
    pub pos: usize,
}

/// Caret geometry relative to the element's offset parent
#[derive(Debug, Clone, PartialEq)]
pub struct CaretOffset {
    pub top: f64,
    pub left: f64,
    pub height: f64,
    pub style: ElementStyle,
}

/// Geometry of the caret at the current selection start
pub fn position(element: &TextInput) -> CaretPosition {
    position_in_text(element, element.value(), element.selection_start())
}

/// Geometry of the caret if it sat at `pos`
pub fn position_at(element: &TextInput, pos: usize) -> CaretPosition {
    position_in_text(element, element.value(), pos)
}

/// Collapse the selection to `pos`
pub fn set_position(element: &mut TextInput, pos: usize) -> &mut TextInput {
    element.set_selection_range(pos, pos);
    element
}

/// Measure `pos` within `text` laid out with `element`'s styling
///
/// `text` may differ from the element's raw value, e.g. when a pending
/// suggestion should not take part in the layout.
pub fn position_in_text(element: &TextInput, text: &str, pos: usize) -> CaretPosition {
    let pos_in_text = pos.min(chars::len(text));
    let b = match element.kind() {
        InputKind::ContentEditable => editable::caret_box(element, text, pos_in_text),
        InputKind::TextArea | InputKind::Input => Mirror::for_element(element)
            .measure_marker(chars::before(text, pos_in_text), chars::after(text, pos_in_text)),
    };
    CaretPosition {
        top: b.top,
        left: b.left,
        height: b.height,
        pos: element.selection_start(),
    }
}

/// Caret position translated into the offset parent's coordinates
pub fn caret_offset_from_offset_parent(element: &TextInput) -> CaretOffset {
    caret_offset_in_text(element, element.value())
}

pub fn caret_offset_in_text(element: &TextInput, text: &str) -> CaretOffset {
    let style = &element.style;
    let pos = position_in_text(element, text, element.selection_start());
    CaretOffset {
        top: pos.top + style.border.top + element.offset_top - element.scroll_top,
        left: pos.left + style.border.left + element.offset_left - element.scroll_left - 0.25,
        height: pos.height,
        style: style.clone(),
    }
}

/// Scroll down just far enough for the caret line to be visible
///
/// Only ever scrolls down: the caret only moves past the bottom edge after
/// text was inserted.
pub fn scroll_down_to_caret_if_needed(element: &mut TextInput) {
    let pos = position(element);
    let line_height = element.style.line_height;
    let client_height = element.client_height();
    if pos.top > client_height + element.scroll_top - line_height {
        element.scroll_top = pos.top - client_height + line_height;
    }
}

#[cfg(test)]
#[path = "caret_tests.rs"]
mod caret_tests;
