//! Caret measurement for content-editable elements
//!
//! Measures the range covering the character before the caret. When that
//! yields nothing usable (start of text, after a line break, zero height) a
//! shadow caret is inserted at the caret, measured and removed again.

use super::mirror::{GlyphBox, Mirror};
use crate::element::{TextInput, chars};

pub(super) fn caret_box(element: &TextInput, text: &str, pos: usize) -> GlyphBox {
    let mirror = Mirror::for_element(element);

    let from_range = (pos > 0)
        .then(|| mirror.layout(text).get(pos - 1).copied())
        .flatten()
        .map(|prev| GlyphBox {
            left: prev.left + prev.width,
            width: 0.0,
            ..prev
        });

    let measured = match from_range {
        Some(b) if b.height > 0.0 => b,
        _ => shadow_caret(&mirror, text, pos),
    };

    // Range rects are relative to the border box, not the padding edge
    GlyphBox {
        left: measured.left + element.style.border.left,
        top: measured.top + element.style.border.top,
        ..measured
    }
}

fn shadow_caret(mirror: &Mirror, text: &str, pos: usize) -> GlyphBox {
    let marker = mirror.measure_marker(chars::before(text, pos), chars::after(text, pos));
    GlyphBox {
        width: 0.0,
        ..marker
    }
}
