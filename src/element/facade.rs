use std::ops::Range;

use crossterm::event::KeyEvent;

use super::chars;
use super::{Edit, TextInput};

/// Owns a text input's true value alongside the range of a pending inline
/// suggestion
///
/// Readers outside the suggestion machinery go through [`value`], which
/// leaves the pending range out. Writes always land on the true value.
///
/// [`value`]: TextAreaFacade::value
#[derive(Debug, Clone)]
pub struct TextAreaFacade {
    element: TextInput,
    suggestion: Option<Range<usize>>,
}

impl TextAreaFacade {
    pub fn new(element: TextInput) -> Self {
        Self {
            element,
            suggestion: None,
        }
    }

    pub fn element(&self) -> &TextInput {
        &self.element
    }

    /// Mutable access for host concerns (focus, scroll, style)
    ///
    /// Value edits made through this bypass suggestion tracking; use the
    /// facade's own editing methods instead.
    pub fn element_mut(&mut self) -> &mut TextInput {
        &mut self.element
    }

    pub fn into_element(self) -> TextInput {
        self.element
    }

    /// The value as any collaborator should see it: without the pending suggestion
    pub fn value(&self) -> String {
        let raw = self.element.value();
        match &self.suggestion {
            Some(range) => {
                let mut visible = String::with_capacity(raw.len());
                visible.push_str(chars::before(raw, range.start));
                visible.push_str(chars::after(raw, range.end));
                visible
            }
            None => raw.to_string(),
        }
    }

    pub fn value_including_suggestion(&self) -> &str {
        self.element.value()
    }

    /// Write from outside the suggestion machinery. Any pending range is gone
    /// with the old value.
    pub fn set_value(&mut self, value: &str) {
        self.suggestion = None;
        self.element.set_value(value);
    }

    pub(crate) fn set_value_including_suggestion(&mut self, value: &str) {
        self.element.set_value(value);
    }

    pub fn suggestion_range(&self) -> Option<Range<usize>> {
        self.suggestion.clone()
    }

    pub(crate) fn set_suggestion_range(&mut self, range: Option<Range<usize>>) {
        self.suggestion = range;
    }

    pub fn selection_start(&self) -> usize {
        self.element.selection_start()
    }

    pub fn selection_end(&self) -> usize {
        self.element.selection_end()
    }

    pub fn set_selection_range(&mut self, start: usize, end: usize) {
        self.element.set_selection_range(start, end);
    }

    pub fn is_focused(&self) -> bool {
        self.element.focused
    }

    /// Undo-preserving insert over the selection; `false` when unsupported
    pub fn insert_text(&mut self, text: &str) -> bool {
        match self.element.insert_text(text) {
            Some(edit) => {
                self.track(edit);
                true
            }
            None => false,
        }
    }

    /// Replace the selection by rewriting the value, then put the caret after
    /// the inserted text. Drops undo history.
    pub fn splice_at_selection(&mut self, text: &str) {
        let start = self.element.selection_start();
        let end = self.element.selection_end();
        let spliced = chars::splice(self.element.value(), start, end, text);
        self.element.set_value(&spliced);
        let caret = start + chars::len(text);
        self.element.set_selection_range(caret, caret);
        self.track(Edit {
            start,
            removed: end - start,
            inserted: chars::len(text),
        });
    }

    /// Let the element perform a key's default action
    pub fn apply_key(&mut self, key: KeyEvent) {
        if let Some(edit) = self.element.apply_key(key) {
            self.track(edit);
        }
    }

    fn track(&mut self, edit: Edit) {
        let Some(range) = self.suggestion.clone() else {
            return;
        };
        let edit_end = edit.start + edit.removed;
        self.suggestion = if edit_end <= range.start {
            let shifted = |p: usize| p + edit.inserted - edit.removed;
            Some(shifted(range.start)..shifted(range.end))
        } else if edit.start >= range.end {
            Some(range)
        } else {
            None
        };
    }
}
