use super::{DisplayLayer, DisplayMode, FakeCaret, SUGGESTION_VISIBLE_ATTR, SuggestionDisplay};
use crate::caret;
use crate::element::{TextAreaFacade, chars};

/// Shows the suggestion as selected text inside the value itself
///
/// The pending range lives on the [`TextAreaFacade`], which keeps it out of
/// the value other readers see. Tab accepts; typing over the selection
/// replaces it.
#[derive(Debug, Default)]
pub struct InlineSuggestionDisplay {
    latest_suggestion_text: String,
    fake_caret: FakeCaret,
}

impl InlineSuggestionDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cut the pending range out of the true value, keeping the selection
    /// where it would be without the suggestion
    fn remove_pending(text_area: &mut TextAreaFacade) -> Option<(usize, usize)> {
        let range = text_area.suggestion_range()?;
        let prev = (text_area.selection_start(), text_area.selection_end());
        let without = chars::splice(text_area.value_including_suggestion(), range.start, range.end, "");
        text_area.set_value_including_suggestion(&without);
        text_area.set_suggestion_range(None);

        let removed = range.end - range.start;
        let map = |p: usize| {
            if p <= range.start {
                p
            } else if p >= range.end {
                p - removed
            } else {
                range.start
            }
        };
        text_area.set_selection_range(map(prev.0), map(prev.1));
        Some(prev)
    }
}

impl SuggestionDisplay for InlineSuggestionDisplay {
    fn show(&mut self, text_area: &mut TextAreaFacade, suggestion: &str) {
        Self::remove_pending(text_area);
        self.latest_suggestion_text = suggestion.to_string();

        let start = text_area.selection_start();
        let end = start + chars::len(suggestion);
        let with_suggestion = chars::splice(text_area.value_including_suggestion(), start, start, suggestion);
        text_area.set_value_including_suggestion(&with_suggestion);
        text_area.set_suggestion_range(Some(start..end));
        text_area.set_selection_range(start, end);
        text_area
            .element_mut()
            .attributes
            .set(SUGGESTION_VISIBLE_ATTR, "");

        let offset = caret::caret_offset_in_text(text_area.element(), &text_area.value());
        self.fake_caret.show(&offset);
    }

    fn accept(&mut self, text_area: &mut TextAreaFacade) {
        let Some(range) = text_area.suggestion_range() else {
            return;
        };
        text_area.set_selection_range(range.end, range.end);
        text_area.set_suggestion_range(None);
        self.fake_caret.hide();
        text_area
            .element_mut()
            .attributes
            .remove(SUGGESTION_VISIBLE_ATTR);
        // Long suggestions can push the caret below the visible area
        caret::scroll_down_to_caret_if_needed(text_area.element_mut());
    }

    fn reject(&mut self, text_area: &mut TextAreaFacade) {
        Self::remove_pending(text_area);
        text_area
            .element_mut()
            .attributes
            .remove(SUGGESTION_VISIBLE_ATTR);
        self.fake_caret.hide();
    }

    fn is_showing(&self, text_area: &TextAreaFacade) -> bool {
        text_area.suggestion_range().is_some()
    }

    fn current_suggestion(&self) -> &str {
        &self.latest_suggestion_text
    }

    fn mode(&self) -> DisplayMode {
        DisplayMode::Inline
    }

    fn layer(&self) -> DisplayLayer<'_> {
        DisplayLayer::Inline(&self.fake_caret)
    }
}
