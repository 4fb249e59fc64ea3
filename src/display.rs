//! Suggestion displays
//!
//! A display puts a not-yet-accepted suggestion in front of the user. The
//! inline display writes it into the text itself, selected, so typing over
//! it is natural; the overlay display draws it in a floating layer next to
//! the caret and leaves the text alone until accepted.

mod fake_caret;
mod inline;
mod overlay;

pub use fake_caret::FakeCaret;
pub use inline::InlineSuggestionDisplay;
pub use overlay::{OverlayElement, OverlayOptions, OverlaySuggestionDisplay, current_incomplete_word};

use crate::element::TextAreaFacade;

/// Attribute set on the text input while an inline suggestion is visible
pub const SUGGESTION_VISIBLE_ATTR: &str = "data-suggestion-visible";

/// Which display a smart text area uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Inline,
    Overlay,
}

impl DisplayMode {
    /// Pick a display mode
    ///
    /// An explicit setting wins and means inline only when it reads `true`
    /// (any case). Without one, touch hosts get the overlay.
    pub fn choose(explicit: Option<&str>, touch: bool) -> Self {
        match explicit.filter(|v| !v.is_empty()) {
            Some(v) if v.eq_ignore_ascii_case("true") => DisplayMode::Inline,
            Some(_) => DisplayMode::Overlay,
            None if touch => DisplayMode::Overlay,
            None => DisplayMode::Inline,
        }
    }
}

/// What a display contributes to rendering
#[derive(Debug)]
pub enum DisplayLayer<'a> {
    Inline(&'a FakeCaret),
    Overlay(&'a OverlayElement),
}

/// Shared contract of the inline and overlay displays
pub trait SuggestionDisplay: Send {
    /// Show `suggestion`, replacing any suggestion already showing
    fn show(&mut self, text_area: &mut TextAreaFacade, suggestion: &str);

    /// Commit the suggestion into the value and put the caret after it
    fn accept(&mut self, text_area: &mut TextAreaFacade);

    /// Discard the suggestion; no-op when nothing is showing
    fn reject(&mut self, text_area: &mut TextAreaFacade);

    fn is_showing(&self, text_area: &TextAreaFacade) -> bool;

    /// Text of the most recent `show`
    fn current_suggestion(&self) -> &str;

    /// The suggestion itself was clicked or tapped
    fn click(&mut self, _text_area: &mut TextAreaFacade) {}

    fn mode(&self) -> DisplayMode;

    fn layer(&self) -> DisplayLayer<'_>;
}

/// Create the display for `mode`
pub fn create_display(
    mode: DisplayMode,
    text_area: &TextAreaFacade,
    overlay: OverlayOptions,
) -> Box<dyn SuggestionDisplay> {
    match mode {
        DisplayMode::Inline => Box::new(InlineSuggestionDisplay::new()),
        DisplayMode::Overlay => Box::new(OverlaySuggestionDisplay::new(text_area.element(), overlay)),
    }
}

/// Insert `text` at the caret, replacing the selection
///
/// Prefers the element's insert command, which keeps undo history intact;
/// splicing the value directly works everywhere but loses it.
pub fn insert_text_at_caret_position(text_area: &mut TextAreaFacade, text: &str) {
    if !text_area.insert_text(text) {
        text_area.splice_at_selection(text);
    }
}
