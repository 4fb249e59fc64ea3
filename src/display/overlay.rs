use super::{DisplayLayer, DisplayMode, SuggestionDisplay, insert_text_at_caret_position};
use crate::caret::{self, Mirror};
use crate::element::{ElementStyle, TextAreaFacade, TextInput, chars};

/// Placement limits for the floating overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayOptions {
    /// Width of the page (or terminal) the overlay must stay inside
    pub viewport_width: f64,
    /// Root font size, the unit of the extra shift away from the right edge
    pub rem: f64,
    /// Horizontal moves smaller than this are ignored
    pub jitter_px: f64,
    /// More wrapped lines than this widen the overlay
    pub max_lines: usize,
    /// How far back to look for the start of the word being typed
    pub prefix_lookback: usize,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            viewport_width: 1024.0,
            rem: 16.0,
            jitter_px: 10.0,
            max_lines: 2,
            prefix_lookback: 20,
        }
    }
}

/// The floating layer: dimmed prefix followed by the suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayElement {
    pub visible: bool,
    /// Part of the word already typed, repeated so the suggestion reads whole
    pub prefix: String,
    pub text: String,
    pub top: f64,
    pub left: Option<f64>,
    pub min_width: Option<f64>,
    /// Laid-out width and line count at the current position
    pub width: f64,
    pub lines: usize,
    pub margin_top: f64,
    pub font: String,
    pub z_index: i32,
    style: ElementStyle,
}

impl OverlayElement {
    fn new(input_style: &ElementStyle) -> Self {
        Self {
            visible: false,
            prefix: String::new(),
            text: String::new(),
            top: 0.0,
            left: None,
            min_width: None,
            width: 0.0,
            lines: 0,
            margin_top: input_style.font_size * 1.4,
            font: input_style.font(),
            z_index: input_style.z_index,
            style: input_style.clone(),
        }
    }

    pub fn content(&self) -> String {
        format!("{}{}", self.prefix, self.text)
    }

    /// Lay the content out at `width`, returning the line count
    fn wrap_at(&self, width: f64) -> usize {
        Mirror::with_wrap_width(&self.style, Some(width)).line_count(&self.content())
    }
}

/// Shows the suggestion in a layer positioned at the caret
///
/// Nothing is written into the value until the suggestion is accepted, so
/// rejecting only hides the layer.
#[derive(Debug)]
pub struct OverlaySuggestionDisplay {
    latest_suggestion_text: String,
    element: OverlayElement,
    options: OverlayOptions,
}

impl OverlaySuggestionDisplay {
    pub fn new(text_input: &TextInput, options: OverlayOptions) -> Self {
        Self {
            latest_suggestion_text: String::new(),
            element: OverlayElement::new(&text_input.style),
            options,
        }
    }

    pub fn overlay(&self) -> &OverlayElement {
        &self.element
    }

    fn hide(&mut self) {
        self.element.visible = false;
    }

    fn place(&mut self, text_area: &TextAreaFacade) {
        let input = text_area.element();
        let offset = caret::caret_offset_from_offset_parent(input);
        let mirror = Mirror::for_element(input);
        let overlay = &mut self.element;
        let opts = &self.options;

        overlay.min_width = None;
        overlay.z_index = input.style.z_index;
        overlay.top = offset.top;

        // Measured caret positions wobble a little; only move for real changes
        let new_left = offset.left - mirror.text_width(&overlay.prefix);
        let left = match overlay.left {
            Some(prev) if (prev - new_left).abs() <= opts.jitter_px => prev,
            _ => new_left,
        };

        let natural = mirror.text_width(&overlay.content());
        let available = (opts.viewport_width - left).max(input.style.char_width);
        let mut width = natural.min(available);
        let mut lines = overlay.wrap_at(width);

        // Too narrow near the right edge: aim for two lines, capped at 70% of the viewport
        if lines > opts.max_lines {
            let min_width = (opts.viewport_width * 0.7).min(lines as f64 * width / 2.0);
            overlay.min_width = Some(min_width);
            width = width.max(min_width);
            lines = overlay.wrap_at(width);
        }

        let mut left = left;
        let right = left + width;
        if right > opts.viewport_width - 20.0 {
            left -= right - opts.viewport_width + 2.0 * opts.rem;
        }

        overlay.left = Some(left);
        overlay.width = width;
        overlay.lines = lines;
    }
}

impl SuggestionDisplay for OverlaySuggestionDisplay {
    fn show(&mut self, text_area: &mut TextAreaFacade, suggestion: &str) {
        self.latest_suggestion_text = suggestion.to_string();
        self.element.prefix = if suggestion.starts_with(' ') {
            String::new()
        } else {
            let value = text_area.value();
            current_incomplete_word(&value, text_area.selection_start(), self.options.prefix_lookback)
                .to_string()
        };
        self.element.text = suggestion.to_string();
        self.element.visible = true;
        self.place(text_area);
    }

    fn accept(&mut self, text_area: &mut TextAreaFacade) {
        if !self.element.visible {
            return;
        }
        insert_text_at_caret_position(text_area, &self.latest_suggestion_text);
        caret::scroll_down_to_caret_if_needed(text_area.element_mut());
        self.hide();
    }

    fn reject(&mut self, _text_area: &mut TextAreaFacade) {
        self.hide();
    }

    fn is_showing(&self, _text_area: &TextAreaFacade) -> bool {
        self.element.visible
    }

    fn current_suggestion(&self) -> &str {
        &self.latest_suggestion_text
    }

    fn click(&mut self, text_area: &mut TextAreaFacade) {
        self.accept(text_area);
    }

    fn mode(&self) -> DisplayMode {
        DisplayMode::Overlay
    }

    fn layer(&self) -> DisplayLayer<'_> {
        DisplayLayer::Overlay(&self.element)
    }
}

/// The word being typed at `caret`
///
/// Looks back fewer than `max_len` chars for whitespace or the start of the
/// text. Scripts without spaces between words find no boundary and get no
/// prefix, as does a very long word.
pub fn current_incomplete_word(text: &str, caret: usize, max_len: usize) -> &str {
    let caret_i = caret as isize;
    let mut i = caret_i - 1;
    while i > caret_i - max_len as isize {
        let boundary = i < 0
            || chars::char_at(text, i as usize).is_some_and(char::is_whitespace);
        if boundary {
            return chars::slice(text, (i + 1) as usize, caret);
        }
        i -= 1;
    }
    ""
}
