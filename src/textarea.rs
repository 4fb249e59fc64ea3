//! Smart text area controller
//!
//! Sits next to a text area and drives the suggestion lifecycle: keystrokes
//! keep or discard the visible suggestion, an idle pause at the end of a
//! line starts a fetch, and a fetch result is shown only if the text and
//! caret have not moved since it started.
//!
//! Fetches run as tasks on the runtime handle given at construction and
//! report back over a channel. Each request carries an id so results of
//! superseded requests are dropped when they arrive.

mod debouncer;

pub use debouncer::Debouncer;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;

use crate::caret;
use crate::display::{
    DisplayMode, OverlayOptions, SuggestionDisplay, create_display, insert_text_at_caret_position,
};
use crate::element::{Attributes, InputKind, Sibling, TextAreaFacade, TextInput, chars};
use crate::error::SmartError;
use crate::suggest::{FetchError, Snapshot, SuggestionRequest, SuggestionSource};

/// Attribute that forces inline (`true`) or overlay (anything else) display
pub const ATTR_INLINE_SUGGESTIONS: &str = "data-inline-suggestions";

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

#[derive(Debug, Clone, PartialEq)]
pub struct SmartTextAreaOptions {
    /// Idle time after the last key before a suggestion is requested
    pub debounce: Duration,
    /// Host is touch-first; picks the overlay display unless overridden
    pub touch: bool,
    pub overlay: OverlayOptions,
}

impl Default for SmartTextAreaOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            touch: false,
            overlay: OverlayOptions::default(),
        }
    }
}

/// Whether the controller consumed a key
///
/// `PassThrough` means the host should let the element perform the key's
/// default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAreaState {
    Idle,
    PendingFetch,
    Showing,
}

#[derive(Debug)]
struct FetchOutcome {
    request_id: u64,
    result: Result<Option<String>, FetchError>,
}

pub struct SmartTextArea {
    attributes: Attributes,
    options: SmartTextAreaOptions,
    runtime: Handle,
    source: Arc<dyn SuggestionSource>,
    text_area: Option<TextAreaFacade>,
    display: Option<Box<dyn SuggestionDisplay>>,
    debouncer: Debouncer,
    /// Snapshot of the in-flight fetch, if any
    pending: Option<Snapshot>,
    /// Incremented per fetch; outcomes with an older id are stale
    request_id: u64,
    outcome_tx: UnboundedSender<FetchOutcome>,
    outcome_rx: UnboundedReceiver<FetchOutcome>,
}

impl SmartTextArea {
    pub fn new(
        attributes: Attributes,
        options: SmartTextAreaOptions,
        runtime: Handle,
        source: Arc<dyn SuggestionSource>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = unbounded_channel();
        let debouncer = Debouncer::new(options.debounce);
        Self {
            attributes,
            options,
            runtime,
            source,
            text_area: None,
            display: None,
            debouncer,
            pending: None,
            request_id: 0,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Take over the element rendered right before this component
    ///
    /// Only a text area qualifies. Attaching again detaches the previous
    /// element first.
    pub fn attach(&mut self, previous_sibling: Sibling) -> Result<(), SmartError> {
        let element = match previous_sibling {
            Sibling::Input(input) if input.kind() == InputKind::TextArea => input,
            other => return Err(SmartError::NotAfterTextArea(other.tag_name())),
        };
        self.detach();

        // The text area's own attribute wins over the component's
        let inline = element
            .attributes
            .get(ATTR_INLINE_SUGGESTIONS)
            .or_else(|| self.attributes.get(ATTR_INLINE_SUGGESTIONS));
        let mode = DisplayMode::choose(inline, self.options.touch);
        let text_area = TextAreaFacade::new(element);
        log::debug!("Attached smart text area with {:?} display", mode);
        self.display = Some(create_display(mode, &text_area, self.options.overlay));
        self.text_area = Some(text_area);
        Ok(())
    }

    /// Stop managing the element and hand it back without any suggestion
    pub fn detach(&mut self) -> Option<TextInput> {
        self.remove_existing_or_pending_suggestion();
        self.display = None;
        self.text_area.take().map(TextAreaFacade::into_element)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn text_area(&self) -> Option<&TextAreaFacade> {
        self.text_area.as_ref()
    }

    pub fn text_area_mut(&mut self) -> Option<&mut TextAreaFacade> {
        self.text_area.as_mut()
    }

    pub fn display(&self) -> Option<&dyn SuggestionDisplay> {
        self.display.as_deref()
    }

    pub fn state(&self) -> TextAreaState {
        if self.is_showing() {
            TextAreaState::Showing
        } else if self.pending.is_some() {
            TextAreaState::PendingFetch
        } else {
            TextAreaState::Idle
        }
    }

    pub fn is_showing(&self) -> bool {
        match (&self.text_area, &self.display) {
            (Some(text_area), Some(display)) => display.is_showing(text_area),
            _ => false,
        }
    }

    /// When the debounce will fire, for hosts that size their poll timeout
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn key_down(&mut self, key: KeyEvent) -> KeyOutcome {
        let Some((text_area, display)) = self.parts_mut() else {
            return KeyOutcome::PassThrough;
        };

        match key.code {
            KeyCode::Tab => {
                if display.is_showing(text_area) {
                    display.accept(text_area);
                    return KeyOutcome::Handled;
                }
                return KeyOutcome::PassThrough;
            }
            KeyCode::Modifier(_) => return KeyOutcome::PassThrough,
            _ => {}
        }

        if display.is_showing(text_area)
            && let Some(typed) = key_text(&key)
            && let Some(rest) = display.current_suggestion().strip_prefix(typed.as_str())
        {
            let rest = rest.to_string();
            insert_text_at_caret_position(text_area, &typed);
            if rest.is_empty() {
                display.reject(text_area);
            } else {
                display.show(text_area, &rest);
            }
            caret::scroll_down_to_caret_if_needed(text_area.element_mut());
            return KeyOutcome::Handled;
        }

        self.remove_existing_or_pending_suggestion();
        KeyOutcome::PassThrough
    }

    /// Restart the idle timer unless a suggestion is visible
    pub fn key_up(&mut self, _key: KeyEvent, now: Instant) {
        if self.text_area.is_some() && !self.is_showing() {
            self.debouncer.schedule(now);
        }
    }

    pub fn mouse_down(&mut self) {
        self.remove_existing_or_pending_suggestion();
    }

    pub fn focus_out(&mut self) {
        self.remove_existing_or_pending_suggestion();
    }

    /// The element scrolled; a visible suggestion would be misplaced
    pub fn scroll(&mut self) {
        if let Some((text_area, display)) = self.parts_mut() {
            display.reject(text_area);
        }
    }

    /// The overlay suggestion was clicked or tapped
    pub fn suggestion_clicked(&mut self) {
        if let Some((text_area, display)) = self.parts_mut() {
            display.click(text_area);
        }
    }

    /// Drive timers and apply finished fetches without blocking
    ///
    /// Returns true when the visible state may have changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if self.debouncer.fire_if_due(now) {
            self.typing_paused();
        }
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            changed |= self.apply_outcome(outcome);
        }
        changed
    }

    /// Wait for the in-flight fetch to finish and apply it
    ///
    /// Returns false right away when nothing is in flight, and whether a
    /// suggestion was shown otherwise.
    pub async fn next_fetch_outcome(&mut self) -> bool {
        loop {
            if self.pending.is_none() {
                while self.outcome_rx.try_recv().is_ok() {}
                return false;
            }
            let Some(outcome) = self.outcome_rx.recv().await else {
                return false;
            };
            let current = outcome.request_id == self.request_id;
            let shown = self.apply_outcome(outcome);
            if current {
                return shown;
            }
        }
    }

    /// The user stopped typing; fetch if the caret sits at the end of a line
    pub fn typing_paused(&mut self) {
        let Some(text_area) = &self.text_area else {
            return;
        };
        if !text_area.is_focused() {
            return;
        }
        let caret = text_area.selection_start();
        if caret != text_area.selection_end() {
            return;
        }
        let value = text_area.value();
        if !matches!(chars::char_at(&value, caret), None | Some('\n')) {
            return;
        }
        self.request_suggestion();
    }

    /// Cancel the idle timer, abort any fetch and reject the suggestion
    pub fn remove_existing_or_pending_suggestion(&mut self) {
        self.debouncer.cancel();
        if let Some(pending) = self.pending.take() {
            log::debug!("Aborting suggestion request #{}", self.request_id);
            pending.abort.cancel();
        }
        if let Some((text_area, display)) = self.parts_mut() {
            display.reject(text_area);
        }
    }

    fn request_suggestion(&mut self) {
        let Some(text_area) = &self.text_area else {
            return;
        };
        if let Some(previous) = self.pending.take() {
            previous.abort.cancel();
        }

        self.request_id += 1;
        let request_id = self.request_id;
        let abort = CancellationToken::new();
        let snapshot = Snapshot::capture(text_area, abort.clone());
        let request = SuggestionRequest::from_snapshot(&snapshot, &self.attributes);
        log::debug!(
            "Requesting suggestion #{} at offset {}",
            request_id,
            snapshot.cursor_position
        );

        let fetch = self.source.fetch(request, abort);
        let tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let result = fetch.await;
            let _ = tx.send(FetchOutcome { request_id, result });
        });
        self.pending = Some(snapshot);
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.request_id != self.request_id {
            return false;
        }
        let Some(snapshot) = self.pending.take() else {
            return false;
        };

        let text = match outcome.result {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) | Err(FetchError::Aborted) => return false,
            Err(e) => {
                log::debug!("Suggestion request #{} failed: {}", outcome.request_id, e);
                return false;
            }
        };
        if snapshot.abort.is_cancelled() {
            return false;
        }

        let Some((text_area, display)) = self.parts_mut() else {
            return false;
        };
        if !snapshot.matches(text_area) {
            log::debug!("Dropping stale suggestion #{}", outcome.request_id);
            return false;
        }

        let suggestion = if text.ends_with(' ') {
            text
        } else {
            format!("{} ", text)
        };
        display.show(text_area, &suggestion);
        true
    }

    fn parts_mut(&mut self) -> Option<(&mut TextAreaFacade, &mut dyn SuggestionDisplay)> {
        match (self.text_area.as_mut(), self.display.as_mut()) {
            (Some(text_area), Some(display)) => Some((text_area, display.as_mut())),
            _ => None,
        }
    }
}

impl std::fmt::Debug for SmartTextArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartTextArea")
            .field("attributes", &self.attributes)
            .field("state", &self.state())
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

impl Drop for SmartTextArea {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort.cancel();
        }
    }
}

/// Text a key would type, if it types anything
fn key_text(key: &KeyEvent) -> Option<String> {
    let chord = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER;
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(chord) => Some(c.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "textarea_tests.rs"]
mod textarea_tests;
