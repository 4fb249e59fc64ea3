//! Tests for the SmartTextArea controller

use super::*;
use crate::display::DisplayMode;
use crate::element::{Attributes, InputKind, Sibling, TextInput};
use crate::suggest::FetchError;
use crate::test_utils::test_helpers::{FakeSource, Reply, key, key_with_mods, text_area_at};
use crossterm::event::{KeyCode, KeyModifiers, ModifierKeyCode};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

fn controller(source: Arc<FakeSource>, attributes: Attributes) -> SmartTextArea {
    controller_with(source, attributes, SmartTextAreaOptions::default())
}

fn controller_with(
    source: Arc<FakeSource>,
    attributes: Attributes,
    options: SmartTextAreaOptions,
) -> SmartTextArea {
    SmartTextArea::new(attributes, options, Handle::current(), source)
}

fn attached(source: Arc<FakeSource>, value: &str, caret: usize) -> SmartTextArea {
    let mut smart = controller(source, Attributes::new());
    smart
        .attach(Sibling::Input(text_area_at(value, caret)))
        .unwrap();
    smart
}

fn value(smart: &SmartTextArea) -> String {
    smart.text_area().unwrap().value()
}

fn raw_value(smart: &SmartTextArea) -> String {
    smart.text_area().unwrap().value_including_suggestion().to_string()
}

fn selection(smart: &SmartTextArea) -> (usize, usize) {
    let text_area = smart.text_area().unwrap();
    (text_area.selection_start(), text_area.selection_end())
}

/// "The quick " with "brown fox " showing inline
async fn showing_quick_fox() -> SmartTextArea {
    let source = FakeSource::new(vec![Reply::text("brown fox")]);
    let mut smart = attached(source, "The quick ", 10);
    smart.typing_paused();
    assert!(smart.next_fetch_outcome().await);
    smart
}

#[test]
fn test_attach_rejects_non_textarea_sibling() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let _guard = runtime.enter();
    let mut smart = controller(FakeSource::new(vec![]), Attributes::new());

    let err = smart.attach(Sibling::Other("div".to_string())).unwrap_err();
    assert!(matches!(err, SmartError::NotAfterTextArea(ref tag) if tag == "div"));

    let err = smart
        .attach(Sibling::Input(TextInput::new(InputKind::Input)))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "smart-textarea must be rendered immediately after a textarea element (found input)"
    );
    assert!(smart.text_area().is_none());
}

#[tokio::test]
async fn test_display_mode_follows_attribute_then_touch() {
    let touch = SmartTextAreaOptions {
        touch: true,
        ..SmartTextAreaOptions::default()
    };
    let cases = [
        (None, false, DisplayMode::Inline),
        (None, true, DisplayMode::Overlay),
        (Some("TRUE"), true, DisplayMode::Inline),
        (Some("false"), false, DisplayMode::Overlay),
    ];

    for (attribute, is_touch, expected) in cases {
        let mut attributes = Attributes::new();
        if let Some(value) = attribute {
            attributes.set(ATTR_INLINE_SUGGESTIONS, value);
        }
        let options = if is_touch {
            touch.clone()
        } else {
            SmartTextAreaOptions::default()
        };
        let mut smart = controller_with(FakeSource::new(vec![]), attributes, options);
        smart
            .attach(Sibling::Input(TextInput::textarea()))
            .unwrap();
        assert_eq!(smart.display().unwrap().mode(), expected, "{:?}", attribute);
    }
}

#[tokio::test]
async fn test_pause_fetches_and_shows_with_trailing_space() {
    let source = FakeSource::new(vec![Reply::text("brown fox")]);
    let mut smart = attached(source.clone(), "The quick ", 10);
    let t0 = Instant::now();

    smart.key_up(key(KeyCode::Char(' ')), t0);
    smart.poll(t0 + Duration::from_millis(349));
    assert!(source.requests().is_empty());

    smart.poll(t0 + Duration::from_millis(350));
    assert_eq!(smart.state(), TextAreaState::PendingFetch);
    assert!(smart.next_fetch_outcome().await);

    let requests = source.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text_before, "The quick ");
    assert_eq!(requests[0].text_after, "");

    assert_eq!(smart.state(), TextAreaState::Showing);
    assert_eq!(value(&smart), "The quick ");
    assert_eq!(raw_value(&smart), "The quick brown fox ");
    assert_eq!(selection(&smart), (10, 20));
}

#[tokio::test]
async fn test_poll_applies_finished_fetch() {
    let source = FakeSource::new(vec![Reply::text("brown fox ")]);
    let mut smart = attached(source, "The quick ", 10);

    smart.typing_paused();
    tokio::task::yield_now().await;
    let mut shown = false;
    for _ in 0..10 {
        shown |= smart.poll(Instant::now());
        if shown {
            break;
        }
        tokio::task::yield_now().await;
    }

    assert!(shown);
    assert_eq!(raw_value(&smart), "The quick brown fox ");
}

#[tokio::test]
async fn test_tab_accepts_suggestion() {
    let mut smart = showing_quick_fox().await;

    assert_eq!(smart.key_down(key(KeyCode::Tab)), KeyOutcome::Handled);

    assert_eq!(value(&smart), "The quick brown fox ");
    assert_eq!(selection(&smart), (20, 20));
    assert_eq!(smart.state(), TextAreaState::Idle);
}

#[tokio::test]
async fn test_tab_without_suggestion_passes_through() {
    let mut smart = attached(FakeSource::new(vec![]), "The quick ", 10);

    assert_eq!(smart.key_down(key(KeyCode::Tab)), KeyOutcome::PassThrough);
    assert_eq!(value(&smart), "The quick ");
}

#[tokio::test]
async fn test_typing_matching_char_keeps_rest_of_suggestion() {
    let mut smart = showing_quick_fox().await;

    assert_eq!(smart.key_down(key(KeyCode::Char('b'))), KeyOutcome::Handled);

    assert_eq!(value(&smart), "The quick b");
    assert_eq!(raw_value(&smart), "The quick brown fox ");
    assert_eq!(selection(&smart), (11, 20));
    assert_eq!(smart.display().unwrap().current_suggestion(), "rown fox ");
}

#[tokio::test]
async fn test_typing_through_whole_suggestion_ends_showing() {
    let mut smart = showing_quick_fox().await;

    for c in "brown fox ".chars() {
        assert_eq!(smart.key_down(key(KeyCode::Char(c))), KeyOutcome::Handled);
    }

    assert_eq!(value(&smart), "The quick brown fox ");
    assert_eq!(selection(&smart), (20, 20));
    assert!(!smart.is_showing());
}

#[tokio::test]
async fn test_typing_other_char_rejects_and_passes_through() {
    let mut smart = showing_quick_fox().await;

    assert_eq!(smart.key_down(key(KeyCode::Char('x'))), KeyOutcome::PassThrough);

    assert_eq!(raw_value(&smart), "The quick ");
    assert_eq!(selection(&smart), (10, 10));
    assert!(!smart.is_showing());
}

#[tokio::test]
async fn test_ctrl_chord_does_not_type_through() {
    let mut smart = showing_quick_fox().await;

    let outcome = smart.key_down(key_with_mods(KeyCode::Char('b'), KeyModifiers::CONTROL));

    assert_eq!(outcome, KeyOutcome::PassThrough);
    assert!(!smart.is_showing());
}

#[tokio::test]
async fn test_modifier_keys_are_ignored() {
    let mut smart = showing_quick_fox().await;

    let outcome = smart.key_down(key(KeyCode::Modifier(ModifierKeyCode::LeftShift)));

    assert_eq!(outcome, KeyOutcome::PassThrough);
    assert!(smart.is_showing());
}

#[tokio::test]
async fn test_key_up_while_showing_does_not_restart_debounce() {
    let mut smart = showing_quick_fox().await;

    smart.key_up(key(KeyCode::Char('b')), Instant::now());

    assert_eq!(smart.debounce_deadline(), None);
}

#[tokio::test]
async fn test_second_fetch_aborts_first() {
    let (first_tx, first) = Reply::later();
    let source = FakeSource::new(vec![first, Reply::text("second")]);
    let mut smart = attached(source.clone(), "The quick ", 10);

    smart.typing_paused();
    smart.typing_paused();

    assert!(source.token(0).is_cancelled());
    assert!(!source.token(1).is_cancelled());
    assert!(smart.next_fetch_outcome().await);
    assert_eq!(smart.display().unwrap().current_suggestion(), "second ");

    let _ = first_tx.send(Some("first".to_string()));
    tokio::task::yield_now().await;
    smart.poll(Instant::now());
    assert_eq!(raw_value(&smart), "The quick second ");
}

#[tokio::test]
async fn test_stale_response_is_dropped() {
    let (tx, reply) = Reply::later();
    let source = FakeSource::new(vec![reply]);
    let mut smart = attached(source, "The quick ", 10);

    smart.typing_paused();
    smart.text_area_mut().unwrap().set_selection_range(3, 3);
    tx.send(Some("brown fox".to_string())).unwrap();

    assert!(!smart.next_fetch_outcome().await);
    assert_eq!(raw_value(&smart), "The quick ");
    assert_eq!(smart.state(), TextAreaState::Idle);
}

#[tokio::test]
async fn test_empty_or_failed_response_shows_nothing() {
    let source = FakeSource::new(vec![
        Reply::text(""),
        Reply::Now(Ok(None)),
        Reply::Now(Err(FetchError::Network("connection refused".to_string()))),
    ]);
    let mut smart = attached(source, "The quick ", 10);

    for _ in 0..3 {
        smart.typing_paused();
        assert!(!smart.next_fetch_outcome().await);
        assert_eq!(raw_value(&smart), "The quick ");
    }
}

#[tokio::test]
async fn test_fetch_requires_caret_at_end_of_line() {
    let source = FakeSource::new(vec![]);

    let mut middle = attached(source.clone(), "The quick", 3);
    middle.typing_paused();
    assert!(source.requests().is_empty());

    let mut before_newline = attached(source.clone(), "Dear Bob,\nThanks", 9);
    before_newline.typing_paused();
    assert_eq!(source.requests().len(), 1);
    assert_eq!(source.requests()[0].text_after, "\nThanks");
}

#[tokio::test]
async fn test_fetch_requires_focus_and_collapsed_selection() {
    let source = FakeSource::new(vec![]);

    let mut unfocused = attached(source.clone(), "Hello", 5);
    unfocused.text_area_mut().unwrap().element_mut().focused = false;
    unfocused.typing_paused();

    let mut selected = attached(source.clone(), "Hello", 5);
    selected.text_area_mut().unwrap().set_selection_range(0, 5);
    selected.typing_paused();

    assert!(source.requests().is_empty());
}

#[tokio::test]
async fn test_mouse_down_aborts_pending_fetch() {
    let (_tx, reply) = Reply::later();
    let source = FakeSource::new(vec![reply]);
    let mut smart = attached(source.clone(), "The quick ", 10);
    let t0 = Instant::now();

    smart.typing_paused();
    smart.key_up(key(KeyCode::Char(' ')), t0);
    smart.mouse_down();

    assert!(source.token(0).is_cancelled());
    assert_eq!(smart.debounce_deadline(), None);
    assert_eq!(smart.state(), TextAreaState::Idle);
    assert!(!smart.next_fetch_outcome().await);
}

#[tokio::test]
async fn test_focus_out_rejects_visible_suggestion() {
    let mut smart = showing_quick_fox().await;

    smart.focus_out();

    assert_eq!(raw_value(&smart), "The quick ");
    assert!(!smart.is_showing());
}

#[tokio::test]
async fn test_scroll_rejects_but_keeps_pending_fetch() {
    let (tx, reply) = Reply::later();
    let source = FakeSource::new(vec![reply]);
    let mut smart = attached(source.clone(), "The quick ", 10);

    smart.typing_paused();
    smart.scroll();
    assert!(!source.token(0).is_cancelled());

    tx.send(Some("brown fox".to_string())).unwrap();
    assert!(smart.next_fetch_outcome().await);

    smart.scroll();
    assert_eq!(raw_value(&smart), "The quick ");
    assert!(!smart.is_showing());
}

#[tokio::test]
async fn test_detach_returns_element_without_suggestion() {
    let mut smart = showing_quick_fox().await;

    let element = smart.detach().unwrap();

    assert_eq!(element.value(), "The quick ");
    assert!(smart.text_area().is_none());
    assert_eq!(smart.key_down(key(KeyCode::Tab)), KeyOutcome::PassThrough);
}

#[tokio::test]
async fn test_request_carries_config_and_antiforgery_attributes() {
    let source = FakeSource::new(vec![]);
    let attributes = Attributes::new()
        .with("data-config", r#"{"userRole":"HR"}"#)
        .with("data-antiforgery-name", "token")
        .with("data-antiforgery-value", "xyz");
    let mut smart = controller(source.clone(), attributes);
    smart
        .attach(Sibling::Input(text_area_at("Hi", 2)))
        .unwrap();

    smart.typing_paused();

    let request = &source.requests()[0];
    assert_eq!(request.config, r#"{"userRole":"HR"}"#);
    assert_eq!(
        request.antiforgery,
        Some(("token".to_string(), "xyz".to_string()))
    );
}

#[tokio::test]
async fn test_overlay_mode_accepts_into_value() {
    let source = FakeSource::new(vec![Reply::text("brown fox")]);
    let options = SmartTextAreaOptions {
        touch: true,
        ..SmartTextAreaOptions::default()
    };
    let mut smart = controller_with(source, Attributes::new(), options);
    smart
        .attach(Sibling::Input(text_area_at("The quick ", 10)))
        .unwrap();

    smart.typing_paused();
    assert!(smart.next_fetch_outcome().await);
    assert_eq!(raw_value(&smart), "The quick ");
    assert!(smart.is_showing());

    smart.suggestion_clicked();
    assert_eq!(value(&smart), "The quick brown fox ");
    assert_eq!(selection(&smart), (20, 20));
    assert!(!smart.is_showing());
}

#[tokio::test]
async fn test_overlay_type_through_inserts_typed_char() {
    let source = FakeSource::new(vec![Reply::text("brown fox")]);
    let attributes = Attributes::new().with(ATTR_INLINE_SUGGESTIONS, "false");
    let mut smart = controller(source, attributes);
    smart
        .attach(Sibling::Input(text_area_at("The quick ", 10)))
        .unwrap();
    smart.typing_paused();
    smart.next_fetch_outcome().await;

    assert_eq!(smart.key_down(key(KeyCode::Char('b'))), KeyOutcome::Handled);

    assert_eq!(value(&smart), "The quick b");
    assert_eq!(smart.display().unwrap().current_suggestion(), "rown fox ");
    assert!(smart.is_showing());
}

#[tokio::test]
async fn test_value_edit_during_fetch_drops_response() {
    let (tx, reply) = Reply::later();
    let source = FakeSource::new(vec![reply]);
    let mut smart = attached(source, "The quick ", 10);

    smart.typing_paused();
    smart.text_area_mut().unwrap().set_value("The quick red ");
    tx.send(Some("brown fox".to_string())).unwrap();

    assert!(!smart.next_fetch_outcome().await);
    assert_eq!(raw_value(&smart), "The quick red ");
    assert!(!smart.is_showing());
}

#[tokio::test]
async fn test_text_area_attribute_overrides_component_attribute() {
    let attributes = Attributes::new().with(ATTR_INLINE_SUGGESTIONS, "false");
    let mut smart = controller(FakeSource::new(vec![]), attributes);
    let mut element = TextInput::textarea();
    element.attributes.set(ATTR_INLINE_SUGGESTIONS, "true");

    smart.attach(Sibling::Input(element)).unwrap();
    assert_eq!(smart.display().unwrap().mode(), DisplayMode::Inline);

    let options = SmartTextAreaOptions {
        touch: true,
        ..SmartTextAreaOptions::default()
    };
    let mut smart = controller_with(FakeSource::new(vec![]), Attributes::new(), options);
    let mut element = TextInput::textarea();
    element.attributes.set(ATTR_INLINE_SUGGESTIONS, "true");

    smart.attach(Sibling::Input(element)).unwrap();
    assert_eq!(smart.display().unwrap().mode(), DisplayMode::Inline);
}

#[tokio::test]
async fn test_debug_shows_state_and_request_id() {
    let source = FakeSource::new(vec![Reply::text("brown fox")]);
    let mut smart = attached(source, "The quick ", 10);

    smart.typing_paused();
    let debug = format!("{:?}", smart);

    assert!(debug.starts_with("SmartTextArea"));
    assert!(debug.contains("state: PendingFetch"));
    assert!(debug.contains("request_id: 1"));
}
