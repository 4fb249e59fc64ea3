use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use super::App;
use crate::caret;
use crate::display::insert_text_at_caret_position;
use crate::element::TextInput;
use crate::textarea::KeyOutcome;

impl App {
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::FocusGained => self.set_focus(true),
            Event::FocusLost => {
                self.set_focus(false);
                self.smart.focus_out();
            }
            Event::Paste(text) => self.handle_paste(&text, now),
            Event::Resize(width, _) => log::debug!("Terminal resized to {} columns", width),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || ctrl_c {
            self.should_quit = true;
            return;
        }

        if self.smart.key_down(key) == KeyOutcome::PassThrough
            && let Some(text_area) = self.smart.text_area_mut()
        {
            text_area.apply_key(key);
            keep_caret_visible(text_area.element_mut());
        }
        // Terminals report presses only; the release follows right away
        self.smart.key_up(key, now);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let on_overlay = self
                    .overlay_area
                    .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
                if on_overlay {
                    self.smart.suggestion_clicked();
                } else {
                    self.smart.mouse_down();
                }
            }
            MouseEventKind::ScrollDown => self.scroll_by(1.0),
            MouseEventKind::ScrollUp => self.scroll_by(-1.0),
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: &str, now: Instant) {
        self.smart.remove_existing_or_pending_suggestion();
        if let Some(text_area) = self.smart.text_area_mut() {
            insert_text_at_caret_position(text_area, text);
            caret::scroll_down_to_caret_if_needed(text_area.element_mut());
        }
        self.smart.key_up(KeyEvent::from(KeyCode::Null), now);
    }

    fn scroll_by(&mut self, lines: f64) {
        let Some(text_area) = self.smart.text_area_mut() else {
            return;
        };
        let element = text_area.element_mut();
        let line_height = element.style.line_height;
        element.scroll_top = (element.scroll_top + lines * line_height).max(0.0);
        self.smart.scroll();
    }

    fn set_focus(&mut self, focused: bool) {
        if let Some(text_area) = self.smart.text_area_mut() {
            text_area.element_mut().focused = focused;
        }
    }
}

/// Scroll so the caret line is inside the element
fn keep_caret_visible(element: &mut TextInput) {
    let pos = caret::position(element);
    if pos.top < element.scroll_top {
        element.scroll_top = pos.top;
    } else {
        caret::scroll_down_to_caret_if_needed(element);
    }
}
