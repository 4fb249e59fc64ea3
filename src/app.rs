//! Terminal host for a smart text area
//!
//! Plays the part of the enclosing page: owns the terminal, feeds the
//! component key, mouse, focus and scroll events, and draws the text area
//! with whatever suggestion layer is active.

mod app_events;
mod app_render;

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::element::TextAreaFacade;
use crate::textarea::SmartTextArea;

/// Longest wait for terminal events between polls
const TICK: Duration = Duration::from_millis(50);

/// Application state
pub struct App {
    smart: SmartTextArea,
    should_quit: bool,
    /// Screen area of the visible overlay, for click hit-testing
    overlay_area: Option<Rect>,
}

impl App {
    pub fn new(smart: SmartTextArea) -> Self {
        Self {
            smart,
            should_quit: false,
            overlay_area: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn smart(&self) -> &SmartTextArea {
        &self.smart
    }

    pub fn smart_mut(&mut self) -> &mut SmartTextArea {
        &mut self.smart
    }

    pub fn text_area(&self) -> Option<&TextAreaFacade> {
        self.smart.text_area()
    }

    /// How long the event loop may block before the next `tick`
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.smart.debounce_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(TICK),
            None => TICK,
        }
    }

    /// Fire the debounce and pick up finished fetches
    pub fn tick(&mut self, now: Instant) -> bool {
        self.smart.poll(now)
    }
}
