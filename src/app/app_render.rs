use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::App;
use crate::caret::{self, Mirror};
use crate::display::{DisplayLayer, DisplayMode, FakeCaret, OverlayElement};
use crate::element::TextAreaFacade;
use crate::textarea::TextAreaState;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let layout =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(frame.area());
        let (text_area_rect, help_area) = (layout[0], layout[1]);

        let mode = self.smart.display().map(|d| d.mode());
        let title = match mode {
            Some(DisplayMode::Inline) => " Smart Text Area [inline] ",
            Some(DisplayMode::Overlay) => " Smart Text Area [overlay] ",
            None => " Smart Text Area ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(text_area_rect);
        frame.render_widget(block, text_area_rect);

        if let Some(text_area) = self.smart.text_area_mut() {
            fit_element(text_area, inner);
        }
        if let Some(text_area) = self.smart.text_area() {
            render_text(frame.buffer_mut(), text_area, inner);
        }

        self.overlay_area = None;
        let mut caret_drawn = false;
        if let Some(display) = self.smart.display() {
            match display.layer() {
                DisplayLayer::Inline(fake_caret) if fake_caret.visible => {
                    render_fake_caret(frame.buffer_mut(), fake_caret, inner);
                    caret_drawn = true;
                }
                DisplayLayer::Overlay(overlay) if overlay.visible => {
                    self.overlay_area = render_overlay(frame, overlay);
                }
                _ => {}
            }
        }

        if !caret_drawn
            && let Some(text_area) = self.smart.text_area()
            && text_area.is_focused()
        {
            let offset = caret::caret_offset_from_offset_parent(text_area.element());
            if let Some((x, y)) = cell_in(inner, offset.left, offset.top) {
                frame.set_cursor_position((x, y));
            }
        }

        render_help_line(frame, help_area, self.smart.state());
    }
}

/// Size the element to the block's inner area, in cells
fn fit_element(text_area: &mut TextAreaFacade, inner: Rect) {
    let element = text_area.element_mut();
    element.style.width = f64::from(inner.width);
    element.style.height = f64::from(inner.height);
    element.offset_left = f64::from(inner.x);
    element.offset_top = f64::from(inner.y);
}

/// Cell at absolute coordinates, if inside `area`
fn cell_in(area: Rect, left: f64, top: f64) -> Option<(u16, u16)> {
    let (x, y) = (left.round(), top.round());
    if x < f64::from(area.x) || y < f64::from(area.y) {
        return None;
    }
    let (x, y) = (x as u16, y as u16);
    (x < area.right() && y < area.bottom()).then_some((x, y))
}

/// Draw the raw value, suggestion included, dimming the suggestion range
fn render_text(buf: &mut Buffer, text_area: &TextAreaFacade, inner: Rect) {
    let element = text_area.element();
    let raw = text_area.value_including_suggestion();
    let boxes = Mirror::for_element(element).layout(raw);
    let suggestion = text_area.suggestion_range();
    let suggestion_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    for ((i, c), glyph) in raw.chars().enumerate().zip(&boxes) {
        if glyph.width == 0.0 {
            continue;
        }
        let left = f64::from(inner.x) + glyph.left - element.scroll_left;
        let top = f64::from(inner.y) + glyph.top - element.scroll_top;
        let Some((x, y)) = cell_in(inner, left, top) else {
            continue;
        };
        let symbol = if c == '\t' { ' ' } else { c };
        let style = if suggestion.as_ref().is_some_and(|r| r.contains(&i)) {
            suggestion_style
        } else {
            Style::default()
        };
        buf[(x, y)].set_char(symbol).set_style(style);
    }
}

fn render_fake_caret(buf: &mut Buffer, fake_caret: &FakeCaret, inner: Rect) {
    if let Some((x, y)) = cell_in(inner, fake_caret.left, fake_caret.top) {
        buf[(x, y)].set_style(Style::default().fg(Color::Black).bg(fake_caret.color));
    }
}

/// Draw the floating suggestion; returns where it landed
fn render_overlay(frame: &mut Frame, overlay: &OverlayElement) -> Option<Rect> {
    let screen = frame.area();
    let left = overlay.left.unwrap_or(0.0).max(0.0).round() as u16;
    let top = (overlay.top + overlay.margin_top).max(0.0).round() as u16;
    let width = overlay.width.max(overlay.min_width.unwrap_or(0.0)).ceil() as u16;
    let height = overlay.lines.max(1) as u16;

    if left >= screen.right() || top >= screen.bottom() {
        return None;
    }
    let area = Rect {
        x: left,
        y: top,
        width: width.max(1).min(screen.right() - left),
        height: height.min(screen.bottom() - top),
    };

    let content = Line::from(vec![
        Span::styled(
            overlay.prefix.as_str(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(overlay.text.as_str(), Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(Color::Black)),
        area,
    );
    Some(area)
}

fn render_help_line(frame: &mut Frame, area: Rect, state: TextAreaState) {
    let status = match state {
        TextAreaState::Idle => "",
        TextAreaState::PendingFetch => "thinking…",
        TextAreaState::Showing => "Tab to accept",
    };
    let line = Line::from(vec![
        Span::styled(" Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" quit  "),
        Span::styled(status, Style::default().fg(Color::Magenta)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
