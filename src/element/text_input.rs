use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::chars;
use super::{Attributes, ElementStyle, WhiteSpace};

/// Which kind of editable element this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Multi-line `<textarea>`
    TextArea,
    /// Single-line `<input>`
    Input,
    /// `contenteditable` element; caret is measured through its selection range
    ContentEditable,
}

impl InputKind {
    pub fn tag_name(&self) -> &'static str {
        match self {
            InputKind::TextArea => "textarea",
            InputKind::Input => "input",
            InputKind::ContentEditable => "div",
        }
    }
}

/// A change to the value: `removed` chars at `start` replaced by `inserted` chars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub removed: usize,
    pub inserted: usize,
}

#[derive(Debug, Clone)]
struct UndoEntry {
    value: String,
    selection: (usize, usize),
}

/// A text-input-like element
///
/// Positions are char offsets. `selection_start <= selection_end <= len`
/// holds after every operation.
#[derive(Debug, Clone)]
pub struct TextInput {
    kind: InputKind,
    value: String,
    selection_start: usize,
    selection_end: usize,
    pub scroll_top: f64,
    pub scroll_left: f64,
    /// Position of the border box relative to the offset parent
    pub offset_top: f64,
    pub offset_left: f64,
    pub style: ElementStyle,
    pub focused: bool,
    pub attributes: Attributes,
    insert_command: bool,
    undo_stack: Vec<UndoEntry>,
}

impl TextInput {
    pub fn new(kind: InputKind) -> Self {
        let mut style = ElementStyle::default();
        if kind == InputKind::Input {
            style.white_space = WhiteSpace::Pre;
            style.height = style.line_height;
        }
        Self {
            kind,
            value: String::new(),
            selection_start: 0,
            selection_end: 0,
            scroll_top: 0.0,
            scroll_left: 0.0,
            offset_top: 0.0,
            offset_left: 0.0,
            style,
            focused: false,
            attributes: Attributes::new(),
            insert_command: true,
            undo_stack: Vec::new(),
        }
    }

    pub fn textarea() -> Self {
        Self::new(InputKind::TextArea)
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn focused(mut self) -> Self {
        self.focused = true;
        self
    }

    /// Element without an undo-preserving insert command; inserts fall back to
    /// splicing the value
    pub fn without_insert_command(mut self) -> Self {
        self.insert_command = false;
        self
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        chars::len(&self.value)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn selection_start(&self) -> usize {
        self.selection_start
    }

    pub fn selection_end(&self) -> usize {
        self.selection_end
    }

    pub fn selection_collapsed(&self) -> bool {
        self.selection_start == self.selection_end
    }

    pub fn set_selection_range(&mut self, start: usize, end: usize) {
        let len = self.len();
        let start = start.min(len);
        self.selection_start = start;
        self.selection_end = end.min(len).max(start);
    }

    /// Replace the whole value. Moves the caret to the end and drops undo history.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        let len = self.len();
        self.selection_start = len;
        self.selection_end = len;
        self.undo_stack.clear();
    }

    /// Undo-preserving text insertion over the current selection
    ///
    /// Returns `None` when the element has no insert command.
    pub fn insert_text(&mut self, text: &str) -> Option<Edit> {
        if !self.insert_command {
            return None;
        }
        Some(self.replace_selection(text))
    }

    fn replace_selection(&mut self, text: &str) -> Edit {
        self.push_undo();
        let start = self.selection_start;
        let removed = self.selection_end - start;
        self.value = chars::splice(&self.value, start, self.selection_end, text);
        let inserted = chars::len(text);
        let caret = start + inserted;
        self.selection_start = caret;
        self.selection_end = caret;
        Edit {
            start,
            removed,
            inserted,
        }
    }

    fn push_undo(&mut self) {
        self.undo_stack.push(UndoEntry {
            value: self.value.clone(),
            selection: (self.selection_start, self.selection_end),
        });
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Restore the value and selection from before the latest recorded edit
    pub fn undo(&mut self) -> Option<Edit> {
        let entry = self.undo_stack.pop()?;
        let removed = self.len();
        self.value = entry.value;
        let (start, end) = entry.selection;
        self.set_selection_range(start, end);
        Some(Edit {
            start: 0,
            removed,
            inserted: self.len(),
        })
    }

    pub fn client_height(&self) -> f64 {
        self.style.client_height()
    }

    /// Default action of a key press, as the element itself would perform it
    ///
    /// Returns the edit when the value changed.
    pub fn apply_key(&mut self, key: KeyEvent) -> Option<Edit> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('z') if ctrl => self.undo(),
            KeyCode::Char(c) if !ctrl && !alt => Some(self.replace_selection(&c.to_string())),
            KeyCode::Enter if self.kind != InputKind::Input => Some(self.replace_selection("\n")),
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => {
                let caret = if self.selection_collapsed() {
                    self.selection_start.saturating_sub(1)
                } else {
                    self.selection_start
                };
                self.set_selection_range(caret, caret);
                None
            }
            KeyCode::Right => {
                let caret = if self.selection_collapsed() {
                    self.selection_end + 1
                } else {
                    self.selection_end
                };
                self.set_selection_range(caret, caret);
                None
            }
            KeyCode::Home => {
                let caret = self.line_start(self.selection_start);
                self.set_selection_range(caret, caret);
                None
            }
            KeyCode::End => {
                let caret = self.line_end(self.selection_end);
                self.set_selection_range(caret, caret);
                None
            }
            KeyCode::Up => {
                self.move_vertically(false);
                None
            }
            KeyCode::Down => {
                self.move_vertically(true);
                None
            }
            _ => None,
        }
    }

    fn delete_backward(&mut self) -> Option<Edit> {
        if self.selection_collapsed() {
            if self.selection_start == 0 {
                return None;
            }
            self.selection_start -= 1;
        }
        Some(self.replace_selection(""))
    }

    fn delete_forward(&mut self) -> Option<Edit> {
        if self.selection_collapsed() {
            if self.selection_end >= self.len() {
                return None;
            }
            self.selection_end += 1;
        }
        Some(self.replace_selection(""))
    }

    /// Offset of the first char of the hard line containing `pos`
    pub fn line_start(&self, pos: usize) -> usize {
        self.value
            .chars()
            .take(pos)
            .enumerate()
            .filter(|(_, c)| *c == '\n')
            .last()
            .map(|(i, _)| i + 1)
            .unwrap_or(0)
    }

    /// Offset of the line break (or end of value) ending the line containing `pos`
    pub fn line_end(&self, pos: usize) -> usize {
        self.value
            .chars()
            .enumerate()
            .skip(pos)
            .find(|(_, c)| *c == '\n')
            .map(|(i, _)| i)
            .unwrap_or_else(|| self.len())
    }

    fn move_vertically(&mut self, down: bool) {
        let caret = self.selection_start;
        let start = self.line_start(caret);
        let column = caret - start;
        let target_line_start = if down {
            let end = self.line_end(caret);
            if end >= self.len() {
                return;
            }
            end + 1
        } else {
            if start == 0 {
                return;
            }
            self.line_start(start - 1)
        };
        let target_line_end = self.line_end(target_line_start);
        let target = (target_line_start + column).min(target_line_end);
        self.set_selection_range(target, target);
    }
}
