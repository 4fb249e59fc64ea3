//! Host element model
//!
//! Plain-data stand-ins for the text input and its companion component: the
//! value, selection, scroll position, computed style and attributes the
//! suggestion machinery reads and writes.

mod attributes;
pub mod chars;
mod facade;
mod style;
mod text_input;

pub use attributes::{Attributes, Sibling};
pub use facade::TextAreaFacade;
pub use style::{BoxSizing, Edges, ElementStyle, WhiteSpace, WordWrap};
pub use text_input::{Edit, InputKind, TextInput};
