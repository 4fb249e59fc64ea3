pub mod app;
pub mod caret;
pub mod cli;
pub mod components;
pub mod config;
pub mod display;
pub mod element;
pub mod error;
pub mod suggest;
pub mod textarea;

pub use components::{ComponentSettings, Components};
pub use error::SmartError;
pub use textarea::{KeyOutcome, SmartTextArea, SmartTextAreaOptions};

mod test_utils;
