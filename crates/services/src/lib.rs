#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod playthrough;
pub mod rows;
pub mod templates;

pub use error::{LoadError, SessionError};
pub use loader::LoadedBank;
pub use playthrough::{Advance, Playthrough, Resolution, TickOutcome};
pub use rows::RowFormat;
