//! Core types and service wiring for the binwise trash-sorting assistant.

/// Region catalog store and its startup validation.
pub mod catalog;
/// Label and free-text classification against a region catalog.
pub mod classify;
/// Which input source currently owns the result display.
pub mod display;
/// Carbon-footprint report contract and prompt handling.
pub mod footprint;
/// Domain models and identifiers shared by all crates.
pub mod model;
/// Traits describing external collaborators and shared helper types.
pub mod ports;
/// Carbon-footprint questionnaire and answer validation.
pub mod quiz;
/// High-level service facade used by clients.
pub mod service;

pub use catalog::*;
pub use classify::*;
pub use display::*;
pub use footprint::*;
pub use model::*;
pub use ports::*;
pub use quiz::*;
pub use service::*;
