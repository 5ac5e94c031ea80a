//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `period`: `MM-YYYY` month periods
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod period;
pub mod ports;
