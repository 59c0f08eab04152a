//! Gateway-level handlers. Domain handlers live with their modules.

pub mod health;

pub use health::*;
