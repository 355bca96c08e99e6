//! Core domain types shared by every layer.

pub mod clock;
pub mod error;
pub mod level;
