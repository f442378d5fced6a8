//! forg Library
//!
//! A library for organizing files into folders by rule, with dry-run preview,
//! conflict resolution, and single-level undo.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod utils;

pub use error::{Error, Result};
