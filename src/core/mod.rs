//! Core business logic modules.

pub mod executor;
pub mod organizer;
pub mod planner;
pub mod rules;
pub mod scanner;
pub mod undo;
pub mod undo_store;
