//! Shared domain primitives for the cat record service and editor.

pub mod error;
pub mod name_rule;
pub mod types;
