//! Client-side editing of a single cat record.
//!
//! [`CatEditor`](machine::CatEditor) drives one editing session through
//! `Idle -> Loading -> Ready -> Submitting -> Success | Failed -> Idle`,
//! talking to the record service through a [`CatSource`](source::CatSource)
//! (normally the HTTP [`CatClient`](client::CatClient)). Every state change
//! is published on a watch channel so a UI can render from it.

pub mod cache;
pub mod client;
pub mod config;
pub mod draft;
pub mod error;
pub mod machine;
pub mod source;

pub use client::CatClient;
pub use config::EditorConfig;
pub use draft::{DraftField, EditorDraft};
pub use error::{EditorError, FailureKind, TransitionError};
pub use machine::{CatEditor, EditorState};
pub use source::CatSource;
