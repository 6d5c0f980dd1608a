//! Core business logic modules.

pub mod cache;
pub mod episode;
pub mod renamer;
pub mod selector;
pub mod sidecar;
pub mod title;
pub mod year;
