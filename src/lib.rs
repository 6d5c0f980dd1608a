//! IMDb Renamer Library
//!
//! Infers the identity of movie and episode files from their paths and `.nfo`
//! sidecars, resolves it against OMDb and renames the files to a canonical form.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
