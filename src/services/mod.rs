//! External service clients.

pub mod omdb;
pub mod provider;
