//! External tool integrations.

pub mod macos;
