//! Wikipad Core - shared types
//! 
//! This crate provides the error type, configuration and event bus shared
//! by the editor and the page widgets.

pub mod config;
pub mod events;
pub mod error;

pub use config::{AppConfig, DisplayMode, TextSize};
pub use events::{Event, EventBus, EventSubscription};
pub use error::{WikipadError, Result};

/// Wikipad version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Wikipad";
