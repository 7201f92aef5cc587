pub mod clipboard;
pub mod config;
pub mod detail;
pub mod error;
pub mod form;
pub mod loader;
pub mod models;
pub mod notice;
pub mod render;
pub mod session;
pub mod store;

pub use config::{BlogConfig, FallbackPolicy};
pub use error::{ClipboardError, ConfigError, LoadError, ValidationError};
pub use models::{Post, PostId};
pub use notice::{Notice, Severity};
pub use session::Session;
pub use store::{IdGenerator, PostStore};
