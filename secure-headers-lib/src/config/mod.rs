mod loader;
mod types;

pub use loader::{load_from_path, load_from_str, ConfigFormat};
pub use types::{Config, LoggingConfig};
