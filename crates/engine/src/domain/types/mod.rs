// Re-export all types so callers can use `domain::types::*`

pub use self::config::*;
pub use self::location::*;

// Module declarations
mod config;
mod location;
