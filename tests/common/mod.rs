mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from goldicons for tests
pub use goldicons::{IconConfig, IconGenerator, border_width};
