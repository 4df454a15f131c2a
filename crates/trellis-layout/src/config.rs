//! Layout configuration.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Default viewport width.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 800;

/// Default viewport height.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 600;

/// Settings shared by every box of a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Percentage base for layout roots.
    pub viewport: Size,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_viewport_uses_default() {
        let config: LayoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LayoutConfig::default());
        assert_eq!(config.viewport, Size::new(800, 600));
    }
}
