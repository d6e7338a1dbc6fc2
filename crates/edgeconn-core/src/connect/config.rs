use crate::error::{EdgeConnError, Result};

/// Default limit on batch-resolution passes.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Configuration for the edge-connection layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectConfig {
    /// Maximum number of sweeps `add_edges` makes over a batch before it
    /// gives up on the descriptors it could not resolve. Bounds batches
    /// with circular edge-to-edge references. Default: 10.
    pub max_passes: usize,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl ConnectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_passes == 0 {
            return Err(EdgeConnError::Validation("max_passes must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConnectConfig::new();
        assert_eq!(config.max_passes, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_passes_rejected() {
        let config = ConnectConfig::new().with_max_passes(0);
        assert_eq!(
            config.validate(),
            Err(EdgeConnError::Validation("max_passes must be > 0".into()))
        );
    }
}
