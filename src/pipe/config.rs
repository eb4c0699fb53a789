//! Evaluation settings for a [`Pipeline`](super::Pipeline).

/// Whether adjacent lazy operators are fused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fusion {
    /// Group adjacent lazy operators into pull-driven runs.
    #[default]
    Enabled,
    /// Apply every operator to the whole value, one after another.
    ///
    /// Output is identical to [`Fusion::Enabled`]; only the number of calls
    /// into user functions and the intermediate allocations differ.
    Disabled,
}

/// Settings applied to every evaluation of a pipeline.
///
/// # Examples
///
/// ```rust
/// use lazypipe::pipe::{Fusion, PipeConfig};
///
/// let config = PipeConfig::default();
/// assert_eq!(config.fusion(), Fusion::Enabled);
///
/// let eager = PipeConfig::default().with_fusion(Fusion::Disabled);
/// assert_eq!(eager.fusion(), Fusion::Disabled);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipeConfig {
    fusion: Fusion,
}

impl PipeConfig {
    /// Returns a configuration that evaluates every operator eagerly.
    pub const fn eager() -> Self {
        Self {
            fusion: Fusion::Disabled,
        }
    }

    /// Sets the fusion mode.
    #[must_use]
    pub const fn with_fusion(mut self, fusion: Fusion) -> Self {
        self.fusion = fusion;
        self
    }

    /// Returns the fusion mode.
    pub const fn fusion(&self) -> Fusion {
        self.fusion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_fusion() {
        assert_eq!(PipeConfig::default().fusion(), Fusion::Enabled);
    }

    #[test]
    fn test_eager_disables_fusion() {
        assert_eq!(PipeConfig::eager(), PipeConfig::default().with_fusion(Fusion::Disabled));
    }
}
