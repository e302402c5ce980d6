//! ColoringPolicy v1: palette-bounded degeneracy coloring.

use serde::{Deserialize, Serialize};
use crate::canonical::canonical_hash_hex;
use crate::DEFAULT_POLICY_VERSION;
use super::order::RemovalOrder;

/// Default number of palette colors.
pub const DEFAULT_PALETTE_SIZE: usize = 8;

/// Error type for invalid policies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// The palette has no colors.
    #[error("Palette must contain at least one color")]
    EmptyPalette,
}

/// Coloring policy version 1.
///
/// ## Parameters
///
/// - `palette_size`: number of colors K; vertices whose neighbors hold all K
///   colors end in `Conflict`
/// - `removal_order`: which active vertex the ordering phase removes next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoringPolicyV1 {
    /// Policy version identifier.
    pub version: String,
    /// Number of palette colors.
    pub palette_size: usize,
    /// Ordering-phase removal order.
    #[serde(default)]
    pub removal_order: RemovalOrder,
}

impl ColoringPolicyV1 {
    /// Create a policy with the given palette size.
    pub fn new(palette_size: usize) -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            palette_size,
            removal_order: RemovalOrder::default(),
        }
    }

    /// Use a different removal order.
    pub fn with_removal_order(mut self, removal_order: RemovalOrder) -> Self {
        self.removal_order = removal_order;
        self
    }

    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Check the policy can drive a run.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.palette_size == 0 {
            return Err(PolicyError::EmptyPalette);
        }
        Ok(())
    }

    /// Compute a hash of the policy parameters.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self)
    }
}

impl Default for ColoringPolicyV1 {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let policy = ColoringPolicyV1::default();
        assert_eq!(policy.palette_size, DEFAULT_PALETTE_SIZE);
        assert_eq!(policy.policy_id(), DEFAULT_POLICY_VERSION);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(ColoringPolicyV1::new(0).validate(), Err(PolicyError::EmptyPalette));
    }

    #[test]
    fn test_policy_params_hash_determinism() {
        assert_eq!(ColoringPolicyV1::new(3).params_hash(), ColoringPolicyV1::new(3).params_hash());
    }

    #[test]
    fn test_policy_params_hash_changes() {
        assert_ne!(ColoringPolicyV1::new(3).params_hash(), ColoringPolicyV1::new(4).params_hash());
    }

    #[test]
    fn test_removal_order_changes_hash() {
        let largest = ColoringPolicyV1::new(3);
        let smallest = ColoringPolicyV1::new(3).with_removal_order(RemovalOrder::SmallestLast);
        assert_ne!(largest.params_hash(), smallest.params_hash());
    }

    #[test]
    fn test_policy_from_json() {
        let policy: ColoringPolicyV1 =
            serde_json::from_str(r#"{"version": "coloring_policy_v1", "palette_size": 5}"#).unwrap();
        assert_eq!(policy, ColoringPolicyV1::new(5));
        assert_eq!(policy.removal_order, RemovalOrder::LargestFirst);
    }
}
