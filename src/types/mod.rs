//! Common types used throughout the index.

use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};

/// Smallest minimum degree that still forms a B-tree
pub const MIN_DEGREE: usize = 2;

/// Largest minimum degree whose `2t` child limit still fits in a usize
pub const MAX_DEGREE: usize = usize::MAX / 2;

/// Default minimum degree (nodes hold up to 5 keys)
pub const DEFAULT_MIN_DEGREE: usize = 3;

/// BTree configuration for node limits
///
/// The minimum degree `t` bounds every node to at most `2t - 1` keys. The
/// classical lower bound of `t - 1` keys per non-root node is only reached
/// through splitting; removals never rebalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BTreeConfig {
    /// Minimum degree (branching parameter `t`)
    pub min_degree: usize,
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
        }
    }
}

impl BTreeConfig {
    /// Create a new config with the given minimum degree
    pub fn new(min_degree: usize) -> Self {
        Self { min_degree }
    }

    /// Parse a config from JSON, e.g. `{"minDegree": 4}`
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| IndexError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject degrees that cannot form a B-tree or whose limits overflow
    pub fn validate(&self) -> Result<()> {
        if self.min_degree < MIN_DEGREE {
            return Err(IndexError::InvalidDegree {
                degree: self.min_degree,
                min: MIN_DEGREE,
            });
        }
        if self.min_degree > MAX_DEGREE {
            return Err(IndexError::DegreeTooLarge {
                degree: self.min_degree,
                max: MAX_DEGREE,
            });
        }
        Ok(())
    }

    /// Maximum keys per node (`2t - 1`)
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Minimum keys a non-root node receives from a split (`t - 1`)
    pub fn min_keys(&self) -> usize {
        self.min_degree - 1
    }

    /// Maximum children per internal node (`2t`)
    pub fn max_children(&self) -> usize {
        2 * self.min_degree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_limits() {
        let config = BTreeConfig::new(3);
        assert_eq!(config.max_keys(), 5);
        assert_eq!(config.min_keys(), 2);
        assert_eq!(config.max_children(), 6);

        let config = BTreeConfig::default();
        assert_eq!(config.min_degree, DEFAULT_MIN_DEGREE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_small_degree() {
        for degree in 0..MIN_DEGREE {
            assert_eq!(
                BTreeConfig::new(degree).validate(),
                Err(IndexError::InvalidDegree { degree, min: MIN_DEGREE })
            );
        }
        assert!(BTreeConfig::new(MIN_DEGREE).validate().is_ok());
    }

    #[test]
    fn test_config_rejects_overflowing_degree() {
        for degree in [MAX_DEGREE + 1, usize::MAX] {
            assert_eq!(
                BTreeConfig::new(degree).validate(),
                Err(IndexError::DegreeTooLarge { degree, max: MAX_DEGREE })
            );
        }

        let config = BTreeConfig::new(MAX_DEGREE);
        assert!(config.validate().is_ok());
        assert_eq!(config.max_keys(), usize::MAX - 2);
        assert_eq!(config.max_children(), usize::MAX - 1);

        assert!(matches!(
            BTreeConfig::from_json(r#"{"minDegree": 18446744073709551615}"#),
            Err(IndexError::DegreeTooLarge { .. })
        ));
    }

    #[test]
    fn test_config_from_json() {
        let config = BTreeConfig::from_json(r#"{"minDegree": 128}"#).unwrap();
        assert_eq!(config.min_degree, 128);
        assert_eq!(config.max_keys(), 255);

        assert!(matches!(
            BTreeConfig::from_json(r#"{"minDegree": 1}"#),
            Err(IndexError::InvalidDegree { degree: 1, .. })
        ));
        assert!(matches!(
            BTreeConfig::from_json("not json"),
            Err(IndexError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let json = serde_json::to_string(&BTreeConfig::new(4)).unwrap();
        assert_eq!(json, r#"{"minDegree":4}"#);
    }
}
