//! Construction-time configuration for [`ProbingTable`](crate::ProbingTable)

use thiserror::Error;

/// Smallest capacity a table is ever allocated with
pub const DEFAULT_MINIMUM_CAPACITY: usize = 1024;
/// Fraction of occupied slots at which the table doubles
pub const DEFAULT_LOAD_FACTOR: f64 = 0.6;
/// Factor the capacity is divided by when the table shrinks
pub const DEFAULT_SHRINK_DIVISOR: usize = 4;

/// Errors produced while building a [`TableConfig`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Minimum capacity must be a non-zero power of two, got: {0}")]
    InvalidMinimumCapacity(usize),
    #[error("Load factor must lie strictly between 0 and 1, got: {0}")]
    LoadFactorOutOfRange(f64),
    #[error("Shrink divisor must be a power of two of at least 2, got: {0}")]
    InvalidShrinkDivisor(usize),
}

/// Sizing parameters of a table, fixed once the table is created.
///
/// ```rust
/// use probing_hashmap::TableConfig;
///
/// let config = TableConfig::builder().minimum_capacity(16).load_factor(0.5).build().unwrap();
/// assert_eq!(config.minimum_capacity(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Capacity floor for construction and shrinking
    minimum_capacity: usize,
    /// Occupancy ratio that triggers a grow
    load_factor: f64,
    /// Shrink divides the capacity by this value
    shrink_divisor: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            minimum_capacity: DEFAULT_MINIMUM_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            shrink_divisor: DEFAULT_SHRINK_DIVISOR,
        }
    }
}

impl TableConfig {
    /// Starts a builder seeded with the default parameters
    #[must_use]
    pub fn builder() -> TableConfigBuilder {
        TableConfigBuilder { config: Self::default() }
    }

    /// Returns the capacity floor
    #[must_use]
    pub fn minimum_capacity(&self) -> usize {
        self.minimum_capacity
    }

    /// Returns the grow threshold
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the shrink divisor
    #[must_use]
    pub fn shrink_divisor(&self) -> usize {
        self.shrink_divisor
    }

    /// Number of entries at which a table of `capacity` slots must grow
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub(crate) fn grow_threshold(&self, capacity: usize) -> usize {
        (capacity as f64 * self.load_factor) as usize
    }

    /// Capacity to shrink to once `len` entries remain in `capacity` slots, if any
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub(crate) fn shrink_target(&self, len: usize, capacity: usize) -> Option<usize> {
        let load_factored = (len as f64 / self.load_factor) as usize;
        let smaller = capacity.checked_div(self.shrink_divisor)?;

        (load_factored < smaller && smaller > self.minimum_capacity).then_some(smaller)
    }
}

/// Builder for [`TableConfig`]
#[derive(Debug, Clone, Copy)]
pub struct TableConfigBuilder {
    /// Parameters collected so far
    config: TableConfig,
}

impl TableConfigBuilder {
    /// Sets the capacity floor
    #[must_use]
    pub fn minimum_capacity(mut self, minimum_capacity: usize) -> Self {
        self.config.minimum_capacity = minimum_capacity;
        self
    }

    /// Sets the grow threshold
    #[must_use]
    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.config.load_factor = load_factor;
        self
    }

    /// Sets the shrink divisor
    #[must_use]
    pub fn shrink_divisor(mut self, shrink_divisor: usize) -> Self {
        self.config.shrink_divisor = shrink_divisor;
        self
    }

    /// Validates the parameters
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first parameter that is out of range.
    pub fn build(self) -> Result<TableConfig, ConfigError> {
        let TableConfig { minimum_capacity, load_factor, shrink_divisor } = self.config;

        if !minimum_capacity.is_power_of_two() {
            return Err(ConfigError::InvalidMinimumCapacity(minimum_capacity));
        }
        if !(load_factor > 0.0 && load_factor < 1.0) {
            return Err(ConfigError::LoadFactorOutOfRange(load_factor));
        }
        if shrink_divisor < 2 || !shrink_divisor.is_power_of_two() {
            return Err(ConfigError::InvalidShrinkDivisor(shrink_divisor));
        }

        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TableConfig::default();
        assert_eq!(config.minimum_capacity(), 1024);
        assert!((config.load_factor() - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.shrink_divisor(), 4);
        assert_eq!(TableConfig::builder().build(), Ok(config));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert_eq!(
            TableConfig::builder().minimum_capacity(0).build(),
            Err(ConfigError::InvalidMinimumCapacity(0))
        );
        assert_eq!(
            TableConfig::builder().minimum_capacity(1000).build(),
            Err(ConfigError::InvalidMinimumCapacity(1000))
        );
        assert_eq!(
            TableConfig::builder().load_factor(1.0).build(),
            Err(ConfigError::LoadFactorOutOfRange(1.0))
        );
        assert!(TableConfig::builder().load_factor(f64::NAN).build().is_err());
        assert_eq!(
            TableConfig::builder().shrink_divisor(3).build(),
            Err(ConfigError::InvalidShrinkDivisor(3))
        );
        assert_eq!(
            TableConfig::builder().shrink_divisor(1).build(),
            Err(ConfigError::InvalidShrinkDivisor(1))
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::LoadFactorOutOfRange(1.5);
        assert_eq!(err.to_string(), "Load factor must lie strictly between 0 and 1, got: 1.5");
    }

    #[test]
    fn test_thresholds() {
        let config = TableConfig::default();
        assert_eq!(config.grow_threshold(2048), 1228);
        assert_eq!(config.grow_threshold(1024), 614);

        // 8192 / 4 = 2048 > 1024, and 100 / 0.6 = 166 < 2048
        assert_eq!(config.shrink_target(100, 8192), Some(2048));
        // 4096 / 4 = 1024 is not above the floor
        assert_eq!(config.shrink_target(0, 4096), None);
        // 1300 / 0.6 = 2166 is not below 2048
        assert_eq!(config.shrink_target(1300, 8192), None);
    }
}
