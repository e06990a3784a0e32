//! Builder for configuring [`Partitioner`] runs.
//!
//! Validation happens once in [`PartitionerBuilder::build`] so a constructed
//! [`Partitioner`] can always sample its seed set.

use std::num::NonZeroUsize;

use crate::{
    Result,
    error::PartitionError,
    graph::VertexId,
    partitioner::Partitioner,
    seeds::{DEFAULT_SEED_ID_UPPER_BOUND, DEFAULT_SEED_SIZE},
};

/// Configures and constructs [`Partitioner`] instances.
///
/// # Examples
/// ```
/// use sybilcut_core::PartitionerBuilder;
///
/// let partitioner = PartitionerBuilder::new()
///     .with_seed_size(5)
///     .with_seed_id_upper_bound(9)
///     .with_rng_seed(42)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(partitioner.seed_size().get(), 5);
/// assert_eq!(partitioner.seed_id_upper_bound(), 9);
/// assert_eq!(partitioner.rng_seed(), Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct PartitionerBuilder {
    seed_size: usize,
    seed_id_upper_bound: VertexId,
    rng_seed: Option<u64>,
}

impl Default for PartitionerBuilder {
    fn default() -> Self {
        Self {
            seed_size: DEFAULT_SEED_SIZE,
            seed_id_upper_bound: DEFAULT_SEED_ID_UPPER_BOUND,
            rng_seed: None,
        }
    }
}

impl PartitionerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::PartitionerBuilder;
    ///
    /// let builder = PartitionerBuilder::new();
    /// assert_eq!(builder.seed_size(), 20);
    /// assert_eq!(builder.seed_id_upper_bound(), 100);
    /// assert_eq!(builder.rng_seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of seeds drawn per run.
    #[must_use]
    pub fn with_seed_size(mut self, size: usize) -> Self {
        self.seed_size = size;
        self
    }

    /// Returns the configured seed size.
    #[must_use]
    pub fn seed_size(&self) -> usize {
        self.seed_size
    }

    /// Overrides the inclusive upper bound of the seed id range.
    #[must_use]
    pub fn with_seed_id_upper_bound(mut self, bound: VertexId) -> Self {
        self.seed_id_upper_bound = bound;
        self
    }

    /// Returns the configured inclusive seed id bound.
    #[must_use]
    pub fn seed_id_upper_bound(&self) -> VertexId {
        self.seed_id_upper_bound
    }

    /// Pins the random source used for seed sampling.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::PartitionerBuilder;
    ///
    /// let builder = PartitionerBuilder::new().with_rng_seed(7);
    /// assert_eq!(builder.rng_seed(), Some(7));
    /// ```
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Returns the pinned random seed, if any.
    #[must_use]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Validates the configuration and constructs a [`Partitioner`].
    ///
    /// # Errors
    /// Returns [`PartitionError::InvalidSeedSize`] for a zero seed size and
    /// [`PartitionError::SeedRangeTooSmall`] when the id range cannot supply
    /// that many distinct seeds.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::{PartitionError, PartitionerBuilder};
    ///
    /// let err = PartitionerBuilder::new().with_seed_size(0).build().unwrap_err();
    /// assert_eq!(err, PartitionError::InvalidSeedSize { got: 0 });
    /// ```
    pub fn build(self) -> Result<Partitioner> {
        let seed_size = NonZeroUsize::new(self.seed_size).ok_or(
            PartitionError::InvalidSeedSize {
                got: self.seed_size,
            },
        )?;
        let range = self.seed_id_upper_bound.saturating_add(1);
        if seed_size.get() > range {
            return Err(PartitionError::SeedRangeTooSmall {
                seed_size: seed_size.get(),
                range,
            });
        }

        Ok(Partitioner::new(
            seed_size,
            self.seed_id_upper_bound,
            self.rng_seed,
        ))
    }
}
