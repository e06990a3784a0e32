//! Random selection of the trusted seed vertices that bootstrap the honest
//! region.

use std::collections::BTreeSet;

use rand::Rng;

use crate::{Result, error::PartitionError, graph::VertexId};

/// Default number of seeds drawn for each run.
pub const DEFAULT_SEED_SIZE: usize = 20;

/// Default inclusive upper bound of the id range seeds are drawn from.
pub const DEFAULT_SEED_ID_UPPER_BOUND: VertexId = 100;

/// Immutable set of distinct seed vertex ids.
///
/// # Examples
/// ```
/// use sybilcut_core::SeedSet;
///
/// let seeds = SeedSet::from_ids([2, 0, 1, 2]);
/// assert_eq!(seeds.len(), 3);
/// assert!(seeds.contains(2));
/// assert_eq!(seeds.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SeedSet {
    ids: BTreeSet<VertexId>,
}

impl SeedSet {
    /// Builds a seed set from explicit ids, discarding duplicates.
    #[must_use]
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = VertexId>,
    {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Returns whether `vertex` is a seed.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.ids.contains(&vertex)
    }

    /// Number of seeds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates the seeds in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.ids.iter().copied()
    }
}

/// Draws `seed_size` distinct ids uniformly from `0..=upper_bound`.
///
/// Duplicated draws are rejected and redrawn until the set is full.
///
/// # Errors
/// Returns [`PartitionError::InvalidSeedSize`] when `seed_size` is zero and
/// [`PartitionError::SeedRangeTooSmall`] when the range holds fewer than
/// `seed_size` ids, either of which would prevent the sampling loop from
/// finishing meaningfully.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use sybilcut_core::select_seeds;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let seeds = select_seeds(&mut rng, 20, 100)?;
/// assert_eq!(seeds.len(), 20);
/// assert!(seeds.iter().all(|id| id <= 100));
/// # Ok::<(), sybilcut_core::PartitionError>(())
/// ```
pub fn select_seeds<R>(rng: &mut R, seed_size: usize, upper_bound: VertexId) -> Result<SeedSet>
where
    R: Rng + ?Sized,
{
    if seed_size == 0 {
        return Err(PartitionError::InvalidSeedSize { got: seed_size });
    }
    let range = upper_bound.saturating_add(1);
    if seed_size > range {
        return Err(PartitionError::SeedRangeTooSmall { seed_size, range });
    }

    let mut ids = BTreeSet::new();
    while ids.len() < seed_size {
        ids.insert(rng.gen_range(0..=upper_bound));
    }
    Ok(SeedSet { ids })
}
