//! Error types for the sybilcut core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::graph::VertexId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::Graph`] queries.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The requested vertex is not part of the graph.
    #[error("vertex {vertex} is not present in the graph")]
    VertexNotFound {
        /// The vertex that could not be found.
        vertex: VertexId,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The requested vertex is not part of the graph.
        VertexNotFound => VertexNotFound { .. } => "GRAPH_VERTEX_NOT_FOUND",
    }
}

/// Error type produced when configuring or running a [`crate::Partitioner`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PartitionError {
    /// The seed set must contain at least one vertex.
    #[error("seed_size must be at least 1 (got {got})")]
    InvalidSeedSize {
        /// The invalid seed size supplied by the caller.
        got: usize,
    },
    /// More distinct seeds were requested than the id range can supply.
    #[error("seed_size {seed_size} exceeds the {range} ids available for sampling")]
    SeedRangeTooSmall {
        /// Number of distinct seeds requested.
        seed_size: usize,
        /// Number of ids in the inclusive sampling range.
        range: usize,
    },
    /// The graph has fewer vertices than the seed sampling range covers.
    #[error("graph `{graph}` has {vertices} vertices but seed sampling requires {required}")]
    InsufficientVertices {
        /// Identifier for the graph being partitioned.
        graph: Arc<str>,
        /// Number of vertices available in the graph.
        vertices: usize,
        /// Number of vertices required by the sampling range.
        required: usize,
    },
    /// The supplied graph contained no vertices.
    #[error("graph `{graph}` contains no vertices")]
    EmptyGraph {
        /// Identifier for the empty graph.
        graph: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`PartitionError`] variants.
    enum PartitionErrorCode for PartitionError {
        /// The seed set must contain at least one vertex.
        InvalidSeedSize => InvalidSeedSize { .. } => "PARTITION_INVALID_SEED_SIZE",
        /// More distinct seeds were requested than the id range can supply.
        SeedRangeTooSmall => SeedRangeTooSmall { .. } => "PARTITION_SEED_RANGE_TOO_SMALL",
        /// The graph has fewer vertices than the seed sampling range covers.
        InsufficientVertices => InsufficientVertices { .. } => "PARTITION_INSUFFICIENT_VERTICES",
        /// The supplied graph contained no vertices.
        EmptyGraph => EmptyGraph { .. } => "PARTITION_EMPTY_GRAPH",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PartitionError>;
