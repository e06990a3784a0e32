//! Adjacency-set graph used by every stage of the partitioning pipeline.
//!
//! A [`Graph`] maps each vertex id to the set of its neighbour ids. Vertex
//! membership is independent of having edges: a vertex with an empty
//! neighbour set still exists. Undirected insertions keep the adjacency
//! symmetric, so `v ∈ adjacency(u) ⇔ u ∈ adjacency(v)` holds for every edge
//! added with [`EdgeDirection::Undirected`].

mod stats;
mod traversal;

use rustc_hash::{FxHashMap, FxHashSet};

pub use self::traversal::{Traversal, VisitColor, VisitRecord};

/// Identifier of a vertex. Identity is the id itself; vertices carry no payload.
pub type VertexId = usize;

/// Selects whether an edge mutation touches one or both adjacency entries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EdgeDirection {
    /// Only `u -> v` is affected.
    Directed,
    /// Both `u -> v` and `v -> u` are affected.
    Undirected,
}

/// Edge between two vertices, as seen from `source`.
///
/// Equality is orientation-sensitive; use [`Edge::canonical`] when the
/// unordered pair `{u, v}` is the identity of interest.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Edge {
    source: VertexId,
    target: VertexId,
}

impl Edge {
    /// Creates an edge from `source` to `target`.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::Edge;
    ///
    /// let edge = Edge::new(3, 1);
    /// assert_eq!(edge.source(), 3);
    /// assert_eq!(edge.target(), 1);
    /// ```
    #[must_use]
    pub const fn new(source: VertexId, target: VertexId) -> Self {
        Self { source, target }
    }

    /// Returns the vertex the edge was observed from.
    #[must_use]
    pub const fn source(&self) -> VertexId {
        self.source
    }

    /// Returns the far endpoint.
    #[must_use]
    pub const fn target(&self) -> VertexId {
        self.target
    }

    /// Returns the same edge seen from the other endpoint.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.target, self.source)
    }

    /// Returns the orientation-free form with the smaller id first.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::Edge;
    ///
    /// assert_eq!(Edge::new(5, 2).canonical(), Edge::new(2, 5).canonical());
    /// ```
    #[must_use]
    pub const fn canonical(&self) -> Self {
        if self.source <= self.target {
            *self
        } else {
            self.reversed()
        }
    }
}

/// Mutable adjacency-set graph.
///
/// # Examples
/// ```
/// use sybilcut_core::{EdgeDirection, Graph};
///
/// let mut graph = Graph::new();
/// graph.add_edge(0, 1, EdgeDirection::Undirected);
/// graph.add_vertex(7);
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 1);
/// assert!(graph.contains_vertex(7));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Graph {
    adjacency: FxHashMap<VertexId, FxHashSet<VertexId>>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an undirected graph from adjacency rows where the row index is
    /// the vertex id and the row lists its neighbours.
    ///
    /// Every row index becomes a vertex even when its row is empty. Rows that
    /// mention a neighbour without listing the reverse direction are
    /// symmetrised.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::Graph;
    ///
    /// let graph = Graph::from_adjacency_rows(&[vec![1], vec![0, 2], vec![1], vec![]]);
    /// assert_eq!(graph.vertex_count(), 4);
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    #[must_use]
    pub fn from_adjacency_rows(rows: &[Vec<VertexId>]) -> Self {
        let mut graph = Self::new();
        for (vertex, neighbours) in rows.iter().enumerate() {
            graph.add_vertex(vertex);
            for &neighbour in neighbours {
                graph.add_edge(vertex, neighbour, EdgeDirection::Undirected);
            }
        }
        graph
    }

    /// Builds an undirected graph from an edge list.
    #[must_use]
    pub fn from_edges(edges: &[(VertexId, VertexId)]) -> Self {
        let mut graph = Self::new();
        for &(u, v) in edges {
            graph.add_edge(u, v, EdgeDirection::Undirected);
        }
        graph
    }

    /// Inserts `vertex` with an empty neighbour set. No-op when present.
    pub fn add_vertex(&mut self, vertex: VertexId) {
        self.adjacency.entry(vertex).or_default();
    }

    /// Ensures `target ∈ adjacency(source)`, creating missing endpoints.
    ///
    /// With [`EdgeDirection::Undirected`] the reverse entry is ensured too.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId, direction: EdgeDirection) {
        self.adjacency.entry(source).or_default().insert(target);
        match direction {
            EdgeDirection::Directed => {}
            EdgeDirection::Undirected => {
                self.adjacency.entry(target).or_default().insert(source);
            }
        }
    }

    /// Adds every edge yielded by `edges`.
    pub fn add_edges<I>(&mut self, edges: I, direction: EdgeDirection)
    where
        I: IntoIterator<Item = Edge>,
    {
        for edge in edges {
            self.add_edge(edge.source(), edge.target(), direction);
        }
    }

    /// Removes `target` from `adjacency(source)`, and the reverse entry when
    /// `direction` is [`EdgeDirection::Undirected`].
    ///
    /// A vertex whose neighbour set becomes empty through this call is dropped
    /// from the graph entirely. Callers that need isolated vertices to survive
    /// should re-insert them with [`Graph::add_vertex`].
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::{EdgeDirection, Graph};
    ///
    /// let mut graph = Graph::from_edges(&[(0, 1), (1, 2)]);
    /// graph.remove_edge(0, 1, EdgeDirection::Undirected);
    /// assert!(!graph.contains_vertex(0));
    /// assert!(graph.contains_vertex(1));
    /// ```
    pub fn remove_edge(&mut self, source: VertexId, target: VertexId, direction: EdgeDirection) {
        self.unlink(source, target);
        match direction {
            EdgeDirection::Directed => {}
            EdgeDirection::Undirected => self.unlink(target, source),
        }
    }

    fn unlink(&mut self, source: VertexId, target: VertexId) {
        let Some(neighbours) = self.adjacency.get_mut(&source) else {
            return;
        };
        if neighbours.remove(&target) && neighbours.is_empty() {
            self.adjacency.remove(&source);
        }
    }

    /// Removes `vertex` and every reference to it held by its neighbours.
    ///
    /// Returns `false` when the vertex was absent. Neighbours left without
    /// edges stay in the graph.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> bool {
        let Some(neighbours) = self.adjacency.remove(&vertex) else {
            return false;
        };
        for neighbour in neighbours {
            if let Some(back) = self.adjacency.get_mut(&neighbour) {
                back.remove(&vertex);
            }
        }
        true
    }

    /// Returns whether `vertex` belongs to the graph.
    #[must_use]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    /// Returns whether `edge.target() ∈ adjacency(edge.source())`.
    #[must_use]
    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.adjacency
            .get(&edge.source())
            .is_some_and(|neighbours| neighbours.contains(&edge.target()))
    }

    /// Returns the neighbour set of `vertex`, or `None` when it is absent.
    #[must_use]
    pub fn neighbours(&self, vertex: VertexId) -> Option<&FxHashSet<VertexId>> {
        self.adjacency.get(&vertex)
    }

    /// Returns the edges incident to `vertex`, ordered by target id, or
    /// `None` when the vertex is absent.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::{Edge, Graph};
    ///
    /// let graph = Graph::from_edges(&[(4, 9), (4, 2)]);
    /// assert_eq!(graph.adjacent_edges(4), Some(vec![Edge::new(4, 2), Edge::new(4, 9)]));
    /// assert_eq!(graph.adjacent_edges(5), None);
    /// ```
    #[must_use]
    pub fn adjacent_edges(&self, vertex: VertexId) -> Option<Vec<Edge>> {
        let neighbours = self.adjacency.get(&vertex)?;
        let mut edges: Vec<Edge> = neighbours
            .iter()
            .map(|&target| Edge::new(vertex, target))
            .collect();
        edges.sort_unstable();
        Some(edges)
    }

    /// Returns the number of neighbours recorded for `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: VertexId) -> Option<usize> {
        self.adjacency.get(&vertex).map(FxHashSet::len)
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterates the vertex ids in unspecified order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Returns the vertex ids in ascending order.
    #[must_use]
    pub fn sorted_vertices(&self) -> Vec<VertexId> {
        let mut vertices: Vec<VertexId> = self.vertices().collect();
        vertices.sort_unstable();
        vertices
    }

    /// Counts each undirected edge once.
    ///
    /// Adjacency entries recorded in one direction only still count as a
    /// single edge. Runs in `O(V + E)`.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let mut counted: FxHashSet<Edge> = FxHashSet::default();
        for (&source, neighbours) in &self.adjacency {
            for &target in neighbours {
                counted.insert(Edge::new(source, target).canonical());
            }
        }
        counted.len()
    }

    pub(crate) fn adjacency(&self) -> &FxHashMap<VertexId, FxHashSet<VertexId>> {
        &self.adjacency
    }
}
