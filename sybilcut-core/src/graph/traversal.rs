//! Breadth- and depth-first traversal with three-colour bookkeeping.
//!
//! Both searches visit neighbours in ascending id order so results are
//! reproducible. Depth-first search keeps an explicit work stack instead of
//! recursing, bounding memory to the heap regardless of graph depth.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use super::{Graph, VertexId};
use crate::error::GraphError;

/// Visit state of a vertex during a traversal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VisitColor {
    /// Not yet discovered.
    White,
    /// Discovered and on the frontier.
    Gray,
    /// Fully explored.
    Black,
}

/// Per-vertex bookkeeping produced by a traversal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VisitRecord {
    /// Final colour of the vertex.
    pub color: VisitColor,
    /// Hop distance from the source for breadth-first search; discovery
    /// timestamp for depth-first search.
    pub discovered: usize,
    /// Finish timestamp, recorded by depth-first search only.
    pub finished: Option<usize>,
    /// Vertex from which this one was discovered.
    pub predecessor: Option<VertexId>,
}

impl VisitRecord {
    const fn unvisited() -> Self {
        Self {
            color: VisitColor::White,
            discovered: 0,
            finished: None,
            predecessor: None,
        }
    }
}

/// Result of a traversal, holding a record for every vertex of the graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Traversal {
    records: FxHashMap<VertexId, VisitRecord>,
}

impl Traversal {
    fn for_graph(graph: &Graph) -> Self {
        Self {
            records: graph
                .vertices()
                .map(|vertex| (vertex, VisitRecord::unvisited()))
                .collect(),
        }
    }

    /// Returns the record for `vertex`, or `None` when it is not in the graph.
    #[must_use]
    pub fn record(&self, vertex: VertexId) -> Option<&VisitRecord> {
        self.records.get(&vertex)
    }

    /// Returns the vertices that were reached, in ascending id order.
    #[must_use]
    pub fn reached(&self) -> Vec<VertexId> {
        let mut reached: Vec<VertexId> = self
            .records
            .iter()
            .filter(|(_, record)| record.color != VisitColor::White)
            .map(|(&vertex, _)| vertex)
            .collect();
        reached.sort_unstable();
        reached
    }

    fn is_white(&self, vertex: VertexId) -> bool {
        self.records
            .get(&vertex)
            .is_some_and(|record| record.color == VisitColor::White)
    }

    fn update(&mut self, vertex: VertexId, apply: impl FnOnce(&mut VisitRecord)) {
        if let Some(record) = self.records.get_mut(&vertex) {
            apply(record);
        }
    }
}

impl Graph {
    fn sorted_neighbours(&self, vertex: VertexId) -> Vec<VertexId> {
        let mut neighbours: Vec<VertexId> = self
            .neighbours(vertex)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        neighbours.sort_unstable();
        neighbours
    }

    /// Breadth-first search from `source`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexNotFound`] when `source` is absent.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::Graph;
    ///
    /// let graph = Graph::from_edges(&[(0, 1), (1, 2), (5, 6)]);
    /// let bfs = graph.bfs(0)?;
    /// assert_eq!(bfs.reached(), vec![0, 1, 2]);
    /// assert_eq!(bfs.record(2).map(|r| r.discovered), Some(2));
    /// assert_eq!(bfs.record(2).and_then(|r| r.predecessor), Some(1));
    /// # Ok::<(), sybilcut_core::GraphError>(())
    /// ```
    pub fn bfs(&self, source: VertexId) -> Result<Traversal, GraphError> {
        if !self.contains_vertex(source) {
            return Err(GraphError::VertexNotFound { vertex: source });
        }
        let mut traversal = Traversal::for_graph(self);
        traversal.update(source, |record| record.color = VisitColor::Gray);

        let mut frontier = VecDeque::from([source]);
        while let Some(vertex) = frontier.pop_front() {
            let depth = traversal.record(vertex).map_or(0, |record| record.discovered);
            for neighbour in self.sorted_neighbours(vertex) {
                if !traversal.is_white(neighbour) {
                    continue;
                }
                traversal.update(neighbour, |record| {
                    record.color = VisitColor::Gray;
                    record.discovered = depth + 1;
                    record.predecessor = Some(vertex);
                });
                frontier.push_back(neighbour);
            }
            traversal.update(vertex, |record| record.color = VisitColor::Black);
        }
        Ok(traversal)
    }

    /// Depth-first search covering every vertex, starting new trees in
    /// ascending id order.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::Graph;
    ///
    /// let graph = Graph::from_edges(&[(0, 1), (2, 3)]);
    /// let dfs = graph.dfs();
    /// assert_eq!(dfs.reached(), vec![0, 1, 2, 3]);
    /// assert_eq!(dfs.record(0).and_then(|r| r.finished), Some(4));
    /// ```
    #[must_use]
    pub fn dfs(&self) -> Traversal {
        let mut traversal = Traversal::for_graph(self);
        let mut clock = 0;
        for root in self.sorted_vertices() {
            if traversal.is_white(root) {
                self.visit_depth_first(root, &mut traversal, &mut clock);
            }
        }
        traversal
    }

    /// Depth-first search restricted to the component containing `source`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexNotFound`] when `source` is absent.
    pub fn dfs_from(&self, source: VertexId) -> Result<Traversal, GraphError> {
        if !self.contains_vertex(source) {
            return Err(GraphError::VertexNotFound { vertex: source });
        }
        let mut traversal = Traversal::for_graph(self);
        let mut clock = 0;
        self.visit_depth_first(source, &mut traversal, &mut clock);
        Ok(traversal)
    }

    fn visit_depth_first(&self, root: VertexId, traversal: &mut Traversal, clock: &mut usize) {
        *clock += 1;
        let discovered_at = *clock;
        traversal.update(root, |record| {
            record.color = VisitColor::Gray;
            record.discovered = discovered_at;
        });
        let mut stack = vec![(root, self.sorted_neighbours(root).into_iter())];

        loop {
            let Some((vertex, pending)) = stack.last_mut() else {
                break;
            };
            let vertex = *vertex;
            match pending.find(|&candidate| traversal.is_white(candidate)) {
                Some(next) => {
                    *clock += 1;
                    let discovered_at = *clock;
                    traversal.update(next, |record| {
                        record.color = VisitColor::Gray;
                        record.discovered = discovered_at;
                        record.predecessor = Some(vertex);
                    });
                    stack.push((next, self.sorted_neighbours(next).into_iter()));
                }
                None => {
                    *clock += 1;
                    let finished_at = *clock;
                    traversal.update(vertex, |record| {
                        record.color = VisitColor::Black;
                        record.finished = Some(finished_at);
                    });
                    stack.pop();
                }
            }
        }
    }
}
