//! Bookkeeping for edges whose endpoints have not both reached the honest
//! region yet.
//!
//! Each pending edge moves through an explicit lifecycle: it is
//! [`EdgeState::Deferred`] when the first endpoint migrates, and becomes
//! [`EdgeState::Resolved`] once the second endpoint joins it. Edges whose far
//! endpoint never migrates stay deferred for the rest of the run.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::{Edge, Graph, VertexId};

/// Lifecycle state of an edge tracked by the [`DeferredEdgeLedger`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EdgeState {
    /// One endpoint is in the honest region, the other is not yet.
    Deferred,
    /// Both endpoints reached the honest region and the edge was materialised.
    Resolved,
}

/// Ledger of deferred edges keyed by their canonical endpoint pair.
///
/// A secondary index maps every vertex to its deferred partners so pending
/// edges can be found from either endpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DeferredEdgeLedger {
    states: FxHashMap<Edge, EdgeState>,
    pending: FxHashMap<VertexId, FxHashSet<VertexId>>,
}

impl DeferredEdgeLedger {
    /// Returns the state of edge `{u, v}`, or `None` if it was never deferred.
    #[must_use]
    pub fn state(&self, u: VertexId, v: VertexId) -> Option<EdgeState> {
        self.states.get(&Edge::new(u, v).canonical()).copied()
    }

    /// Returns the deferred partners of `vertex` in ascending order.
    #[must_use]
    pub fn pending_partners(&self, vertex: VertexId) -> Vec<VertexId> {
        let mut partners: Vec<VertexId> = self
            .pending
            .get(&vertex)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        partners.sort_unstable();
        partners
    }

    /// Number of edges still waiting for their second endpoint.
    #[must_use]
    pub fn deferred_count(&self) -> usize {
        self.count(EdgeState::Deferred)
    }

    /// Number of edges that were deferred and later materialised.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.count(EdgeState::Resolved)
    }

    fn count(&self, wanted: EdgeState) -> usize {
        self.states.values().filter(|&&state| state == wanted).count()
    }

    /// Returns the still-deferred edges in canonical form, sorted.
    #[must_use]
    pub fn unresolved_edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .states
            .iter()
            .filter(|(_, state)| **state == EdgeState::Deferred)
            .map(|(&edge, _)| edge)
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Marks `{u, v}` as deferred and returns the state it had before.
    pub(crate) fn defer(&mut self, u: VertexId, v: VertexId) -> Option<EdgeState> {
        let previous = self
            .states
            .insert(Edge::new(u, v).canonical(), EdgeState::Deferred);
        self.link(u, v);
        previous
    }

    /// Resolves every deferred edge between `vertex` and a partner already in
    /// `honest`, returning those partners in ascending order.
    pub(crate) fn resolve_ready(&mut self, vertex: VertexId, honest: &Graph) -> Vec<VertexId> {
        let ready: Vec<VertexId> = self
            .pending_partners(vertex)
            .into_iter()
            .filter(|&partner| honest.contains_vertex(partner))
            .collect();
        for &partner in &ready {
            self.states
                .insert(Edge::new(vertex, partner).canonical(), EdgeState::Resolved);
            self.unlink(vertex, partner);
        }
        ready
    }

    /// Puts `edge` back into `previous`, removing it when it was untracked.
    pub(crate) fn restore(&mut self, edge: Edge, previous: Option<EdgeState>) {
        let key = edge.canonical();
        match previous {
            Some(state) => {
                self.states.insert(key, state);
            }
            None => {
                self.states.remove(&key);
            }
        }
        if previous == Some(EdgeState::Deferred) {
            self.link(key.source(), key.target());
        } else {
            self.unlink(key.source(), key.target());
        }
    }

    fn link(&mut self, u: VertexId, v: VertexId) {
        self.pending.entry(u).or_default().insert(v);
        self.pending.entry(v).or_default().insert(u);
    }

    fn unlink(&mut self, u: VertexId, v: VertexId) {
        self.detach(u, v);
        self.detach(v, u);
    }

    fn detach(&mut self, from: VertexId, partner: VertexId) {
        if let Some(partners) = self.pending.get_mut(&from) {
            partners.remove(&partner);
            if partners.is_empty() {
                self.pending.remove(&from);
            }
        }
    }
}
