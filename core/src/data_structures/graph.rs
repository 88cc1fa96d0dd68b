//! Vertex and edge records of a flow network
//!
//! Edges are single records carrying both residual directions: the forward
//! residual is `capacity - flow` and the reverse residual is `flow` itself,
//! so no reverse edge object is ever allocated. Vertices refer to their
//! incident edges (in both directions) by arena index.

use serde::Serialize;

use crate::algorithm::traits::{Capacity, EdgeId, Flow, Height, NodeId};

/// Vertex record: height label, excess and incident edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vertex {
    pub(crate) id: NodeId,
    pub(crate) height: Height,
    pub(crate) excess: Flow,
    pub(crate) edges: Vec<EdgeId>,
}

impl Vertex {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            height: 0,
            excess: 0,
            edges: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    /// Inflow minus outflow; kept at 0 for the source
    #[inline]
    pub fn excess(&self) -> Flow {
        self.excess
    }

    /// Incident edges, outgoing and incoming, in insertion order
    #[inline]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

/// Directed arc with capacity and current flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub(crate) from: NodeId,
    pub(crate) to: NodeId,
    pub(crate) capacity: Capacity,
    pub(crate) flow: Flow,
}

impl Edge {
    pub(crate) fn new(from: NodeId, to: NodeId, capacity: Capacity) -> Self {
        Self {
            from,
            to,
            capacity,
            flow: 0,
        }
    }

    #[inline]
    pub fn from(&self) -> NodeId {
        self.from
    }

    #[inline]
    pub fn to(&self) -> NodeId {
        self.to
    }

    #[inline]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    #[inline]
    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Whether the arc leaves `vertex`
    #[inline]
    pub fn is_outgoing(&self, vertex: NodeId) -> bool {
        self.from == vertex
    }

    /// The endpoint opposite to `vertex`
    #[inline]
    pub fn other(&self, vertex: NodeId) -> NodeId {
        if self.from == vertex {
            self.to
        } else {
            self.from
        }
    }

    /// Residual capacity in the direction leaving `vertex`
    #[inline]
    pub fn residual_from(&self, vertex: NodeId) -> Flow {
        if self.is_outgoing(vertex) {
            self.capacity - self.flow
        } else {
            self.flow
        }
    }

    /// Moves `amount` units away from `vertex` along the residual direction.
    pub(crate) fn push_from(&mut self, vertex: NodeId, amount: Flow) {
        debug_assert!(amount <= self.residual_from(vertex));
        if self.is_outgoing(vertex) {
            self.flow += amount;
        } else {
            self.flow -= amount;
        }
    }

    /// Net arc flow seen from `vertex`: positive when it enters `vertex`
    #[inline]
    pub fn inflow_to(&self, vertex: NodeId) -> Flow {
        if self.to == vertex {
            self.flow
        } else {
            -self.flow
        }
    }
}
