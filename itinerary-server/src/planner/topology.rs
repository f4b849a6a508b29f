//! Directed topology of locations and legs.
//!
//! A `Topology` is an immutable snapshot: vertices are locations in
//! insertion order, edges are adjacency lists of vertex indices. It is a
//! simple directed graph, so at most one edge exists per ordered pair and
//! no vertex has an edge to itself.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{Leg, LegId, Location, LocationCode};

/// Error from building a topology out of an inconsistent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphBuildError {
    /// An active leg references a location that is not in the vertex set
    #[error("{leg} references unknown location {code}")]
    UnknownLocation { leg: LegId, code: LocationCode },

    /// An active leg starts and ends at the same location
    #[error("{leg} is a loop at {code}")]
    SelfLoop { leg: LegId, code: LocationCode },
}

/// Directed graph snapshot used for path enumeration.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    vertices: Vec<Location>,
    index: HashMap<LocationCode, usize>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
    duplicate_legs: usize,
}

impl Topology {
    /// Build a topology from a snapshot of locations and legs.
    ///
    /// Every location becomes a vertex regardless of degree; a repeated
    /// code keeps its first record. Every active leg becomes an edge unless
    /// its ordered pair already has one. Inactive legs are ignored.
    ///
    /// # Errors
    ///
    /// Fails without returning a partial graph if an active leg references
    /// a location absent from `locations`, or loops on a single location.
    pub fn build(locations: &[Location], legs: &[Leg]) -> Result<Self, GraphBuildError> {
        let mut vertices = Vec::with_capacity(locations.len());
        let mut index = HashMap::with_capacity(locations.len());

        for location in locations {
            if index.contains_key(&location.code) {
                continue;
            }
            index.insert(location.code, vertices.len());
            vertices.push(location.clone());
        }

        let mut adjacency = vec![Vec::new(); vertices.len()];
        let mut edges: HashSet<(usize, usize)> = HashSet::new();
        let mut duplicate_legs = 0;

        for leg in legs.iter().filter(|l| l.is_active) {
            let from = vertex_of(&index, leg, leg.origin)?;
            let to = vertex_of(&index, leg, leg.destination)?;

            if from == to {
                return Err(GraphBuildError::SelfLoop {
                    leg: leg.id,
                    code: leg.origin,
                });
            }

            if edges.insert((from, to)) {
                adjacency[from].push(to);
            } else {
                duplicate_legs += 1;
                debug!(
                    leg = %leg.id,
                    origin = %leg.origin,
                    destination = %leg.destination,
                    "collapsing duplicate leg"
                );
            }
        }

        Ok(Self {
            vertices,
            index,
            adjacency,
            edge_count: edges.len(),
            duplicate_legs,
        })
    }

    /// Number of vertices.
    pub fn location_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of active legs collapsed into an existing edge.
    pub fn duplicate_legs(&self) -> usize {
        self.duplicate_legs
    }

    /// Returns true if `code` is a vertex.
    pub fn contains(&self, code: &LocationCode) -> bool {
        self.index.contains_key(code)
    }

    /// Returns true if there is an edge `origin` → `destination`.
    pub fn has_edge(&self, origin: &LocationCode, destination: &LocationCode) -> bool {
        match (self.index.get(origin), self.index.get(destination)) {
            (Some(&from), Some(&to)) => self.adjacency[from].contains(&to),
            _ => false,
        }
    }

    /// Codes reachable by one edge from `code`, in leg insertion order.
    pub fn successors(&self, code: &LocationCode) -> Vec<LocationCode> {
        self.index
            .get(code)
            .map(|&i| self.adjacency[i].iter().map(|&j| self.vertices[j].code).collect())
            .unwrap_or_default()
    }

    pub(crate) fn vertex_index(&self, code: &LocationCode) -> Option<usize> {
        self.index.get(code).copied()
    }

    pub(crate) fn neighbours(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    pub(crate) fn code_at(&self, vertex: usize) -> LocationCode {
        self.vertices[vertex].code
    }
}

fn vertex_of(
    index: &HashMap<LocationCode, usize>,
    leg: &Leg,
    code: LocationCode,
) -> Result<usize, GraphBuildError> {
    index
        .get(&code)
        .copied()
        .ok_or(GraphBuildError::UnknownLocation { leg: leg.id, code })
}
