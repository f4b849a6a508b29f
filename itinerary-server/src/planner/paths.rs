//! Bounded enumeration of simple directed paths.
//!
//! Depth-first backtracking over an explicit stack. Each stack frame is a
//! vertex on the current path plus a cursor into its adjacency list, so
//! stack depth is bounded by `max_hops + 1` and the traversal order is the
//! topology's leg insertion order.

use std::fmt;

use crate::domain::LocationCode;

use super::topology::Topology;

/// A simple sequence of locations: `hops() + 1` codes, none repeated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<LocationCode>);

impl Path {
    /// The locations visited, origin first.
    pub fn locations(&self) -> &[LocationCode] {
        &self.0
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Adjacent (origin, destination) pairs, one per hop.
    pub fn pairs(&self) -> impl Iterator<Item = (LocationCode, LocationCode)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("->")?;
            }
            f.write_str(code.as_str())?;
        }
        Ok(())
    }
}

/// Enumerate every simple path from `origin` to `destination` with at most
/// `max_hops` edges.
///
/// A path ends the moment it reaches `destination`; the destination is
/// never expanded further. Returns an empty list if `origin` equals
/// `destination`, if either is not in the topology, or if `max_hops` is 0.
pub fn enumerate_paths(
    topology: &Topology,
    origin: &LocationCode,
    destination: &LocationCode,
    max_hops: usize,
) -> Vec<Path> {
    let mut found = Vec::new();

    if origin == destination || max_hops == 0 {
        return found;
    }
    let (Some(start), Some(goal)) = (
        topology.vertex_index(origin),
        topology.vertex_index(destination),
    ) else {
        return found;
    };

    let mut on_path = vec![false; topology.location_count()];
    // Parallel stacks: vertex on the current path, and the next adjacency
    // index to try from it.
    let mut path: Vec<usize> = vec![start];
    let mut cursors: Vec<usize> = vec![0];
    on_path[start] = true;

    while let (Some(&vertex), Some(cursor)) = (path.last(), cursors.last_mut()) {
        let neighbours = topology.neighbours(vertex);

        let Some(&next) = neighbours.get(*cursor) else {
            // Exhausted this vertex: backtrack
            on_path[vertex] = false;
            path.pop();
            cursors.pop();
            continue;
        };
        *cursor += 1;

        if on_path[next] {
            continue;
        }

        if next == goal {
            let mut codes: Vec<LocationCode> = path.iter().map(|&v| topology.code_at(v)).collect();
            codes.push(topology.code_at(goal));
            found.push(Path(codes));
            continue;
        }

        // Only descend if a further hop to the destination still fits.
        // Hops after pushing `next` would be path.len(); one more must be <= max_hops.
        if path.len() < max_hops {
            on_path[next] = true;
            path.push(next);
            cursors.push(0);
        }
    }

    found
}
