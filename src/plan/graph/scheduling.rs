//! Scheduling algorithms: phase depths and parallel batches

use std::collections::BTreeMap;

use super::nodes::{Memo, Visit};
use super::{DependencyGraph, GraphError};

/// Compute the depth of every phase.
///
/// Depth is the length of the longest prerequisite chain ending at a phase:
/// 0 with no (known) prerequisites, otherwise one more than the deepest
/// prerequisite. Results are listed in the order each depth was finished,
/// which puts a phase after all of its prerequisites.
///
/// # Errors
///
/// Returns [`GraphError::Cycle`] when a phase is reached again while its own
/// depth is still being computed.
pub fn compute_depths(graph: &DependencyGraph<'_>) -> Result<Vec<(String, usize)>, GraphError> {
    let mut memo = Memo::new();

    for &id in graph.phase_ids() {
        depth_of(graph, id, &mut memo)?;
    }

    Ok(memo
        .completed()
        .iter()
        .filter_map(|&id| memo.get(id).map(|depth| (id.to_string(), depth)))
        .collect())
}

fn depth_of<'a>(
    graph: &DependencyGraph<'a>,
    id: &'a str,
    memo: &mut Memo<'a, usize>,
) -> Result<usize, GraphError> {
    if let Visit::Cached(depth) = memo.enter(id)? {
        return Ok(depth);
    }

    let mut depth = 0;
    for dep in graph.known_predecessors(id) {
        depth = depth.max(depth_of(graph, dep, memo)? + 1);
    }

    memo.finish(id, depth);
    Ok(depth)
}

/// Group phases into batches that can run together.
///
/// Batch N holds every phase of depth N, so each phase only depends on phases
/// in earlier batches. Batches are ordered by depth; members keep the order in
/// which their depth was computed.
///
/// # Errors
///
/// Returns [`GraphError::Cycle`] on cyclic input.
pub fn compute_parallel_batches(graph: &DependencyGraph<'_>) -> Result<Vec<Vec<String>>, GraphError> {
    let mut batches: BTreeMap<usize, Vec<String>> = BTreeMap::new();

    for (id, depth) in compute_depths(graph)? {
        batches.entry(depth).or_default().push(id);
    }

    Ok(batches.into_values().collect())
}
