//! Critical path: the longest prerequisite chain in the plan

use super::nodes::{Memo, Visit};
use super::{DependencyGraph, GraphError};

/// Longest chain ending at a node: its length and the prerequisite it extends
#[derive(Debug, Clone, Copy)]
struct ChainEnd<'a> {
    length: usize,
    via: Option<&'a str>,
}

/// Find the longest dependency chain, earliest phase first.
///
/// Chains are compared by node count only. On ties the first chain found
/// wins: phases are scanned in input order and, for each phase, its
/// prerequisites in `blocked_by` order. For the diamond
/// `1; 2 <- 1; 3 <- 1; 4 <- 2, 3` this gives `[1, 2, 4]`.
///
/// # Errors
///
/// Returns [`GraphError::Cycle`] on cyclic input.
pub fn compute_critical_path(graph: &DependencyGraph<'_>) -> Result<Vec<String>, GraphError> {
    let mut memo = Memo::new();
    let mut longest: Option<(&str, usize)> = None;

    for &id in graph.phase_ids() {
        let end = chain_end(graph, id, &mut memo)?;
        if longest.map_or(true, |(_, length)| end.length > length) {
            longest = Some((id, end.length));
        }
    }

    let Some((tail, _)) = longest else {
        return Ok(Vec::new());
    };

    let mut path = vec![tail];
    let mut cursor = tail;
    while let Some(prev) = memo.get(cursor).and_then(|end| end.via) {
        path.push(prev);
        cursor = prev;
    }
    path.reverse();

    Ok(path.into_iter().map(String::from).collect())
}

fn chain_end<'a>(
    graph: &DependencyGraph<'a>,
    id: &'a str,
    memo: &mut Memo<'a, ChainEnd<'a>>,
) -> Result<ChainEnd<'a>, GraphError> {
    if let Visit::Cached(end) = memo.enter(id)? {
        return Ok(end);
    }

    let mut best = ChainEnd {
        length: 1,
        via: None,
    };
    for dep in graph.known_predecessors(id) {
        let candidate = chain_end(graph, dep, memo)?;
        if candidate.length + 1 > best.length {
            best = ChainEnd {
                length: candidate.length + 1,
                via: Some(dep),
            };
        }
    }

    memo.finish(id, best);
    Ok(best)
}
