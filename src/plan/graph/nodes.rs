//! Per-node memo state shared by the recursive graph walks
//!
//! Depth and longest-chain computations recurse from a phase into its
//! prerequisites. Each node moves `unvisited -> in progress -> done`; meeting
//! an in-progress node again means the walk went round a cycle, which is
//! reported as [`GraphError::Cycle`] instead of recursing forever.

use std::collections::HashMap;

use super::GraphError;

#[derive(Debug, Clone, Copy)]
enum NodeState<T> {
    InProgress,
    Done(T),
}

/// Outcome of entering a node
pub(super) enum Visit<T> {
    /// Already computed
    Cached(T),
    /// First visit; the caller must compute the value and call [`Memo::finish`]
    Fresh,
}

pub(super) struct Memo<'a, T> {
    states: HashMap<&'a str, NodeState<T>>,
    /// Nodes currently being computed, outermost first
    active: Vec<&'a str>,
    /// Nodes in the order their value was finished
    completed: Vec<&'a str>,
}

impl<'a, T: Copy> Memo<'a, T> {
    pub(super) fn new() -> Self {
        Self {
            states: HashMap::new(),
            active: Vec::new(),
            completed: Vec::new(),
        }
    }

    pub(super) fn enter(&mut self, id: &'a str) -> Result<Visit<T>, GraphError> {
        match self.states.get(id) {
            Some(NodeState::Done(value)) => Ok(Visit::Cached(*value)),
            Some(NodeState::InProgress) => {
                let start = self.active.iter().position(|p| *p == id).unwrap_or(0);
                let mut path: Vec<String> =
                    self.active[start..].iter().map(|p| p.to_string()).collect();
                path.push(id.to_string());
                Err(GraphError::Cycle { path })
            }
            None => {
                self.states.insert(id, NodeState::InProgress);
                self.active.push(id);
                Ok(Visit::Fresh)
            }
        }
    }

    pub(super) fn finish(&mut self, id: &'a str, value: T) {
        debug_assert_eq!(self.active.last(), Some(&id));
        self.active.pop();
        self.states.insert(id, NodeState::Done(value));
        self.completed.push(id);
    }

    pub(super) fn get(&self, id: &str) -> Option<T> {
        match self.states.get(id) {
            Some(NodeState::Done(value)) => Some(*value),
            _ => None,
        }
    }

    pub(super) fn completed(&self) -> &[&'a str] {
        &self.completed
    }
}
