//! Dependency graph analysis over a plan's phases
//!
//! The graph is built fresh from a phase list for each analysis and never
//! persisted. Nodes are phase ids in input order; edges follow `blocked_by`
//! from a phase to its prerequisites. All analysis here is pure.

mod conflicts;
mod critical_path;
mod cycle;
mod nodes;
mod scheduling;


use std::collections::HashMap;

use thiserror::Error;

use super::schema::PlanPhase;

pub use conflicts::{detect_file_conflicts, FileAccess, FileConflict};
pub use critical_path::compute_critical_path;
pub use cycle::{detect_cycles, Cycle};
pub use scheduling::{compute_depths, compute_parallel_batches};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A walk reached a phase that was still being computed
    #[error("Circular dependency: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },
}

/// Dependency graph borrowed from a phase list
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    /// Phase ids in input order, first definition only
    order: Vec<&'a str>,
    /// Phase id -> distinct `blocked_by` ids, in declaration order
    predecessors: HashMap<&'a str, Vec<&'a str>>,
    /// Ids defined more than once
    duplicates: Vec<&'a str>,
}

impl<'a> DependencyGraph<'a> {
    /// Build the graph. When an id is defined twice the first definition wins.
    pub fn new(phases: &'a [PlanPhase]) -> Self {
        let mut order = Vec::with_capacity(phases.len());
        let mut predecessors: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        let mut duplicates = Vec::new();

        for phase in phases {
            let id = phase.id.as_str();
            if predecessors.contains_key(id) {
                if !duplicates.contains(&id) {
                    duplicates.push(id);
                }
                continue;
            }

            let mut deps: Vec<&'a str> = Vec::with_capacity(phase.blocked_by.len());
            for dep in &phase.blocked_by {
                if !deps.contains(&dep.as_str()) {
                    deps.push(dep.as_str());
                }
            }

            order.push(id);
            predecessors.insert(id, deps);
        }

        Self {
            order,
            predecessors,
            duplicates,
        }
    }

    pub fn phase_ids(&self) -> &[&'a str] {
        &self.order
    }

    pub fn contains(&self, id: &str) -> bool {
        self.predecessors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Declared prerequisites of a phase, including ids that name no phase
    pub fn predecessors(&self, id: &str) -> &[&'a str] {
        self.predecessors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Prerequisites that name an existing phase
    pub fn known_predecessors(&self, id: &str) -> impl Iterator<Item = &'a str> + '_ {
        self.predecessors(id)
            .iter()
            .copied()
            .filter(move |dep| self.contains(dep))
    }

    /// `(phase, missing prerequisite)` pairs, in input order
    pub fn dangling_references(&self) -> Vec<(&'a str, &'a str)> {
        let mut dangling = Vec::new();
        for &id in &self.order {
            for &dep in self.predecessors(id) {
                if !self.contains(dep) {
                    dangling.push((id, dep));
                }
            }
        }
        dangling
    }

    pub fn duplicate_ids(&self) -> &[&'a str] {
        &self.duplicates
    }
}

/// Everything derived from one phase list
#[derive(Debug, Clone)]
pub struct GraphAnalysis {
    pub cycles: Vec<Cycle>,
    pub parallel_batches: Result<Vec<Vec<String>>, GraphError>,
    pub critical_path: Result<Vec<String>, GraphError>,
    pub file_conflicts: Vec<FileConflict>,
}

impl GraphAnalysis {
    /// Index of the batch holding `id`, if batches could be computed
    pub fn parallel_group(&self, id: &str) -> Option<usize> {
        self.parallel_batches
            .as_ref()
            .ok()?
            .iter()
            .position(|batch| batch.iter().any(|member| member == id))
    }
}

/// Run cycle detection, batching, critical path and file-conflict detection
pub fn analyze(phases: &[PlanPhase]) -> GraphAnalysis {
    let graph = DependencyGraph::new(phases);

    GraphAnalysis {
        cycles: detect_cycles(&graph),
        parallel_batches: compute_parallel_batches(&graph),
        critical_path: compute_critical_path(&graph),
        file_conflicts: detect_file_conflicts(phases),
    }
}
