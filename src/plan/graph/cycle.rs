//! Cycle detection for the dependency graph

use std::collections::HashSet;
use std::fmt;

use super::DependencyGraph;

/// One circular dependency, in traversal order, with the first id repeated at the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle(Vec<String>);

impl Cycle {
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|p| p == id)
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

/// Detect circular dependencies using DFS from every phase, in input order.
///
/// Every cycle met along the way is collected; the walk does not stop at the
/// first one. Nodes fully explored from an earlier root are not explored again.
/// Predecessor ids that name no phase end their branch silently.
pub fn detect_cycles(graph: &DependencyGraph<'_>) -> Vec<Cycle> {
    let mut walk = CycleWalk::default();

    for &id in graph.phase_ids() {
        walk.visit(graph, id);
    }

    walk.cycles
}

#[derive(Default)]
struct CycleWalk<'a> {
    visited: HashSet<&'a str>,
    on_stack: HashSet<&'a str>,
    stack: Vec<&'a str>,
    cycles: Vec<Cycle>,
}

impl<'a> CycleWalk<'a> {
    fn visit(&mut self, graph: &DependencyGraph<'a>, id: &'a str) {
        if self.on_stack.contains(id) {
            let start = self.stack.iter().position(|p| *p == id).unwrap_or(0);
            let mut path: Vec<String> = self.stack[start..].iter().map(|p| p.to_string()).collect();
            path.push(id.to_string());
            self.cycles.push(Cycle(path));
            return;
        }

        if !self.visited.insert(id) {
            return;
        }

        self.on_stack.insert(id);
        self.stack.push(id);

        for &dep in graph.predecessors(id) {
            self.visit(graph, dep);
        }

        self.stack.pop();
        self.on_stack.remove(id);
    }
}
