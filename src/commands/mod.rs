pub mod agents;
pub mod context;
pub mod graph;
pub mod validate;
