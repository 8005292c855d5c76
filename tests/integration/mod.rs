//! Integration tests for maestro plan validation and context chains
//!
//! These tests drive the library the way the CLI does: a project directory
//! with a plan file, agent definitions and batch results on disk, resolved
//! through `Config`.

pub mod context_chain;
pub mod helpers;
pub mod validate_plan;
