//! Context chain assembly from batch results on disk

use maestro::context::{build_context_chain, ContextError, NO_CONTEXT};

use super::helpers::{plan_with_phases, TestProject};

fn result(phase_id: &str, downstream: &str) -> String {
    serde_json::json!({
        "phase_id": phase_id,
        "status": "success",
        "output": format!("## Summary\nDone.\n\n### Downstream Context\n{downstream}\n\n### Files Changed\n- src/lib.rs"),
    })
    .to_string()
}

#[test]
fn test_chain_collects_blocking_phase_results() {
    let project = TestProject::new();
    let plan = project.write_plan(
        "plan.md",
        &plan_with_phases(&[("1", &[]), ("2", &[]), ("3", &["1", "2"])]),
    );
    project.add_result("batch-001", "architect.json", &result("1", "Schema lives in db/schema.sql."));
    project.add_result("batch-001", "coder.json", &result("2", "Use ApiClient::new()."));
    project.add_result("batch-001", "summary.json", "{\"status\":\"complete\"}");

    let chain = build_context_chain(
        &project.config.state_dir,
        &project.config.resolve_path(&plan),
        "3",
    )
    .unwrap();

    assert_eq!(chain.blocking_phases, vec!["1", "2"]);
    assert!(chain.missing_contexts.is_empty());
    assert_eq!(
        chain.context_chain,
        "## Context from Phase 1\n\nSchema lives in db/schema.sql.\n\n---\n\n## Context from Phase 2\n\nUse ApiClient::new()."
    );
}

#[test]
fn test_chain_reports_missing_context() {
    let project = TestProject::new();
    let plan = project.write_plan("plan.md", &plan_with_phases(&[("1", &[]), ("2", &["1"])]));

    let chain = build_context_chain(
        &project.config.state_dir,
        &project.config.resolve_path(&plan),
        "2",
    )
    .unwrap();

    assert_eq!(chain.context_chain, NO_CONTEXT);
    assert_eq!(chain.missing_contexts, vec!["1"]);
}

#[test]
fn test_chain_for_unknown_phase() {
    let project = TestProject::new();
    let plan = project.write_plan("plan.md", &plan_with_phases(&[("1", &[])]));

    let err = build_context_chain(
        &project.config.state_dir,
        &project.config.resolve_path(&plan),
        "5",
    )
    .unwrap_err();

    assert!(matches!(err, ContextError::PhaseNotFound(ref id) if id == "5"));
}
