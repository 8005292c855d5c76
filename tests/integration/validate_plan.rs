//! End-to-end plan validation through files on disk

use std::path::Path;

use maestro::agents::AgentRegistry;
use maestro::plan::validate::{validate_plan_file, validate_plan_file_as, Severity, ValidationReport};

use super::helpers::{plan_with_phases, TestProject};

fn validate(project: &TestProject, plan: &Path) -> ValidationReport {
    let registry = project.config.registry();
    validate_plan_file(&project.config.resolve_path(plan), &registry)
}

#[test]
fn test_diamond_plan_is_valid() {
    let project = TestProject::new();
    project.add_agent("coder");
    let plan = project.write_plan(
        "plan.md",
        &plan_with_phases(&[("1", &[]), ("2", &["1"]), ("3", &["1"]), ("4", &["2", "3"])]),
    );

    let report = validate(&project, &plan);

    assert!(report.valid, "unexpected errors: {:?}", report.errors);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());

    let graph = report.dependency_graph.expect("graph should be present");
    assert_eq!(graph.parallel_batches, vec![vec!["1"], vec!["2", "3"], vec!["4"]]);
    assert_eq!(graph.critical_path.len(), 3);
    assert_eq!(graph.critical_path.first().map(String::as_str), Some("1"));
    assert_eq!(graph.critical_path.last().map(String::as_str), Some("4"));

    let groups: Vec<i64> = graph.phases.iter().map(|p| p.parallel_group).collect();
    assert_eq!(groups, vec![0, 1, 1, 2]);
}

#[test]
fn test_two_phase_cycle_is_invalid() {
    let project = TestProject::new();
    project.add_agent("coder");
    let plan = project.write_plan("plan.md", &plan_with_phases(&[("1", &["2"]), ("2", &["1"])]));

    let report = validate(&project, &plan);

    assert!(!report.valid);
    let cycle_errors: Vec<_> = report
        .errors
        .iter()
        .filter(|e| e.message.starts_with("Circular dependency"))
        .collect();
    assert_eq!(cycle_errors.len(), 1);
    assert!(cycle_errors[0].message.contains('1'));
    assert!(cycle_errors[0].message.contains('2'));
}

#[test]
fn test_dangling_reference_is_invalid() {
    let project = TestProject::new();
    project.add_agent("coder");
    let plan = project.write_plan("plan.md", &plan_with_phases(&[("1", &["99"])]));

    let report = validate(&project, &plan);

    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(
        report.errors[0].message,
        "Phase 1: blocked_by references non-existent phase 99"
    );
}

#[test]
fn test_missing_agent_definition_is_warning() {
    let project = TestProject::new();
    let plan = project.write_plan("plan.md", &plan_with_phases(&[("1", &[])]));

    let report = validate(&project, &plan);

    assert!(report.valid);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].severity, Severity::Warning);
    assert_eq!(
        report.warnings[0].message,
        "Phase 1: agent 'coder' not found in agents/ directory"
    );
}

#[test]
fn test_registry_sees_project_agents() {
    let project = TestProject::new();
    project.add_agent("tester");
    project.add_agent("architect");

    let registry = project.config.registry();
    assert!(registry.exists("tester"));
    assert!(!registry.exists("coder"));
    assert_eq!(registry.list().unwrap(), vec!["architect", "tester"]);
}

#[test]
fn test_conflicting_parallel_phases_warn() {
    let project = TestProject::new();
    project.add_agent("coder");
    let plan = project.write_plan(
        "plan.md",
        r#"---
title: Conflicts
phases:
  - id: 1
    title: Models
    agent: coder
    files_created: [src/models.rs]
  - id: 2
    title: Handlers
    agent: coder
    files_created: [src/models.rs]
    files_modified: [src/lib.rs]
  - id: 3
    title: Routes
    agent: coder
    files_modified: [src/lib.rs]
---
"#,
    );

    let report = validate(&project, &plan);

    assert!(report.valid);
    let messages: Vec<&str> = report.warnings.iter().map(|w| w.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "File 'src/models.rs' created by multiple phases: 1, 2. Cannot run in parallel.",
            "File 'src/lib.rs' modified by multiple phases: 2, 3. Cannot run in parallel.",
        ]
    );
}

#[test]
fn test_header_only_plan() {
    let project = TestProject::new();
    let plan = project.write_plan(
        "plan.md",
        "---\ntitle: Headers\n---\n\n## Phase 1: Setup\n\nText.\n\n## Phase 2: Build\n",
    );

    let report = validate(&project, &plan);

    assert!(report.valid);
    let graph = report.dependency_graph.unwrap();
    assert_eq!(graph.phases.len(), 2);
    assert_eq!(graph.parallel_batches, vec![vec!["1", "2"]]);
}

#[test]
fn test_missing_plan_file() {
    let project = TestProject::new();
    let report = validate(&project, Path::new("nope.md"));

    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.starts_with("Plan file not found: "));
    assert!(report.dependency_graph.is_none());
}

#[test]
fn test_missing_plan_file_named_as_given() {
    let project = TestProject::new();
    let registry = project.config.registry();
    let given = Path::new("nope.md");

    let report = validate_plan_file_as(&project.config.resolve_path(given), given, &registry);

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].message, "Plan file not found: nope.md");
}

#[test]
fn test_json_report_round_trips() {
    let project = TestProject::new();
    project.add_agent("coder");
    let plan = project.write_plan("plan.md", &plan_with_phases(&[("1", &[]), ("2", &["1"])]));

    let report = validate(&project, &plan);
    let json = serde_json::to_string(&report).unwrap();
    let back: ValidationReport = serde_json::from_str(&json).unwrap();

    assert_eq!(back, report);
    assert!(json.contains("\"parallel_group\":1"));
}
