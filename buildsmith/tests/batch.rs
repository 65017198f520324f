//! Batch-level behaviour: failure isolation and tool-argument
//! validation.

use buildsmith::types::Visibility;
use buildsmith::{ToolArguments, assemble_all};
use test_helpers::{point_declaration, point_universe};

#[test]
fn failures_are_isolated_per_declaration() {
    let mut broken = point_declaration();
    broken.visibility = Visibility::Private;
    let declarations = vec![broken, point_declaration()];

    let outcome = assemble_all(&declarations, &point_universe(), &ToolArguments::new());

    assert_eq!(outcome.models.len(), 1);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(
        outcome
            .diagnostics
            .iter()
            .all(|d| d.message() == "annotated element must not be private")
    );
}

#[test]
fn invalid_tool_arguments_stop_the_whole_batch() {
    let tool = ToolArguments::new().with("builder.factoryMethodName", "not a name");
    let declarations = vec![point_declaration()];

    let outcome = assemble_all(&declarations, &point_universe(), &tool);

    assert!(outcome.models.is_empty());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(outcome.diagnostics.iter().all(|d| d.declaration().is_none()));
}

#[test]
fn unknown_tool_arguments_are_ignored() {
    let tool = ToolArguments::new().with("somebody.elses.option", "!!!");
    let outcome = assemble_all(&[point_declaration()], &point_universe(), &tool);

    assert_eq!(outcome.models.len(), 1);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn an_empty_batch_yields_an_empty_outcome() {
    let outcome = assemble_all(&[], &point_universe(), &ToolArguments::new());
    assert!(outcome.models.is_empty());
    assert!(outcome.diagnostics.is_empty());
}
