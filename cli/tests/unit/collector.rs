//! Tests for the argument collector driven through the `InputSource` port.

#![allow(clippy::expect_used)]

use agentkit_cli::application::services::collector::{FlagInput, collect};

use crate::helpers::{ScriptedInput, stored};

#[test]
fn prompts_are_prefilled_with_stored_values() {
    let input = ScriptedInput::default();
    collect(&stored(), &input).expect("collect");
    let asked = input.asked.borrow();
    let (field, current, _) = &asked[0];
    assert_eq!(field, "agent_name");
    assert_eq!(current.as_deref(), Some("planner"));
}

#[test]
fn every_field_is_asked_in_schema_order() {
    let input = ScriptedInput::default();
    collect(&stored(), &input).expect("collect");
    assert_eq!(
        input.asked_fields(),
        vec![
            "agent_name",
            "entry_point",
            "description",
            "python_version",
            "dependencies_file",
            "launch_type",
            "region",
            "storage_bucket",
            "image_tag",
            "cr_instance_name",
            "cr_namespace_name",
            "cr_repo_name",
        ]
    );
}

#[test]
fn workflow_questions_use_launch_type_answered_earlier() {
    let input = ScriptedInput::answering(&[("launch_type", "hybrid"), ("region", "cn-shanghai")]);
    let next = collect(&stored(), &input).expect("collect");
    let asked = input.asked.borrow();
    let region = asked.iter().find(|(f, _, _)| f == "region").expect("asked");
    assert_eq!(region.2, "hybrid");
    assert_eq!(next.launch_types["hybrid"].region.as_deref(), Some("cn-shanghai"));
}

#[test]
fn flags_then_prompts_sees_flag_values() {
    let flags = FlagInput::default().with_field("entry_point", "main.go");
    let after_flags = collect(&stored(), &flags).expect("collect flags");
    let input = ScriptedInput::default();
    let after_prompts = collect(&after_flags, &input).expect("collect prompts");

    let asked = input.asked.borrow();
    let entry = asked.iter().find(|(f, _, _)| f == "entry_point").expect("asked");
    assert_eq!(entry.1.as_deref(), Some("main.go"));
    assert_eq!(after_prompts, after_flags);
}

#[test]
fn prompted_env_vars_merge_with_stored_ones() {
    let mut base = stored();
    base.common
        .runtime_envs
        .insert("KEEP".to_string(), "1".to_string());
    let input = ScriptedInput {
        envs: vec![("API_KEY", "shared")],
        ..ScriptedInput::default()
    };
    let next = collect(&base, &input).expect("collect");
    assert_eq!(next.common.runtime_envs.len(), 2);
    assert_eq!(next.common.runtime_envs["API_KEY"], "shared");
}
