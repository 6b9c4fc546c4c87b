//! Interactive implementation of the `InputSource` port.
//!
//! Every prompt is pre-filled with the value the field already has, so
//! pressing enter keeps it. Answers are checked as they are typed; rules
//! that need the whole configuration still run in the validator.

use agentkit_common::EnvVarSet;
use anyhow::{Context, Result};
use dialoguer::{Input, Select};

use crate::application::ports::{FieldQuery, InputSource};
use crate::domain::validate::value_problem;
use crate::domain::{EnvAssignment, EnvScope, FieldKind, FieldMeta, parse_assignment};

/// Asks the operator on the terminal.
pub struct PromptInput;

impl InputSource for PromptInput {
    fn field(&self, query: &FieldQuery<'_>) -> Result<Option<String>> {
        let meta = query.meta;
        if !meta.supports(query.launch_type) {
            return Ok(None);
        }
        let label = if meta.is_workflow() {
            format!("{} ({})", meta.prompt, query.launch_type)
        } else {
            meta.prompt.to_string()
        };
        let preset = query.current.or(meta.default);
        let answer = match meta.kind {
            FieldKind::Choice(options) => select(meta, &label, options, preset)?,
            _ => input(meta, &label, preset)?,
        };
        Ok(answer.filter(|value| Some(value.as_str()) != query.current))
    }

    fn env_vars(&self, scope: EnvScope<'_>, current: &EnvVarSet) -> Result<Vec<EnvAssignment>> {
        let mut label = match scope {
            EnvScope::Application => "Runtime env var".to_string(),
            EnvScope::Workflow(launch_type) => format!("Env var for {launch_type}"),
        };
        if !current.is_empty() {
            let keys: Vec<&str> = current.keys().map(String::as_str).collect();
            label.push_str(&format!(" [has {}]", keys.join(", ")));
        }
        label.push_str(" KEY=VALUE, empty to finish");

        let mut assignments = Vec::new();
        loop {
            let line: String = Input::new()
                .with_prompt(&label)
                .allow_empty(true)
                .validate_with(|line: &String| -> Result<(), String> {
                    if line.trim().is_empty() {
                        return Ok(());
                    }
                    parse_assignment(line).map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()
                .context("env var prompt")?;
            if line.trim().is_empty() {
                break;
            }
            assignments.push(parse_assignment(&line)?);
        }
        Ok(assignments)
    }
}

fn select(
    meta: &FieldMeta,
    label: &str,
    options: &[&str],
    preset: Option<&str>,
) -> Result<Option<String>> {
    let default = preset
        .and_then(|value| options.iter().position(|o| *o == value))
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt(label)
        .items(options)
        .default(default)
        .interact()
        .with_context(|| format!("{} selection", meta.name))?;
    Ok(options.get(idx).map(|o| (*o).to_string()))
}

fn input(meta: &'static FieldMeta, label: &str, preset: Option<&str>) -> Result<Option<String>> {
    let mut prompt = Input::<String>::new()
        .with_prompt(label)
        .allow_empty(!meta.required)
        .validate_with(move |value: &String| -> Result<(), String> {
            if value.is_empty() && !meta.required {
                return Ok(());
            }
            match value_problem(meta, value) {
                Some(reason) => Err(format!("{} {reason}", meta.name)),
                None => Ok(()),
            }
        });
    if let Some(value) = preset {
        prompt = prompt.default(value.to_string());
    }
    let value = prompt
        .interact_text()
        .with_context(|| format!("{} prompt", meta.name))?;
    Ok((!value.trim().is_empty()).then_some(value))
}
