//! Human-readable terminal renderer.

use std::path::Path;

use agentkit_common::{EnvVarSet, PersistedConfig};
use owo_colors::OwoColorize as _;

use crate::domain::config::{active_launch_type, ordered_sections};
use crate::domain::{COMMON_FIELDS, FieldChange, NOT_SET, WORKFLOW_FIELDS};
use crate::output::OutputContext;

const KEY_WIDTH: usize = 20;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render one line per changed field, or a single "no changes" line.
    pub fn render_changes(&self, path: &Path, changes: &[FieldChange]) {
        if self.ctx.quiet {
            return;
        }
        if changes.is_empty() {
            println!("  No changes to {}", path.display());
            return;
        }
        self.ctx.header(&format!("Changes to {}", path.display()));
        let width = changes.iter().map(|c| c.field.len()).max().unwrap_or(0);
        for change in changes {
            println!("{}", self.change_line(change, width));
        }
    }

    fn change_line(&self, change: &FieldChange, width: usize) -> String {
        let styles = &self.ctx.styles;
        format!(
            "    {:<width$}  {} → {}",
            change.field,
            or_not_set(change.old.as_deref()).style(styles.dim),
            or_not_set(change.new.as_deref()).style(styles.added),
        )
    }

    /// Render the stored configuration: common fields, every launch type
    /// section, and the env the selected launch type runs with.
    pub fn render_config(&self, path: &Path, config: Option<&PersistedConfig>) {
        if self.ctx.quiet {
            return;
        }
        let Some(config) = config else {
            println!("  No configuration at {}", path.display());
            println!("  Run `agentkit config` to create one.");
            return;
        };

        println!();
        self.ctx.header(&format!("Configuration ({})", path.display()));
        println!();
        println!("  {}", "common:".style(self.ctx.styles.bold));
        for field in COMMON_FIELDS {
            self.ctx.kv(
                field.meta.name,
                or_not_set(field.get(&config.common)),
                KEY_WIDTH,
            );
        }
        self.render_envs("runtime_envs", &config.common.runtime_envs);

        for section in ordered_sections(&[config]) {
            let workflow = &config.launch_types[section];
            println!();
            println!(
                "  {}",
                format!("launch_types.{section}:").style(self.ctx.styles.bold)
            );
            for field in WORKFLOW_FIELDS {
                let value = field.get(workflow);
                if value.is_some() || field.meta.supports(section) {
                    self.ctx.kv(field.meta.name, or_not_set(value), KEY_WIDTH);
                }
            }
            self.render_envs("runtime_envs", &workflow.runtime_envs);
        }

        println!();
        let launch_type = active_launch_type(config);
        println!(
            "  {}",
            format!("Effective env ({launch_type}):").style(self.ctx.styles.bold)
        );
        let effective = config.effective_env();
        if effective.is_empty() {
            println!("    {}", NOT_SET.style(self.ctx.styles.dim));
        }
        for (key, value) in &effective {
            self.ctx.kv(key, value, KEY_WIDTH);
        }
        println!();
    }

    fn render_envs(&self, label: &str, envs: &EnvVarSet) {
        if envs.is_empty() {
            self.ctx.kv(label, NOT_SET, KEY_WIDTH);
            return;
        }
        self.ctx.kv(label, "", KEY_WIDTH);
        for (key, value) in envs {
            self.ctx.kv(&format!("  {key}"), value, KEY_WIDTH);
        }
    }
}

fn or_not_set(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_SET)
}
