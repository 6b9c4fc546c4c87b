//! Declarative table of every configuration field.
//!
//! The CLI flag binder, the collector, the interactive prompts, the
//! validator and the diff reporter all iterate these tables. Adding a
//! field means adding one entry here (plus the struct field that stores
//! it); nothing else branches on field names.

use agentkit_common::{CommonConfig, LaunchType, WorkflowConfig};

/// Script extensions the runtime knows how to start.
pub const ENTRY_POINT_EXTENSIONS: &[&str] = &[".py", ".go", ".sh"];

/// Shape of a field's value, driving format validation and prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Path,
    /// Path that must end in one of [`ENTRY_POINT_EXTENSIONS`].
    ScriptPath,
    /// `MAJOR.MINOR` or `MAJOR.MINOR.PATCH`.
    Version,
    /// One of a fixed set of values.
    Choice(&'static [&'static str]),
}

/// Everything about a field except where it is stored.
#[derive(Debug, Clone, Copy)]
pub struct FieldMeta {
    /// Key in `agentkit.yaml`, also the long flag name.
    pub name: &'static str,
    /// Kebab-case spelling accepted as a flag alias.
    pub alias: Option<&'static str>,
    pub kind: FieldKind,
    pub required: bool,
    /// Value written when a configuration is created from scratch.
    pub default: Option<&'static str>,
    /// Launch types the field applies to; empty for common fields.
    pub applies_to: &'static [LaunchType],
    pub prompt: &'static str,
    pub help: &'static str,
}

impl FieldMeta {
    /// `true` for fields stored per launch type.
    #[must_use]
    pub fn is_workflow(&self) -> bool {
        !self.applies_to.is_empty()
    }

    /// Whether the field may be set for the given launch type name.
    #[must_use]
    pub fn supports(&self, launch_type: &str) -> bool {
        if !self.is_workflow() {
            return true;
        }
        launch_type
            .parse::<LaunchType>()
            .is_ok_and(|lt| self.applies_to.contains(&lt))
    }

    /// Placeholder shown in `--help`.
    #[must_use]
    pub fn value_name(&self) -> &'static str {
        match self.kind {
            FieldKind::Path | FieldKind::ScriptPath => "PATH",
            FieldKind::Version => "VERSION",
            FieldKind::Choice(_) => "TYPE",
            FieldKind::Text => "VALUE",
        }
    }
}

/// A field bound to the section struct `S` that stores it.
pub struct Field<S> {
    pub meta: FieldMeta,
    get: fn(&S) -> Option<&str>,
    set: fn(&mut S, Option<String>),
}

impl<S> Field<S> {
    #[must_use]
    pub fn get<'a>(&self, section: &'a S) -> Option<&'a str> {
        (self.get)(section)
    }

    pub fn set(&self, section: &mut S, value: Option<String>) {
        (self.set)(section, value);
    }
}

macro_rules! field {
    ($section:ty, $name:ident { $($key:ident: $value:expr),* $(,)? }) => {{
        fn get(section: &$section) -> Option<&str> {
            section.$name.as_deref()
        }
        fn set(section: &mut $section, value: Option<String>) {
            section.$name = value;
        }
        Field {
            meta: FieldMeta { name: stringify!($name), $($key: $value),* },
            get,
            set,
        }
    }};
}

const REMOTE: &[LaunchType] = &[LaunchType::Hybrid, LaunchType::Cloud];

/// Fields stored in the `common` section, in definition order.
pub static COMMON_FIELDS: &[Field<CommonConfig>] = &[
    field!(CommonConfig, agent_name {
        alias: Some("agent-name"),
        kind: FieldKind::Text,
        required: true,
        default: None,
        applies_to: &[],
        prompt: "Agent name",
        help: "Name of the agent",
    }),
    field!(CommonConfig, entry_point {
        alias: Some("entry-point"),
        kind: FieldKind::ScriptPath,
        required: true,
        default: Some("agent.py"),
        applies_to: &[],
        prompt: "Entry point",
        help: "Script started by the runtime (.py, .go or .sh)",
    }),
    field!(CommonConfig, description {
        alias: None,
        kind: FieldKind::Text,
        required: false,
        default: None,
        applies_to: &[],
        prompt: "Description",
        help: "Free-form description of the agent",
    }),
    field!(CommonConfig, python_version {
        alias: Some("python-version"),
        kind: FieldKind::Version,
        required: false,
        default: Some("3.12"),
        applies_to: &[],
        prompt: "Python version",
        help: "Python version of the runtime image, e.g. 3.12",
    }),
    field!(CommonConfig, dependencies_file {
        alias: Some("dependencies-file"),
        kind: FieldKind::Path,
        required: false,
        default: Some("requirements.txt"),
        applies_to: &[],
        prompt: "Dependencies file",
        help: "File listing the agent's dependencies",
    }),
    field!(CommonConfig, launch_type {
        alias: Some("launch-type"),
        kind: FieldKind::Choice(LaunchType::NAMES),
        required: false,
        default: Some("local"),
        applies_to: &[],
        prompt: "Launch type",
        help: "Deployment target: local, hybrid or cloud",
    }),
];

/// Fields stored per launch type, in definition order.
pub static WORKFLOW_FIELDS: &[Field<WorkflowConfig>] = &[
    field!(WorkflowConfig, region {
        alias: None,
        kind: FieldKind::Text,
        required: false,
        default: None,
        applies_to: REMOTE,
        prompt: "Region",
        help: "Cloud region (hybrid, cloud)",
    }),
    field!(WorkflowConfig, storage_bucket {
        alias: Some("storage-bucket"),
        kind: FieldKind::Text,
        required: false,
        default: None,
        applies_to: &[LaunchType::Cloud],
        prompt: "Storage bucket",
        help: "Bucket receiving uploaded sources (cloud)",
    }),
    field!(WorkflowConfig, image_tag {
        alias: Some("image-tag"),
        kind: FieldKind::Text,
        required: false,
        default: None,
        applies_to: &LaunchType::ALL,
        prompt: "Image tag",
        help: "Tag of the built image",
    }),
    field!(WorkflowConfig, cr_instance_name {
        alias: Some("cr-instance-name"),
        kind: FieldKind::Text,
        required: false,
        default: None,
        applies_to: REMOTE,
        prompt: "Container registry instance",
        help: "Container registry instance (hybrid, cloud)",
    }),
    field!(WorkflowConfig, cr_namespace_name {
        alias: Some("cr-namespace-name"),
        kind: FieldKind::Text,
        required: false,
        default: None,
        applies_to: REMOTE,
        prompt: "Container registry namespace",
        help: "Container registry namespace (hybrid, cloud)",
    }),
    field!(WorkflowConfig, cr_repo_name {
        alias: Some("cr-repo-name"),
        kind: FieldKind::Text,
        required: false,
        default: None,
        applies_to: REMOTE,
        prompt: "Container registry repository",
        help: "Container registry repository (hybrid, cloud)",
    }),
];

/// Metadata of every field, common fields first.
pub fn all_fields() -> impl Iterator<Item = &'static FieldMeta> {
    COMMON_FIELDS
        .iter()
        .map(|f| &f.meta)
        .chain(WORKFLOW_FIELDS.iter().map(|f| &f.meta))
}
