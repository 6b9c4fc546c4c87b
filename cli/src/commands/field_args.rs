//! Clap flags generated from the field tables.
//!
//! Each schema field becomes an optional `--<name>` flag, with its
//! kebab-case alias, value name, help text and heading taken from the
//! schema. Adding a field to the tables adds its flag here.

use std::collections::BTreeMap;

use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};

use crate::domain::FieldMeta;
use crate::domain::schema::all_fields;

/// One optional flag per schema field, generated from the field tables.
#[derive(Debug, Clone, Default)]
pub struct FieldArgs {
    /// Field name → value, for the flags that were given.
    pub values: BTreeMap<String, String>,
}

impl FromArgMatches for FieldArgs {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let values = all_fields()
            .filter_map(|meta| {
                matches
                    .get_one::<String>(meta.name)
                    .map(|value| (meta.name.to_string(), value.clone()))
            })
            .collect();
        Ok(Self { values })
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}

impl Args for FieldArgs {
    fn augment_args(cmd: Command) -> Command {
        all_fields().fold(cmd, |cmd, meta| cmd.arg(field_arg(meta)))
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

fn field_arg(meta: &'static FieldMeta) -> Arg {
    let arg = Arg::new(meta.name)
        .long(meta.name)
        .value_name(meta.value_name())
        .help(meta.help)
        .action(ArgAction::Set)
        .help_heading(if meta.is_workflow() {
            "Launch type fields"
        } else {
            "Fields"
        });
    match meta.alias {
        Some(alias) => arg.visible_alias(alias),
        None => arg,
    }
}
