//! Sources command: show configured sources and the options each kind takes.

use std::io::Write;

use anyhow::Result;
use dl_sources::{FieldKind, Requirement, field_specs, kinds};

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    if config.sources.is_empty() {
        writeln!(writer, "No sources configured.")?;
    } else {
        writeln!(writer, "Configured sources:")?;
        for (name, settings) in &config.sources {
            let state = if settings.enabled { "enabled" } else { "disabled" };
            writeln!(writer, "- {name} ({state})")?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "Available kinds:")?;
    for kind in kinds() {
        let Some(specs) = field_specs(kind) else {
            continue;
        };
        let options: Vec<String> = specs.iter().map(describe).collect();
        writeln!(writer, "- {kind}: {}", options.join(", "))?;
    }

    Ok(())
}

fn describe(spec: &dl_sources::FieldSpec) -> String {
    let requirement = match spec.requirement {
        Requirement::Required => "required".to_string(),
        Requirement::Optional => "optional".to_string(),
        Requirement::Default(value) => format!("default: {value}"),
    };
    if spec.kind == FieldKind::Secret {
        format!("{} ({requirement}, secret)", spec.name)
    } else {
        format!("{} ({requirement})", spec.name)
    }
}
