use triage_schema::SchemaRegistry;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `triage schema`. Without a type name, list the registered names.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();

    let Some(name) = args.type_name.as_deref() else {
        return output(&registry.list(), flags.format);
    };

    let schema = registry.get(name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown schema type '{name}'. Known types: {}",
            registry.list().join(", ")
        )
    })?;

    let rendered = match flags.format {
        OutputFormat::Raw => serde_json::to_string(schema)?,
        OutputFormat::Json | OutputFormat::Table => serde_json::to_string_pretty(schema)?,
    };
    println!("{rendered}");
    Ok(())
}
