use std::io::Read;

use anyhow::Context;

use crate::cli::root_commands::TextInput;

/// Resolve the anamnesis from the positional text, a file, or stdin.
pub fn read_text(input: &TextInput) -> anyhow::Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    if let Some(path) = &input.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read anamnesis from {path}"));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read anamnesis from stdin")?;
    Ok(buffer)
}
