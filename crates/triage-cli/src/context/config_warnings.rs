use triage_config::ENV_PREFIX;

/// Config sections that can be overridden from the environment.
const SECTIONS: [&str; 3] = ["PATHS", "RETRAIN", "GENERAL"];

/// Emit warnings for env var keys that look like config overrides but are
/// ignored because they use a single underscore.
pub fn warn_unconfigured() {
    for warning in collect_unconfigured_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut warnings = Vec::new();

    for (key, _) in env {
        let Some(rest) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        if rest.contains("__") {
            continue;
        }
        if let Some(section) = SECTIONS
            .iter()
            .find(|section| rest.strip_prefix(*section).is_some_and(|tail| tail.starts_with('_')))
        {
            let field = &rest[section.len() + 1..];
            warnings.push(format!(
                "{key} is ignored. Use double underscores (example: {ENV_PREFIX}{section}__{field})."
            ));
        }
    }

    warnings
}
