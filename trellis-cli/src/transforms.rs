//! CLI output transforms
//!
//! Each transform is a pipeline stage plus a format: the token stream, the compiled graph, or
//! the syntax tree through one of the registered tree formats.

use trellis::trellis::formats::{FormatError, FormatRegistry};
use trellis::trellis::{Language, Result};

/// All output formats the CLI accepts
pub const AVAILABLE_FORMATS: &[&str] = &["tokens", "graph", "treeviz", "json"];

/// One line per format for the `--format` long help
pub fn format_help() -> String {
    let registry = FormatRegistry::with_defaults();
    let mut help = String::from("Output format (default from configuration: treeviz)\n");
    for name in AVAILABLE_FORMATS {
        let description = match *name {
            "tokens" => "Token stream as JSON",
            "graph" => "Compiled parsing graph, one node per line",
            _ => registry.get(name).map(|f| f.description()).unwrap_or_default(),
        };
        help.push_str(&format!("\n  {name:<8} {description}"));
    }
    help
}

/// Run `source` through `language` up to the stage `format` needs and render it
pub fn execute_transform(
    language: &Language,
    source: &str,
    format: &str,
    truncate: usize,
) -> Result<String> {
    match format {
        "tokens" => {
            let tokens = language.tokens(source)?;
            serde_json::to_string_pretty(&tokens)
                .map_err(|e| FormatError::SerializationError(e.to_string()).into())
        }
        "graph" => Ok(language.graph().describe()),
        _ => {
            let tree = language.parse(source)?;
            Ok(FormatRegistry::with_truncation(truncate).serialize(&tree, format)?)
        }
    }
}
