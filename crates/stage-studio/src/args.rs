//! Command-line arguments for the studio host.

use std::path::PathBuf;

use clap::Parser;

/// Compile a stage definition, realize one hierarchy, and print the tree.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the definition file
    pub input: PathBuf,

    /// Declaration whose view hierarchy is realized
    #[arg(short = 'H', long, default_value = "Main")]
    pub hierarchy: String,

    /// Data binding applied before the views are built (repeatable)
    #[arg(short, long = "bind", value_name = "KEY=VALUE", value_parser = parse_binding)]
    pub bindings: Vec<(String, String)>,

    /// Data binding changed after attachment, printing the tree again (repeatable)
    #[arg(short, long = "rebind", value_name = "KEY=VALUE", value_parser = parse_binding)]
    pub rebindings: Vec<(String, String)>,

    /// Log level (off, error, warn, info, debug, trace) or an env_logger filter
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// `key=value`; the value may itself contain `=`.
pub fn parse_binding(text: &str) -> Result<(String, String), String> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{text}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{text}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
