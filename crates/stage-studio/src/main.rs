//! Stage studio: realizes a definition file against an in-memory root
//! container and prints what was built.

mod args;

use std::collections::BTreeMap;

use anyhow::{Context as _, Result};
use clap::Parser;

use stage_core::logging::{init_logging, LoggingConfig};
use stage_dsl::NodeId;
use stage_ui::prelude::*;

use args::Args;

/// Failures come back as `anyhow` reports, so no listener logs them a second time.
fn factory() -> DefinitionFactory {
    DefinitionFactory::new().without_listener()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::with_filter(args.log_level.as_str()));
    log::debug!("{args:?}");

    let definition = factory()
        .build_file(&args.input)
        .map_err(|err| anyhow::anyhow!(err.report()))
        .with_context(|| format!("compiling {}", args.input.display()))?;
    log::info!(
        "compiled {} declaration(s); hierarchies: {}",
        definition.document().len(),
        definition.hierarchy_names().collect::<Vec<_>>().join(", ")
    );

    let data: BTreeMap<String, String> = args.bindings.iter().cloned().collect();
    let mut context = definition
        .load_templated(&args.hierarchy, data)
        .map_err(|err| anyhow::anyhow!(err.report()))
        .with_context(|| format!("loading '{}'", args.hierarchy))?;

    context
        .attach(view_ref(Container::default()))
        .map_err(|err| anyhow::anyhow!(err.report()))
        .context("attaching to the root container")?;
    print!("{}", render_tree(&context));

    if !args.rebindings.is_empty() {
        context
            .update(|m| {
                for (key, value) in &args.rebindings {
                    m.set(key.as_str(), value.as_str());
                }
            })
            .map_err(|err| anyhow::anyhow!(err.report()))
            .context("applying rebindings")?;
        println!();
        print!("{}", render_tree(&context));
    }
    Ok(())
}

// ── Tree printing ─────────────────────────────────────────────────────────

/// One line per declared node: name, class, and configured state.
fn render_tree(context: &LiveContext) -> String {
    let mut out = String::new();
    let root = describe(context, context.root_name());
    out.push_str(&format!("{} {root}\n", context.root_name()));

    let hierarchy = context.hierarchy();
    render_children(context, hierarchy.root(), 1, &mut out);
    out
}

fn render_children(context: &LiveContext, id: NodeId, depth: usize, out: &mut String) {
    let hierarchy = context.hierarchy();
    for &child in hierarchy.children(id) {
        let name = hierarchy.name(child);
        out.push_str(&format!("{}{name} {}\n", "  ".repeat(depth), describe(context, name)));
        render_children(context, child, depth + 1, out);
    }
}

fn describe(context: &LiveContext, name: &str) -> String {
    match context.lookup(name) {
        Ok(view) => match view.try_borrow() {
            Ok(view) => format!("<{}> {}", view.class_name(), view.summary()),
            Err(_) => "<busy>".to_string(),
        },
        Err(_) => "<not built>".to_string(),
    }
}
