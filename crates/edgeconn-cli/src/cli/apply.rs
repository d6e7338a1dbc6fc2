use crate::cli::{print_aux_table, print_unresolved, ApplyArgs, OutputFormat};
use crate::config::EdgeConnConfig;
use crate::document::{GraphDocument, Operation};
use anyhow::{Context, Result};
use edgeconn_core::{EdgeConnections, MemoryGraph, Position};
use std::path::Path;
use tracing::info;

pub fn run(args: ApplyArgs, config_path: &Path) -> Result<()> {
    let mut config = EdgeConnConfig::load_or_default(config_path);
    if let Some(max_passes) = args.max_passes {
        config.max_passes = max_passes;
    }
    let errors = config.validate();
    if !errors.is_empty() {
        anyhow::bail!("Invalid configuration: {}", errors.join("; "));
    }

    let doc = GraphDocument::load(&args.document)?;
    info!(
        "Loaded {}: {} nodes, {} edges, {} ops",
        args.document.display(),
        doc.nodes.len(),
        doc.edges.len(),
        doc.ops.len()
    );

    let mut conn = EdgeConnections::with_config(
        MemoryGraph::with_geometry(config.geometry_config()),
        config.connect_config(),
    )?;

    for node in doc.nodes {
        conn.add_node(node)?;
    }

    let outcome = conn.add_edges(doc.edges)?;
    info!(
        "Added {} edge(s) in {} pass(es)",
        outcome.added.len(),
        outcome.passes
    );
    if args.strict && !outcome.is_complete() {
        anyhow::bail!(
            "{} edge(s) could not be added: {}",
            outcome.unresolved.len(),
            outcome
                .unresolved
                .iter()
                .map(|d| d.label())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    for (i, op) in doc.ops.into_iter().enumerate() {
        apply_operation(&mut conn, &op).with_context(|| format!("Operation #{} ({:?}) failed", i + 1, op))?;
    }

    let snapshot = conn.snapshot()?;
    match args.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "outcome": outcome,
                    "graph": snapshot,
                }))?
            );
        }
        OutputFormat::Table => {
            println!(
                "Added {} edge(s) in {} pass(es); graph has {} nodes, {} edges",
                outcome.added.len(),
                outcome.passes,
                snapshot.nodes.len(),
                snapshot.edges.len()
            );
            println!();
            print_aux_table(&snapshot.aux_nodes);
            print_unresolved(&outcome.unresolved);
        }
    }

    Ok(())
}

fn apply_operation(conn: &mut EdgeConnections, op: &Operation) -> Result<()> {
    match op {
        Operation::Move { node, x, y } => conn.move_node(node, Position::new(*x, *y))?,
        Operation::Remove { id } => {
            let removed = conn.remove(id)?;
            info!("Removed {} element(s) with {}", removed.len(), id);
        }
        Operation::Color { edge, color } => conn.set_line_color(edge, color.as_str())?,
    }
    Ok(())
}
