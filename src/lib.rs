// src/lib.rs

pub mod cli;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod parse;
pub mod sched;

use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::graph::TaskGraph;
use crate::sched::Scheduler;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - reading the graph description file
/// - parsing + graph resolution
/// - list scheduling
/// - text or JSON report output
pub fn run(args: CliArgs) -> Result<()> {
    let input = fs::read_to_string(&args.graph)
        .with_context(|| format!("failed to read graph description '{}'", args.graph))?;

    let graph = parse::parse(&input)?;

    if args.dry_run {
        print_dry_run(&graph);
        return Ok(());
    }

    let scheduler = Scheduler::new(&graph, args.processors)?;
    let schedule = scheduler.list_schedule()?;

    info!(
        tasks = schedule.len(),
        processors = args.processors,
        makespan = schedule.makespan(),
        "schedule computed"
    );

    if args.json {
        let report = schedule.report(&graph);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", schedule.render(&graph));
    }

    Ok(())
}

/// Simple dry-run output: the resolved graph and its topological order,
/// no scheduling.
fn print_dry_run(graph: &TaskGraph) {
    println!("schedag dry-run");
    if !graph.name().is_empty() {
        println!("  graph: {}", graph.name());
    }
    println!("  strict: {}", graph.is_strict());
    println!();

    println!("tasks ({}):", graph.task_count());
    for id in graph.task_ids() {
        let task = graph.task(id);
        println!("  - {} (Weight={})", task.name, task.weight());

        let preds = graph.predecessors(id);
        if !preds.is_empty() {
            let names: Vec<&str> = preds
                .iter()
                .map(|&(pred, _)| graph.task(pred).name.as_str())
                .collect();
            println!("      after: {}", names.join(", "));
        }
    }

    println!();
    let order = graph.topological_order();
    if order.len() == graph.task_count() {
        let names: Vec<&str> = order
            .iter()
            .map(|&id| graph.task(id).name.as_str())
            .collect();
        println!("topological order: {}", names.join(" -> "));
    } else {
        println!("graph contains a cycle; not schedulable");
    }

    debug!("dry-run complete (no scheduling)");
}
