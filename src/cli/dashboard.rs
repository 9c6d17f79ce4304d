//! Dashboard, stats and motivation commands

use anyhow::Result;
use kalma_core::{random_motivation, Dashboard, TaskStore};

use super::helpers::{format_task_line, print_json, Context};

/// Show the owner's tasks, counts and a motivational message
pub async fn handle_dashboard(ctx: &Context, json: bool) -> Result<()> {
    let storage = ctx.open_storage(false).await?;
    let mut rng = rand::thread_rng();
    let dashboard = Dashboard::build(&storage, &ctx.owner, &mut rng).await?;

    if json {
        return print_json(&dashboard);
    }

    println!();
    println!("Hello, {}", dashboard.owner);
    println!("\"{}\"", dashboard.motivation.message);
    println!();
    println!(
        "Tasks: {} total, {} done, {} pending ({:.0}% complete)",
        dashboard.stats.total,
        dashboard.stats.done,
        dashboard.stats.pending,
        dashboard.stats.completion_ratio() * 100.0
    );
    println!();
    for task in &dashboard.tasks {
        println!("  {}", format_task_line(task));
    }
    Ok(())
}

/// Print total/done/pending counts
pub async fn handle_stats(ctx: &Context, json: bool) -> Result<()> {
    let storage = ctx.open_storage(false).await?;
    let stats = storage.task_stats(&ctx.owner).await?;

    if json {
        return print_json(&stats);
    }

    println!(
        "total: {}  done: {}  pending: {}",
        stats.total, stats.done, stats.pending
    );
    Ok(())
}

/// Print one random motivational message
pub fn handle_motivate() -> Result<()> {
    let motivation = random_motivation(&mut rand::thread_rng());
    println!("{}", motivation.message);
    Ok(())
}
