//! `frm stats` command - tracking dashboard

use crate::cli::Cli;
use crate::commands::format::{is_json, print_json};
use frm_core::aggregator::Aggregator;
use frm_core::due::DueEngine;
use frm_core::error::Result;
use frm_core::ledger::LogEntry;
use frm_core::stats::Dashboard;

pub fn execute(cli: &Cli, aggregator: &Aggregator, entries: &[LogEntry], engine: &DueEngine) -> Result<()> {
    let pool = aggregator.pool_all()?;
    let dashboard = Dashboard::build(&pool, entries, engine);

    if is_json(cli) {
        return print_json(&dashboard);
    }
    for line in render(&dashboard) {
        println!("{line}");
    }
    Ok(())
}

fn render(dashboard: &Dashboard) -> Vec<String> {
    let mut lines = vec![
        format!("Total contacts:  {}", dashboard.total_contacts),
        format!("Tracked:         {}", dashboard.tracked),
        format!("Ignored:         {}", dashboard.ignored),
        format!("Untracked:       {}", dashboard.untracked),
        format!("Overdue:         {}", dashboard.overdue),
        format!("Interactions:    {}", dashboard.total_interactions),
    ];
    if let Some(most) = &dashboard.most_contacted {
        lines.push(format!("Most contacted:  {} ({})", most.name, most.count));
    }
    if let Some(least) = &dashboard.least_contacted {
        lines.push(format!("Least contacted: {} ({})", least.name, least.count));
    }
    lines
}
