//! Tracking dashboard

use serde::Serialize;

use crate::aggregator::ContactPool;
use crate::contact::metadata;
use crate::due::DueEngine;
use crate::ledger::{interaction_counts, InteractionCount, LogEntry};

/// Counts over the pooled contacts and the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub total_contacts: usize,
    pub tracked: usize,
    pub ignored: usize,
    pub untracked: usize,
    pub overdue: usize,
    pub total_interactions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_contacted: Option<InteractionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub least_contacted: Option<InteractionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionSummary {
    pub name: String,
    pub count: usize,
}

impl From<&InteractionCount> for InteractionSummary {
    fn from(c: &InteractionCount) -> Self {
        Self {
            name: c.name.clone(),
            count: c.count,
        }
    }
}

impl Dashboard {
    /// Only named contacts count. Tracked means a frequency on a contact
    /// that is not ignored.
    pub fn build(pool: &ContactPool<'_>, entries: &[LogEntry], engine: &DueEngine) -> Self {
        let mut dashboard = Dashboard {
            total_interactions: entries.len(),
            ..Dashboard::default()
        };

        for (_, record) in pool.named() {
            dashboard.total_contacts += 1;
            if metadata::is_ignored(&record.card) {
                dashboard.ignored += 1;
                continue;
            }
            if metadata::frequency(&record.card).is_none() {
                continue;
            }
            dashboard.tracked += 1;
            if engine.evaluate(record).is_some_and(|r| r.is_overdue()) {
                dashboard.overdue += 1;
            }
        }
        dashboard.untracked = dashboard.total_contacts - dashboard.tracked - dashboard.ignored;

        let mut counts = interaction_counts(entries);
        // most first; ties by case-insensitive name
        counts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        dashboard.most_contacted = counts.first().map(InteractionSummary::from);
        dashboard.least_contacted = counts.last().map(InteractionSummary::from);
        dashboard
    }
}
