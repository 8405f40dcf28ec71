//! Read-only aggregation over the claim history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::HourChunk;

/// Label for chunks stored without a project.
pub const UNKNOWN_PROJECT: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTotal {
    pub project: String,
    pub chunks: u64,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSummary {
    pub total_collected: u64,
    pub total_chunks: u64,
    /// Sorted by amount, largest first; ties by project name.
    pub by_project: Vec<ProjectTotal>,
    pub first_claim: Option<u64>,
    pub last_claim: Option<u64>,
}

impl VaultSummary {
    pub fn from_chunks(chunks: &[HourChunk]) -> Self {
        let mut projects: BTreeMap<&str, ProjectTotal> = BTreeMap::new();
        let mut summary = VaultSummary::default();

        for chunk in chunks {
            summary.total_collected = summary.total_collected.saturating_add(chunk.amount);
            summary.total_chunks += 1;
            let ts = chunk.timestamp;
            summary.first_claim = Some(summary.first_claim.map_or(ts, |t| t.min(ts)));
            summary.last_claim = Some(summary.last_claim.map_or(ts, |t| t.max(ts)));

            let name = chunk.project.as_deref().unwrap_or(UNKNOWN_PROJECT);
            let entry = projects.entry(name).or_insert_with(|| ProjectTotal {
                project: name.to_string(),
                ..ProjectTotal::default()
            });
            entry.chunks += 1;
            entry.amount = entry.amount.saturating_add(chunk.amount);
        }

        summary.by_project = projects.into_values().collect();
        summary
            .by_project
            .sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.project.cmp(&b.project)));
        summary
    }
}
