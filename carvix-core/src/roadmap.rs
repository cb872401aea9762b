//! Learning roadmaps: data shape and milestone completion tracking.
//!
//! Roadmap content comes from a JSON file; only progress is ours.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub name: String,
    #[serde(default)]
    pub duration: String,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub total_duration: String,
    #[serde(default)]
    pub difficulty: String,
    pub phases: Vec<Phase>,
}

impl Roadmap {
    pub fn milestone_count(&self) -> usize {
        self.phases.iter().map(|p| p.milestones.len()).sum()
    }
}

/// Title search (case-insensitive) plus optional exact category.
pub fn filter_roadmaps<'a>(
    roadmaps: &'a [Roadmap],
    query: Option<&str>,
    category: Option<&str>,
) -> Vec<&'a Roadmap> {
    let q = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
    roadmaps
        .iter()
        .filter(|r| r.title.to_lowercase().contains(&q))
        .filter(|r| category.is_none_or(|c| r.category == c))
        .collect()
}

/// Distinct categories in first-seen order.
pub fn categories(roadmaps: &[Roadmap]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for r in roadmaps {
        if !out.contains(&r.category.as_str()) {
            out.push(&r.category);
        }
    }
    out
}

pub fn milestone_key(roadmap_id: &str, phase: usize, milestone: usize) -> String {
    format!("{roadmap_id}-{phase}-{milestone}")
}

/// Completed milestone keys across all roadmaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoadmapProgress {
    completed: BTreeSet<String>,
}

impl RoadmapProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a milestone; returns whether it is now completed.
    pub fn toggle(&mut self, roadmap_id: &str, phase: usize, milestone: usize) -> bool {
        let key = milestone_key(roadmap_id, phase, milestone);
        if self.completed.remove(&key) {
            false
        } else {
            self.completed.insert(key);
            true
        }
    }

    pub fn is_completed(&self, roadmap_id: &str, phase: usize, milestone: usize) -> bool {
        self.completed.contains(&milestone_key(roadmap_id, phase, milestone))
    }

    pub fn completed_in(&self, roadmap: &Roadmap) -> usize {
        roadmap
            .phases
            .iter()
            .enumerate()
            .flat_map(|(p, phase)| (0..phase.milestones.len()).map(move |m| (p, m)))
            .filter(|(p, m)| self.is_completed(&roadmap.id, *p, *m))
            .count()
    }

    /// Percent of the roadmap's milestones completed; 0 for an empty roadmap.
    pub fn percent(&self, roadmap: &Roadmap) -> f64 {
        let total = roadmap.milestone_count();
        if total == 0 {
            return 0.0;
        }
        self.completed_in(roadmap) as f64 / total as f64 * 100.0
    }
}
