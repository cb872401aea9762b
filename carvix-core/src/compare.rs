//! Side-by-side career comparison.

use serde::{Deserialize, Serialize};

pub const MAX_COMPARED: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub india: String,
    pub us: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub average_salary: SalaryRange,
    pub demand_level: String,
    pub growth_rate: String,
    /// 1-5.
    pub work_life_balance: u8,
    pub entry_difficulty: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub typical_responsibilities: Vec<String>,
    #[serde(default)]
    pub career_progression: Vec<String>,
    #[serde(default)]
    pub ideal_for: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    pub remote_work_potential: String,
}

/// Ordered set of at most [`MAX_COMPARED`] career ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSelection {
    ids: Vec<String>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deselects a selected id, otherwise selects it if there is room.
    /// Returns false only when the selection is full and `id` is not in it.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARED
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Selected careers in selection order; unknown ids are skipped.
    pub fn resolve<'a>(&self, careers: &'a [Career]) -> Vec<&'a Career> {
        self.ids
            .iter()
            .filter_map(|id| careers.iter().find(|c| &c.id == id))
            .collect()
    }
}

/// Title/description search plus optional category.
pub fn filter_careers<'a>(careers: &'a [Career], query: &str, category: Option<&str>) -> Vec<&'a Career> {
    let q = query.trim().to_lowercase();
    careers
        .iter()
        .filter(|c| {
            q.is_empty() || c.title.to_lowercase().contains(&q) || c.description.to_lowercase().contains(&q)
        })
        .filter(|c| category.is_none_or(|cat| c.category == cat))
        .collect()
}
