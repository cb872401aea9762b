//! Skill-gap report: per-category keyword-absence checks.
//!
//! Each category lists ordered absence checks for its `missing` and `weak`
//! lists. A cap stops evaluation once that many entries were collected, so
//! checks past the cap are never consulted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::{Field, ProfileText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GapCategory {
    #[serde(rename = "Technical Skills")]
    TechnicalSkills,
    #[serde(rename = "Tools & Platforms")]
    ToolsPlatforms,
    #[serde(rename = "Professional Skills")]
    ProfessionalSkills,
}

impl GapCategory {
    pub fn label(&self) -> &'static str {
        match self {
            GapCategory::TechnicalSkills => "Technical Skills",
            GapCategory::ToolsPlatforms => "Tools & Platforms",
            GapCategory::ProfessionalSkills => "Professional Skills",
        }
    }
}

impl fmt::Display for GapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reports `skill` when none of `keywords` occurs in `field`.
#[derive(Debug, Clone, Copy)]
pub struct AbsenceCheck {
    pub skill: &'static str,
    pub field: Field,
    pub keywords: &'static [&'static str],
}

impl AbsenceCheck {
    pub fn is_absent(&self, text: &ProfileText) -> bool {
        !text.mentions_any(self.field, self.keywords)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GapRule {
    pub category: GapCategory,
    pub missing: &'static [AbsenceCheck],
    pub missing_cap: Option<usize>,
    pub weak: &'static [AbsenceCheck],
    pub weak_cap: Option<usize>,
    /// Emit the category even when both lists come out empty.
    pub always_emit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGapCategory {
    pub category: GapCategory,
    pub missing: Vec<String>,
    pub weak: Vec<String>,
}

const fn skills(skill: &'static str, keywords: &'static [&'static str]) -> AbsenceCheck {
    AbsenceCheck {
        skill,
        field: Field::TechnicalSkills,
        keywords,
    }
}

const fn soft(skill: &'static str, keywords: &'static [&'static str]) -> AbsenceCheck {
    AbsenceCheck {
        skill,
        field: Field::SoftSkills,
        keywords,
    }
}

/// Technical Skills stays first and is always emitted; the other two only
/// appear when they report something.
pub const GAP_RULES: [GapRule; 3] = [
    GapRule {
        category: GapCategory::TechnicalSkills,
        missing: &[
            skills("Git/GitHub", &["git"]),
            skills("RESTful APIs", &["api", "rest"]),
            skills("Unit Testing", &["testing"]),
        ],
        missing_cap: Some(3),
        weak: &[
            skills("Data Structures & Algorithms", &["data structures"]),
            skills("Docker/Containers", &["docker", "container"]),
        ],
        weak_cap: Some(2),
        always_emit: true,
    },
    GapRule {
        category: GapCategory::ToolsPlatforms,
        missing: &[
            skills("Linux/Unix", &["linux"]),
            skills("Cloud Platform (AWS/Azure/GCP)", &["aws", "azure", "gcp"]),
            skills("SQL & Databases", &["sql", "database"]),
        ],
        missing_cap: None,
        weak: &[],
        weak_cap: None,
        always_emit: false,
    },
    GapRule {
        category: GapCategory::ProfessionalSkills,
        missing: &[
            soft("Communication Skills", &["communication"]),
            soft("Problem Solving", &["problem"]),
        ],
        missing_cap: None,
        weak: &[],
        weak_cap: None,
        always_emit: false,
    },
];

fn collect(checks: &[AbsenceCheck], cap: Option<usize>, text: &ProfileText) -> Vec<String> {
    let mut out = Vec::new();
    for check in checks {
        if cap.is_some_and(|n| out.len() >= n) {
            break;
        }
        if check.is_absent(text) {
            out.push(check.skill.to_string());
        }
    }
    out
}

pub fn derive_skill_gaps(text: &ProfileText) -> Vec<SkillGapCategory> {
    derive_skill_gaps_with(&GAP_RULES, text)
}

pub fn derive_skill_gaps_with(rules: &[GapRule], text: &ProfileText) -> Vec<SkillGapCategory> {
    rules
        .iter()
        .filter_map(|rule| {
            let missing = collect(rule.missing, rule.missing_cap, text);
            let weak = collect(rule.weak, rule.weak_cap, text);
            if rule.always_emit || !missing.is_empty() || !weak.is_empty() {
                Some(SkillGapCategory {
                    category: rule.category,
                    missing,
                    weak,
                })
            } else {
                None
            }
        })
        .collect()
}
