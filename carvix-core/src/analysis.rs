//! Profile analysis: strengths, ranked career paths and a skill-gap report.
//!
//! Everything here is a pure function of the profile and the fixed rule
//! tables in [`crate::recommend`] and [`crate::skill_gaps`]. No I/O, no clock,
//! no randomness: the same profile always yields the same analysis.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;
use crate::recommend::{identify_strengths, recommend_paths, CareerPathRecommendation};
use crate::skill_gaps::{derive_skill_gaps, SkillGapCategory};

/// Free-text profile fields that keyword rules can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TechnicalSkills,
    SoftSkills,
    Interests,
}

/// Lowercased view of the matchable profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileText {
    pub technical_skills: String,
    pub soft_skills: String,
    pub interests: String,
    /// Length of the experience narrative in characters.
    pub experience_len: usize,
}

impl ProfileText {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            technical_skills: profile.technical_skills.to_lowercase(),
            soft_skills: profile.soft_skills.to_lowercase(),
            interests: profile.interests.to_lowercase(),
            experience_len: profile.experience.chars().count(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::TechnicalSkills => &self.technical_skills,
            Field::SoftSkills => &self.soft_skills,
            Field::Interests => &self.interests,
        }
    }

    /// Case-insensitive substring test of `keywords` against one field.
    /// Keywords are expected lowercase.
    pub fn mentions_any(&self, field: Field, keywords: &[&str]) -> bool {
        contains_any(self.field(field), keywords)
    }
}

/// Plain substring search. An empty haystack matches nothing.
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    pub strengths: Vec<String>,
    pub recommendations: Vec<CareerPathRecommendation>,
    pub skill_gaps: Vec<SkillGapCategory>,
}

/// Run every rule table against `profile`. Total over all inputs.
pub fn analyze_profile(profile: &Profile) -> ProfileAnalysis {
    let text = ProfileText::from_profile(profile);
    ProfileAnalysis {
        strengths: identify_strengths(&text),
        recommendations: recommend_paths(&text),
        skill_gaps: derive_skill_gaps(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_text_lowercases_and_counts_chars() {
        let p = Profile {
            technical_skills: "REACT, Node.JS".into(),
            experience: "héllo".into(),
            ..Profile::default()
        };
        let t = ProfileText::from_profile(&p);
        assert_eq!(t.technical_skills, "react, node.js");
        assert_eq!(t.experience_len, 5);
    }

    #[test]
    fn emoji_count_once_toward_experience_threshold() {
        // 26 emoji: 52 UTF-16 units but 26 chars, so under the > 50 threshold.
        let p = Profile {
            experience: "🚀".repeat(26),
            ..Profile::default()
        };
        assert_eq!(ProfileText::from_profile(&p).experience_len, 26);
        let a = analyze_profile(&p);
        assert!(!a.strengths.iter().any(|s| s == "Relevant project experience"));

        let p = Profile {
            experience: "🚀".repeat(51),
            ..Profile::default()
        };
        let a = analyze_profile(&p);
        assert!(a.strengths.iter().any(|s| s == "Relevant project experience"));
    }

    #[test]
    fn empty_field_matches_nothing() {
        assert!(!contains_any("", &["git", "sql"]));
        assert!(contains_any("postgresql", &["sql"]));
    }

    #[test]
    fn analysis_serializes_camel_case() {
        let a = analyze_profile(&Profile::default());
        let v = serde_json::to_value(&a).unwrap();
        assert!(v.get("skillGaps").is_some());
        assert_eq!(v["recommendations"][0]["matchScore"], 70);
        assert_eq!(v["skillGaps"][0]["category"], "Technical Skills");
    }
}
