//! Strength labels and career-path rules.
//!
//! Rules are plain data evaluated in declaration order. A career rule fires
//! when any of its skill triggers appears in the technical skills or any of
//! its interest triggers appears in the interests. Match scores are fixed per
//! rule; they only decide ordering.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{Field, ProfileText};

pub const MAX_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Clone, Copy)]
pub enum StrengthCondition {
    SkillsMention(&'static [&'static str]),
    ExperienceLongerThan(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct StrengthRule {
    pub label: &'static str,
    pub condition: StrengthCondition,
}

impl StrengthRule {
    pub fn holds(&self, text: &ProfileText) -> bool {
        match self.condition {
            StrengthCondition::SkillsMention(keywords) => {
                text.mentions_any(Field::TechnicalSkills, keywords)
            }
            StrengthCondition::ExperienceLongerThan(n) => text.experience_len > n,
        }
    }
}

pub const STRENGTH_RULES: [StrengthRule; 5] = [
    StrengthRule {
        label: "Strong programming foundation",
        condition: StrengthCondition::SkillsMention(&["python", "java", "c++"]),
    },
    StrengthRule {
        label: "Modern frontend frameworks",
        condition: StrengthCondition::SkillsMention(&["react", "angular", "vue"]),
    },
    StrengthRule {
        label: "Database knowledge",
        condition: StrengthCondition::SkillsMention(&["sql", "database"]),
    },
    StrengthRule {
        label: "Relevant project experience",
        condition: StrengthCondition::ExperienceLongerThan(50),
    },
    StrengthRule {
        label: "Version control proficiency",
        condition: StrengthCondition::SkillsMention(&["git", "github"]),
    },
];

pub const FALLBACK_STRENGTHS: [&str; 2] = ["Eager to learn", "Clear career goals"];

/// Every strength whose condition holds, in table order; never empty.
pub fn identify_strengths(text: &ProfileText) -> Vec<String> {
    let found: Vec<String> = STRENGTH_RULES
        .iter()
        .filter(|r| r.holds(text))
        .map(|r| r.label.to_string())
        .collect();

    if found.is_empty() {
        debug!("no strength rule matched, using fallback labels");
        FALLBACK_STRENGTHS.iter().map(|s| s.to_string()).collect()
    } else {
        found
    }
}

/// Static display data attached to a career rule.
#[derive(Debug, Clone, Copy)]
pub struct CareerPathTemplate {
    pub title: &'static str,
    pub match_score: u8,
    pub description: &'static str,
    pub why_fits: &'static [&'static str],
    pub demand: &'static str,
    pub average_salary: &'static str,
    pub growth: &'static str,
}

impl CareerPathTemplate {
    pub fn to_recommendation(&self) -> CareerPathRecommendation {
        CareerPathRecommendation {
            title: self.title.to_string(),
            match_score: self.match_score,
            description: self.description.to_string(),
            why_fits: self.why_fits.iter().map(|s| s.to_string()).collect(),
            demand: self.demand.to_string(),
            average_salary: self.average_salary.to_string(),
            growth: self.growth.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CareerRule {
    pub skill_triggers: &'static [&'static str],
    pub interest_triggers: &'static [&'static str],
    pub path: CareerPathTemplate,
}

impl CareerRule {
    pub fn fires(&self, text: &ProfileText) -> bool {
        text.mentions_any(Field::TechnicalSkills, self.skill_triggers)
            || text.mentions_any(Field::Interests, self.interest_triggers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPathRecommendation {
    pub title: String,
    /// 0-100, fixed per rule.
    pub match_score: u8,
    pub description: String,
    pub why_fits: Vec<String>,
    pub demand: String,
    pub average_salary: String,
    pub growth: String,
}

pub const CAREER_RULES: [CareerRule; 3] = [
    CareerRule {
        skill_triggers: &["react", "javascript", "node"],
        interest_triggers: &["web", "full"],
        path: CareerPathTemplate {
            title: "Full Stack Developer",
            match_score: 85,
            description: "Build complete web applications handling both frontend and backend development.",
            why_fits: &[
                "Your interest in web development aligns perfectly with this role",
                "Current skills provide a solid foundation for full stack work",
                "High demand in startups and tech companies",
            ],
            demand: "Very High - 120k+ job openings globally",
            average_salary: "₹6-15 LPA (India) | $80-130k (US)",
            growth: "+25% expected growth by 2027",
        },
    },
    CareerRule {
        skill_triggers: &["python", "machine learning", "ai"],
        interest_triggers: &["data", "ai", "ml"],
        path: CareerPathTemplate {
            title: "Data Scientist / ML Engineer",
            match_score: 78,
            description: "Work with data to build predictive models and intelligent systems using machine learning.",
            why_fits: &[
                "Python skills are essential for data science",
                "Growing field with massive industry demand",
                "Your analytical mindset suits this career",
            ],
            demand: "High - 80k+ job openings globally",
            average_salary: "₹8-20 LPA (India) | $95-150k (US)",
            growth: "+35% expected growth by 2027",
        },
    },
    CareerRule {
        skill_triggers: &["aws", "azure", "cloud", "docker", "kubernetes"],
        interest_triggers: &["cloud", "devops"],
        path: CareerPathTemplate {
            title: "Cloud Engineer / DevOps",
            match_score: 80,
            description: "Manage cloud infrastructure, automate deployments, and ensure scalable systems.",
            why_fits: &[
                "Cloud skills are highly valued in the current market",
                "DevOps combines development and operations",
                "Essential for modern software delivery",
            ],
            demand: "Very High - 100k+ job openings globally",
            average_salary: "₹7-18 LPA (India) | $90-140k (US)",
            growth: "+30% expected growth by 2027",
        },
    },
];

/// Used verbatim, in this order, when no career rule fires.
pub const FALLBACK_PATHS: [CareerPathTemplate; 2] = [
    CareerPathTemplate {
        title: "Frontend Developer",
        match_score: 70,
        description: "Create beautiful and responsive user interfaces for web applications.",
        why_fits: &[
            "Entry-friendly with clear learning path",
            "High demand across all company sizes",
            "Creative and technical blend",
        ],
        demand: "Very High - 110k+ job openings globally",
        average_salary: "₹5-12 LPA (India) | $70-120k (US)",
        growth: "+20% expected growth by 2027",
    },
    CareerPathTemplate {
        title: "Backend Developer",
        match_score: 68,
        description: "Build server-side logic, APIs, and database systems that power applications.",
        why_fits: &[
            "Strong foundation for system design",
            "Critical role in every tech product",
            "Good career progression opportunities",
        ],
        demand: "High - 90k+ job openings globally",
        average_salary: "₹6-14 LPA (India) | $75-125k (US)",
        growth: "+22% expected growth by 2027",
    },
];

pub fn recommend_paths(text: &ProfileText) -> Vec<CareerPathRecommendation> {
    rank_paths(&CAREER_RULES, &FALLBACK_PATHS, text)
}

/// Collect firing rules (or the fallback set), sort by score descending
/// keeping table order on ties, and cap at [`MAX_RECOMMENDATIONS`].
pub fn rank_paths(
    rules: &[CareerRule],
    fallback: &[CareerPathTemplate],
    text: &ProfileText,
) -> Vec<CareerPathRecommendation> {
    let mut paths: Vec<CareerPathRecommendation> = rules
        .iter()
        .filter(|r| r.fires(text))
        .inspect(|r| debug!(title = r.path.title, score = r.path.match_score, "career rule fired"))
        .map(|r| r.path.to_recommendation())
        .collect();

    if paths.is_empty() {
        debug!("no career rule fired, using fallback paths");
        paths = fallback.iter().map(CareerPathTemplate::to_recommendation).collect();
    }

    // Vec::sort_by is stable, so equal scores keep declaration order.
    paths.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    paths.truncate(MAX_RECOMMENDATIONS);
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    fn text(skills: &str, interests: &str) -> ProfileText {
        ProfileText::from_profile(&Profile {
            technical_skills: skills.into(),
            interests: interests.into(),
            ..Profile::default()
        })
    }

    fn titles(v: &[CareerPathRecommendation]) -> Vec<&str> {
        v.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn strengths_in_table_order() {
        let t = text("Git, SQL, Python", "");
        assert_eq!(
            identify_strengths(&t),
            vec![
                "Strong programming foundation",
                "Database knowledge",
                "Version control proficiency",
            ]
        );
    }

    #[test]
    fn experience_threshold_is_strict() {
        let mut t = text("", "");
        t.experience_len = 50;
        assert_eq!(identify_strengths(&t), FALLBACK_STRENGTHS.to_vec());
        t.experience_len = 51;
        assert_eq!(identify_strengths(&t), vec!["Relevant project experience"]);
    }

    #[test]
    fn interests_alone_can_fire_a_rule() {
        let paths = recommend_paths(&text("", "I enjoy web design"));
        assert_eq!(titles(&paths), vec!["Full Stack Developer"]);
    }

    #[test]
    fn skill_triggers_do_not_read_interests() {
        // "react" is only a skill trigger; "full"/"web" are interest triggers.
        let paths = recommend_paths(&text("", "react"));
        assert_eq!(titles(&paths), vec!["Frontend Developer", "Backend Developer"]);
    }

    #[test]
    fn all_three_rules_sorted_by_score() {
        let paths = recommend_paths(&text("react, python, docker", ""));
        assert_eq!(
            titles(&paths),
            vec!["Full Stack Developer", "Cloud Engineer / DevOps", "Data Scientist / ML Engineer"]
        );
    }

    #[test]
    fn substring_match_has_no_word_boundaries() {
        // "ai" inside "maintain" fires the data rule.
        let paths = recommend_paths(&text("maintain legacy code", ""));
        assert_eq!(titles(&paths), vec!["Data Scientist / ML Engineer"]);
    }

    #[test]
    fn ties_keep_declaration_order_and_cap_applies() {
        let tpl = |title: &'static str, score: u8| CareerPathTemplate {
            title,
            match_score: score,
            description: "",
            why_fits: &[],
            demand: "",
            average_salary: "",
            growth: "",
        };
        let rule = |title, score| CareerRule {
            skill_triggers: &["x"],
            interest_triggers: &[],
            path: tpl(title, score),
        };
        let rules = [rule("a", 50), rule("b", 90), rule("c", 50), rule("d", 50), rule("e", 10)];
        let paths = rank_paths(&rules, &FALLBACK_PATHS, &text("x", ""));
        assert_eq!(titles(&paths), vec!["b", "a", "c"]);
    }
}
