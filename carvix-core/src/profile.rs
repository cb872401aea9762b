//! Self-reported career profile and the four-step intake wizard that builds it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The record the recommendation engine reads.
///
/// Only `technical_skills`, `soft_skills`, `experience` and `interests` feed the
/// matcher; the rest is descriptive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub education: String,
    pub degree: String,
    pub graduation_year: String,
    /// Comma-separated free text, e.g. "Python, SQL, Git".
    pub technical_skills: String,
    pub soft_skills: String,
    pub experience: String,
    pub interests: String,
    /// Collected but not consulted by any matching rule.
    pub career_goals: String,
    pub resume_text: String,
}

/// Education levels offered by the intake form.
pub const EDUCATION_LEVELS: [(&str, &str); 3] = [
    ("final-year", "Final Year Student"),
    ("graduate", "Recent Graduate"),
    ("working", "Working Professional"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntakeStep {
    BasicInfo = 1,
    SkillsExperience = 2,
    InterestsGoals = 3,
    Resume = 4,
}

impl IntakeStep {
    pub const ALL: [IntakeStep; 4] = [
        IntakeStep::BasicInfo,
        IntakeStep::SkillsExperience,
        IntakeStep::InterestsGoals,
        IntakeStep::Resume,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            IntakeStep::BasicInfo => "Basic Information",
            IntakeStep::SkillsExperience => "Skills & Experience",
            IntakeStep::InterestsGoals => "Career Interests & Goals",
            IntakeStep::Resume => "Upload Resume (Optional)",
        }
    }

    fn next(self) -> Option<IntakeStep> {
        match self {
            IntakeStep::BasicInfo => Some(IntakeStep::SkillsExperience),
            IntakeStep::SkillsExperience => Some(IntakeStep::InterestsGoals),
            IntakeStep::InterestsGoals => Some(IntakeStep::Resume),
            IntakeStep::Resume => None,
        }
    }

    fn prev(self) -> Option<IntakeStep> {
        match self {
            IntakeStep::BasicInfo => None,
            IntakeStep::SkillsExperience => Some(IntakeStep::BasicInfo),
            IntakeStep::InterestsGoals => Some(IntakeStep::SkillsExperience),
            IntakeStep::Resume => Some(IntakeStep::InterestsGoals),
        }
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// Returns the names of required fields that are blank (or malformed) for `step`.
pub fn missing_fields(profile: &Profile, step: IntakeStep) -> Vec<&'static str> {
    let required: Vec<(&'static str, &str)> = match step {
        IntakeStep::BasicInfo => vec![
            ("name", &profile.name),
            ("email", &profile.email),
            ("education", &profile.education),
            ("degree", &profile.degree),
            ("graduationYear", &profile.graduation_year),
        ],
        IntakeStep::SkillsExperience => vec![("technicalSkills", &profile.technical_skills)],
        IntakeStep::InterestsGoals => vec![
            ("interests", &profile.interests),
            ("careerGoals", &profile.career_goals),
        ],
        IntakeStep::Resume => vec![],
    };

    let mut out: Vec<&'static str> = required
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();

    if step == IntakeStep::BasicInfo
        && !profile.email.trim().is_empty()
        && !is_valid_email(&profile.email)
    {
        out.push("email");
    }
    out
}

/// Step-by-step intake state. Moving forward requires the current step to validate.
#[derive(Debug, Clone)]
pub struct IntakeWizard {
    step: IntakeStep,
    profile: Profile,
}

impl Default for IntakeWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeWizard {
    pub fn new() -> Self {
        Self {
            step: IntakeStep::BasicInfo,
            profile: Profile::default(),
        }
    }

    /// Resume editing an existing profile from step 1.
    pub fn from_profile(profile: Profile) -> Self {
        Self {
            step: IntakeStep::BasicInfo,
            profile,
        }
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    pub fn validate_step(&self) -> Vec<&'static str> {
        missing_fields(&self.profile, self.step)
    }

    /// Advance one step. Returns the blocking fields if the current step is incomplete.
    /// At the last step this is a no-op.
    pub fn next(&mut self) -> Result<IntakeStep, Vec<&'static str>> {
        let missing = self.validate_step();
        if !missing.is_empty() {
            return Err(missing);
        }
        if let Some(n) = self.step.next() {
            self.step = n;
        }
        Ok(self.step)
    }

    pub fn prev(&mut self) -> IntakeStep {
        if let Some(p) = self.step.prev() {
            self.step = p;
        }
        self.step
    }

    /// Hand over the finished profile if every step validates.
    pub fn finish(self) -> Result<Profile, Vec<&'static str>> {
        let missing: Vec<&'static str> = IntakeStep::ALL
            .iter()
            .flat_map(|s| missing_fields(&self.profile, *s))
            .collect();
        if missing.is_empty() {
            Ok(self.profile)
        } else {
            Err(missing)
        }
    }
}
