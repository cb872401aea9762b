use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionDifficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for QuestionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            QuestionDifficulty::Easy => "Easy",
            QuestionDifficulty::Medium => "Medium",
            QuestionDifficulty::Hard => "Hard",
        })
    }
}

impl FromStr for QuestionDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(QuestionDifficulty::Easy),
            "medium" => Ok(QuestionDifficulty::Medium),
            "hard" => Ok(QuestionDifficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (easy, medium, hard)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub id: String,
    pub category: String,
    pub difficulty: QuestionDifficulty,
    pub question: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub sample_answer: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub category: Option<String>,
    pub difficulty: Option<QuestionDifficulty>,
}

impl QuestionFilter {
    pub fn matches(&self, q: &InterviewQuestion) -> bool {
        self.category
            .as_deref()
            .is_none_or(|c| q.category.eq_ignore_ascii_case(c))
            && self.difficulty.is_none_or(|d| q.difficulty == d)
    }

    pub fn apply<'a>(&self, bank: &'a [InterviewQuestion]) -> Vec<&'a InterviewQuestion> {
        bank.iter().filter(|q| self.matches(q)).collect()
    }
}

/// Ids of questions the user has practiced, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PracticeLog {
    completed: Vec<String>,
}

impl PracticeLog {
    /// Returns false when the id was already recorded.
    pub fn mark_done(&mut self, id: &str) -> bool {
        if self.is_done(id) {
            return false;
        }
        self.completed.push(id.to_string());
        true
    }

    pub fn is_done(&self, id: &str) -> bool {
        self.completed.iter().any(|c| c == id)
    }

    /// Completed questions that are still present in `bank`.
    pub fn completed_in(&self, bank: &[InterviewQuestion]) -> usize {
        bank.iter().filter(|q| self.is_done(&q.id)).count()
    }

    pub fn percent(&self, bank: &[InterviewQuestion]) -> f64 {
        if bank.is_empty() {
            return 0.0;
        }
        self.completed_in(bank) as f64 / bank.len() as f64 * 100.0
    }

    /// First unpracticed question in `candidates`, skipping `current`.
    pub fn next_pending<'a>(
        &self,
        candidates: &[&'a InterviewQuestion],
        current: Option<&str>,
    ) -> Option<&'a InterviewQuestion> {
        candidates
            .iter()
            .copied()
            .find(|q| !self.is_done(&q.id) && Some(q.id.as_str()) != current)
    }
}
