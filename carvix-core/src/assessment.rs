//! Skills-assessment scoring. Question banks are supplied as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
}

impl Proficiency {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Proficiency::Advanced
        } else if score >= 60.0 {
            Proficiency::Intermediate
        } else {
            Proficiency::Beginner
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub assessment_id: String,
    /// Percentage, 0-100.
    pub score: f64,
    pub correct: usize,
    pub total_questions: usize,
    pub date: DateTime<Utc>,
    pub proficiency_level: Proficiency,
}

/// Answers keyed by question id -> chosen option index.
pub type Answers = BTreeMap<u32, usize>;

pub fn score_assessment(assessment: &Assessment, answers: &Answers, now: DateTime<Utc>) -> AssessmentResult {
    let total = assessment.questions.len();
    let correct = assessment
        .questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_answer))
        .count();
    let score = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    };
    AssessmentResult {
        assessment_id: assessment.id.clone(),
        score,
        correct,
        total_questions: total,
        date: now,
        proficiency_level: Proficiency::from_score(score),
    }
}

/// Keep only the latest result per assessment.
pub fn record_result(results: &mut Vec<AssessmentResult>, result: AssessmentResult) {
    results.retain(|r| r.assessment_id != result.assessment_id);
    results.push(result);
}

pub fn result_for<'a>(results: &'a [AssessmentResult], assessment_id: &str) -> Option<&'a AssessmentResult> {
    results.iter().find(|r| r.assessment_id == assessment_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bank(n: u32) -> Assessment {
        Assessment {
            id: "javascript".into(),
            title: "JavaScript Fundamentals".into(),
            description: String::new(),
            category: "Programming".into(),
            questions: (1..=n)
                .map(|id| Question {
                    id,
                    question: format!("q{id}"),
                    options: vec!["a".into(), "b".into(), "c".into()],
                    correct_answer: 1,
                    explanation: String::new(),
                    difficulty: Difficulty::Beginner,
                })
                .collect(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn proficiency_thresholds() {
        assert_eq!(Proficiency::from_score(80.0), Proficiency::Advanced);
        assert_eq!(Proficiency::from_score(79.9), Proficiency::Intermediate);
        assert_eq!(Proficiency::from_score(60.0), Proficiency::Intermediate);
        assert_eq!(Proficiency::from_score(59.0), Proficiency::Beginner);
    }

    #[test]
    fn scores_correct_answers_and_ignores_unanswered() {
        let a = bank(5);
        let answers: Answers = [(1, 1), (2, 1), (3, 0), (4, 1)].into_iter().collect();
        let r = score_assessment(&a, &answers, now());
        assert_eq!(r.correct, 3);
        assert_eq!(r.total_questions, 5);
        assert_eq!(r.score, 60.0);
        assert_eq!(r.proficiency_level, Proficiency::Intermediate);
    }

    #[test]
    fn empty_bank_scores_zero() {
        let r = score_assessment(&bank(0), &Answers::new(), now());
        assert_eq!(r.score, 0.0);
        assert_eq!(r.proficiency_level, Proficiency::Beginner);
    }

    #[test]
    fn record_replaces_previous_attempt() {
        let a = bank(4);
        let mut results = Vec::new();
        record_result(&mut results, score_assessment(&a, &Answers::new(), now()));
        let all: Answers = (1..=4).map(|id| (id, 1)).collect();
        record_result(&mut results, score_assessment(&a, &all, now()));
        assert_eq!(results.len(), 1);
        assert_eq!(result_for(&results, "javascript").unwrap().score, 100.0);
    }

    #[test]
    fn bank_json_shape() {
        let json = r#"[{"id":"py","title":"Python","questions":[
            {"id":1,"question":"len([1,2])?","options":["1","2"],"correctAnswer":1,"difficulty":"Beginner"}
        ]}]"#;
        let banks: Vec<Assessment> = serde_json::from_str(json).unwrap();
        assert_eq!(banks[0].questions[0].correct_answer, 1);
    }
}
