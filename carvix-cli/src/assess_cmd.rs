use anyhow::{Context, Result};
use carvix_core::assessment::{result_for, Answers, Question};
use carvix_core::{record_result, score_assessment, Assessment, AssessmentResult, Repository};
use chrono::Utc;
use clap::Subcommand;

use crate::config::{load_config, load_content, Content};
use crate::setup::prompt;
use crate::state::assessment_store;

#[derive(Subcommand, Debug)]
pub enum AssessCommand {
    /// Available assessments and your latest score on each
    List,

    /// Answer an assessment interactively
    Take { id: String },

    /// Stored results
    Results {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// 1-based menu choice -> option index. Blank skips the question.
fn parse_choice(input: &str, options: usize) -> Option<Option<usize>> {
    let input = input.trim();
    if input.is_empty() {
        return Some(None);
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=options).contains(&n) => Some(Some(n - 1)),
        _ => None,
    }
}

fn ask(q: &Question, number: usize, total: usize) -> Result<Option<usize>> {
    println!("\nQuestion {} of {} ({:?})", number, total, q.difficulty);
    println!("{}", q.question);
    for (i, opt) in q.options.iter().enumerate() {
        println!("  {}. {}", i + 1, opt);
    }
    loop {
        match parse_choice(&prompt("Answer (blank to skip)")?, q.options.len()) {
            Some(choice) => return Ok(choice),
            None => println!("Enter a number from 1 to {}", q.options.len()),
        }
    }
}

fn summary(a: &Assessment, r: &AssessmentResult) -> String {
    format!(
        "{}: {:.0}% ({}/{}) - {}",
        a.title, r.score, r.correct, r.total_questions, r.proficiency_level
    )
}

pub fn run(cmd: AssessCommand) -> Result<()> {
    let cfg = load_config()?;
    let store = assessment_store()?;
    let mut results: Vec<AssessmentResult> = store.load()?.unwrap_or_default();

    match cmd {
        AssessCommand::List => {
            let banks: Vec<Assessment> = load_content(&cfg, Content::Assessments)?;
            for a in &banks {
                let latest = result_for(&results, &a.id)
                    .map(|r| format!("last {:.0}% {}", r.score, r.proficiency_level))
                    .unwrap_or_else(|| "not taken".to_string());
                println!(
                    "{:<20} {} [{}] {} questions, {}",
                    a.id,
                    a.title,
                    a.category,
                    a.questions.len(),
                    latest
                );
            }
        }

        AssessCommand::Take { id } => {
            let banks: Vec<Assessment> = load_content(&cfg, Content::Assessments)?;
            let a = banks
                .iter()
                .find(|a| a.id == id)
                .with_context(|| format!("assessment '{}' not found", id))?;

            println!("{}", a.title);
            if !a.description.is_empty() {
                println!("{}", a.description);
            }
            let mut answers = Answers::new();
            for (i, q) in a.questions.iter().enumerate() {
                if let Some(choice) = ask(q, i + 1, a.questions.len())? {
                    answers.insert(q.id, choice);
                }
            }

            let result = score_assessment(a, &answers, Utc::now());
            println!("\n{}", summary(a, &result));
            for q in &a.questions {
                if answers.get(&q.id) != Some(&q.correct_answer) && !q.explanation.is_empty() {
                    println!("- {}: {}", q.question, q.explanation);
                }
            }
            record_result(&mut results, result);
            store.save(&results)?;
        }

        AssessCommand::Results { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No assessments taken yet.");
            } else {
                for r in &results {
                    println!(
                        "{:<20} {:.0}% ({}/{}) {}  {}",
                        r.assessment_id,
                        r.score,
                        r.correct,
                        r.total_questions,
                        r.proficiency_level,
                        r.date.format("%Y-%m-%d")
                    );
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_is_one_based_and_bounded() {
        assert_eq!(parse_choice("1", 4), Some(Some(0)));
        assert_eq!(parse_choice(" 4 ", 4), Some(Some(3)));
        assert_eq!(parse_choice("", 4), Some(None));
        assert_eq!(parse_choice("0", 4), None);
        assert_eq!(parse_choice("5", 4), None);
        assert_eq!(parse_choice("b", 4), None);
    }

    #[test]
    fn summary_rounds_score() {
        let a = Assessment {
            id: "sql".into(),
            title: "SQL Basics".into(),
            description: String::new(),
            category: "Databases".into(),
            questions: vec![],
        };
        let r = AssessmentResult {
            assessment_id: "sql".into(),
            score: 66.666,
            correct: 2,
            total_questions: 3,
            date: Utc::now(),
            proficiency_level: carvix_core::Proficiency::Intermediate,
        };
        assert_eq!(summary(&a, &r), "SQL Basics: 67% (2/3) - Intermediate");
    }
}
