use anyhow::{Context, Result};
use carvix_core::{InterviewQuestion, PracticeLog, QuestionDifficulty, QuestionFilter, Repository};
use clap::Subcommand;

use crate::config::{load_config, load_content, Content};
use crate::state::interview_store;

#[derive(Subcommand, Debug)]
pub enum InterviewCommand {
    /// Practice questions, optionally filtered
    List {
        /// Technical, Problem Solving, Behavioral, System Design
        #[arg(long)]
        category: Option<String>,

        /// easy, medium, hard
        #[arg(long)]
        difficulty: Option<QuestionDifficulty>,

        /// Hide questions already practiced
        #[arg(long, default_value_t = false)]
        pending: bool,
    },

    /// A question with hints, key points and a sample answer
    Show { id: String },

    /// Mark a question as practiced
    Done { id: String },

    /// Overall practice progress
    Progress,
}

fn render_question(q: &InterviewQuestion) -> String {
    let mut s = String::new();
    s.push_str(&format!("{} [{} / {}]\n", q.question, q.category, q.difficulty));
    if !q.hints.is_empty() {
        s.push_str("\nHints:\n");
        for h in &q.hints {
            s.push_str(&format!("- {}\n", h));
        }
    }
    if !q.key_points.is_empty() {
        s.push_str("\nKey points:\n");
        for k in &q.key_points {
            s.push_str(&format!("- {}\n", k));
        }
    }
    if !q.sample_answer.is_empty() {
        s.push_str(&format!("\nSample answer:\n{}\n", q.sample_answer));
    }
    s
}

fn find<'a>(bank: &'a [InterviewQuestion], id: &str) -> Result<&'a InterviewQuestion> {
    bank.iter()
        .find(|q| q.id == id)
        .with_context(|| format!("question '{}' not found", id))
}

pub fn run(cmd: InterviewCommand) -> Result<()> {
    let cfg = load_config()?;
    let bank: Vec<InterviewQuestion> = load_content(&cfg, Content::InterviewQuestions)?;
    let store = interview_store()?;
    let mut log: PracticeLog = store.load()?.unwrap_or_default();

    match cmd {
        InterviewCommand::List {
            category,
            difficulty,
            pending,
        } => {
            let filter = QuestionFilter { category, difficulty };
            let hits: Vec<_> = filter
                .apply(&bank)
                .into_iter()
                .filter(|q| !pending || !log.is_done(&q.id))
                .collect();
            if hits.is_empty() {
                println!("No questions match.");
            }
            for q in hits {
                let mark = if log.is_done(&q.id) { "x" } else { " " };
                println!("[{}] {:<12} {:<16} {:<6} {}", mark, q.id, q.category, q.difficulty, q.question);
            }
        }

        InterviewCommand::Show { id } => {
            print!("{}", render_question(find(&bank, &id)?));
        }

        InterviewCommand::Done { id } => {
            let q = find(&bank, &id)?;
            if log.mark_done(&q.id) {
                store.save(&log)?;
                println!("Marked {} as practiced", q.id);
            } else {
                println!("{} was already practiced", q.id);
            }
            let same_track = QuestionFilter {
                category: Some(q.category.clone()),
                difficulty: None,
            }
            .apply(&bank);
            if let Some(next) = log.next_pending(&same_track, Some(q.id.as_str())) {
                println!("Next up: {} {}", next.id, next.question);
            }
        }

        InterviewCommand::Progress => {
            println!(
                "{} of {} questions completed ({:.0}%)",
                log.completed_in(&bank),
                bank.len(),
                log.percent(&bank)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_optional_sections_only_when_present() {
        let q: InterviewQuestion = serde_json::from_str(
            r#"{ "id": "beh-2", "category": "Behavioral", "difficulty": "Medium",
                 "question": "Tell me about a conflict in your team.",
                 "hints": ["Use STAR"], "sampleAnswer": "", "keyPoints": [] }"#,
        )
        .unwrap();
        let out = render_question(&q);
        assert!(out.starts_with("Tell me about a conflict in your team. [Behavioral / Medium]"));
        assert!(out.contains("- Use STAR"));
        assert!(!out.contains("Key points"));
        assert!(!out.contains("Sample answer"));
    }
}
