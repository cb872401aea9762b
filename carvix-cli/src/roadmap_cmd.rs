use anyhow::{bail, Context, Result};
use carvix_core::roadmap::{categories, filter_roadmaps};
use carvix_core::{Repository, Roadmap, RoadmapProgress};
use clap::Subcommand;

use crate::config::{load_config, load_content, Content};
use crate::state::roadmap_store;

#[derive(Subcommand, Debug)]
pub enum RoadmapCommand {
    /// Roadmaps with completion percentage
    List {
        /// Title search
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Phases and milestones of one roadmap
    Show { id: String },

    /// Mark a milestone done (or not done). Phase and milestone numbers start at 1.
    Toggle {
        id: String,
        phase: usize,
        milestone: usize,
    },
}

fn find<'a>(roadmaps: &'a [Roadmap], id: &str) -> Result<&'a Roadmap> {
    roadmaps
        .iter()
        .find(|r| r.id == id)
        .with_context(|| format!("roadmap '{}' not found", id))
}

/// CLI numbering is 1-based; stored keys are 0-based.
fn to_index(r: &Roadmap, phase: usize, milestone: usize) -> Result<(usize, usize)> {
    let Some(pi) = phase.checked_sub(1).filter(|i| *i < r.phases.len()) else {
        bail!("{} has phases 1-{}", r.id, r.phases.len());
    };
    let ph = &r.phases[pi];
    if milestone == 0 || milestone > ph.milestones.len() {
        bail!("phase {} of {} has milestones 1-{}", phase, r.id, ph.milestones.len());
    }
    Ok((pi, milestone - 1))
}

fn render(r: &Roadmap, progress: &RoadmapProgress) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "{} [{}] {} {} - {:.0}% complete\n",
        r.title,
        r.category,
        r.difficulty,
        r.total_duration,
        progress.percent(r)
    ));
    for (pi, phase) in r.phases.iter().enumerate() {
        s.push_str(&format!("\nPhase {}: {} ({})\n", pi + 1, phase.name, phase.duration));
        for (mi, m) in phase.milestones.iter().enumerate() {
            let mark = if progress.is_completed(&r.id, pi, mi) { "x" } else { " " };
            s.push_str(&format!("  [{}] {}.{} {} ({})\n", mark, pi + 1, mi + 1, m.title, m.duration));
            if !m.skills.is_empty() {
                s.push_str(&format!("        skills: {}\n", m.skills.join(", ")));
            }
            for res in &m.resources {
                s.push_str(&format!("        {} {} ({})\n", res.kind, res.name, res.platform));
            }
        }
    }
    s
}

pub fn run(cmd: RoadmapCommand) -> Result<()> {
    let cfg = load_config()?;
    let roadmaps: Vec<Roadmap> = load_content(&cfg, Content::Roadmaps)?;
    let store = roadmap_store()?;
    let mut progress = store.load()?.unwrap_or_default();

    match cmd {
        RoadmapCommand::List { search, category } => {
            let hits = filter_roadmaps(&roadmaps, search.as_deref(), category.as_deref());
            if hits.is_empty() {
                println!(
                    "No roadmaps match. Categories: {}",
                    categories(&roadmaps).join(", ")
                );
            }
            for r in hits {
                println!(
                    "{:<28} {} [{}] {:.0}% ({}/{})",
                    r.id,
                    r.title,
                    r.category,
                    progress.percent(r),
                    progress.completed_in(r),
                    r.milestone_count()
                );
            }
        }

        RoadmapCommand::Show { id } => {
            print!("{}", render(find(&roadmaps, &id)?, &progress));
        }

        RoadmapCommand::Toggle { id, phase, milestone } => {
            let r = find(&roadmaps, &id)?;
            let (pi, mi) = to_index(r, phase, milestone)?;
            let done = progress.toggle(&r.id, pi, mi);
            store.save(&progress)?;
            let title = &r.phases[pi].milestones[mi].title;
            println!(
                "{} {} - {:.0}% complete",
                if done { "Completed" } else { "Reopened" },
                title,
                progress.percent(r)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roadmap() -> Roadmap {
        serde_json::from_str(
            r#"{
              "id": "devops-engineer",
              "title": "DevOps Engineer",
              "category": "Cloud & DevOps",
              "totalDuration": "8 months",
              "difficulty": "Intermediate",
              "phases": [
                { "name": "Foundations", "duration": "2 months", "milestones": [
                  { "title": "Linux", "duration": "3 weeks", "skills": ["bash"],
                    "resources": [{ "name": "Linux Journey", "type": "Course", "platform": "Web" }] },
                  { "title": "Networking", "duration": "2 weeks" }
                ]},
                { "name": "Containers", "duration": "2 months", "milestones": [
                  { "title": "Docker", "duration": "4 weeks" }
                ]}
              ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn indices_are_one_based_and_checked() {
        let r = roadmap();
        assert_eq!(to_index(&r, 1, 2).unwrap(), (0, 1));
        assert_eq!(to_index(&r, 2, 1).unwrap(), (1, 0));
        assert!(to_index(&r, 0, 1).is_err());
        assert!(to_index(&r, 3, 1).is_err());
        assert!(to_index(&r, 2, 2).is_err());
    }

    #[test]
    fn render_marks_completed_milestones() {
        let r = roadmap();
        let mut p = RoadmapProgress::new();
        p.toggle(&r.id, 0, 0);
        let out = render(&r, &p);
        assert!(out.contains("33% complete"));
        assert!(out.contains("[x] 1.1 Linux"));
        assert!(out.contains("[ ] 1.2 Networking"));
        assert!(out.contains("Course Linux Journey (Web)"));
    }
}
