use anyhow::{Context, Result};
use carvix_core::tracker::{export_csv, JobFilter};
use carvix_core::{ApplicationDraft, JobApplication, JobStatus, JobTracker};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use std::fs::File;
use std::io;
use std::path::PathBuf;

use crate::state::job_store;

#[derive(Subcommand, Debug)]
pub enum JobsCommand {
    /// Record a new application
    Add {
        #[arg(long)]
        company: String,

        #[arg(long)]
        position: String,

        #[arg(long)]
        location: String,

        /// Applied date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Applied, phone-screen, technical-interview, final-round, offer, rejected
        #[arg(long, default_value = "applied")]
        status: JobStatus,

        #[command(flatten)]
        details: JobDetails,
    },

    /// List applications, optionally filtered
    List {
        #[arg(long)]
        status: Option<JobStatus>,

        /// Matches company, position or location
        #[arg(long)]
        search: Option<String>,
    },

    /// Edit fields of an application; unspecified fields are kept
    Update {
        id: String,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        details: JobDetails,
    },

    /// Move an application to another pipeline stage
    Status { id: String, status: JobStatus },

    /// Delete an application
    Remove { id: String },

    /// Totals by pipeline outcome
    Stats {
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write all applications as CSV (stdout by default)
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct JobDetails {
    #[arg(long)]
    url: Option<String>,

    #[arg(long)]
    salary: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    #[arg(long)]
    contact: Option<String>,

    #[arg(long)]
    contact_email: Option<String>,
}

impl JobDetails {
    fn apply(self, draft: &mut ApplicationDraft) {
        let keep = |new: Option<String>, old: &mut Option<String>| {
            if let Some(v) = new {
                *old = Some(v).filter(|s| !s.trim().is_empty());
            }
        };
        keep(self.url, &mut draft.job_url);
        keep(self.salary, &mut draft.salary);
        keep(self.notes, &mut draft.notes);
        keep(self.contact, &mut draft.contact_person);
        keep(self.contact_email, &mut draft.contact_email);
    }
}

fn format_application(a: &JobApplication) -> String {
    let mut s = format!(
        "{}  {} @ {} ({})  [{}]  applied {}",
        a.id, a.position, a.company, a.location, a.status, a.applied_date
    );
    if let Some(salary) = &a.salary {
        s.push_str(&format!("  {}", salary));
    }
    if let Some(contact) = &a.contact_person {
        s.push_str(&format!("\n    contact: {}", contact));
        if let Some(email) = &a.contact_email {
            s.push_str(&format!(" <{}>", email));
        }
    }
    if let Some(notes) = &a.notes {
        s.push_str(&format!("\n    notes: {}", notes));
    }
    s
}

pub fn run(cmd: JobsCommand) -> Result<()> {
    let mut tracker = JobTracker::open(job_store()?)?;

    match cmd {
        JobsCommand::Add {
            company,
            position,
            location,
            date,
            status,
            details,
        } => {
            let applied = date.unwrap_or_else(|| Local::now().date_naive());
            let mut draft = ApplicationDraft::new(company, position, location, applied);
            draft.status = status;
            details.apply(&mut draft);
            let app = tracker.add(draft)?;
            println!("Added {}", format_application(app));
        }

        JobsCommand::List { status, search } => {
            let filter = JobFilter { status, query: search };
            let apps = tracker.filtered(&filter);
            if apps.is_empty() {
                println!("No applications match.");
            }
            for a in apps {
                println!("{}", format_application(a));
            }
        }

        JobsCommand::Update {
            id,
            company,
            position,
            location,
            date,
            details,
        } => {
            let current = tracker
                .get(&id)
                .with_context(|| format!("application '{}' not found", id))?;
            let mut draft = ApplicationDraft::from_application(current);
            if let Some(v) = company {
                draft.company = v;
            }
            if let Some(v) = position {
                draft.position = v;
            }
            if let Some(v) = location {
                draft.location = v;
            }
            if let Some(v) = date {
                draft.applied_date = v;
            }
            details.apply(&mut draft);
            let app = tracker.update(&id, draft)?;
            println!("Updated {}", format_application(app));
        }

        JobsCommand::Status { id, status } => {
            let app = tracker.set_status(&id, status)?;
            println!("{} @ {} is now {}", app.position, app.company, app.status);
        }

        JobsCommand::Remove { id } => {
            let app = tracker.remove(&id)?;
            println!("Removed {} @ {}", app.position, app.company);
        }

        JobsCommand::Stats { json } => {
            let stats = tracker.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Total applications: {}", stats.total);
                println!("In progress:        {}", stats.active);
                println!("Offers:             {}", stats.offers);
                println!("Rejected:           {}", stats.rejected);
            }
        }

        JobsCommand::Export { out } => match out {
            Some(path) => {
                let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
                export_csv(tracker.applications(), file)?;
                println!("Exported {} applications to {}", tracker.applications().len(), path.display());
            }
            None => export_csv(tracker.applications(), io::stdout().lock())?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ApplicationDraft {
        let mut d = ApplicationDraft::new("Infosys", "Analyst", "Pune", NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
        d.notes = Some("old".into());
        d.salary = Some("₹4 LPA".into());
        d
    }

    #[test]
    fn details_overwrite_only_given_fields() {
        let mut d = draft();
        JobDetails {
            notes: Some("called back".into()),
            ..JobDetails::default()
        }
        .apply(&mut d);
        assert_eq!(d.notes.as_deref(), Some("called back"));
        assert_eq!(d.salary.as_deref(), Some("₹4 LPA"));
    }

    #[test]
    fn blank_detail_clears_field() {
        let mut d = draft();
        JobDetails {
            salary: Some("  ".into()),
            ..JobDetails::default()
        }
        .apply(&mut d);
        assert_eq!(d.salary, None);
    }

    #[test]
    fn formatted_row_mentions_status_label() {
        let app = carvix_core::tracker::sample_applications().remove(0);
        let line = format_application(&app);
        assert!(line.contains("Software Engineer @ Google"));
        assert!(line.contains("[Technical Interview]"));
        assert!(line.contains("contact: Priya Sharma <priya@google.com>"));
    }
}
