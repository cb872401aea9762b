//! Job-application tracker: CRUD over a repository, filtering, stats, CSV export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::info;

use crate::error::{CarvixError, Result};
use crate::store::Repository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Applied,
    #[serde(rename = "Phone Screen")]
    PhoneScreen,
    #[serde(rename = "Technical Interview")]
    TechnicalInterview,
    #[serde(rename = "Final Round")]
    FinalRound,
    Offer,
    Rejected,
}

impl JobStatus {
    pub const ALL: [JobStatus; 6] = [
        JobStatus::Applied,
        JobStatus::PhoneScreen,
        JobStatus::TechnicalInterview,
        JobStatus::FinalRound,
        JobStatus::Offer,
        JobStatus::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::PhoneScreen => "Phone Screen",
            JobStatus::TechnicalInterview => "Technical Interview",
            JobStatus::FinalRound => "Final Round",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
        }
    }

    /// Still in the pipeline (neither an offer nor a rejection).
    pub fn is_active(&self) -> bool {
        !matches!(self, JobStatus::Offer | JobStatus::Rejected)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobStatus {
    type Err = CarvixError;

    /// Accepts the display label or a kebab/snake form ("phone-screen").
    fn from_str(s: &str) -> Result<Self> {
        let norm: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect();
        JobStatus::ALL
            .into_iter()
            .find(|st| st.label().to_lowercase() == norm)
            .ok_or_else(|| CarvixError::validation(format!("unknown job status: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    pub status: JobStatus,
    pub applied_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

/// Form input for adding or editing an application (everything but the id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    pub company: String,
    pub position: String,
    pub location: String,
    pub job_url: Option<String>,
    pub status: JobStatus,
    pub applied_date: NaiveDate,
    pub salary: Option<String>,
    pub notes: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
}

impl ApplicationDraft {
    pub fn new(
        company: impl Into<String>,
        position: impl Into<String>,
        location: impl Into<String>,
        applied_date: NaiveDate,
    ) -> Self {
        Self {
            company: company.into(),
            position: position.into(),
            location: location.into(),
            job_url: None,
            status: JobStatus::Applied,
            applied_date,
            salary: None,
            notes: None,
            contact_person: None,
            contact_email: None,
        }
    }

    pub fn from_application(app: &JobApplication) -> Self {
        Self {
            company: app.company.clone(),
            position: app.position.clone(),
            location: app.location.clone(),
            job_url: app.job_url.clone(),
            status: app.status,
            applied_date: app.applied_date,
            salary: app.salary.clone(),
            notes: app.notes.clone(),
            contact_person: app.contact_person.clone(),
            contact_email: app.contact_email.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("company", &self.company),
            ("position", &self.position),
            ("location", &self.location),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CarvixError::validation(format!(
                "required fields missing: {}",
                missing.join(", ")
            )))
        }
    }

    fn into_application(self, id: String) -> JobApplication {
        JobApplication {
            id,
            company: self.company,
            position: self.position,
            location: self.location,
            job_url: self.job_url,
            status: self.status,
            applied_date: self.applied_date,
            salary: self.salary,
            notes: self.notes,
            contact_person: self.contact_person,
            contact_email: self.contact_email,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    /// Case-insensitive match on company, position or location.
    pub query: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, app: &JobApplication) -> bool {
        if let Some(st) = self.status {
            if app.status != st {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                app.company.to_lowercase().contains(&q)
                    || app.position.to_lowercase().contains(&q)
                    || app.location.to_lowercase().contains(&q)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobStats {
    pub total: usize,
    pub active: usize,
    pub offers: usize,
    pub rejected: usize,
}

pub fn job_stats(apps: &[JobApplication]) -> JobStats {
    JobStats {
        total: apps.len(),
        active: apps.iter().filter(|a| a.status.is_active()).count(),
        offers: apps.iter().filter(|a| a.status == JobStatus::Offer).count(),
        rejected: apps.iter().filter(|a| a.status == JobStatus::Rejected).count(),
    }
}

/// Seed data shown the first time the tracker is opened.
pub fn sample_applications() -> Vec<JobApplication> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        JobApplication {
            id: "1".into(),
            company: "Google".into(),
            position: "Software Engineer".into(),
            location: "Bangalore, India".into(),
            job_url: Some("https://careers.google.com".into()),
            status: JobStatus::TechnicalInterview,
            applied_date: date(2026, 1, 15),
            salary: Some("₹15-25 LPA".into()),
            notes: Some("Referral from college senior. Focus on system design and algorithms.".into()),
            contact_person: Some("Priya Sharma".into()),
            contact_email: Some("priya@google.com".into()),
        },
        JobApplication {
            id: "2".into(),
            company: "Microsoft".into(),
            position: "Frontend Developer".into(),
            location: "Hyderabad, India".into(),
            job_url: None,
            status: JobStatus::PhoneScreen,
            applied_date: date(2026, 1, 20),
            salary: Some("₹12-20 LPA".into()),
            notes: Some("Applied through LinkedIn. Recruiter mentioned strong React team.".into()),
            contact_person: None,
            contact_email: None,
        },
        JobApplication {
            id: "3".into(),
            company: "Amazon".into(),
            position: "Full Stack Developer".into(),
            location: "Mumbai, India".into(),
            job_url: None,
            status: JobStatus::Applied,
            applied_date: date(2026, 1, 28),
            salary: Some("₹18-28 LPA".into()),
            notes: None,
            contact_person: None,
            contact_email: None,
        },
    ]
}

/// Application list bound to a repository; every mutation is written through.
pub struct JobTracker<R: Repository<Vec<JobApplication>>> {
    repo: R,
    apps: Vec<JobApplication>,
}

impl<R: Repository<Vec<JobApplication>>> JobTracker<R> {
    /// Load from `repo`, seeding and persisting the sample set when nothing is stored.
    pub fn open(repo: R) -> Result<Self> {
        let apps = match repo.load()? {
            Some(apps) => apps,
            None => {
                let seeded = sample_applications();
                repo.save(&seeded)?;
                info!(count = seeded.len(), "seeded sample job applications");
                seeded
            }
        };
        Ok(Self { repo, apps })
    }

    pub fn applications(&self) -> &[JobApplication] {
        &self.apps
    }

    pub fn get(&self, id: &str) -> Option<&JobApplication> {
        self.apps.iter().find(|a| a.id == id)
    }

    pub fn filtered(&self, filter: &JobFilter) -> Vec<&JobApplication> {
        self.apps.iter().filter(|a| filter.matches(a)).collect()
    }

    pub fn stats(&self) -> JobStats {
        job_stats(&self.apps)
    }

    pub fn add(&mut self, draft: ApplicationDraft) -> Result<&JobApplication> {
        draft.validate()?;
        let app = draft.into_application(uuid::Uuid::new_v4().to_string());
        info!(id = %app.id, company = %app.company, "adding job application");
        let idx = self.apps.len();
        self.apps.push(app);
        self.repo.save(&self.apps)?;
        Ok(&self.apps[idx])
    }

    /// Replace every field but the id.
    pub fn update(&mut self, id: &str, draft: ApplicationDraft) -> Result<&JobApplication> {
        draft.validate()?;
        let idx = self.index_of(id)?;
        self.apps[idx] = draft.into_application(id.to_string());
        self.repo.save(&self.apps)?;
        Ok(&self.apps[idx])
    }

    pub fn set_status(&mut self, id: &str, status: JobStatus) -> Result<&JobApplication> {
        let idx = self.index_of(id)?;
        self.apps[idx].status = status;
        self.repo.save(&self.apps)?;
        Ok(&self.apps[idx])
    }

    pub fn remove(&mut self, id: &str) -> Result<JobApplication> {
        let idx = self.index_of(id)?;
        let app = self.apps.remove(idx);
        self.repo.save(&self.apps)?;
        info!(id, "removed job application");
        Ok(app)
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.apps
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| CarvixError::not_found("application", id))
    }
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    company: &'a str,
    position: &'a str,
    location: &'a str,
    status: &'a str,
    applied_date: String,
    salary: &'a str,
    job_url: &'a str,
    contact_person: &'a str,
    contact_email: &'a str,
    notes: &'a str,
}

/// Write applications as CSV with a header row.
pub fn export_csv<W: Write>(apps: &[JobApplication], out: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(out);
    for a in apps {
        w.serialize(CsvRow {
            id: &a.id,
            company: &a.company,
            position: &a.position,
            location: &a.location,
            status: a.status.label(),
            applied_date: a.applied_date.format("%Y-%m-%d").to_string(),
            salary: a.salary.as_deref().unwrap_or(""),
            job_url: a.job_url.as_deref().unwrap_or(""),
            contact_person: a.contact_person.as_deref().unwrap_or(""),
            contact_email: a.contact_email.as_deref().unwrap_or(""),
            notes: a.notes.as_deref().unwrap_or(""),
        })?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    #[test]
    fn first_open_seeds_and_persists_samples() {
        let repo: MemoryStore<Vec<JobApplication>> = MemoryStore::new();
        let tracker = JobTracker::open(repo).unwrap();
        assert_eq!(tracker.applications().len(), 3);
        assert_eq!(tracker.repo.load().unwrap().unwrap().len(), 3);
    }

    #[test]
    fn stored_empty_list_is_not_reseeded() {
        let repo = MemoryStore::with_value(&Vec::<JobApplication>::new()).unwrap();
        let tracker = JobTracker::open(repo).unwrap();
        assert!(tracker.applications().is_empty());
    }

    #[test]
    fn add_requires_company_position_location() {
        let repo = MemoryStore::with_value(&Vec::<JobApplication>::new()).unwrap();
        let mut tracker = JobTracker::open(repo).unwrap();
        let err = tracker
            .add(ApplicationDraft::new("Acme", " ", "", day(1)))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input: required fields missing: position, location"
        );
        assert!(tracker.applications().is_empty());
    }

    #[test]
    fn update_keeps_id_and_persists() {
        let repo = MemoryStore::with_value(&Vec::<JobApplication>::new()).unwrap();
        let mut tracker = JobTracker::open(repo).unwrap();
        let id = tracker
            .add(ApplicationDraft::new("Acme", "SDE", "Pune", day(1)))
            .unwrap()
            .id
            .clone();

        let mut draft = ApplicationDraft::from_application(tracker.get(&id).unwrap());
        draft.status = JobStatus::FinalRound;
        draft.notes = Some("onsite next week".into());
        let updated = tracker.update(&id, draft).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.status, JobStatus::FinalRound);

        let stored = tracker.repo.load().unwrap().unwrap();
        assert_eq!(stored[0].notes.as_deref(), Some("onsite next week"));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let repo = MemoryStore::with_value(&Vec::<JobApplication>::new()).unwrap();
        let mut tracker = JobTracker::open(repo).unwrap();
        assert!(matches!(
            tracker.remove("nope"),
            Err(CarvixError::NotFound { kind: "application", .. })
        ));
    }

    #[test]
    fn stats_and_filters_over_samples() {
        let mut apps = sample_applications();
        apps[2].status = JobStatus::Offer;
        let stats = job_stats(&apps);
        assert_eq!(stats, JobStats { total: 3, active: 2, offers: 1, rejected: 0 });

        let f = JobFilter { status: None, query: Some("INDIA".into()) };
        assert_eq!(apps.iter().filter(|a| f.matches(a)).count(), 3);

        let f = JobFilter { status: Some(JobStatus::PhoneScreen), query: Some("micro".into()) };
        let hits: Vec<_> = apps.iter().filter(|a| f.matches(a)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].company, "Microsoft");
    }

    #[test]
    fn status_parses_labels_and_kebab_case() {
        assert_eq!("Phone Screen".parse::<JobStatus>().unwrap(), JobStatus::PhoneScreen);
        assert_eq!("technical-interview".parse::<JobStatus>().unwrap(), JobStatus::TechnicalInterview);
        assert!("ghosted".parse::<JobStatus>().is_err());
    }

    #[test]
    fn json_uses_display_labels() {
        let apps = sample_applications();
        let v = serde_json::to_value(&apps[0]).unwrap();
        assert_eq!(v["status"], "Technical Interview");
        assert_eq!(v["appliedDate"], "2026-01-15");
        assert!(v.get("jobUrl").is_some());
        let v = serde_json::to_value(&apps[2]).unwrap();
        assert!(v.get("jobUrl").is_none());
    }

    #[test]
    fn csv_export_has_header_and_rows() {
        let mut buf = Vec::new();
        export_csv(&sample_applications(), &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        let mut lines = s.lines();
        assert!(lines.next().unwrap().starts_with("id,company,position,location,status"));
        assert!(s.contains("Google,Software Engineer,\"Bangalore, India\",Technical Interview,2026-01-15"));
        assert_eq!(s.lines().count(), 4);
    }
}
