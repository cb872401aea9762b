use anyhow::{bail, Context, Result};
use carvix_core::assessment::AssessmentResult;
use carvix_core::{
    Bookmarks, CareerTask, JobApplication, JsonFileStore, PracticeLog, Profile, Repository,
    RoadmapProgress,
};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

pub const PROFILE_FILE: &str = "profile.json";
pub const JOBS_FILE: &str = "jobs.json";
pub const TASKS_FILE: &str = "tasks.json";
pub const ASSESSMENTS_FILE: &str = "assessments.json";
pub const ROADMAP_PROGRESS_FILE: &str = "roadmap_progress.json";
pub const INTERVIEW_PROGRESS_FILE: &str = "interview_progress.json";
pub const NOTIFIED_FILE: &str = "notified_overdue.json";
pub const BOOKMARKS_FILE: &str = "resource_bookmarks.json";

/// `$CARVIX_HOME` wins; otherwise `$HOME/.carvix`.
fn resolve_home(carvix_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    carvix_home
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| PathBuf::from(h).join(".carvix")))
}

pub fn carvix_home() -> Result<PathBuf> {
    resolve_home(std::env::var_os("CARVIX_HOME"), std::env::var_os("HOME"))
        .context("neither CARVIX_HOME nor HOME is set")
}

pub fn ensure_carvix_home() -> Result<PathBuf> {
    let dir = carvix_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

fn store<T>(file: &str) -> Result<JsonFileStore<T>> {
    Ok(JsonFileStore::new(ensure_carvix_home()?.join(file)))
}

pub fn profile_store() -> Result<JsonFileStore<Profile>> {
    store(PROFILE_FILE)
}

pub fn job_store() -> Result<JsonFileStore<Vec<JobApplication>>> {
    store(JOBS_FILE)
}

pub fn task_store() -> Result<JsonFileStore<Vec<CareerTask>>> {
    store(TASKS_FILE)
}

pub fn assessment_store() -> Result<JsonFileStore<Vec<AssessmentResult>>> {
    store(ASSESSMENTS_FILE)
}

pub fn roadmap_store() -> Result<JsonFileStore<RoadmapProgress>> {
    store(ROADMAP_PROGRESS_FILE)
}

pub fn interview_store() -> Result<JsonFileStore<PracticeLog>> {
    store(INTERVIEW_PROGRESS_FILE)
}

pub fn bookmark_store() -> Result<JsonFileStore<Bookmarks>> {
    store(BOOKMARKS_FILE)
}

/// Task ids that already produced an overdue notice.
pub fn notified_store() -> Result<JsonFileStore<HashSet<String>>> {
    store(NOTIFIED_FILE)
}

/// The stored profile; a missing profile means setup has not been run.
pub fn load_profile() -> Result<Profile> {
    let store = profile_store()?;
    match store.load()? {
        Some(p) => Ok(p),
        None => bail!(
            "No profile found at {}. Run: carvix setup",
            store.path().display()
        ),
    }
}
