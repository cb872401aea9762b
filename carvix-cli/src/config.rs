use anyhow::{anyhow, Context, Result};
use carvix_core::tasks::parse_time;
use carvix_core::TaskDefaults;
use chrono::Duration;
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::{carvix_home, ensure_carvix_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralSection,
    pub tasks: TasksSection,
    pub content: ContentSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    /// IANA zone used for due dates and "today".
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksSection {
    /// "HH:MM"
    pub default_due_time: String,
    pub default_reminder_minutes: u32,
    /// Width of the window a reminder must fall into to fire.
    pub reminder_window_minutes: i64,
}

/// Paths to reference data. Unset entries resolve to `$CARVIX_HOME/content/<name>.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roadmaps: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessments: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_questions: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub careers: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<PathBuf>,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Kolkata".to_string(),
        }
    }
}

impl Default for TasksSection {
    fn default() -> Self {
        Self {
            default_due_time: "09:00".to_string(),
            default_reminder_minutes: 30,
            reminder_window_minutes: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Roadmaps,
    Assessments,
    InterviewQuestions,
    Careers,
    Resources,
}

impl Content {
    fn key(self) -> &'static str {
        match self {
            Content::Roadmaps => "roadmaps",
            Content::Assessments => "assessments",
            Content::InterviewQuestions => "interview_questions",
            Content::Careers => "careers",
            Content::Resources => "resources",
        }
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        let name = self.general.timezone.trim();
        name.parse::<Tz>()
            .map_err(|e| anyhow!("invalid timezone '{}' in config: {}", name, e))
    }

    pub fn task_defaults(&self) -> Result<TaskDefaults> {
        let raw = &self.tasks.default_due_time;
        let due_time = parse_time(raw)
            .with_context(|| format!("invalid tasks.default_due_time '{}' (expected HH:MM)", raw))?;
        Ok(TaskDefaults {
            due_time,
            reminder_minutes: self.tasks.default_reminder_minutes,
        })
    }

    pub fn reminder_window(&self) -> Duration {
        Duration::minutes(self.tasks.reminder_window_minutes.max(1))
    }

    fn configured(&self, kind: Content) -> Option<&PathBuf> {
        match kind {
            Content::Roadmaps => self.content.roadmaps.as_ref(),
            Content::Assessments => self.content.assessments.as_ref(),
            Content::InterviewQuestions => self.content.interview_questions.as_ref(),
            Content::Careers => self.content.careers.as_ref(),
            Content::Resources => self.content.resources.as_ref(),
        }
    }

    pub fn content_path(&self, kind: Content) -> Result<PathBuf> {
        match self.configured(kind) {
            Some(p) => Ok(p.clone()),
            None => Ok(carvix_home()?
                .join("content")
                .join(format!("{}.json", kind.key()))),
        }
    }
}

/// Load a reference dataset named in `[content]`.
pub fn load_content<T: DeserializeOwned>(cfg: &Config, kind: Content) -> Result<T> {
    let path = cfg.content_path(kind)?;
    carvix_core::load_content(&path).with_context(|| {
        format!(
            "load {} data (set [content] {} in config.toml)",
            kind.key(),
            kind.key()
        )
    })
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_carvix_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    println!("# {}", config_path()?.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    for kind in [
        Content::Roadmaps,
        Content::Assessments,
        Content::InterviewQuestions,
        Content::Careers,
        Content::Resources,
    ] {
        println!("# {} -> {}", kind.key(), cfg.content_path(kind)?.display());
    }
    Ok(())
}
