//! Career task list: creation, completion toggling, filters, sorting, stats and
//! the reminder/overdue sweep.
//!
//! Due dates are wall-clock values in the user's timezone; everything that
//! compares against "now" converts through a `chrono_tz::Tz`.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::info;

use crate::error::{CarvixError, Result};
use crate::store::Repository;

pub const TASK_CATEGORIES: [&str; 9] = [
    "General",
    "Career Development",
    "Learning",
    "Interview Prep",
    "Job Applications",
    "Networking",
    "Skill Building",
    "Project Work",
    "Personal",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Sort rank, most pressing first.
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::Urgent => 0,
            TaskPriority::High => 1,
            TaskPriority::Medium => 2,
            TaskPriority::Low => 3,
        }
    }
}

impl FromStr for TaskStatus {
    type Err = CarvixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" | "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            other => Err(CarvixError::validation(format!("unknown task status: {other}"))),
        }
    }
}

impl FromStr for TaskPriority {
    type Err = CarvixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            other => Err(CarvixError::validation(format!("unknown priority: {other}"))),
        }
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw).ok_or_else(|| serde::de::Error::custom(format!("bad time: {raw}")))
    }
}

/// "HH:MM" or "HH:MM:SS".
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Resolve a local wall-clock time to an instant. Times skipped by a DST jump
/// resolve to the first valid instant after the gap.
pub fn local_to_utc(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(local + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category: String,
    pub due_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub due_time: NaiveTime,
    pub reminder: bool,
    /// Minutes before the due time.
    pub reminder_minutes: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CareerTask {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn due_at(&self, tz: Tz) -> Option<DateTime<Utc>> {
        local_to_utc(tz, self.due_date.and_time(self.due_time))
    }

    pub fn is_overdue(&self, now: DateTime<Utc>, tz: Tz) -> bool {
        !self.is_completed() && self.due_at(tz).is_some_and(|due| due < now)
    }

    pub fn is_due_today(&self, now: DateTime<Utc>, tz: Tz) -> bool {
        !self.is_completed() && self.due_date == now.with_timezone(&tz).date_naive()
    }
}

/// Defaults applied to fields a draft leaves unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDefaults {
    pub due_time: NaiveTime,
    pub reminder_minutes: u32,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        Self {
            due_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            reminder_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub reminder: Option<bool>,
    pub reminder_minutes: Option<u32>,
    pub tags: Vec<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            due_date: Some(due_date),
            ..Self::default()
        }
    }

    fn build(self, id: String, now: DateTime<Utc>, defaults: TaskDefaults) -> Result<CareerTask> {
        if self.title.trim().is_empty() {
            return Err(CarvixError::validation("task title is required"));
        }
        let due_date = self
            .due_date
            .ok_or_else(|| CarvixError::validation("task due date is required"))?;
        let status = self.status.unwrap_or(TaskStatus::Todo);
        Ok(CareerTask {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            status,
            priority: self.priority.unwrap_or(TaskPriority::Medium),
            category: self
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "General".to_string()),
            due_date,
            due_time: self.due_time.unwrap_or(defaults.due_time),
            reminder: self.reminder.unwrap_or(true),
            reminder_minutes: self
                .reminder_minutes
                .filter(|m| *m > 0)
                .unwrap_or(defaults.reminder_minutes),
            created_at: now,
            completed_at: (status == TaskStatus::Completed).then_some(now),
            tags: self.tags,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive match on title, description or any tag.
    pub query: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, t: &CareerTask) -> bool {
        if let Some(q) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            let hit = t.title.to_lowercase().contains(&q)
                || t.description.to_lowercase().contains(&q)
                || t.tags.iter().any(|tag| tag.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
        self.status.is_none_or(|s| t.status == s)
            && self.priority.is_none_or(|p| t.priority == p)
            && self.category.as_deref().is_none_or(|c| t.category == c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    #[default]
    DueDate,
    Priority,
    Title,
    CreatedAt,
}

impl FromStr for TaskSort {
    type Err = CarvixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "due" | "due-date" | "duedate" => Ok(TaskSort::DueDate),
            "priority" => Ok(TaskSort::Priority),
            "title" => Ok(TaskSort::Title),
            "created" | "created-at" | "createdat" => Ok(TaskSort::CreatedAt),
            other => Err(CarvixError::validation(format!("unknown sort key: {other}"))),
        }
    }
}

/// Stable sort in place.
pub fn sort_tasks(tasks: &mut [&CareerTask], by: TaskSort) {
    match by {
        TaskSort::DueDate => tasks.sort_by_key(|t| (t.due_date, t.due_time)),
        TaskSort::Priority => tasks.sort_by_key(|t| t.priority.rank()),
        TaskSort::Title => tasks.sort_by_key(|t| t.title.to_lowercase()),
        TaskSort::CreatedAt => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
    pub due_today: usize,
}

pub fn task_stats(tasks: &[CareerTask], now: DateTime<Utc>, tz: Tz) -> TaskStats {
    TaskStats {
        total: tasks.len(),
        completed: tasks.iter().filter(|t| t.is_completed()).count(),
        in_progress: tasks.iter().filter(|t| t.status == TaskStatus::InProgress).count(),
        overdue: tasks.iter().filter(|t| t.is_overdue(now, tz)).count(),
        due_today: tasks.iter().filter(|t| t.is_due_today(now, tz)).count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TaskNotice {
    Reminder {
        task_id: String,
        title: String,
        due_at: DateTime<Utc>,
    },
    Overdue {
        task_id: String,
        title: String,
        due_at: DateTime<Utc>,
    },
}

impl TaskNotice {
    pub fn task_id(&self) -> &str {
        match self {
            TaskNotice::Reminder { task_id, .. } | TaskNotice::Overdue { task_id, .. } => task_id,
        }
    }
}

/// Reminder/overdue sweep over open tasks with reminders switched on.
///
/// A reminder fires when `due - reminder_minutes` lies in `(now, now + window]`,
/// so consecutive sweeps one window apart cover every instant exactly once.
/// Overdue notices are skipped for ids in `notified`.
pub fn sweep_notices(
    tasks: &[CareerTask],
    now: DateTime<Utc>,
    tz: Tz,
    window: Duration,
    notified: &HashSet<String>,
) -> Vec<TaskNotice> {
    let mut out = Vec::new();
    for t in tasks.iter().filter(|t| t.reminder && !t.is_completed()) {
        let Some(due) = t.due_at(tz) else { continue };

        let remind_at = due - Duration::minutes(i64::from(t.reminder_minutes));
        if remind_at > now && remind_at <= now + window {
            out.push(TaskNotice::Reminder {
                task_id: t.id.clone(),
                title: t.title.clone(),
                due_at: due,
            });
        }

        if now > due && !notified.contains(&t.id) {
            out.push(TaskNotice::Overdue {
                task_id: t.id.clone(),
                title: t.title.clone(),
                due_at: due,
            });
        }
    }
    out
}

/// Task list bound to a repository; every mutation is written through.
pub struct TaskBoard<R: Repository<Vec<CareerTask>>> {
    repo: R,
    tasks: Vec<CareerTask>,
    defaults: TaskDefaults,
}

impl<R: Repository<Vec<CareerTask>>> TaskBoard<R> {
    pub fn open(repo: R, defaults: TaskDefaults) -> Result<Self> {
        let tasks = repo.load()?.unwrap_or_default();
        Ok(Self { repo, tasks, defaults })
    }

    pub fn tasks(&self) -> &[CareerTask] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&CareerTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn view(&self, filter: &TaskFilter, sort: TaskSort) -> Vec<&CareerTask> {
        let mut v: Vec<&CareerTask> = self.tasks.iter().filter(|t| filter.matches(t)).collect();
        sort_tasks(&mut v, sort);
        v
    }

    pub fn stats(&self, now: DateTime<Utc>, tz: Tz) -> TaskStats {
        task_stats(&self.tasks, now, tz)
    }

    pub fn create(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> Result<&CareerTask> {
        let task = draft.build(uuid::Uuid::new_v4().to_string(), now, self.defaults)?;
        info!(id = %task.id, title = %task.title, "created task");
        let idx = self.tasks.len();
        self.tasks.push(task);
        self.repo.save(&self.tasks)?;
        Ok(&self.tasks[idx])
    }

    /// Apply `edit` to a task; the id is restored and the title must stay non-blank.
    pub fn edit<F>(&mut self, id: &str, edit: F) -> Result<&CareerTask>
    where
        F: FnOnce(&mut CareerTask),
    {
        let idx = self.index_of(id)?;
        let mut updated = self.tasks[idx].clone();
        edit(&mut updated);
        updated.id = id.to_string();
        if updated.title.trim().is_empty() {
            return Err(CarvixError::validation("task title is required"));
        }
        self.tasks[idx] = updated;
        self.repo.save(&self.tasks)?;
        Ok(&self.tasks[idx])
    }

    /// completed <-> todo; stamps or clears `completed_at`.
    pub fn toggle_complete(&mut self, id: &str, now: DateTime<Utc>) -> Result<&CareerTask> {
        let idx = self.index_of(id)?;
        let t = &mut self.tasks[idx];
        if t.is_completed() {
            t.status = TaskStatus::Todo;
            t.completed_at = None;
        } else {
            t.status = TaskStatus::Completed;
            t.completed_at = Some(now);
        }
        self.repo.save(&self.tasks)?;
        Ok(&self.tasks[idx])
    }

    pub fn delete(&mut self, id: &str) -> Result<CareerTask> {
        let idx = self.index_of(id)?;
        let t = self.tasks.remove(idx);
        self.repo.save(&self.tasks)?;
        info!(id, "deleted task");
        Ok(t)
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CarvixError::not_found("task", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono_tz::Asia::Kolkata;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // 2026-03-10 12:00 IST
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 6, 30, 0).unwrap()
    }

    fn board() -> TaskBoard<MemoryStore<Vec<CareerTask>>> {
        TaskBoard::open(MemoryStore::new(), TaskDefaults::default()).unwrap()
    }

    #[test]
    fn create_applies_defaults() {
        let mut b = board();
        let task = b.create(TaskDraft::new("  Update resume ", d(12)), now()).unwrap();
        assert_eq!(task.title, "Update resume");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.category, "General");
        assert_eq!(task.due_time, t(9, 0));
        assert!(task.reminder);
        assert_eq!(task.reminder_minutes, 30);
        assert_eq!(task.created_at, now());
    }

    #[test]
    fn create_requires_title_and_due_date() {
        let mut b = board();
        assert!(b.create(TaskDraft::new(" ", d(12)), now()).is_err());
        let draft = TaskDraft {
            title: "No date".into(),
            ..TaskDraft::default()
        };
        assert!(b.create(draft, now()).is_err());
        assert!(b.tasks().is_empty());
    }

    #[test]
    fn toggle_flips_and_stamps() {
        let mut b = board();
        let id = b.create(TaskDraft::new("Mock interview", d(11)), now()).unwrap().id.clone();
        let done = b.toggle_complete(&id, now()).unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.completed_at, Some(now()));
        let back = b.toggle_complete(&id, now()).unwrap();
        assert_eq!(back.status, TaskStatus::Todo);
        assert!(back.completed_at.is_none());
    }

    #[test]
    fn edit_keeps_id_and_rejects_blank_title() {
        let mut b = board();
        let id = b.create(TaskDraft::new("Read", d(11)), now()).unwrap().id.clone();
        let edited = b
            .edit(&id, |t| {
                t.id = "hijack".into();
                t.priority = TaskPriority::Urgent;
            })
            .unwrap();
        assert_eq!(edited.id, id);
        assert_eq!(edited.priority, TaskPriority::Urgent);
        assert!(b.edit(&id, |t| t.title.clear()).is_err());
        assert_eq!(b.get(&id).unwrap().title, "Read");
    }

    #[test]
    fn stats_in_local_timezone() {
        let mut b = board();
        let mut draft = TaskDraft::new("Earlier today", d(10));
        draft.due_time = Some(t(11, 0));
        b.create(draft, now()).unwrap();
        let mut draft = TaskDraft::new("Later today", d(10));
        draft.due_time = Some(t(18, 0));
        draft.status = Some(TaskStatus::InProgress);
        b.create(draft, now()).unwrap();
        let mut draft = TaskDraft::new("Done yesterday", d(9));
        draft.status = Some(TaskStatus::Completed);
        b.create(draft, now()).unwrap();
        b.create(TaskDraft::new("Next week", d(17)), now()).unwrap();

        let s = b.stats(now(), Kolkata);
        assert_eq!(
            s,
            TaskStats { total: 4, completed: 1, in_progress: 1, overdue: 1, due_today: 2 }
        );
    }

    #[test]
    fn filter_and_sort() {
        let mut b = board();
        let mut a = TaskDraft::new("Apply to Acme", d(15));
        a.tags = vec!["jobs".into()];
        a.priority = Some(TaskPriority::Low);
        b.create(a, now()).unwrap();
        let mut c = TaskDraft::new("Contribute to OSS", d(12));
        c.priority = Some(TaskPriority::Urgent);
        c.category = Some("Project Work".into());
        b.create(c, now()).unwrap();
        let mut x = TaskDraft::new("Brush up SQL", d(12));
        x.due_time = Some(t(8, 0));
        b.create(x, now()).unwrap();

        let by_due: Vec<_> = b
            .view(&TaskFilter::default(), TaskSort::DueDate)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(by_due, vec!["Brush up SQL", "Contribute to OSS", "Apply to Acme"]);

        let by_prio: Vec<_> = b
            .view(&TaskFilter::default(), TaskSort::Priority)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(by_prio, vec!["Contribute to OSS", "Brush up SQL", "Apply to Acme"]);

        let f = TaskFilter { query: Some("JOBS".into()), ..TaskFilter::default() };
        assert_eq!(b.view(&f, TaskSort::Title).len(), 1);
        let f = TaskFilter { category: Some("Project Work".into()), ..TaskFilter::default() };
        assert_eq!(b.view(&f, TaskSort::Title)[0].title, "Contribute to OSS");
    }

    #[test]
    fn sweep_emits_reminder_inside_window_and_overdue_once() {
        let mut b = board();
        // Due 12:30 IST, reminder 30 min before = 12:00:00 IST == now, so not strictly after.
        let mut on_the_dot = TaskDraft::new("On the dot", d(10));
        on_the_dot.due_time = Some(t(12, 30));
        b.create(on_the_dot, now()).unwrap();
        // Due 12:31 IST -> remind at 12:01 IST, inside a 2-minute window.
        let mut soon = TaskDraft::new("Soon", d(10));
        soon.due_time = Some(t(12, 31));
        let soon_id = b.create(soon, now()).unwrap().id.clone();
        // Overdue, reminders on.
        let mut late = TaskDraft::new("Late", d(10));
        late.due_time = Some(t(10, 0));
        let late_id = b.create(late, now()).unwrap().id.clone();
        // Overdue but reminders off.
        let mut muted = TaskDraft::new("Muted", d(10));
        muted.due_time = Some(t(10, 0));
        muted.reminder = Some(false);
        b.create(muted, now()).unwrap();

        let notices = sweep_notices(b.tasks(), now(), Kolkata, Duration::minutes(2), &HashSet::new());
        assert_eq!(notices.len(), 2);
        assert!(matches!(&notices[0], TaskNotice::Reminder { task_id, .. } if *task_id == soon_id));
        assert!(matches!(&notices[1], TaskNotice::Overdue { task_id, .. } if *task_id == late_id));

        let notified: HashSet<String> = [late_id].into_iter().collect();
        let again = sweep_notices(b.tasks(), now(), Kolkata, Duration::minutes(2), &notified);
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn reminder_on_window_edge_fires_in_exactly_one_sweep() {
        let mut b = board();
        // Remind at 12:01 IST: the end of the first sweep's window, the start of the next.
        let mut edge = TaskDraft::new("Mock interview", d(10));
        edge.due_time = Some(t(12, 31));
        b.create(edge, now()).unwrap();

        let window = Duration::minutes(1);
        let first = sweep_notices(b.tasks(), now(), Kolkata, window, &HashSet::new());
        assert_eq!(first.len(), 1);
        assert!(matches!(&first[0], TaskNotice::Reminder { title, .. } if title == "Mock interview"));

        let second = sweep_notices(b.tasks(), now() + window, Kolkata, window, &HashSet::new());
        assert!(second.is_empty());
    }

    #[test]
    fn due_time_serializes_as_hh_mm() {
        let mut b = board();
        b.create(TaskDraft::new("Serialize", d(12)), now()).unwrap();
        let v = serde_json::to_value(&b.tasks()[0]).unwrap();
        assert_eq!(v["dueTime"], "09:00");
        assert_eq!(v["status"], "todo");
        assert_eq!(v["reminderMinutes"], 30);
        let back: CareerTask = serde_json::from_value(v).unwrap();
        assert_eq!(back, b.tasks()[0]);
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("URGENT".parse::<TaskPriority>().unwrap(), TaskPriority::Urgent);
        assert_eq!("created".parse::<TaskSort>().unwrap(), TaskSort::CreatedAt);
        assert_eq!(parse_time("07:05"), Some(t(7, 5)));
        assert_eq!(parse_time("18:30:00"), Some(t(18, 30)));
        assert_eq!(parse_time("late"), None);
    }
}
