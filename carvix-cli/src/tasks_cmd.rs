use anyhow::Result;
use carvix_core::tasks::{parse_time, sweep_notices, TaskFilter, TaskSort, TASK_CATEGORIES};
use carvix_core::{CareerTask, Repository, TaskBoard, TaskDraft, TaskNotice, TaskPriority, TaskStatus};
use chrono::{NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use clap::Subcommand;
use std::collections::HashSet;
use std::thread;
use std::time::Duration as StdDuration;
use tracing::debug;

use crate::config::{load_config, Config};
use crate::state::{notified_store, task_store};

fn parse_time_arg(s: &str) -> std::result::Result<NaiveTime, String> {
    parse_time(s).ok_or_else(|| format!("expected HH:MM, got '{}'", s))
}

#[derive(Subcommand, Debug)]
pub enum TasksCommand {
    /// Create a task
    Add {
        title: String,

        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: NaiveDate,

        /// Due time, HH:MM (default from config)
        #[arg(long, value_parser = parse_time_arg)]
        time: Option<NaiveTime>,

        #[arg(long, default_value = "")]
        description: String,

        /// low, medium, high, urgent
        #[arg(long)]
        priority: Option<TaskPriority>,

        #[arg(long)]
        category: Option<String>,

        /// Minutes before the due time to remind
        #[arg(long)]
        remind_before: Option<u32>,

        #[arg(long, default_value_t = false)]
        no_reminder: bool,

        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List tasks
    List {
        /// Matches title, description or tags
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        status: Option<TaskStatus>,

        #[arg(long)]
        priority: Option<TaskPriority>,

        #[arg(long)]
        category: Option<String>,

        /// due, priority, title, created
        #[arg(long, default_value = "due")]
        sort: TaskSort,
    },

    /// Toggle completion
    Done { id: String },

    /// Delete a task
    Remove { id: String },

    /// Counts for today
    Stats {
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print upcoming reminders and newly overdue tasks
    Remind {
        /// Keep checking once a minute
        #[arg(long, default_value_t = false)]
        watch: bool,
    },

    /// Show the task categories
    Categories,
}

fn format_task(t: &CareerTask, now: chrono::DateTime<Utc>, tz: Tz) -> String {
    let mark = if t.is_completed() { "x" } else { " " };
    let mut s = format!(
        "[{}] {}  {}  ({:?}, {})  due {} {}",
        mark,
        t.id,
        t.title,
        t.priority,
        t.category,
        t.due_date,
        t.due_time.format("%H:%M")
    );
    if t.is_overdue(now, tz) {
        s.push_str("  OVERDUE");
    } else if t.is_due_today(now, tz) {
        s.push_str("  today");
    }
    if !t.tags.is_empty() {
        s.push_str(&format!("  #{}", t.tags.join(" #")));
    }
    s
}

fn format_notice(n: &TaskNotice, tz: Tz) -> String {
    match n {
        TaskNotice::Reminder { title, due_at, .. } => format!(
            "Reminder: \"{}\" is due at {}",
            title,
            due_at.with_timezone(&tz).format("%Y-%m-%d %H:%M")
        ),
        TaskNotice::Overdue { title, due_at, .. } => format!(
            "Overdue: \"{}\" was due {}",
            title,
            due_at.with_timezone(&tz).format("%Y-%m-%d %H:%M")
        ),
    }
}

/// One sweep; records overdue ids so they are reported once.
fn remind_once(cfg: &Config, tz: Tz) -> Result<()> {
    let board = TaskBoard::open(task_store()?, cfg.task_defaults()?)?;
    let store = notified_store()?;
    let mut notified: HashSet<String> = store.load()?.unwrap_or_default();

    let notices = sweep_notices(board.tasks(), Utc::now(), tz, cfg.reminder_window(), &notified);
    debug!(count = notices.len(), "reminder sweep");
    for n in &notices {
        println!("{}", format_notice(n, tz));
        if matches!(n, TaskNotice::Overdue { .. }) {
            notified.insert(n.task_id().to_string());
        }
    }

    // Forget ids that were deleted or completed.
    let open: HashSet<&str> = board
        .tasks()
        .iter()
        .filter(|t| !t.is_completed())
        .map(|t| t.id.as_str())
        .collect();
    notified.retain(|id| open.contains(id.as_str()));
    store.save(&notified)?;
    Ok(())
}

pub fn run(cmd: TasksCommand) -> Result<()> {
    let cfg = load_config()?;
    let tz = cfg.timezone()?;

    match cmd {
        TasksCommand::Remind { watch } => {
            remind_once(&cfg, tz)?;
            while watch {
                thread::sleep(StdDuration::from_secs(60));
                remind_once(&cfg, tz)?;
            }
            return Ok(());
        }
        TasksCommand::Categories => {
            for c in TASK_CATEGORIES {
                println!("{}", c);
            }
            return Ok(());
        }
        _ => {}
    }

    let mut board = TaskBoard::open(task_store()?, cfg.task_defaults()?)?;
    let now = Utc::now();

    match cmd {
        TasksCommand::Add {
            title,
            due,
            time,
            description,
            priority,
            category,
            remind_before,
            no_reminder,
            tags,
        } => {
            let draft = TaskDraft {
                description,
                priority,
                category,
                due_time: time,
                reminder: Some(!no_reminder),
                reminder_minutes: remind_before,
                tags,
                ..TaskDraft::new(title, due)
            };
            let t = board.create(draft, now)?;
            println!("Added {}", format_task(t, now, tz));
        }

        TasksCommand::List {
            search,
            status,
            priority,
            category,
            sort,
        } => {
            let filter = TaskFilter {
                query: search,
                status,
                priority,
                category,
            };
            let tasks = board.view(&filter, sort);
            if tasks.is_empty() {
                println!("No tasks match.");
            }
            for t in tasks {
                println!("{}", format_task(t, now, tz));
            }
        }

        TasksCommand::Done { id } => {
            let t = board.toggle_complete(&id, now)?;
            if t.is_completed() {
                println!("Completed: {}", t.title);
            } else {
                println!("Reopened: {}", t.title);
            }
        }

        TasksCommand::Remove { id } => {
            let t = board.delete(&id)?;
            println!("Removed: {}", t.title);
        }

        TasksCommand::Stats { json } => {
            let stats = board.stats(now, tz);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Total:       {}", stats.total);
                println!("Completed:   {}", stats.completed);
                println!("In progress: {}", stats.in_progress);
                println!("Overdue:     {}", stats.overdue);
                println!("Due today:   {}", stats.due_today);
            }
        }

        TasksCommand::Remind { .. } | TasksCommand::Categories => {}
    }

    Ok(())
}
