use anyhow::{bail, Result};
use carvix_core::compare::filter_careers;
use carvix_core::{Career, ComparisonSelection, MAX_COMPARED};
use tracing::warn;

use crate::config::{load_config, load_content, Content};

pub fn run(ids: Vec<String>, search: Option<String>, category: Option<String>) -> Result<()> {
    let cfg = load_config()?;
    let careers: Vec<Career> = load_content(&cfg, Content::Careers)?;

    if ids.is_empty() {
        let hits = filter_careers(&careers, search.as_deref().unwrap_or(""), category.as_deref());
        println!("Available careers ({})", hits.len());
        for c in hits {
            println!("{:<28} {} [{}]", c.id, c.title, c.category);
        }
        println!("\nCompare up to {}: carvix compare <id> <id> ...", MAX_COMPARED);
        return Ok(());
    }

    let selection = select(&ids);
    let chosen = selection.resolve(&careers);
    for id in selection.ids() {
        if !careers.iter().any(|c| &c.id == id) {
            warn!(id = %id, "unknown career id");
            println!("Unknown career: {}", id);
        }
    }
    if chosen.is_empty() {
        bail!("nothing to compare");
    }
    print!("{}", render_table(&chosen));
    Ok(())
}

/// Toggle each id in order; ids past the cap are dropped with a notice.
fn select(ids: &[String]) -> ComparisonSelection {
    let mut sel = ComparisonSelection::new();
    for id in ids {
        if !sel.toggle(id) {
            println!("Skipping {}: at most {} careers can be compared", id, MAX_COMPARED);
        }
    }
    sel
}

fn render_table(careers: &[&Career]) -> String {
    const LABEL: usize = 22;
    const COL: usize = 30;

    let rows: [(&str, fn(&Career) -> String); 9] = [
        ("Category", |c: &Career| c.category.clone()),
        ("Salary (India)", |c: &Career| c.average_salary.india.clone()),
        ("Salary (US)", |c: &Career| c.average_salary.us.clone()),
        ("Demand", |c: &Career| c.demand_level.clone()),
        ("Growth", |c: &Career| c.growth_rate.clone()),
        ("Work-life balance", |c: &Career| format!("{}/5", c.work_life_balance)),
        ("Entry difficulty", |c: &Career| c.entry_difficulty.clone()),
        ("Remote work", |c: &Career| c.remote_work_potential.clone()),
        ("Key skills", |c: &Career| {
            c.required_skills.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
        }),
    ];

    let mut s = String::new();
    s.push_str(&format!("{:<w$}", "", w = LABEL));
    for c in careers {
        s.push_str(&format!("{:<w$}", c.title, w = COL));
    }
    s.push('\n');
    for (label, cell) in &rows {
        s.push_str(&format!("{:<w$}", label, w = LABEL));
        for c in careers {
            s.push_str(&format!("{:<w$}", cell(c), w = COL));
        }
        s.truncate(s.trim_end().len());
        s.push('\n');
    }
    s
}
