use anyhow::{Context, Result};
use carvix_core::resources::{categories, library_stats};
use carvix_core::{
    Bookmarks, LearningResource, Repository, ResourceFilter, ResourceLevel, ResourceType,
};
use clap::Subcommand;

use crate::config::{load_config, load_content, Content};
use crate::state::bookmark_store;

#[derive(Subcommand, Debug)]
pub enum ResourcesCommand {
    /// Search the library; filters combine
    List {
        /// Matches title, description or tags
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// beginner, intermediate, advanced
        #[arg(long)]
        difficulty: Option<ResourceLevel>,

        /// article, video, course, documentation
        #[arg(long = "type")]
        kind: Option<ResourceType>,

        /// Only bookmarked resources
        #[arg(long, default_value_t = false)]
        bookmarked: bool,
    },

    /// Bookmark a resource, or remove the bookmark if already set
    Bookmark { id: String },

    /// Totals, free resources, categories and bookmarks
    Stats,
}

fn format_resource(r: &LearningResource, bookmarked: bool) -> String {
    let mark = if bookmarked { "*" } else { " " };
    let mut s = format!(
        "{} {:<4} {} [{} / {} / {}] {:.1}",
        mark, r.id, r.title, r.kind, r.category, r.difficulty, r.rating
    );
    if r.is_free {
        s.push_str("  free");
    }
    if !r.duration.is_empty() {
        s.push_str(&format!("\n       {} by {}", r.duration, r.author));
    }
    if !r.url.is_empty() {
        s.push_str(&format!("\n       {}", r.url));
    }
    s
}

pub fn run(cmd: ResourcesCommand) -> Result<()> {
    let cfg = load_config()?;
    let catalogue: Vec<LearningResource> = load_content(&cfg, Content::Resources)?;
    let store = bookmark_store()?;
    let mut bookmarks: Bookmarks = store.load()?.unwrap_or_default();

    match cmd {
        ResourcesCommand::List {
            search,
            category,
            difficulty,
            kind,
            bookmarked,
        } => {
            let filter = ResourceFilter {
                query: search,
                category,
                difficulty,
                kind,
                bookmarked_only: bookmarked,
            };
            let hits = filter.apply(&catalogue, &bookmarks);
            if hits.is_empty() {
                println!(
                    "No resources match. Categories: {}",
                    categories(&catalogue).join(", ")
                );
            }
            for r in hits {
                println!("{}", format_resource(r, bookmarks.contains(&r.id)));
            }
        }

        ResourcesCommand::Bookmark { id } => {
            let r = catalogue
                .iter()
                .find(|r| r.id == id)
                .with_context(|| format!("resource '{}' not found", id))?;
            let on = bookmarks.toggle(&r.id);
            store.save(&bookmarks)?;
            println!(
                "{} {}",
                if on { "Bookmarked" } else { "Removed bookmark:" },
                r.title
            );
        }

        ResourcesCommand::Stats => {
            let st = library_stats(&catalogue, &bookmarks);
            println!("Total resources: {}", st.total);
            println!("Free resources:  {}", st.free);
            println!("Categories:      {}", st.categories);
            println!("Bookmarked:      {}", st.bookmarked);
        }
    }

    Ok(())
}
