//! Resource library: curated learning material, search filters and bookmarks.
//!
//! The catalogue is a JSON dataset like roadmaps; bookmarks are ours.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    Article,
    Video,
    Course,
    Documentation,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ResourceType::Article => "Article",
            ResourceType::Video => "Video",
            ResourceType::Course => "Course",
            ResourceType::Documentation => "Documentation",
        })
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "article" => Ok(ResourceType::Article),
            "video" => Ok(ResourceType::Video),
            "course" => Ok(ResourceType::Course),
            "documentation" | "docs" => Ok(ResourceType::Documentation),
            other => Err(format!(
                "unknown resource type '{other}' (article, video, course, documentation)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for ResourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ResourceLevel::Beginner => "Beginner",
            ResourceLevel::Intermediate => "Intermediate",
            ResourceLevel::Advanced => "Advanced",
        })
    }
}

impl FromStr for ResourceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(ResourceLevel::Beginner),
            "intermediate" => Ok(ResourceLevel::Intermediate),
            "advanced" => Ok(ResourceLevel::Advanced),
            other => Err(format!(
                "unknown difficulty '{other}' (beginner, intermediate, advanced)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub category: String,
    pub difficulty: ResourceLevel,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_free: bool,
}

impl LearningResource {
    /// Case-insensitive substring search over title, description and tags.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        self.title.to_lowercase().contains(&q)
            || self.description.to_lowercase().contains(&q)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&q))
    }
}

/// Saved resource ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmarks {
    ids: BTreeSet<String>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a bookmark; returns whether the resource is now bookmarked.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// All criteria must hold; unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub query: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<ResourceLevel>,
    pub kind: Option<ResourceType>,
    pub bookmarked_only: bool,
}

impl ResourceFilter {
    pub fn matches(&self, r: &LearningResource, bookmarks: &Bookmarks) -> bool {
        self.query.as_deref().is_none_or(|q| r.matches_query(q))
            && self.category.as_deref().is_none_or(|c| r.category == c)
            && self.difficulty.is_none_or(|d| r.difficulty == d)
            && self.kind.is_none_or(|k| r.kind == k)
            && (!self.bookmarked_only || bookmarks.contains(&r.id))
    }

    pub fn apply<'a>(
        &self,
        catalogue: &'a [LearningResource],
        bookmarks: &Bookmarks,
    ) -> Vec<&'a LearningResource> {
        catalogue.iter().filter(|r| self.matches(r, bookmarks)).collect()
    }
}

/// Distinct categories in first-seen order.
pub fn categories(catalogue: &[LearningResource]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for r in catalogue {
        if !out.contains(&r.category.as_str()) {
            out.push(&r.category);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryStats {
    pub total: usize,
    pub free: usize,
    pub categories: usize,
    /// Bookmarks that still resolve to a catalogue entry.
    pub bookmarked: usize,
}

pub fn library_stats(catalogue: &[LearningResource], bookmarks: &Bookmarks) -> LibraryStats {
    LibraryStats {
        total: catalogue.len(),
        free: catalogue.iter().filter(|r| r.is_free).count(),
        categories: categories(catalogue).len(),
        bookmarked: catalogue.iter().filter(|r| bookmarks.contains(&r.id)).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(
        id: &str,
        title: &str,
        kind: ResourceType,
        category: &str,
        difficulty: ResourceLevel,
        tags: &[&str],
        is_free: bool,
    ) -> LearningResource {
        LearningResource {
            id: id.into(),
            title: title.into(),
            description: format!("{title} walkthrough"),
            kind,
            category: category.into(),
            difficulty,
            duration: "2 hours".into(),
            author: "Someone".into(),
            url: String::new(),
            rating: 4.5,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_free,
        }
    }

    fn catalogue() -> Vec<LearningResource> {
        use ResourceLevel::*;
        use ResourceType::*;
        vec![
            res("1", "JavaScript: The Complete Guide", Course, "JavaScript", Beginner, &["ES6", "Async"], false),
            res("2", "You Don't Know JS", Documentation, "JavaScript", Advanced, &["Closures"], true),
            res("3", "Docker in 100 Seconds", Video, "DevOps", Beginner, &["Containers"], true),
            res("4", "CI/CD with GitHub Actions", Video, "DevOps", Intermediate, &["CI/CD", "DevOps"], true),
        ]
    }

    fn ids(hits: &[&LearningResource]) -> Vec<String> {
        hits.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn query_searches_title_description_and_tags() {
        let all = catalogue();
        let none = Bookmarks::new();
        let by = |q: &str| ResourceFilter { query: Some(q.into()), ..ResourceFilter::default() };
        assert_eq!(ids(&by("DOCKER").apply(&all, &none)), ["3"]);
        assert_eq!(ids(&by("closures").apply(&all, &none)), ["2"]);
        assert_eq!(ids(&by("walkthrough").apply(&all, &none)).len(), 4);
        assert!(by("rust").apply(&all, &none).is_empty());
    }

    #[test]
    fn filters_combine() {
        let all = catalogue();
        let none = Bookmarks::new();
        let f = ResourceFilter {
            category: Some("DevOps".into()),
            kind: Some(ResourceType::Video),
            difficulty: Some(ResourceLevel::Beginner),
            ..ResourceFilter::default()
        };
        assert_eq!(ids(&f.apply(&all, &none)), ["3"]);

        let f = ResourceFilter {
            query: Some("js".into()),
            kind: Some(ResourceType::Course),
            ..ResourceFilter::default()
        };
        assert!(f.apply(&all, &none).is_empty());

        assert_eq!(ResourceFilter::default().apply(&all, &none).len(), 4);
    }

    #[test]
    fn category_match_is_exact() {
        let all = catalogue();
        let f = ResourceFilter { category: Some("devops".into()), ..ResourceFilter::default() };
        assert!(f.apply(&all, &Bookmarks::new()).is_empty());
    }

    #[test]
    fn bookmark_toggles_on_and_off() {
        let all = catalogue();
        let mut marks = Bookmarks::new();
        assert!(marks.toggle("4"));
        assert!(marks.toggle("2"));
        let only = ResourceFilter { bookmarked_only: true, ..ResourceFilter::default() };
        assert_eq!(ids(&only.apply(&all, &marks)), ["2", "4"]);

        assert!(!marks.toggle("4"));
        assert!(!marks.contains("4"));
        assert_eq!(ids(&only.apply(&all, &marks)), ["2"]);
        assert_eq!(serde_json::to_string(&marks).unwrap(), r#"["2"]"#);
    }

    #[test]
    fn stats_ignore_stale_bookmarks() {
        let all = catalogue();
        let mut marks = Bookmarks::new();
        marks.toggle("1");
        marks.toggle("removed-id");
        assert_eq!(
            library_stats(&all, &marks),
            LibraryStats { total: 4, free: 3, categories: 2, bookmarked: 1 }
        );
        assert_eq!(categories(&all), vec!["JavaScript", "DevOps"]);
    }

    #[test]
    fn parses_dataset_shape() {
        let r: LearningResource = serde_json::from_str(
            r#"{ "id": "7", "title": "MDN Web Docs", "type": "Documentation",
                 "category": "Web", "difficulty": "Beginner", "rating": 4.9,
                 "tags": ["HTML"], "isFree": true }"#,
        )
        .unwrap();
        assert_eq!(r.kind, ResourceType::Documentation);
        assert!(r.is_free);
        assert_eq!("DOCS".parse::<ResourceType>(), Ok(ResourceType::Documentation));
        assert!("podcast".parse::<ResourceType>().is_err());
        assert_eq!("advanced".parse::<ResourceLevel>(), Ok(ResourceLevel::Advanced));
    }
}
