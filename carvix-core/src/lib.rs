//! carvix-core: profile analysis, career recommendations, the career-prep trackers and the resource library

pub mod analysis;
pub mod assessment;
pub mod compare;
pub mod error;
pub mod interview;
pub mod profile;
pub mod recommend;
pub mod resources;
pub mod roadmap;
pub mod skill_gaps;
pub mod store;
pub mod tasks;
pub mod tracker;

pub use analysis::{analyze_profile, ProfileAnalysis, ProfileText};
pub use assessment::{score_assessment, record_result, Assessment, AssessmentResult, Proficiency};
pub use compare::{Career, ComparisonSelection, MAX_COMPARED};
pub use error::{CarvixError, Result};
pub use interview::{InterviewQuestion, PracticeLog, QuestionDifficulty, QuestionFilter};
pub use profile::{IntakeStep, IntakeWizard, Profile};
pub use recommend::CareerPathRecommendation;
pub use resources::{Bookmarks, LearningResource, ResourceFilter, ResourceLevel, ResourceType};
pub use roadmap::{Roadmap, RoadmapProgress};
pub use skill_gaps::{GapCategory, SkillGapCategory};
pub use store::{load_content, JsonFileStore, MemoryStore, Repository};
pub use tasks::{CareerTask, TaskBoard, TaskDefaults, TaskDraft, TaskNotice, TaskPriority, TaskStatus};
pub use tracker::{ApplicationDraft, JobApplication, JobStatus, JobTracker};
