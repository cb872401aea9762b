use anyhow::Result;
use carvix_core::{analyze_profile, Profile, ProfileAnalysis};

use crate::state::load_profile;

pub fn run(json: bool) -> Result<()> {
    let profile = load_profile()?;
    let analysis = analyze_profile(&profile);
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render_dashboard(&profile, &analysis));
    }
    Ok(())
}

pub fn render_dashboard(profile: &Profile, a: &ProfileAnalysis) -> String {
    let mut s = String::new();
    let name = profile.name.trim();
    if name.is_empty() {
        s.push_str("# Your career dashboard\n\n");
    } else {
        s.push_str(&format!("# Career dashboard for {}\n\n", name));
    }

    s.push_str("## Strengths\n\n");
    for strength in &a.strengths {
        s.push_str(&format!("- {}\n", strength));
    }

    s.push_str("\n## Recommended career paths\n\n");
    for (i, rec) in a.recommendations.iter().enumerate() {
        s.push_str(&format!("{}. {} ({}% match)\n", i + 1, rec.title, rec.match_score));
        s.push_str(&format!("   {}\n", rec.description));
        for why in &rec.why_fits {
            s.push_str(&format!("   * {}\n", why));
        }
        s.push_str(&format!("   Demand: {}\n", rec.demand));
        s.push_str(&format!("   Salary: {}\n", rec.average_salary));
        s.push_str(&format!("   Growth: {}\n\n", rec.growth));
    }

    s.push_str("## Skill gaps\n\n");
    for gap in &a.skill_gaps {
        s.push_str(&format!("{}\n", gap.category));
        if gap.missing.is_empty() && gap.weak.is_empty() {
            s.push_str("  nothing flagged\n");
        }
        if !gap.missing.is_empty() {
            s.push_str(&format!("  missing: {}\n", gap.missing.join(", ")));
        }
        if !gap.weak.is_empty() {
            s.push_str(&format!("  to improve: {}\n", gap.weak.join(", ")));
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_profile_shows_fallbacks() {
        let p = Profile::default();
        let out = render_dashboard(&p, &analyze_profile(&p));
        assert!(out.starts_with("# Your career dashboard"));
        assert!(out.contains("- Eager to learn"));
        assert!(out.contains("1. Frontend Developer (70% match)"));
        assert!(out.contains("2. Backend Developer (68% match)"));
        assert!(out.contains("missing: Git/GitHub, RESTful APIs, Unit Testing"));
    }

    #[test]
    fn empty_technical_category_is_still_listed() {
        let p = Profile {
            name: "Kabir".into(),
            technical_skills: "git, data structures, rest api, testing, docker, linux, aws, sql".into(),
            soft_skills: "communication, problem solving".into(),
            ..Profile::default()
        };
        let out = render_dashboard(&p, &analyze_profile(&p));
        assert!(out.contains("Career dashboard for Kabir"));
        assert!(out.contains("Technical Skills\n  nothing flagged"));
        assert!(!out.contains("Tools & Platforms"));
        assert!(!out.contains("Professional Skills"));
    }
}
