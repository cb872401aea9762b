use anyhow::{anyhow, bail, Context, Result};
use carvix_core::profile::EDUCATION_LEVELS;
use carvix_core::{IntakeStep, IntakeWizard, Profile, Repository};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::state::profile_store;

fn read_line() -> Result<String> {
    let mut s = String::new();
    if io::stdin().read_line(&mut s)? == 0 {
        bail!("input closed before setup finished");
    }
    Ok(s.trim().to_string())
}

pub(crate) fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    read_line()
}

/// Blank input keeps `current`.
fn prompt_with_default(label: &str, current: &str) -> Result<String> {
    let answer = if current.is_empty() {
        prompt(label)?
    } else {
        prompt(&format!("{} [{}]", label, current))?
    };
    Ok(if answer.is_empty() {
        current.to_string()
    } else {
        answer
    })
}

fn prompt_multiline(label: &str, current: &str) -> Result<String> {
    if current.is_empty() {
        println!("{} (blank line to finish)", label);
    } else {
        println!("{} (blank line to finish; blank first line keeps the current text)", label);
    }
    let mut lines = Vec::new();
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let s = read_line()?;
        if s.is_empty() {
            break;
        }
        lines.push(s);
    }
    Ok(if lines.is_empty() {
        current.to_string()
    } else {
        lines.join("\n")
    })
}

/// Accepts a menu number, a key ("graduate") or a label ("Recent Graduate").
fn parse_education(input: &str) -> Option<&'static str> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return EDUCATION_LEVELS.get(n.checked_sub(1)?).map(|(key, _)| *key);
    }
    EDUCATION_LEVELS
        .iter()
        .find(|(key, label)| key.eq_ignore_ascii_case(input) || label.eq_ignore_ascii_case(input))
        .map(|(key, _)| *key)
}

fn education_label(key: &str) -> &str {
    EDUCATION_LEVELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

fn prompt_education(current: &str) -> Result<String> {
    for (i, (_, label)) in EDUCATION_LEVELS.iter().enumerate() {
        println!("  {}. {}", i + 1, label);
    }
    loop {
        let answer = prompt_with_default("Education level", current)?;
        if answer.is_empty() {
            return Ok(answer);
        }
        match parse_education(&answer) {
            Some(key) => return Ok(key.to_string()),
            None => println!("Pick 1-{}", EDUCATION_LEVELS.len()),
        }
    }
}

fn read_resume(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read resume {}", path.display()))
}

fn fill_step(step: IntakeStep, p: &mut Profile) -> Result<()> {
    match step {
        IntakeStep::BasicInfo => {
            p.name = prompt_with_default("Full name *", &p.name)?;
            p.email = prompt_with_default("Email *", &p.email)?;
            p.education = prompt_education(&p.education)?;
            p.degree = prompt_with_default("Degree / field of study *", &p.degree)?;
            p.graduation_year = prompt_with_default("Graduation year *", &p.graduation_year)?;
        }
        IntakeStep::SkillsExperience => {
            p.technical_skills =
                prompt_with_default("Technical skills, comma separated *", &p.technical_skills)?;
            p.soft_skills = prompt_with_default("Soft skills", &p.soft_skills)?;
            p.experience = prompt_multiline("Projects, internships, work experience", &p.experience)?;
        }
        IntakeStep::InterestsGoals => {
            p.interests = prompt_with_default("Career interests *", &p.interests)?;
            p.career_goals = prompt_multiline("Career goals *", &p.career_goals)?;
        }
        IntakeStep::Resume => {
            let path = prompt("Path to a plain-text resume (optional, blank to skip)")?;
            if !path.is_empty() {
                p.resume_text = read_resume(Path::new(&path))?;
                println!("Read {} characters", p.resume_text.chars().count());
            }
        }
    }
    Ok(())
}

pub fn run_setup() -> Result<()> {
    let store = profile_store()?;
    let mut wizard = match store.load()? {
        Some(existing) => {
            println!("Carvix setup (editing existing profile; press Enter to keep a value)\n");
            IntakeWizard::from_profile(existing)
        }
        None => {
            println!("Carvix setup\n");
            IntakeWizard::new()
        }
    };

    loop {
        let step = wizard.step();
        println!("\nStep {} of {}: {}", step.number(), IntakeStep::ALL.len(), step.title());
        fill_step(step, wizard.profile_mut())?;
        if step == IntakeStep::Resume {
            break;
        }
        if let Err(missing) = wizard.next() {
            println!("Please complete: {}", missing.join(", "));
        }
    }

    let profile = wizard
        .finish()
        .map_err(|missing| anyhow!("profile incomplete: {}", missing.join(", ")))?;
    store.save(&profile)?;

    println!("\nWrote {}", store.path().display());
    println!("\nNext recommended steps:");
    println!("- carvix analyze          (strengths, career paths, skill gaps)");
    println!("- carvix tasks add ...    (plan your preparation)");
    println!("- carvix jobs list        (track applications)");
    Ok(())
}

pub fn render_profile(p: &Profile) -> String {
    let mut s = String::new();
    let mut line = |label: &str, value: &str| {
        if !value.trim().is_empty() {
            s.push_str(&format!("{:<18} {}\n", format!("{}:", label), value.trim()));
        }
    };
    line("Name", &p.name);
    line("Email", &p.email);
    line("Education", education_label(&p.education));
    line("Degree", &p.degree);
    line("Graduation year", &p.graduation_year);
    line("Technical skills", &p.technical_skills);
    line("Soft skills", &p.soft_skills);
    line("Experience", &p.experience);
    line("Interests", &p.interests);
    line("Career goals", &p.career_goals);
    if !p.resume_text.is_empty() {
        line("Resume", &format!("{} characters", p.resume_text.chars().count()));
    }
    s
}
