//! Markdown Projector: turns the structured resume into the single markdown document
//! that is previewed, hand-edited, scored, saved and exported.
//!
//! # Output shape
//! ```text
//! <name>
//! <professional title>
//! <city>, <state> | <phone> | <email>
//!
//! ## Professional Summary
//!
//! ...
//!
//! ---
//! ```
//! Sections appear in a fixed order and a section with no data is omitted entirely.
//! Missing optional values are replaced by capitalized placeholder tokens, so the
//! output is always well-formed for the paginator.
//!
//! Two entry strategies exist and the caller picks one explicitly:
//! - `Standard`: input order, `Organization | Title`, one bullet per description line.
//! - `ReverseChronological`: newest start date first, upper-cased headings,
//!   `### TITLE @ ORGANIZATION`, the whole description as a single bullet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resume::model::{present, Entry, Resume, SectionKind};

// ────────────────────────────────────────────────────────────────────────────
// Placeholders
// ────────────────────────────────────────────────────────────────────────────

const TITLE_PLACEHOLDER: &str = "PROFESSIONAL TITLE";
const CITY_PLACEHOLDER: &str = "City";
const STATE_PLACEHOLDER: &str = "State";
const PHONE_PLACEHOLDER: &str = "Phone";
const EMAIL_PLACEHOLDER: &str = "Email";
const DATE_PLACEHOLDER: &str = "20XX";
const ONGOING_END_DATE: &str = "Present";

pub const SUMMARY_HEADING: &str = "Professional Summary";
pub const SKILLS_HEADING: &str = "Skills & Abilities";
pub const SECTION_RULE: &str = "---";

/// Placeholder tokens for one entry section. `organization` is `None` for sections whose
/// entries have no organization line (projects).
#[derive(Debug, Clone, Copy)]
struct EntryPlaceholders {
    organization: Option<&'static str>,
    title: &'static str,
}

fn placeholders(kind: SectionKind) -> EntryPlaceholders {
    match kind {
        SectionKind::Experience => EntryPlaceholders {
            organization: Some("Organization Name"),
            title: "Job Title",
        },
        SectionKind::Education => EntryPlaceholders {
            organization: Some("University Name"),
            title: "Degree",
        },
        SectionKind::Projects => EntryPlaceholders {
            organization: None,
            title: "Project Title",
        },
    }
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    present(value).unwrap_or(placeholder)
}

// ────────────────────────────────────────────────────────────────────────────
// Strategy
// ────────────────────────────────────────────────────────────────────────────

/// How entry sections (experience, education, projects) are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStrategy {
    #[default]
    Standard,
    ReverseChronological,
}

/// Projects the resume with the standard entry strategy.
pub fn project(resume: &Resume, author: &str) -> String {
    build(resume, author, |kind, entries| {
        section(kind.heading(), &standard_entries(kind, entries))
    })
}

/// Projects the resume into markdown with the given entry strategy. Deterministic: the
/// same input always yields the same bytes.
pub fn project_with(resume: &Resume, author: &str, strategy: RenderStrategy) -> String {
    match strategy {
        RenderStrategy::Standard => project(resume, author),
        RenderStrategy::ReverseChronological => build(resume, author, |kind, entries| {
            format!("{}\n\n{SECTION_RULE}", entries_to_markdown(entries, kind.heading()))
        }),
    }
}

fn build(
    resume: &Resume,
    author: &str,
    entry_section: impl Fn(SectionKind, &[Entry]) -> String,
) -> String {
    let mut blocks = vec![header_block(resume, author)];

    if let Some(summary) = present(&resume.summary) {
        blocks.push(section(SUMMARY_HEADING, summary));
    }

    if let Some(skills) = skills_block(resume) {
        blocks.push(section(SKILLS_HEADING, &skills));
    }

    for kind in SectionKind::ALL {
        let entries = resume.entries(kind);
        if !entries.is_empty() {
            blocks.push(entry_section(kind, entries));
        }
    }

    join_blocks(&blocks)
}

/// Reverse-chronological rendering of a single entry list, headed by the upper-cased
/// section title. Placeholders follow the section the title names (experience
/// placeholders for unknown titles). Empty input renders as an empty string.
pub fn entries_to_markdown(entries: &[Entry], section_title: &str) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let kind = SectionKind::from_heading(section_title).unwrap_or(SectionKind::Experience);
    sorted_entries(section_title, entries, placeholders(kind))
}

/// Orders entries newest-first by parsed start date. Entries whose start date cannot
/// be parsed follow all dated ones, in their original order.
pub fn sort_reverse_chronological(entries: &[Entry]) -> Vec<&Entry> {
    let mut keyed: Vec<(Option<NaiveDate>, &Entry)> = entries
        .iter()
        .map(|e| (present(&e.start_date).and_then(parse_start_date), e))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    keyed.into_iter().map(|(_, e)| e).collect()
}

/// Parses the date formats the entry form produces (`2021-06`, `2021-06-15`, `2021`,
/// `Jun 2021`, `June 2021`).
pub fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        return raw.parse::<i32>().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    }
    ["%d %B %Y", "%d %b %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&format!("01 {raw}"), fmt).ok())
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

fn header_block(resume: &Resume, author: &str) -> String {
    let contact = &resume.contact_info;
    let author = author.trim();
    let name = if author.is_empty() {
        crate::models::user::DEFAULT_DISPLAY_NAME
    } else {
        author
    };

    let location = format!(
        "{}, {} | {} | {}",
        or_placeholder(&contact.city, CITY_PLACEHOLDER),
        or_placeholder(&contact.state, STATE_PLACEHOLDER),
        or_placeholder(&contact.mobile, PHONE_PLACEHOLDER),
        or_placeholder(&contact.email, EMAIL_PLACEHOLDER),
    );

    [
        name,
        or_placeholder(&contact.professional_title, TITLE_PLACEHOLDER),
        location.as_str(),
    ]
    .join("\n")
}

fn skills_block(resume: &Resume) -> Option<String> {
    let bullets: Vec<String> = present(&resume.skills)?
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("- {s}"))
        .collect();

    (!bullets.is_empty()).then(|| bullets.join("\n"))
}

fn section(title: &str, body: &str) -> String {
    format!("## {title}\n\n{}\n\n{SECTION_RULE}", body.trim())
}

fn date_range(entry: &Entry) -> String {
    let start = or_placeholder(&entry.start_date, DATE_PLACEHOLDER);
    let end = if entry.current {
        ONGOING_END_DATE
    } else {
        or_placeholder(&entry.end_date, DATE_PLACEHOLDER)
    };
    format!("{start} - {end}")
}

fn standard_entries(kind: SectionKind, entries: &[Entry]) -> String {
    let ph = placeholders(kind);

    entries
        .iter()
        .map(|entry| {
            let title = or_placeholder(&entry.title, ph.title);
            let heading = match (kind, ph.organization) {
                (SectionKind::Education, Some(org_ph)) => {
                    format!("{}, {title}", or_placeholder(&entry.organization, org_ph))
                }
                (_, Some(org_ph)) => {
                    format!("{} | {title}", or_placeholder(&entry.organization, org_ph))
                }
                (_, None) => title.to_string(),
            };

            let mut block = format!("{heading}\n{}", date_range(entry));
            // Education lists no bullets.
            if kind != SectionKind::Education {
                for line in entry.description_lines() {
                    block.push_str("\n- ");
                    block.push_str(line);
                }
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn sorted_entries(section_title: &str, entries: &[Entry], ph: EntryPlaceholders) -> String {
    let body = sort_reverse_chronological(entries)
        .into_iter()
        .map(|entry| {
            let title = or_placeholder(&entry.title, ph.title).to_uppercase();
            let heading = match ph.organization {
                Some(org_ph) => format!(
                    "### {title} @ {}",
                    or_placeholder(&entry.organization, org_ph).to_uppercase()
                ),
                None => format!("### {title}"),
            };
            match present(&entry.description) {
                Some(description) => {
                    format!("{heading}\n{}\n\n- {description}", date_range(entry))
                }
                None => format!("{heading}\n{}", date_range(entry)),
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("## {}\n\n{body}", section_title.to_uppercase())
}

fn join_blocks(blocks: &[String]) -> String {
    blocks
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
