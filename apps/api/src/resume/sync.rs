//! Reverse Sync Guard: decides whether the preview shows the freshly projected form
//! or the previously loaded text.
//!
//! The structured form and the hand-edited markdown are separate tracks. Edits to the
//! markdown are never merged back into the form; the next form change replaces them.
//! `recompute_preview` is invoked explicitly after each form mutation and reports when
//! that replacement throws away a differing displayed text, so the caller can warn.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::resume::model::{present, Resume};
use crate::resume::projector::{project_with, RenderStrategy};

static BLANK_LINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("blank-line pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewSource {
    /// The previously loaded (saved or hand-edited) text, shown unmodified.
    Initial,
    /// Fresh projector output.
    Projected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub content: String,
    pub source: PreviewSource,
    /// True when the projection replaced a displayed text that differed from it.
    pub discards_manual_edits: bool,
}

/// A form is empty when no summary, no skills, no contact field and no entries have
/// been entered. The job description does not count.
pub fn is_form_empty(resume: &Resume) -> bool {
    present(&resume.summary).is_none()
        && present(&resume.skills).is_none()
        && resume.contact_info.is_empty()
        && resume.experience.is_empty()
        && resume.education.is_empty()
        && resume.projects.is_empty()
}

/// Recomputes the preview after a form change.
///
/// `initial` is the text loaded with the session. `displayed` is what the editor shows
/// right now and `last_projected` is the projection the caller last displayed, if the
/// caller tracks them. The displayed text counts as hand-edited when it differs from
/// `last_projected`, or when nothing was projected yet and it is non-blank.
pub fn recompute_preview(
    resume: &Resume,
    author: &str,
    strategy: RenderStrategy,
    initial: &str,
    displayed: Option<&str>,
    last_projected: Option<&str>,
) -> Preview {
    if is_form_empty(resume) {
        return Preview {
            content: initial.to_string(),
            source: PreviewSource::Initial,
            discards_manual_edits: false,
        };
    }

    let content = project_with(resume, author, strategy);
    let discards_manual_edits = displayed
        .map(str::trim)
        .filter(|d| !d.is_empty() && *d != content.trim())
        .is_some_and(|d| last_projected.map_or(true, |last| d != last.trim()));

    Preview {
        content,
        source: PreviewSource::Projected,
        discards_manual_edits,
    }
}

/// Flattens text for persistence: every newline run holding only whitespace becomes a
/// single blank line, and the ends are trimmed.
pub fn normalize_for_save(text: &str) -> String {
    BLANK_LINE_RUN.replace_all(text, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::model::{ContactInfo, Entry};
    use crate::resume::projector::project;

    const SAVED: &str = "Jane Doe\nEngineer\n\n## Professional Summary\n\nHand edited.";

    #[test]
    fn test_default_resume_is_empty() {
        assert!(is_form_empty(&Resume::default()));
    }

    #[test]
    fn test_job_description_alone_keeps_form_empty() {
        let resume = Resume {
            job_description: Some("Rust engineer wanted".to_string()),
            ..Default::default()
        };
        assert!(is_form_empty(&resume));
    }

    #[test]
    fn test_any_field_makes_form_non_empty() {
        let with_linkedin = Resume {
            contact_info: ContactInfo {
                linkedin: Some("https://linkedin.com/in/jane".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let with_entry = Resume {
            education: vec![Entry::default()],
            ..Default::default()
        };
        let with_skills = Resume {
            skills: Some("Rust".to_string()),
            ..Default::default()
        };
        assert!(!is_form_empty(&with_linkedin));
        assert!(!is_form_empty(&with_entry));
        assert!(!is_form_empty(&with_skills));
    }

    #[test]
    fn test_empty_form_preserves_initial_text() {
        let preview = recompute_preview(
            &Resume::default(),
            "Jane Doe",
            RenderStrategy::Standard,
            SAVED,
            Some(SAVED),
            None,
        );
        assert_eq!(preview.content, SAVED);
        assert_eq!(preview.source, PreviewSource::Initial);
        assert!(!preview.discards_manual_edits);
    }

    fn with_summary(summary: &str) -> Resume {
        Resume {
            summary: Some(summary.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_projection_over_loaded_text_flags_edits() {
        let resume = with_summary("Fresh summary");
        let preview = recompute_preview(
            &resume,
            "Jane Doe",
            RenderStrategy::Standard,
            SAVED,
            Some(SAVED),
            None,
        );
        assert_eq!(preview.source, PreviewSource::Projected);
        assert_eq!(preview.content, project(&resume, "Jane Doe"));
        assert!(preview.discards_manual_edits);
    }

    #[test]
    fn test_plain_form_edit_is_not_a_discard() {
        let before = project(&with_summary("Builds"), "Jane Doe");
        let preview = recompute_preview(
            &with_summary("Builds things"),
            "Jane Doe",
            RenderStrategy::Standard,
            SAVED,
            Some(&before),
            Some(&before),
        );
        assert_eq!(preview.content, project(&with_summary("Builds things"), "Jane Doe"));
        assert!(!preview.discards_manual_edits);
    }

    #[test]
    fn test_hand_edit_after_projection_is_flagged() {
        let before = project(&with_summary("Builds"), "Jane Doe");
        let hand_edited = format!("{before}\n\nExtra line typed by hand");
        let preview = recompute_preview(
            &with_summary("Builds things"),
            "Jane Doe",
            RenderStrategy::Standard,
            SAVED,
            Some(&hand_edited),
            Some(&before),
        );
        assert!(preview.discards_manual_edits);
    }

    #[test]
    fn test_matching_displayed_text_is_not_a_discard() {
        let resume = with_summary("Fresh summary");
        let displayed = project(&resume, "Jane Doe");
        let preview = recompute_preview(
            &resume,
            "Jane Doe",
            RenderStrategy::Standard,
            "",
            Some(&displayed),
            None,
        );
        assert!(!preview.discards_manual_edits);
    }

    #[test]
    fn test_blank_displayed_text_is_not_a_discard() {
        let preview = recompute_preview(
            &with_summary("Fresh summary"),
            "Jane Doe",
            RenderStrategy::Standard,
            "",
            Some("  \n"),
            None,
        );
        assert!(!preview.discards_manual_edits);
    }

    #[test]
    fn test_normalize_collapses_blank_runs_and_trims() {
        let raw = "\n\n  Jane Doe\nEngineer\n\n\n   \n\n## Summary\n \t \nText  \n\n";
        assert_eq!(
            normalize_for_save(raw),
            "Jane Doe\nEngineer\n\n## Summary\n\nText"
        );
    }

    #[test]
    fn test_normalize_keeps_single_newlines() {
        assert_eq!(normalize_for_save("a\nb\nc"), "a\nb\nc");
    }
}
