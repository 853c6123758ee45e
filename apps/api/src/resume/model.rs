//! Structured resume content as edited in the form.
//!
//! Every field has a default so projection never sees missing data. Optional text
//! fields stay `None` (or blank) until the user types something; placeholder tokens are
//! substituted by the projector only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
    pub professional_title: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub linkedin: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        [
            &self.professional_title,
            &self.email,
            &self.mobile,
            &self.city,
            &self.state,
            &self.linkedin,
        ]
        .into_iter()
        .all(|f| present(f).is_none())
    }
}

/// One experience, education or project item.
///
/// `description` is a newline-delimited list of bullet lines. `current` means the item
/// is ongoing and its end date displays as "Present".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entry {
    pub organization: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub current: bool,
}

impl Entry {
    /// Non-blank description lines, trimmed. An absent description yields no lines.
    pub fn description_lines(&self) -> Vec<&str> {
        self.description
            .as_deref()
            .map(|d| d.lines().map(str::trim).filter(|l| !l.is_empty()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resume {
    pub contact_info: ContactInfo,
    pub summary: Option<String>,
    /// Free text, one skill per line.
    pub skills: Option<String>,
    pub experience: Vec<Entry>,
    pub education: Vec<Entry>,
    pub projects: Vec<Entry>,
    /// Session-only input for ATS scoring and keyword suggestion. Never projected or
    /// persisted.
    pub job_description: Option<String>,
}

impl Resume {
    pub fn entries(&self, kind: SectionKind) -> &[Entry] {
        match kind {
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
            SectionKind::Projects => &self.projects,
        }
    }
}

/// The three entry-based sections, in projection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Education,
    Projects,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Projects => "Projects",
        }
    }

    /// Section whose heading matches `title`, ignoring case and surrounding whitespace.
    pub fn from_heading(title: &str) -> Option<SectionKind> {
        let title = title.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.heading().eq_ignore_ascii_case(title))
    }
}

/// Returns the trimmed value when it is present and non-blank.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_deserializes_camel_case_with_defaults() {
        let json = r#"{
            "contactInfo": {"professionalTitle": "Data Scientist", "city": "Philadelphia"},
            "experience": [{"organization": "Acme", "startDate": "2020-01", "current": true}]
        }"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(
            resume.contact_info.professional_title.as_deref(),
            Some("Data Scientist")
        );
        assert_eq!(resume.experience.len(), 1);
        assert!(resume.experience[0].current);
        assert_eq!(resume.experience[0].start_date.as_deref(), Some("2020-01"));
        assert!(resume.education.is_empty());
        assert!(resume.summary.is_none());
    }

    #[test]
    fn test_section_kind_from_heading() {
        assert_eq!(SectionKind::from_heading(" projects "), Some(SectionKind::Projects));
        assert_eq!(SectionKind::from_heading("EDUCATION"), Some(SectionKind::Education));
        assert_eq!(SectionKind::from_heading("Work History"), None);
    }

    #[test]
    fn test_empty_object_is_default_resume() {
        let resume: Resume = serde_json::from_str("{}").unwrap();
        assert_eq!(resume, Resume::default());
    }

    #[test]
    fn test_contact_info_blank_fields_count_as_empty() {
        let contact = ContactInfo {
            email: Some("   ".to_string()),
            city: Some(String::new()),
            ..Default::default()
        };
        assert!(contact.is_empty());

        let contact = ContactInfo {
            linkedin: Some("https://linkedin.com/in/jane".to_string()),
            ..Default::default()
        };
        assert!(!contact.is_empty());
    }

    #[test]
    fn test_description_lines_drops_blank_lines() {
        let entry = Entry {
            description: Some("  Built things \n\n   \nShipped more".to_string()),
            ..Default::default()
        };
        assert_eq!(entry.description_lines(), vec!["Built things", "Shipped more"]);
    }

    #[test]
    fn test_missing_description_has_no_lines() {
        assert!(Entry::default().description_lines().is_empty());
    }

    #[test]
    fn test_entries_by_kind() {
        let resume = Resume {
            projects: vec![Entry::default(), Entry::default()],
            ..Default::default()
        };
        assert_eq!(resume.entries(SectionKind::Projects).len(), 2);
        assert!(resume.entries(SectionKind::Experience).is_empty());
    }
}
