use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

use crate::errors::FieldError;
use crate::resume::model::{present, Entry, Resume, SectionKind};

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Checks the per-field constraints of the resume form. An empty result means valid.
pub fn validate_resume(resume: &Resume) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let contact = &resume.contact_info;

    if let Some(email) = present(&contact.email) {
        if !EMAIL_SHAPE.is_match(email) {
            errors.push(FieldError::new("contactInfo.email", "Invalid email"));
        }
    }

    if let Some(linkedin) = present(&contact.linkedin) {
        if !is_web_url(linkedin) {
            errors.push(FieldError::new("contactInfo.linkedin", "Invalid URL"));
        }
    }

    for kind in SectionKind::ALL {
        for (i, entry) in resume.entries(kind).iter().enumerate() {
            validate_entry(kind, i, entry, &mut errors);
        }
    }

    errors
}

fn validate_entry(kind: SectionKind, index: usize, entry: &Entry, errors: &mut Vec<FieldError>) {
    if !entry.current && present(&entry.end_date).is_none() {
        errors.push(FieldError::new(
            format!("{}[{index}].endDate", field_prefix(kind)),
            "End date is required unless this is your current position",
        ));
    }
}

fn field_prefix(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Experience => "experience",
        SectionKind::Education => "education",
        SectionKind::Projects => "projects",
    }
}

fn is_web_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::model::ContactInfo;

    fn with_contact(email: Option<&str>, linkedin: Option<&str>) -> Resume {
        Resume {
            contact_info: ContactInfo {
                email: email.map(str::to_string),
                linkedin: linkedin.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_resume_is_valid() {
        assert!(validate_resume(&Resume::default()).is_empty());
    }

    #[test]
    fn test_valid_contact_passes() {
        let resume = with_contact(
            Some("jane@example.com"),
            Some("https://linkedin.com/in/jane"),
        );
        assert!(validate_resume(&resume).is_empty());
    }

    #[test]
    fn test_bad_email_is_reported() {
        let errors = validate_resume(&with_contact(Some("jane.example.com"), None));
        assert_eq!(errors, vec![FieldError::new("contactInfo.email", "Invalid email")]);
    }

    #[test]
    fn test_bad_linkedin_is_reported() {
        let errors = validate_resume(&with_contact(None, Some("linkedin/jane")));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "contactInfo.linkedin");

        let errors = validate_resume(&with_contact(None, Some("ftp://linkedin.com/in/jane")));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_blank_optional_fields_are_not_checked() {
        assert!(validate_resume(&with_contact(Some("  "), Some(""))).is_empty());
    }

    #[test]
    fn test_end_date_required_unless_current() {
        let resume = Resume {
            experience: vec![
                Entry {
                    current: true,
                    ..Default::default()
                },
                Entry::default(),
            ],
            projects: vec![Entry {
                end_date: Some("2022".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let errors = validate_resume(&resume);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "experience[1].endDate");
    }
}
