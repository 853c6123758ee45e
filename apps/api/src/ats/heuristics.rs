//! Rule-based ATS checks that need no remote call.

/// Glyphs that ATS parsers commonly mangle.
pub const ICON_GLYPHS: [&str; 4] = ["📧", "📱", "💼", "🐦"];

/// Section headings an ATS expects to find, matched as plain substrings.
pub const REQUIRED_HEADINGS: [&str; 4] = [
    "Professional Summary",
    "Skills & Abilities",
    "Experience",
    "Education",
];

const BASE_SCORE: i32 = 100;
const ICON_PENALTY: i32 = 20;
const MISSING_HEADING_PENALTY: i32 = 10;

pub const ICON_MESSAGE: &str =
    "Remove icons (e.g., 📧, 📱) as they may not be parsed by ATS systems.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicReport {
    /// 100 minus penalties. Lowest reachable value is 40.
    pub score: i32,
    pub messages: Vec<String>,
}

/// Runs the icon and heading checks against the resume text.
pub fn check(text: &str) -> HeuristicReport {
    let mut score = BASE_SCORE;
    let mut messages = Vec::new();

    if ICON_GLYPHS.iter().any(|glyph| text.contains(glyph)) {
        score -= ICON_PENALTY;
        messages.push(ICON_MESSAGE.to_string());
    }

    for heading in REQUIRED_HEADINGS {
        if !text.contains(heading) {
            score -= MISSING_HEADING_PENALTY;
            messages.push(missing_heading_message(heading));
        }
    }

    HeuristicReport { score, messages }
}

fn missing_heading_message(heading: &str) -> String {
    format!("Include a \"{heading}\" section to help ATS systems identify key information.")
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: &str = "## Professional Summary\n\nx\n\n## Skills & Abilities\n\ny\n\n\
        ## Experience\n\nz\n\n## Education\n\nw";

    #[test]
    fn test_complete_resume_scores_full() {
        let report = check(COMPLETE);
        assert_eq!(report.score, 100);
        assert!(report.messages.is_empty());
    }

    #[test]
    fn test_icons_penalized_once() {
        let text = format!("📧 jane@example.com 📱 555 💼 linkedin 🐦 handle\n{COMPLETE}");
        let report = check(&text);
        assert_eq!(report.score, 80);
        assert_eq!(report.messages, vec![ICON_MESSAGE.to_string()]);
    }

    #[test]
    fn test_each_missing_heading_costs_ten() {
        let report = check("## Experience\n\nBuilt things");
        assert_eq!(report.score, 70);
        assert_eq!(report.messages.len(), 3);
        assert_eq!(
            report.messages[0],
            "Include a \"Professional Summary\" section to help ATS systems identify key information."
        );
        assert!(report.messages[1].contains("\"Skills & Abilities\""));
        assert!(report.messages[2].contains("\"Education\""));
    }

    #[test]
    fn test_worst_case_is_forty() {
        let report = check("📧 nothing else here");
        assert_eq!(report.score, 40);
        assert_eq!(report.messages.len(), 5);
        assert_eq!(report.messages[0], ICON_MESSAGE);
    }

    #[test]
    fn test_heading_match_is_substring_and_case_sensitive() {
        // "Work Experience" still contains "Experience"; lower-case does not match.
        let report = check("Work Experience\nprofessional summary");
        assert_eq!(report.score, 70);
        assert!(report.messages[0].contains("Professional Summary"));
    }
}
