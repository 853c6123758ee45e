// Prompt templates for AI-assisted resume improvement.

/// Improvement prompt. Replace `{kind}`, `{industry}` and `{current}` before sending.
pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"As an expert resume writer, improve the following {kind} for a {industry} professional.
Make it more impactful, quantifiable, and aligned with industry standards.

Current content:
{current}

Requirements:
1. Use action verbs
2. Include metrics and results where the content supports them
3. Highlight relevant technical skills
4. Keep it concise but detailed
5. Focus on achievements over responsibilities
6. Use industry-specific keywords
7. Do NOT invent employers, titles, dates, or numbers that are not in the content

Format the response as a single paragraph without any additional text or explanations."#;

pub fn build_improve_prompt(kind_label: &str, industry: &str, current: &str) -> String {
    IMPROVE_PROMPT_TEMPLATE
        .replace("{kind}", kind_label)
        .replace("{industry}", industry)
        .replace("{current}", current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_improve_prompt_fills_placeholders() {
        let prompt = build_improve_prompt("professional summary", "web development", "I code.");
        assert!(prompt.contains("improve the following professional summary for a web development professional"));
        assert!(prompt.contains("Current content:\nI code."));
        assert!(!prompt.contains('{'));
    }
}
