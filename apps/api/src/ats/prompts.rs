// Prompt templates for ATS keyword scoring.

/// Keyword-match prompt. Replace `{resume}` and `{job_description}` before sending.
pub const KEYWORD_SCORE_PROMPT_TEMPLATE: &str = r#"Analyze the following resume content and job description to calculate an ATS compatibility score (0-100) based on keyword matching.

Return a JSON object with this EXACT schema (no extra fields):
{
  "keywordScore": 72,
  "keywordFeedback": "One or two sentences naming the important job keywords the resume is missing."
}

Resume Content:
{resume}

Job Description:
{job_description}"#;

pub fn build_keyword_score_prompt(resume: &str, job_description: &str) -> String {
    KEYWORD_SCORE_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{resume}", resume)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_inputs() {
        let prompt = build_keyword_score_prompt("RESUME BODY", "JD BODY");
        assert!(prompt.contains("Resume Content:\nRESUME BODY"));
        assert!(prompt.contains("Job Description:\nJD BODY"));
        assert!(!prompt.contains("{resume}"));
    }
}
