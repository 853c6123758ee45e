// Shared prompt fragments. Each feature that calls the model keeps its own
// prompts.rs alongside it.

/// System instruction that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System instruction for free-text rewriting tasks.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an expert resume writer. \
    Respond with the requested text only, as plain prose. \
    Do NOT use markdown, headings, quotes, or bullet markers. \
    Do NOT add commentary before or after the text.";
