// Shared prompt fragments. Each service that calls the model keeps its own
// prompts.rs alongside it and reuses these.

/// Instruction that enforces a single bare JSON object as the whole answer.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with ONE valid JSON object and nothing else. \
    Do NOT wrap it in markdown code fences. \
    Do NOT add any text, notes or apologies before or after the object.";

/// Language the free-text fields must be written in.
pub const OUTPUT_LANGUAGE_INSTRUCTION: &str = "\
    Write every free-text value (alerts, recommendations, explanations) in Portuguese, \
    as used in Mozambique. Quote excerpts exactly as they appear in the content.";
