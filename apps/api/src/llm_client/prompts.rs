// Cross-cutting prompt fragments shared by more than one generation task.
// Task-specific prompt constants live in pipeline/prompts.rs.

/// Closing instruction for every HTML-producing task.
pub const HTML_ONLY_INSTRUCTION: &str = "\
    The final output must be ONLY the complete HTML code, starting with <!DOCTYPE html>. \
    Do not include any conversational text or explanations before or after the HTML code block.";

/// Output contract for JSON-producing tasks.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    The entire output must be ONLY the JSON object, with no surrounding text, \
    comments, or markdown fences like ```json.";
