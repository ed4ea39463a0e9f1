//! Prompt assembler — builds the ordered text/image segment sequence for
//! each generation task. Pure functions of their inputs; no network or
//! file I/O happens here.

use crate::llm_client::prompts::{HTML_ONLY_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::llm_client::Segment;
use crate::models::context::ScrapedContext;
use crate::pipeline::prompts::{
    CLONE_CLOSING, CLONE_SYSTEM, NO_STRUCTURE_PLACEHOLDER, PORTFOLIO_CLOSING, PORTFOLIO_SYSTEM,
    RESUME_PARSE_SYSTEM,
};

/// Segments for the clone task: system instruction, cleaned HTML block,
/// desktop screenshot, mobile screenshot, closing instruction.
pub fn clone_segments(context: &ScrapedContext) -> Vec<Segment> {
    vec![
        Segment::Text(format!("{CLONE_SYSTEM}\n{HTML_ONLY_INSTRUCTION}")),
        Segment::Text(format!(
            "\n\nHere is the design context:\n\nCleaned HTML Structure:\n```html\n{}\n```\n\nDesktop Screenshot:\n",
            context.simplified_html
        )),
        Segment::Image(context.desktop_screenshot.clone()),
        Segment::Text("\n\nMobile Screenshot:\n".to_string()),
        Segment::Image(context.mobile_screenshot.clone()),
        Segment::Text(CLONE_CLOSING.to_string()),
    ]
}

/// Segments for resume parsing: schema-bearing system instruction followed
/// by the raw resume text.
pub fn resume_parse_segments(resume_text: &str) -> Vec<Segment> {
    vec![
        Segment::Text(format!("{RESUME_PARSE_SYSTEM}\n{JSON_ONLY_INSTRUCTION}")),
        Segment::Text(resume_text.to_string()),
    ]
}

/// Segments for the portfolio-build task: system instruction, both
/// screenshots, the structural HTML (or an explicit placeholder when the
/// scrape produced none), the pretty-printed profile JSON, closing
/// instruction.
pub fn portfolio_segments(context: &ScrapedContext, profile_json: &str) -> Vec<Segment> {
    let structure = if context.simplified_html.is_empty() {
        NO_STRUCTURE_PLACEHOLDER
    } else {
        context.simplified_html.as_str()
    };

    vec![
        Segment::Text(format!("{PORTFOLIO_SYSTEM}\n{HTML_ONLY_INSTRUCTION}")),
        Segment::Text("\n\n--- STYLE AND STRUCTURAL GUIDE ---\nDesktop Screenshot:\n".to_string()),
        Segment::Image(context.desktop_screenshot.clone()),
        Segment::Text("\nMobile Screenshot:\n".to_string()),
        Segment::Image(context.mobile_screenshot.clone()),
        Segment::Text(format!(
            "\nCleaned HTML Structure:\n```html\n{structure}\n```\n\n--- USER CONTENT (JSON) ---\n```json\n{profile_json}\n```"
        )),
        Segment::Text(PORTFOLIO_CLOSING.to_string()),
    ]
}
