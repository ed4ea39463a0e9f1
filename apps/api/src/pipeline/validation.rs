//! Validation gate — pre-generation checks rejecting unusable scraped input.
//!
//! The scraping service signals failure by embedding diagnostic text in the
//! HTML field rather than through a distinct error channel, so the gate
//! sniffs for known failure signatures. All checks are pure string
//! predicates over the scraped HTML; none mutates the context. A context
//! that fails here must never reach the prompt assembler.

use thiserror::Error;

use crate::models::context::ScrapedContext;

const CRASH_MARKER: &str = "Application error: a client-side exception has occurred";
const EMPTY_SHELL_MARKER: &str = r#"<div id="root"></div>"#;
/// Below this length, an HTML body that is just an empty root div is an SPA
/// shell that never rendered.
const EMPTY_SHELL_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Scraping the reference site failed or produced no usable content. Please try a different URL.")]
    ScrapeFailed,

    #[error("The reference website encountered a client-side error during processing. This can happen with some modern web frameworks. Please try a different reference URL.")]
    ClientSideCrash,

    #[error("The reference site seems to be a dynamic application that did not load content in time. Please try a different URL.")]
    EmptyShell,
}

/// Checks a scraped context before it is allowed into a prompt.
/// Checks run in order and short-circuit; the first failing check names the
/// error. Every flow runs all three.
pub fn validate(context: &ScrapedContext) -> Result<(), ValidationError> {
    let html = &context.simplified_html;
    let lowered = html.to_lowercase();

    if html.is_empty() || lowered.contains("failed") || lowered.contains("empty") {
        return Err(ValidationError::ScrapeFailed);
    }

    if html.contains(CRASH_MARKER) {
        return Err(ValidationError::ClientSideCrash);
    }

    if html.len() < EMPTY_SHELL_MAX_LEN && html.contains(EMPTY_SHELL_MARKER) {
        return Err(ValidationError::EmptyShell);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn context_with_html(html: &str) -> ScrapedContext {
        ScrapedContext {
            original_url: "https://example.com".to_string(),
            simplified_html: html.to_string(),
            desktop_screenshot: Bytes::from_static(b"d"),
            mobile_screenshot: Bytes::from_static(b"m"),
        }
    }

    #[test]
    fn test_empty_html_is_scrape_failed() {
        assert_eq!(
            validate(&context_with_html("")),
            Err(ValidationError::ScrapeFailed)
        );
    }

    #[test]
    fn test_failed_marker_is_scrape_failed_any_case() {
        assert_eq!(
            validate(&context_with_html("<body>Scraping FAILED for this page</body>")),
            Err(ValidationError::ScrapeFailed)
        );
        assert_eq!(
            validate(&context_with_html("<body>the result was Empty</body>")),
            Err(ValidationError::ScrapeFailed)
        );
    }

    #[test]
    fn test_crash_marker_rejected_even_with_other_content() {
        let html = format!(
            "<body><nav>Home</nav>{CRASH_MARKER}<footer>2025</footer></body>"
        );
        assert_eq!(
            validate(&context_with_html(&html)),
            Err(ValidationError::ClientSideCrash)
        );
    }

    #[test]
    fn test_bare_root_div_is_empty_shell() {
        // exactly the 21-character shell, well under the length cutoff
        assert_eq!(
            validate(&context_with_html(r#"<div id="root"></div>"#)),
            Err(ValidationError::EmptyShell)
        );
    }

    #[test]
    fn test_root_div_with_substantial_content_is_accepted() {
        let padding = "<p>".to_string() + &"real content ".repeat(10) + "</p>";
        let html = format!(r#"<div id="root"></div>{padding}"#);
        assert!(html.len() >= EMPTY_SHELL_MAX_LEN);
        assert_eq!(validate(&context_with_html(&html)), Ok(()));
    }

    #[test]
    fn test_scrape_failed_takes_precedence_over_crash() {
        // "failed" sorts first in check order even when the crash marker is present
        let html = format!("scrape failed: {CRASH_MARKER}");
        assert_eq!(
            validate(&context_with_html(&html)),
            Err(ValidationError::ScrapeFailed)
        );
    }

    #[test]
    fn test_ordinary_page_is_accepted() {
        assert_eq!(
            validate(&context_with_html(
                "<body><header><h1>Acme Corp</h1></header><main><p>We build robots that build robots.</p></main></body>"
            )),
            Ok(())
        );
    }
}
