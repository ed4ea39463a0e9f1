use bytes::Bytes;

/// Everything the scraping service captured for one URL: the cleaned body
/// HTML plus paired desktop/mobile screenshots.
///
/// Owned by a single pipeline run and never persisted. The screenshots are
/// raw PNG bytes; they are only re-encoded to base64 at wire boundaries.
#[derive(Debug, Clone)]
pub struct ScrapedContext {
    pub original_url: String,
    pub simplified_html: String,
    pub desktop_screenshot: Bytes,
    pub mobile_screenshot: Bytes,
}
