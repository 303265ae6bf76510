//! Brochure index page probe.
//!
//! Each park publishes a `planyourvisit/brochures.htm` page that usually
//! links the current brochure PDF directly. Scanning it first beats guessing
//! upload paths, so the first PDF link found here is prepended to the
//! template candidates. Any failure is silent — the templates remain.

use regex::Regex;
use tracing::debug;
use url::Url;

use super::http_client::HttpClient;

/// Fetch the index page and return the first PDF link on it, resolved to an
/// absolute URL. Returns `None` on any failure.
pub async fn discover_brochure_link(client: &HttpClient, index_url: &str) -> Option<String> {
    let resp = match client.get(index_url).await {
        Ok(r) => r,
        Err(e) => {
            debug!("index probe failed for {index_url}: {e}");
            return None;
        }
    };
    if !resp.is_success() {
        debug!("index probe for {index_url} returned {}", resp.status);
        return None;
    }
    first_pdf_href(&resp.body_text(), &resp.final_url)
}

/// Scan HTML for `href="...pdf"` attributes and resolve the first hit
/// against the page URL.
fn first_pdf_href(html: &str, page_url: &str) -> Option<String> {
    let href_re = Regex::new(r#"href="([^"]*\.pdf)""#).expect("pdf href regex is valid");
    let link = href_re.captures(html)?.get(1)?.as_str();
    resolve_link(page_url, link)
}

/// Resolve a possibly relative link against the page it appeared on.
fn resolve_link(page_url: &str, link: &str) -> Option<String> {
    if link.starts_with("http://") || link.starts_with("https://") {
        return Some(link.to_string());
    }
    let base = Url::parse(page_url).ok()?;
    base.join(link).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.nps.gov/yell/planyourvisit/brochures.htm";

    #[test]
    fn test_first_pdf_href_absolute() {
        let html = r#"<p><a href="https://www.nps.gov/yell/upload/map.pdf">Map</a></p>"#;
        assert_eq!(
            first_pdf_href(html, PAGE_URL),
            Some("https://www.nps.gov/yell/upload/map.pdf".to_string())
        );
    }

    #[test]
    fn test_first_pdf_href_root_relative() {
        let html = r#"<a href="/yell/planyourvisit/upload/Yellowstone-Brochure.pdf">Brochure</a>"#;
        assert_eq!(
            first_pdf_href(html, PAGE_URL),
            Some(
                "https://www.nps.gov/yell/planyourvisit/upload/Yellowstone-Brochure.pdf"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_first_pdf_href_page_relative() {
        let html = r#"<a href="upload/trails.pdf">Trails</a>"#;
        assert_eq!(
            first_pdf_href(html, PAGE_URL),
            Some("https://www.nps.gov/yell/planyourvisit/upload/trails.pdf".to_string())
        );
    }

    #[test]
    fn test_first_of_several_links_wins() {
        let html = r#"
            <a href="/yell/upload/first.pdf">one</a>
            <a href="/yell/upload/second.pdf">two</a>
        "#;
        let link = first_pdf_href(html, PAGE_URL).unwrap();
        assert!(link.ends_with("/first.pdf"));
    }

    #[test]
    fn test_no_pdf_links() {
        let html = r#"<a href="/yell/planyourvisit/maps.htm">Maps</a>"#;
        assert_eq!(first_pdf_href(html, PAGE_URL), None);
        assert_eq!(first_pdf_href("", PAGE_URL), None);
    }
}
