//! Candidate brochure URL resolution.
//!
//! Pure pattern substitution over a fixed template table — no network access.
//! An empty or exhausted candidate list is a normal outcome, signaled upward
//! as "no URL found", never an error.

use crate::config::ParkEntry;

/// The NPS URL template table. Immutable, constructed once at process start
/// and passed explicitly into the resolver. Tests substitute their own hosts.
#[derive(Debug, Clone)]
pub struct UrlTemplates {
    /// Primary host serving `nps.gov` content.
    pub primary_host: String,
    /// Mirror host (`home.nps.gov` in production).
    pub mirror_host: String,
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self {
            primary_host: "https://www.nps.gov".to_string(),
            mirror_host: "https://home.nps.gov".to_string(),
        }
    }
}

impl UrlTemplates {
    /// Ordered candidate brochure URLs for a park, built by substituting the
    /// park code and the hyphenated park name into the known NPS patterns.
    pub fn candidate_urls(&self, park: &ParkEntry) -> Vec<String> {
        if park.code.is_empty() || park.name.is_empty() {
            return Vec::new();
        }
        let slug = hyphenate(park.name);
        vec![
            format!(
                "{}/{}/planyourvisit/upload/{}-Brochure.pdf",
                self.primary_host, park.code, slug
            ),
            format!(
                "{}/{}/planyourvisit/upload/{}-brochure.pdf",
                self.primary_host, park.code, slug
            ),
            format!(
                "{}/{}/learn/upload/{}-Brochure.pdf",
                self.primary_host, park.code, slug
            ),
            format!(
                "{}/{}/planyourvisit/upload/{}-Brochure.pdf",
                self.mirror_host, park.code, slug
            ),
        ]
    }

    /// URL of the park's brochure index page, scanned by the index probe for
    /// direct PDF links before the template candidates are tried.
    pub fn index_page_url(&self, park: &ParkEntry) -> String {
        format!(
            "{}/{}/planyourvisit/brochures.htm",
            self.primary_host, park.code
        )
    }
}

/// Replace spaces with hyphens, the convention NPS upload paths use.
fn hyphenate(name: &str) -> String {
    name.replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    const YELLOWSTONE: ParkEntry = ParkEntry {
        code: "yell",
        name: "Yellowstone",
    };

    #[test]
    fn test_yellowstone_candidates_match_nps_templates() {
        let templates = UrlTemplates::default();
        let urls = templates.candidate_urls(&YELLOWSTONE);
        assert!(!urls.is_empty());
        assert_eq!(
            urls[0],
            "https://www.nps.gov/yell/planyourvisit/upload/Yellowstone-Brochure.pdf"
        );
        assert!(urls.iter().all(|u| u.ends_with(".pdf")));
        assert!(urls.iter().any(|u| u.starts_with("https://home.nps.gov/")));
    }

    #[test]
    fn test_multiword_name_is_hyphenated() {
        let templates = UrlTemplates::default();
        let park = ParkEntry {
            code: "grsm",
            name: "Great Smoky Mountains",
        };
        let urls = templates.candidate_urls(&park);
        assert!(urls[0].contains("Great-Smoky-Mountains-Brochure.pdf"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let templates = UrlTemplates::default();
        assert_eq!(
            templates.candidate_urls(&YELLOWSTONE),
            templates.candidate_urls(&YELLOWSTONE)
        );
    }

    #[test]
    fn test_blank_entry_yields_no_candidates() {
        let templates = UrlTemplates::default();
        let park = ParkEntry { code: "", name: "" };
        assert!(templates.candidate_urls(&park).is_empty());
    }

    #[test]
    fn test_index_page_url() {
        let templates = UrlTemplates::default();
        assert_eq!(
            templates.index_page_url(&YELLOWSTONE),
            "https://www.nps.gov/yell/planyourvisit/brochures.htm"
        );
    }
}
