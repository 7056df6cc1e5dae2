use serde::{Deserialize, Serialize};

/// One crawled page's extracted content
///
/// Produced by the crawl/readability step and persisted as one JSON file per
/// page. `url` is the natural key; duplicates are not removed here.
/// Unrecognized keys are rejected when a record is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageRecord {
    pub title: String,
    pub url: String,
    /// HTML fragment of the readable article body
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub text_content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub byline: String,
    #[serde(default)]
    pub site_name: String,
}

impl PageRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: String::new(),
            text_content: String::new(),
            excerpt: String::new(),
            byline: String::new(),
            site_name: String::new(),
        }
    }

    #[must_use]
    pub fn with_content(mut self, html: impl Into<String>) -> Self {
        self.content = html.into();
        self
    }

    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    #[must_use]
    pub fn with_byline(mut self, byline: impl Into<String>) -> Self {
        self.byline = byline.into();
        self
    }

    #[must_use]
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    /// Compact JSON form used for byte and token accounting
    pub fn to_compact_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default_to_empty() {
        let record: PageRecord =
            serde_json::from_str(r#"{"title": "Intro", "url": "https://x/intro"}"#).unwrap();

        assert_eq!(record, PageRecord::new("Intro", "https://x/intro"));
    }

    #[test]
    fn test_camel_case_keys() {
        let record: PageRecord = serde_json::from_str(
            r#"{"title": "A", "url": "https://x/a", "textContent": "t", "siteName": "X"}"#,
        )
        .unwrap();
        assert_eq!(record.text_content, "t");
        assert_eq!(record.site_name, "X");

        let json = record.to_compact_json().unwrap();
        assert!(json.contains(r#""textContent":"t""#));
        assert!(json.contains(r#""siteName":"X""#));
    }

    #[test]
    fn test_rejects_unknown_and_missing_fields() {
        assert!(
            serde_json::from_str::<PageRecord>(
                r#"{"title": "A", "url": "https://x/a", "html": "<p></p>"}"#
            )
            .is_err()
        );
        assert!(serde_json::from_str::<PageRecord>(r#"{"title": "A"}"#).is_err());
    }
}
