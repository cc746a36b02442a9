//! Plain-text link extraction.
//!
//! Links are found with a simple `https?://` pattern that runs up to the next
//! whitespace character. Nothing is validated at this stage: truncated or
//! malformed matches are returned exactly as they appear in the text.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use url::Host;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedUrl {
    pub url: String,
    /// Raw authority, see [`domain_of`].
    pub domain: String,
}

pub struct UrlExtractor {
    url_regex: Regex,
}

impl Default for UrlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlExtractor {
    pub fn new() -> Self {
        Self {
            url_regex: Regex::new(r"https?://[^\s]+").expect("URL pattern is valid"),
        }
    }

    /// Every link in order of appearance, duplicates included.
    pub fn extract_urls(&self, text: &str) -> Vec<String> {
        self.url_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn extract(&self, text: &str) -> Vec<ExtractedUrl> {
        self.url_regex
            .find_iter(text)
            .map(|m| ExtractedUrl {
                url: m.as_str().to_string(),
                domain: domain_of(m.as_str()),
            })
            .collect()
    }
}

fn shared_extractor() -> &'static UrlExtractor {
    static EXTRACTOR: OnceLock<UrlExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(UrlExtractor::new)
}

pub fn extract_urls(text: &str) -> Vec<String> {
    shared_extractor().extract_urls(text)
}

/// Authority component of `url`, exactly as written.
///
/// This is everything between `://` and the first `/`, `?` or `#`, so userinfo,
/// ports and case are kept and IDNs are not encoded. The result is empty when
/// there is no `://`, when nothing follows it, or when the authority has
/// unbalanced brackets or a bracketed host that is not an IPv6 address.
pub fn domain_of(url: &str) -> String {
    let Some((_, rest)) = url.split_once("://") else {
        return String::new();
    };
    let authority = rest
        .find(['/', '?', '#'])
        .map_or(rest, |end| &rest[..end]);

    if !brackets_valid(authority) {
        log::debug!("No domain for URL with invalid bracketed host: {}", url);
        return String::new();
    }

    authority.to_string()
}

fn brackets_valid(authority: &str) -> bool {
    match (authority.find('['), authority.find(']')) {
        (None, None) => true,
        (Some(open), Some(close)) if open < close => {
            let literal = &authority[open..=close];
            matches!(Host::parse(literal), Ok(Host::Ipv6(_)))
        }
        _ => false,
    }
}
