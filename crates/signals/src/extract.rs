//! Regex-based extractors. Pure functions over raw HTML or its text projection.

use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?[\d\s\-()]{8,20}").unwrap());

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\d+\s+[A-Za-z\s,.]+(?:Avenue|Lane|Road|Boulevard|Drive|Street|Ave|Ln|Rd|Blvd|Dr|St)[,\s.]+[A-Za-z\s]+,\s*[A-Z]{2}\s*\d{5}",
    )
    .unwrap()
});

#[derive(Debug, Clone, Default)]
pub struct SocialLinks {
    pub facebook: Vec<String>,
    pub twitter: Vec<String>,
    pub instagram: Vec<String>,
    pub linkedin: Vec<String>,
    pub youtube: Vec<String>,
}

/// Find phone-shaped substrings, strip non-digits (keeping a leading `+`),
/// accept matches with >= 8 digits, and deduplicate.
pub fn phones(text: &str) -> Vec<String> {
    let mut found: Vec<String> = PHONE_RE
        .find_iter(text)
        .filter_map(|m| {
            let raw = m.as_str();
            let mut cleaned = String::new();
            for (i, c) in raw.chars().enumerate() {
                if (c == '+' && i == 0) || c.is_ascii_digit() {
                    cleaned.push(c);
                }
            }
            let digit_count = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
            (digit_count >= 8).then_some(cleaned)
        })
        .collect();
    found.sort();
    found.dedup();
    found
}

/// Find and deduplicate per-platform social links against the raw HTML.
pub fn social_media(html: &str) -> SocialLinks {
    static FACEBOOK_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"facebook\.com/[A-Za-z0-9._\-]+").unwrap());
    static TWITTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"twitter\.com/[A-Za-z0-9_]+").unwrap());
    static INSTAGRAM_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"instagram\.com/[A-Za-z0-9._\-]+").unwrap());
    static LINKEDIN_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"linkedin\.com/(?:company|in)/[A-Za-z0-9._\-]+").unwrap());
    static YOUTUBE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"youtube\.com/(?:user|channel)/[A-Za-z0-9._\-]+").unwrap());

    SocialLinks {
        facebook: find_unique(&FACEBOOK_RE, html),
        twitter: find_unique(&TWITTER_RE, html),
        instagram: find_unique(&INSTAGRAM_RE, html),
        linkedin: find_unique(&LINKEDIN_RE, html),
        youtube: find_unique(&YOUTUBE_RE, html),
    }
}

/// Best-effort US street-address extraction. Brittle by design (§ Design Notes).
pub fn addresses(text: &str) -> Vec<String> {
    find_unique(&ADDRESS_RE, text)
}

fn find_unique(re: &Regex, text: &str) -> Vec<String> {
    let mut found: Vec<String> = re.find_iter(text).map(|m| m.as_str().to_string()).collect();
    found.sort();
    found.dedup();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phones_extracts_and_normalizes_digits() {
        let text = "Call +1 415-555-0123 or (628) 555-9999";
        let mut got = phones(text);
        got.sort();
        let mut want = vec!["+14155550123".to_string(), "6285559999".to_string()];
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn phones_rejects_short_matches() {
        assert!(phones("ext 123").is_empty());
    }

    #[test]
    fn social_media_finds_each_platform() {
        let html = r#"<a href="https://facebook.com/acme.co">fb</a>
            <a href="https://twitter.com/acme_hq">tw</a>
            <a href="https://linkedin.com/company/acme">li</a>"#;
        let links = social_media(html);
        assert_eq!(links.facebook, vec!["facebook.com/acme.co".to_string()]);
        assert_eq!(links.twitter, vec!["twitter.com/acme_hq".to_string()]);
        assert_eq!(links.linkedin, vec!["linkedin.com/company/acme".to_string()]);
        assert!(links.instagram.is_empty());
    }

    #[test]
    fn addresses_matches_street_plus_zip() {
        let text = "Visit us at 123 Main Street, Springfield, IL 62704 for details.";
        assert_eq!(
            addresses(text),
            vec!["123 Main Street, Springfield, IL 62704".to_string()]
        );
    }
}
