//! Pure, deterministic normalizers. No I/O; all return `None` on empty input.

use addr::parse_domain_name;
use once_cell::sync::Lazy;
use regex::Regex;

static FB_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"^facebook\.com/profile\.php\?id=(\d+)").unwrap(),
        Regex::new(r"^facebook\.com/([a-zA-Z0-9._\-]+)").unwrap(),
        Regex::new(r"^fb\.com/([a-zA-Z0-9._\-]+)").unwrap(),
    ]
});

/// Canonicalize a URL or bare host to a registrable domain: scheme is assumed
/// `http://` if missing, `www.` is dropped, and an eTLD-aware split is used
/// when the host resolves against the public suffix list; otherwise the raw
/// host is used verbatim.
pub fn domain(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let host = url::Url::parse(&with_scheme)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))?;

    let host = host
        .trim_matches('.')
        .trim()
        .to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    if host.is_empty() {
        return None;
    }

    match parse_domain_name(&host) {
        Ok(parsed) => Some(parsed.root().map(|r| r.to_string()).unwrap_or(host)),
        Err(_) => Some(host),
    }
}

/// Strip all non-digit characters except a single leading `+`, drop that `+`,
/// then keep only the last 10 digits when longer. Returns `None` below the
/// minimum viable length.
pub fn phone(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    let mut digits = String::new();
    for (i, c) in raw.trim().chars().enumerate() {
        if c == '+' && i == 0 {
            continue;
        }
        if c.is_ascii_digit() {
            digits.push(c);
        }
    }

    if digits.len() > 10 {
        digits = digits[digits.len() - 10..].to_string();
    }

    if digits.len() < 8 {
        return None;
    }
    Some(digits)
}

/// Lowercase, strip scheme + `www.`, then extract the facebook handle from
/// `facebook.com/<handle>`, `fb.com/<handle>`, or `facebook.com/profile.php?id=<digits>`.
/// Falls back to the stripped string when no pattern matches.
pub fn facebook(url: &str) -> Option<String> {
    if url.trim().is_empty() {
        return None;
    }

    let lower = url.trim().to_lowercase();
    let stripped = lower
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let stripped = stripped.strip_prefix("www.").unwrap_or(stripped);

    for pattern in FB_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(stripped) {
            return Some(caps[1].to_lowercase());
        }
    }

    Some(stripped.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_strips_scheme_and_www() {
        assert_eq!(domain("https://WWW.acme.com/about"), Some("acme.com".to_string()));
        assert_eq!(domain("acme.com"), Some("acme.com".to_string()));
    }

    #[test]
    fn domain_is_idempotent_for_bare_host() {
        let d = domain("https://www.acme.com").unwrap();
        for prefix in ["http://", "https://www."] {
            assert_eq!(domain(&format!("{}{}", prefix, d)), Some(d.clone()));
        }
    }

    #[test]
    fn domain_empty_is_none() {
        assert_eq!(domain(""), None);
        assert_eq!(domain("   "), None);
    }

    #[test]
    fn phone_strips_punctuation_and_takes_last_ten() {
        assert_eq!(phone("+1 (415) 555-0123"), Some("4155550123".to_string()));
        assert_eq!(phone("415-555-0123"), Some("4155550123".to_string()));
    }

    #[test]
    fn phone_is_idempotent() {
        let n = phone("+1 (415) 555-0123").unwrap();
        assert_eq!(phone(&n), Some(n));
    }

    #[test]
    fn phone_below_minimum_is_none() {
        assert_eq!(phone("12345"), None);
    }

    #[test]
    fn facebook_extracts_handle_case_insensitively() {
        assert_eq!(facebook("https://facebook.com/Acme"), Some("acme".to_string()));
        assert_eq!(facebook("https://www.facebook.com/AcmeCo/"), Some("acmeco".to_string()));
    }

    #[test]
    fn facebook_handles_fb_dot_com_and_profile_php() {
        assert_eq!(facebook("fb.com/Acme"), Some("acme".to_string()));
        assert_eq!(
            facebook("facebook.com/profile.php?id=100044"),
            Some("100044".to_string())
        );
    }

    #[test]
    fn facebook_falls_back_to_stripped_url() {
        assert_eq!(facebook("https://www.example.org/nope"), Some("example.org/nope".to_string()));
    }
}
