use url::Url;

use super::*;

fn base() -> Url {
    Url::parse("https://example.test/").unwrap()
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

#[test]
fn normalize_resolves_relative_path() {
    let resolved = normalize("/legal/privacy", &base()).unwrap();
    assert_eq!(resolved.as_str(), "https://example.test/legal/privacy");
}

#[test]
fn normalize_resolves_protocol_relative() {
    let resolved = normalize("//other.test/privacy", &base()).unwrap();
    assert_eq!(resolved.as_str(), "https://other.test/privacy");
}

#[test]
fn normalize_keeps_absolute_url_unchanged() {
    let resolved = normalize("https://other.test/privacy-policy", &base()).unwrap();
    assert_eq!(resolved.as_str(), "https://other.test/privacy-policy");
}

#[test]
fn normalize_rejects_empty_href() {
    assert!(normalize("", &base()).is_none());
    assert!(normalize("   ", &base()).is_none());
}

#[test]
fn normalize_rejects_fragment_only_href() {
    assert!(normalize("#main", &base()).is_none());
}

#[test]
fn normalize_rejects_non_navigable_schemes() {
    assert!(normalize("javascript:void(0)", &base()).is_none());
    assert!(normalize("mailto:dpo@example.test", &base()).is_none());
    assert!(normalize("tel:+15551234", &base()).is_none());
    assert!(normalize("ftp://example.test/file", &base()).is_none());
}

#[test]
fn normalize_strips_fragment_from_resolved_url() {
    let resolved = normalize("/privacy#data-we-collect", &base()).unwrap();
    assert_eq!(resolved.as_str(), "https://example.test/privacy");
}

// ---------------------------------------------------------------------------
// is_valid_candidate
// ---------------------------------------------------------------------------

#[test]
fn candidate_accepts_privacy_policy_path() {
    let url = Url::parse("https://example.test/privacy-policy").unwrap();
    assert!(is_valid_candidate(&url));
}

#[test]
fn candidate_rejects_blacklisted_segments() {
    for path in ["/careers/list", "/blog/post-1", "/contact", "/cart", "/press/2024"] {
        let url = base().join(path).unwrap();
        assert!(!is_valid_candidate(&url), "expected {path} to be rejected");
    }
}

#[test]
fn candidate_blacklist_matches_whole_segments_only() {
    // "newsletter" contains "news" but is not the segment "news".
    let url = Url::parse("https://example.test/newsletter-privacy").unwrap();
    assert!(is_valid_candidate(&url));
}

// ---------------------------------------------------------------------------
// is_privacy_related / href_matches_keyword
// ---------------------------------------------------------------------------

#[test]
fn privacy_related_matches_anchor_text() {
    assert!(is_privacy_related("Privacy Policy", "/p/123", "", ""));
}

#[test]
fn privacy_related_matches_aria_label() {
    assert!(is_privacy_related("", "/p/123", "", "our cookie policy"));
}

#[test]
fn privacy_related_matches_hyphenated_href() {
    assert!(is_privacy_related("", "/legal/privacy-policy", "", ""));
    assert!(is_privacy_related("", "/legal/privacy_policy", "", ""));
}

#[test]
fn privacy_related_is_case_insensitive() {
    assert!(is_privacy_related("GDPR Information", "/x", "", ""));
}

#[test]
fn privacy_related_rejects_unrelated_link() {
    assert!(!is_privacy_related("Our Team", "/team", "Meet the team", ""));
}

#[test]
fn href_keyword_matching_normalizes_separators() {
    assert!(href_matches_keyword("/data-protection"));
    assert!(!href_matches_keyword("/shipping-info"));
}

// ---------------------------------------------------------------------------
// same_host / crawl filters
// ---------------------------------------------------------------------------

#[test]
fn same_host_requires_exact_host_equality() {
    let a = Url::parse("https://example.test/a").unwrap();
    let b = Url::parse("https://example.test/b").unwrap();
    let sub = Url::parse("https://legal.example.test/privacy").unwrap();
    assert!(same_host(&a, &b));
    assert!(!same_host(&a, &sub));
}

#[test]
fn crawl_worthy_rejects_denied_routes_and_assets() {
    for path in ["/login", "/cart", "/api/v1/users", "/admin/panel", "/logo.png", "/app.js"] {
        let url = base().join(path).unwrap();
        assert!(!is_crawl_worthy(&url), "expected {path} to be rejected");
    }
}

#[test]
fn crawl_worthy_accepts_informational_routes() {
    for path in ["/about", "/legal/terms", "/help/faq", "/company"] {
        let url = base().join(path).unwrap();
        assert!(is_crawl_worthy(&url), "expected {path} to be accepted");
    }
}

#[test]
fn crawl_priority_prefers_allow_listed_routes() {
    let legal = base().join("/legal/terms").unwrap();
    let misc = base().join("/gallery").unwrap();
    assert!(crawl_priority(&legal) < crawl_priority(&misc));
}
