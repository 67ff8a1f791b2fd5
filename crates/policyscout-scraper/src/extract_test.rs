use url::Url;

use super::*;

fn policy_url() -> Url {
    Url::parse("https://example.test/privacy-policy").unwrap()
}

/// Builds a filler sentence of at least `len` ASCII characters.
fn filler(len: usize) -> String {
    "We process personal information in accordance with applicable law. "
        .repeat(len / 60 + 1)
}

// ---------------------------------------------------------------------------
// Strategy 1 — known content containers
// ---------------------------------------------------------------------------

#[test]
fn extracts_main_container_when_long_enough() {
    let html = format!(
        "<html><body><nav>Home About Contact</nav><main>{}</main></body></html>",
        filler(600)
    );
    let page = extract(&html, &policy_url());
    assert!(page.text.len() > 500);
    assert!(page.text.contains("personal information"));
    assert!(!page.text.contains("Home About Contact"));
}

#[test]
fn skips_short_main_and_falls_through() {
    let html = format!(
        "<html><body><main>Too short.</main><div class=\"privacy-wrapper\">{}</div></body></html>",
        filler(700)
    );
    let page = extract(&html, &policy_url());
    assert!(page.text.len() > 500, "expected heuristic container to win");
}

// ---------------------------------------------------------------------------
// Strategy 2 — heuristic containers
// ---------------------------------------------------------------------------

#[test]
fn heuristic_container_matches_on_class_name() {
    let html = format!(
        "<html><body><div class=\"legal-text-block\">{}</div></body></html>",
        filler(700)
    );
    let page = extract(&html, &policy_url());
    assert!(page.text.contains("personal information"));
}

#[test]
fn heuristic_container_matches_on_indicator_text() {
    // No telling class name; qualifies via "we collect" in the prose.
    let body = format!("Details about what we collect from you. {}", filler(600));
    let html = format!("<html><body><div class=\"wrapper\">{body}</div></body></html>");
    let page = extract(&html, &policy_url());
    assert!(page.text.len() > 500);
}

// ---------------------------------------------------------------------------
// Strategies 3-5 — structured and last-resort fallbacks
// ---------------------------------------------------------------------------

#[test]
fn table_fallback_used_for_cookie_tables() {
    let rows: String = (0..30)
        .map(|i| format!("<tr><td>cookie_{i}</td><td>Tracks session state for personal information handling</td></tr>"))
        .collect();
    let html = format!("<html><body><p>hi</p><table>{rows}</table></body></html>");
    let page = extract(&html, &policy_url());
    assert!(page.text.contains("cookie_0"));
    assert!(page.text.len() > 500);
}

#[test]
fn paragraph_fallback_concatenates_substantial_paragraphs() {
    let para = "This paragraph explains how your personal information is handled by us.";
    let html = format!(
        "<html><body>{}</body></html>",
        format!("<p>{para}</p>").repeat(8)
    );
    let page = extract(&html, &policy_url());
    assert!(page.text.matches("personal information").count() >= 8);
}

#[test]
fn contentless_document_yields_best_effort_text() {
    // Nothing qualifies; the longest raw fallback is handed back for the
    // validator to reject.
    let html = "<html><body><p>Hi.</p><p>Ok.</p></body></html>";
    let page = extract(html, &policy_url());
    assert!(page.text.len() < 300);
}

// ---------------------------------------------------------------------------
// Chrome stripping and text cleanup
// ---------------------------------------------------------------------------

#[test]
fn strips_scripts_and_cookie_banners() {
    let html = format!(
        "<html><body><main><div class=\"cookie-banner\">Accept all cookies</div>\
         <script>var x = 1;</script>{}</main></body></html>",
        filler(600)
    );
    let page = extract(&html, &policy_url());
    assert!(!page.text.contains("Accept all cookies"));
    assert!(!page.text.contains("var x"));
}

#[test]
fn clean_text_collapses_whitespace_and_drops_non_ascii() {
    let cleaned = clean_text("hello\n\n  world\t\u{2013} caf\u{e9}");
    assert_eq!(cleaned, "hello world caf");
}

// ---------------------------------------------------------------------------
// Title resolution
// ---------------------------------------------------------------------------

#[test]
fn title_comes_from_title_tag_with_suffix_stripped() {
    let html = "<html><head><title>Privacy Policy | Acme Corp</title></head><body></body></html>";
    let page = extract(html, &policy_url());
    assert_eq!(page.title, "Privacy Policy");
}

#[test]
fn title_strips_dash_separated_site_name() {
    let html = "<html><head><title>Privacy Notice - Acme</title></head><body></body></html>";
    let page = extract(html, &policy_url());
    assert_eq!(page.title, "Privacy Notice");
}

#[test]
fn title_falls_back_to_h1() {
    let html = "<html><body><h1>Data Protection Statement</h1></body></html>";
    let page = extract(html, &policy_url());
    assert_eq!(page.title, "Data Protection Statement");
}

#[test]
fn title_defaults_from_path_when_document_has_none() {
    let page = extract("<html><body></body></html>", &policy_url());
    assert_eq!(page.title, "Privacy Policy");

    let cookie_url = Url::parse("https://example.test/cookie-policy").unwrap();
    let page = extract("<html><body></body></html>", &cookie_url);
    assert_eq!(page.title, "Cookie Policy");

    let terms_url = Url::parse("https://example.test/terms").unwrap();
    let page = extract("<html><body></body></html>", &terms_url);
    assert_eq!(page.title, "Terms of Service");
}
