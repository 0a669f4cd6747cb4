use scraper::{Html, Selector};

/// Project raw HTML down to its visible text, the way a browser's
/// `document.body.innerText` would — used as the extraction surface for
/// phones and addresses (social links are matched against the raw HTML).
pub fn body_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("body") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|el| {
            el.text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}
