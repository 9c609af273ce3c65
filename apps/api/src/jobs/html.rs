//! HTML page → plain job description text.
//!
//! The page is parsed with `scraper`; text nodes under script, style and
//! noscript elements are skipped, and each block element starts a new line.

use scraper::{ElementRef, Html, Selector};

const TITLE_SELECTORS: [&str; 3] = ["h1", "h2", "title"];
const CONTENT_SELECTORS: [&str; 5] = ["main", "article", "[role=\"main\"]", ".job-description", "body"];

const SKIPPED: [&str; 4] = ["script", "style", "noscript", "template"];
const BLOCKS: [&str; 16] = [
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "section", "header",
    "table", "dd",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub title: Option<String>,
    pub content: String,
}

/// Converts an HTML page to its title and readable content.
pub fn html_to_text(html: &str) -> PageText {
    let document = Html::parse_document(html);

    let title = TITLE_SELECTORS
        .iter()
        .find_map(|css| first_match(&document, css))
        .map(|el| collapse(&region_lines(el).join(" ")))
        .filter(|t| !t.is_empty());

    let content = CONTENT_SELECTORS
        .iter()
        .filter_map(|css| first_match(&document, css))
        .map(|el| region_lines(el).join("\n"))
        .find(|text| !text.is_empty())
        .unwrap_or_default();

    PageText { title, content }
}

fn first_match<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Readable lines under `region`, one per block element, list items bulleted.
fn region_lines(region: ElementRef<'_>) -> Vec<String> {
    // (enclosing block element, is list item, raw text)
    let mut blocks: Vec<(Option<ElementRef<'_>>, bool, String)> = Vec::new();

    for node in region.descendants() {
        let Some(text) = node.value().as_text().map(|t| &**t) else {
            continue;
        };
        let skipped = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|e| SKIPPED.contains(&e.value().name()));
        if skipped {
            continue;
        }

        let block = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|e| BLOCKS.contains(&e.value().name()));
        let is_item = block.is_some_and(|e| e.value().name() == "li");

        match blocks.last_mut() {
            Some((current, _, raw)) if *current == block => raw.push_str(text),
            _ => blocks.push((block, is_item, text.to_string())),
        }
    }

    blocks
        .into_iter()
        .filter_map(|(_, is_item, raw)| {
            let line = collapse(&raw);
            match (line.is_empty(), is_item) {
                (true, _) => None,
                (false, true) => Some(format!("- {line}")),
                (false, false) => Some(line),
            }
        })
        .collect()
}

/// Collapses all whitespace runs (including non-breaking spaces) to one space.
fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>Careers | Acme</title>
        <style>body { color: red; }</style>
        <script>var tracking = "<p>not content</p>";</script></head>
        <body><nav>Home Jobs</nav>
        <main>
          <h1>Backend   Engineer</h1>
          <p>Build APIs in <b>Rust</b> &amp; Go.</p>
          <ul><li>5+ years experience</li><li>Kubernetes</li></ul>
        </main>
        <footer>Cookie policy</footer></body></html>"#;

    #[test]
    fn test_prefers_main_region() {
        let page = html_to_text(PAGE);
        assert_eq!(page.title.as_deref(), Some("Backend Engineer"));
        assert!(page.content.contains("Build APIs in Rust & Go."));
        assert!(page.content.contains("- 5+ years experience"));
        assert!(page.content.contains("- Kubernetes"));
        assert!(!page.content.contains("Cookie policy"));
        assert!(!page.content.contains("Home Jobs"));
    }

    #[test]
    fn test_scripts_and_styles_are_removed() {
        let page = html_to_text(PAGE);
        assert!(!page.content.contains("tracking"));
        assert!(!page.content.contains("color: red"));
        assert!(!page.content.contains("not content"));
    }

    #[test]
    fn test_falls_back_to_title_and_body() {
        let page = html_to_text(
            "<html><head><title>Data Analyst</title></head><body><div>SQL and Excel</div></body></html>",
        );
        assert_eq!(page.title.as_deref(), Some("Data Analyst"));
        assert_eq!(page.content, "SQL and Excel");
    }

    #[test]
    fn test_h2_is_used_before_document_title() {
        let page = html_to_text(
            "<html><head><title>Jobs</title></head><body><h2>Platform Engineer</h2><p>Go</p></body></html>",
        );
        assert_eq!(page.title.as_deref(), Some("Platform Engineer"));
    }

    #[test]
    fn test_job_description_class_region() {
        let page = html_to_text(
            r#"<body><nav>Menu</nav><div class="job-description"><p>Write Terraform modules.</p></div></body>"#,
        );
        assert_eq!(page.content, "Write Terraform modules.");
    }

    #[test]
    fn test_attributes_stay_out_and_named_entities_decode() {
        let page = html_to_text(
            r#"<main><a title="x>y" href="/apply">Apply</a><p>Caf&eacute; team needs help&hellip; &ndash; now&nbsp;hiring</p></main>"#,
        );
        assert!(!page.content.contains("href"));
        assert!(!page.content.contains("x>y"));
        assert!(page.content.contains("Apply"));
        assert!(page.content.contains("Café team needs help… – now hiring"));
    }
}
