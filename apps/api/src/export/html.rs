//! Standalone HTML renderer with per-template embedded CSS.

use super::document::Block;
use crate::generation::templates::TemplateId;

const BASE_CSS: &str = "
* { margin: 0; padding: 0; box-sizing: border-box; }
body { max-width: 8.5in; margin: 0 auto; padding: 0.6in 0.75in; line-height: 1.4; color: #111; }
header { margin-bottom: 12px; }
h1 { font-size: 22pt; }
.headline { font-size: 12pt; margin-top: 2px; }
.contact { font-size: 9.5pt; margin-top: 4px; }
.profile { margin-top: 8px; }
section { margin-top: 12px; }
h2 { font-size: 11.5pt; text-transform: uppercase; letter-spacing: 0.5px; margin-bottom: 6px; }
.entry-title { display: flex; justify-content: space-between; font-weight: bold; margin-top: 6px; }
.subtitle { font-style: italic; }
ul { margin: 3px 0 0 18px; }
li { margin-bottom: 2px; }
.skills .label { font-weight: bold; }
@media print { body { padding: 0; } }
";

fn template_css(template: TemplateId) -> &'static str {
    match template {
        TemplateId::AtsModern => "
body { font-family: Helvetica, Arial, sans-serif; font-size: 10.5pt; }
h2 { border-bottom: 1px solid #111; padding-bottom: 2px; }
",
        TemplateId::TechFocused => "
body { font-family: 'Segoe UI', Helvetica, Arial, sans-serif; font-size: 10pt; }
h1 { color: #1f3a5f; }
h2 { color: #1f3a5f; border-bottom: 2px solid #1f3a5f; padding-bottom: 2px; }
.skills p { margin-bottom: 2px; }
",
        TemplateId::ClassicProfessional => "
body { font-family: Georgia, 'Times New Roman', serif; font-size: 11pt; }
header { text-align: center; }
h2 { border-top: 1px solid #444; border-bottom: 1px solid #444; padding: 2px 0; text-align: center; }
",
    }
}

/// Escapes text for element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html(blocks: &[Block], template: TemplateId) -> String {
    let title = blocks
        .iter()
        .find_map(|b| match b {
            Block::Name(name) => Some(name.as_str()),
            _ => None,
        })
        .unwrap_or("Résumé");

    let mut body = String::new();
    let mut in_header = true;
    let mut in_section = false;
    let mut in_list = false;

    body.push_str("<header>\n");
    for block in blocks {
        if in_list && !matches!(block, Block::Bullet(_)) {
            body.push_str("</ul>\n");
            in_list = false;
        }

        match block {
            Block::Name(name) => body.push_str(&format!("<h1>{}</h1>\n", escape_html(name))),
            Block::Headline(text) => {
                body.push_str(&format!("<div class=\"headline\">{}</div>\n", escape_html(text)))
            }
            Block::Contact(items) => {
                let joined = items.iter().map(|i| escape_html(i)).collect::<Vec<_>>().join(" | ");
                body.push_str(&format!("<div class=\"contact\">{joined}</div>\n"));
            }
            Block::ProfileLine(text) => {
                body.push_str(&format!("<p class=\"profile\">{}</p>\n", escape_html(text)))
            }
            Block::Heading(heading) => {
                if in_header {
                    body.push_str("</header>\n");
                    in_header = false;
                }
                if in_section {
                    body.push_str("</section>\n");
                }
                let class = heading.to_lowercase().replace(' ', "-");
                let class = if class.ends_with("skills") { "skills" } else { class.as_str() };
                body.push_str(&format!(
                    "<section class=\"{class}\">\n<h2>{}</h2>\n",
                    escape_html(heading)
                ));
                in_section = true;
            }
            Block::Paragraph(text) => body.push_str(&format!("<p>{}</p>\n", escape_html(text))),
            Block::LabeledList { label, items } => {
                let joined = items.iter().map(|i| escape_html(i)).collect::<Vec<_>>().join(", ");
                body.push_str(&format!(
                    "<p><span class=\"label\">{}:</span> {joined}</p>\n",
                    escape_html(label)
                ));
            }
            Block::EntryTitle { text, dates } => {
                let dates = dates
                    .as_deref()
                    .map(|d| format!("<span class=\"dates\">{}</span>", escape_html(d)))
                    .unwrap_or_default();
                body.push_str(&format!(
                    "<div class=\"entry-title\"><span>{}</span>{dates}</div>\n",
                    escape_html(text)
                ));
            }
            Block::Subtitle(text) => {
                body.push_str(&format!("<div class=\"subtitle\">{}</div>\n", escape_html(text)))
            }
            Block::Bullet(text) => {
                if !in_list {
                    body.push_str("<ul>\n");
                    in_list = true;
                }
                body.push_str(&format!("<li>{}</li>\n", escape_html(text)));
            }
        }
    }
    if in_list {
        body.push_str("</ul>\n");
    }
    if in_header {
        body.push_str("</header>\n");
    }
    if in_section {
        body.push_str("</section>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} - Résumé</title>\n<style>{}{}</style>\n</head>\n\
         <body class=\"template-{}\">\n{}</body>\n</html>\n",
        escape_html(title),
        BASE_CSS,
        template_css(template),
        template.as_str(),
        body
    )
}
