//! Plain-text renderer.

use super::document::Block;

const BULLET: &str = "- ";

pub fn render_text(blocks: &[Block]) -> String {
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::Name(name) => {
                let upper = name.to_uppercase();
                out.push_str(&upper);
                out.push('\n');
                out.push_str(&"=".repeat(upper.chars().count()));
                out.push('\n');
            }
            Block::Headline(headline) => {
                out.push_str(headline);
                out.push('\n');
            }
            Block::Contact(items) => {
                out.push_str(&items.join(" | "));
                out.push('\n');
            }
            Block::ProfileLine(text) => {
                out.push('\n');
                out.push_str(text);
                out.push('\n');
            }
            Block::Heading(heading) => {
                let upper = heading.to_uppercase();
                out.push('\n');
                out.push_str(&upper);
                out.push('\n');
                out.push_str(&"-".repeat(upper.chars().count()));
                out.push('\n');
            }
            Block::Paragraph(text) => {
                out.push_str(text);
                out.push('\n');
            }
            Block::LabeledList { label, items } => {
                out.push_str(&format!("{label}: {}\n", items.join(", ")));
            }
            Block::EntryTitle { text, dates } => {
                match dates {
                    Some(dates) => out.push_str(&format!("{text} | {dates}\n")),
                    None => out.push_str(&format!("{text}\n")),
                }
            }
            Block::Subtitle(text) => {
                out.push_str(text);
                out.push('\n');
            }
            Block::Bullet(text) => {
                out.push_str(BULLET);
                out.push_str(text);
                out.push('\n');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_upper_case_and_underlined() {
        let text = render_text(&[
            Block::Name("Jane Doe".to_string()),
            Block::Contact(vec!["jane@example.com".to_string(), "Austin, TX".to_string()]),
        ]);
        assert_eq!(text, "JANE DOE\n========\njane@example.com | Austin, TX\n");
    }

    #[test]
    fn test_entry_and_bullets() {
        let text = render_text(&[
            Block::Heading("Professional Experience"),
            Block::EntryTitle {
                text: "Engineer".to_string(),
                dates: Some("2019 - 2021".to_string()),
            },
            Block::Subtitle("Initech".to_string()),
            Block::Bullet("Shipped things".to_string()),
        ]);
        assert!(text.contains("PROFESSIONAL EXPERIENCE\n-----------------------\n"));
        assert!(text.contains("Engineer | 2019 - 2021\nInitech\n- Shipped things\n"));
    }
}
