//! # Rendering Module
//!
//! Turns a [`CmdResult`] into the string the CLI prints. `text` is styled with
//! `console` (colors are dropped automatically when stdout isn't a terminal);
//! `json` and `yaml` serialize the whole result for scripts.

use super::setup::OutputFormat;
use console::Style;
use setsapp::commands::{CmdMessage, CmdResult, DisplayDoc, MessageLevel};

pub mod styles {
    use console::Style;

    pub fn name() -> Style {
        Style::new().bold()
    }

    pub fn muted() -> Style {
        Style::new().color256(244)
    }

    pub fn success() -> Style {
        Style::new().green()
    }

    pub fn warning() -> Style {
        Style::new().yellow().bold()
    }
}

pub fn render(result: &CmdResult, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(result)?),
        OutputFormat::Yaml => serde_yaml::to_string(result)?,
    })
}

fn render_text(result: &CmdResult) -> String {
    let mut out = String::new();
    for doc in result.affected_docs.iter().chain(&result.listed_docs) {
        out.push_str(&doc_line(doc));
        out.push('\n');
    }
    for value in &result.values {
        out.push_str(&format!("  {}\n", styles::name().apply_to(value)));
    }
    for message in &result.messages {
        out.push_str(&message_line(message));
        out.push('\n');
    }
    out
}

fn doc_line(doc: &DisplayDoc) -> String {
    format!(
        "  {}  {}",
        styles::name().apply_to(doc.name()),
        styles::muted().apply_to(&doc.doc.path)
    )
}

fn message_line(message: &CmdMessage) -> String {
    let style: Style = match message.level {
        MessageLevel::Info => styles::muted(),
        MessageLevel::Success => styles::success(),
        MessageLevel::Warning => styles::warning(),
    };
    style.apply_to(&message.content).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use setsapp::model::Document;
    use setsapp::store::memory::InMemoryVault;

    fn sample() -> CmdResult {
        let vault = InMemoryVault::new();
        let mut result = CmdResult::default().with_listed_docs(vec![DisplayDoc::new(
            &vault,
            Document::new("books/Dune.md").with_attr("type", "book"),
        )]);
        result.add_message(CmdMessage::info("1 document"));
        result
    }

    #[test]
    fn text_lists_names_paths_and_messages() {
        console::set_colors_enabled(false);
        let out = render(&sample(), OutputFormat::Text).unwrap();
        assert_eq!(out, "  Dune  books/Dune.md\n1 document\n");
    }

    #[test]
    fn json_carries_links_and_frontmatter() {
        let out = render(&sample(), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        let doc = &json["listed_docs"][0];
        assert_eq!(doc["link"], "[[Dune]]");
        assert_eq!(doc["path"], "books/Dune.md");
        assert_eq!(doc["frontmatter"]["type"], "book");
        assert_eq!(json["messages"][0]["level"], "info");
    }

    #[test]
    fn yaml_output() {
        let out = render(&sample(), OutputFormat::Yaml).unwrap();
        assert!(out.contains("[[Dune]]"));
        assert!(out.contains("path: books/Dune.md"));
    }
}
