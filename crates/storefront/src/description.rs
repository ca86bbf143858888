//! Editor.js rich text rendering.
//!
//! Product descriptions are stored as Editor.js documents. Each block is
//! rendered to an HTML fragment and sanitized with `ammonia` before it
//! reaches a template.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

/// Render a description into sanitized HTML fragments, one per block.
///
/// Returns `None` for a missing or blank description, and for a document
/// that can't be parsed.
#[must_use]
pub fn render_description(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    let document: Document = match serde_json::from_str(raw) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "Failed to parse product description");
            return None;
        }
    };

    Some(
        document
            .blocks
            .iter()
            .filter_map(render_block)
            .map(|html| ammonia::clean(&html))
            .filter(|html| !html.is_empty())
            .collect(),
    )
}

fn render_block(block: &Block) -> Option<String> {
    let data = &block.data;
    match block.kind.as_str() {
        "paragraph" => Some(format!("<p>{}</p>", text(data, "text"))),
        "header" => {
            let level = data
                .get("level")
                .and_then(Value::as_u64)
                .unwrap_or(2)
                .clamp(1, 6);
            Some(format!("<h{level}>{}</h{level}>", text(data, "text")))
        }
        "list" => {
            let tag = if data.get("style").and_then(Value::as_str) == Some("ordered") {
                "ol"
            } else {
                "ul"
            };
            let items = data.get("items").and_then(Value::as_array)?;
            Some(render_list(tag, items))
        }
        "quote" => {
            let mut html = format!("<blockquote>{}</blockquote>", text(data, "text"));
            let caption = text(data, "caption");
            if !caption.is_empty() {
                html.push_str(&format!(" - {caption}"));
            }
            Some(html)
        }
        "delimiter" => Some("<br/>".to_string()),
        "image" => {
            let url = data
                .get("file")
                .and_then(|f| f.get("url"))
                .and_then(Value::as_str)
                .or_else(|| data.get("url").and_then(Value::as_str))?;
            Some(format!(
                r#"<img src="{}" alt="{}">"#,
                escape_html(url),
                escape_html(text(data, "caption"))
            ))
        }
        "code" => Some(format!(
            "<pre><code>{}</code></pre>",
            escape_html(text(data, "code"))
        )),
        "embed" => {
            let source = data.get("source").and_then(Value::as_str)?;
            let label = data
                .get("service")
                .and_then(Value::as_str)
                .unwrap_or(source);
            Some(format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(source),
                escape_html(label)
            ))
        }
        other => {
            warn!(block_type = other, "Skipping unsupported description block");
            None
        }
    }
}

/// Render list items. Items are either strings or `{content, items}`
/// objects carrying a nested list.
fn render_list(tag: &str, items: &[Value]) -> String {
    let mut html = format!("<{tag}>");
    for item in items {
        html.push_str("<li>");
        match item {
            Value::String(s) => html.push_str(s),
            Value::Object(_) => {
                html.push_str(text(item, "content"));
                if let Some(children) = item.get("items").and_then(Value::as_array)
                    && !children.is_empty()
                {
                    html.push_str(&render_list(tag, children));
                }
            }
            _ => {}
        }
        html.push_str("</li>");
    }
    html.push_str(&format!("</{tag}>"));
    html
}

fn text<'a>(data: &'a Value, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
