//! HTML 片段渲染
//!
//! 元素 id 与原网页保持一致；所有来自 API 的文本都先转义。

use super::page::{FlagsList, Page, SourcesList};
use crate::utils::string_utils::{escape_html, format_number};

pub fn render_page(page: &Page) -> String {
    let mut out = String::new();

    let panel_class = if page.panel_hidden { " class=\"hidden\"" } else { "" };
    out.push_str(&format!("<section id=\"result-panel\"{}>\n", panel_class));
    out.push_str(&format!(
        "  <div id=\"score-badge\">{}</div>\n",
        escape_html(&page.score_badge.text)
    ));
    out.push_str(&format!(
        "  <div class=\"bar\"><div id=\"score-fill\" class=\"{}\" style=\"width: {}%\"></div></div>\n",
        page.score_fill.class_name(),
        format_number(page.score_fill.width_pct)
    ));

    let flags = match &page.flags {
        FlagsList::Empty => String::new(),
        FlagsList::None => "Flags: none".to_string(),
        FlagsList::Items(items) => {
            let lis: String = items
                .iter()
                .map(|f| format!("<li>{}</li>", escape_html(f)))
                .collect();
            format!("<strong>Flags:</strong><ul>{}</ul>", lis)
        }
    };
    out.push_str(&format!("  <div id=\"flags-list\">{}</div>\n", flags));

    let sources = match &page.sources {
        SourcesList::Empty => String::new(),
        SourcesList::Unavailable => "<strong>Sources:</strong> unavailable".to_string(),
        SourcesList::Json(json) => format!("<strong>Sources:</strong> {}", escape_html(json)),
    };
    out.push_str(&format!("  <div id=\"sources-list\">{}</div>\n", sources));

    out.push_str(&format!(
        "  <div id=\"rwa-panel\">{}</div>\n",
        page.rwa.text.as_deref().map(escape_html).unwrap_or_default()
    ));

    match (&page.download.link, page.download.visible) {
        (Some(link), true) => out.push_str(&format!(
            "  <a id=\"xml-download\" href=\"{}\" download=\"{}\" style=\"display: inline\">Download ISO 20022 (pacs.008)</a>\n",
            escape_html(&link.href),
            escape_html(&link.filename)
        )),
        _ => out.push_str("  <a id=\"xml-download\" style=\"display: none\"></a>\n"),
    }
    out.push_str("</section>");

    if let Some(stats) = page.stats.text() {
        out.push_str(&format!("\n<div id=\"stats\">{}</div>", escape_html(&stats)));
    }
    out
}

pub fn render_alert(message: &str) -> String {
    format!("<div role=\"alert\">{}</div>", escape_html(message))
}
