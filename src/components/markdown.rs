use leptos::prelude::*;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::fmt::Write;

use crate::utils::sanitize_html;

/// Renders an assistant answer. Model output is escaped on the way in and
/// sanitized on the way out, so nothing active survives into `inner_html`.
#[component]
pub fn MarkdownRenderer(
    #[prop(into)] content: String,
    #[prop(optional)] class: &'static str,
) -> impl IntoView {
    let rendered_html = Memo::new(move |_| markdown_to_html(&content));

    view! {
        <div
            class=format!("markdown-content {} min-w-0 max-w-full break-words", class)
            inner_html=move || rendered_html.get()
        ></div>
    }
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    let mut in_code_block = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                html_output.push_str(
                    r#"<pre class="bg-gray-100 rounded-lg p-3 my-2 overflow-x-auto"><code class="text-sm font-mono whitespace-pre">"#,
                );
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                html_output.push_str("</code></pre>");
            }
            Event::Start(Tag::Paragraph) => {
                html_output.push_str(r#"<p class="mb-2 last:mb-0 leading-relaxed">"#);
            }
            Event::End(TagEnd::Paragraph) => html_output.push_str("</p>"),
            Event::Start(Tag::Heading { level, .. }) => {
                let size_class = match level {
                    HeadingLevel::H1 => "text-lg font-bold mt-3 mb-2",
                    HeadingLevel::H2 => "text-base font-bold mt-3 mb-2",
                    _ => "text-sm font-semibold mt-2 mb-1",
                };
                let _ = write!(html_output, r#"<h{} class="{}">"#, level as u8, size_class);
            }
            Event::End(TagEnd::Heading(level)) => {
                let _ = write!(html_output, "</h{}>", level as u8);
            }
            Event::Start(Tag::Strong) => html_output.push_str(r#"<strong class="font-semibold">"#),
            Event::End(TagEnd::Strong) => html_output.push_str("</strong>"),
            Event::Start(Tag::Emphasis) => html_output.push_str("<em>"),
            Event::End(TagEnd::Emphasis) => html_output.push_str("</em>"),
            Event::Start(Tag::Strikethrough) => html_output.push_str("<del>"),
            Event::End(TagEnd::Strikethrough) => html_output.push_str("</del>"),
            Event::Start(Tag::Link { dest_url, .. }) => {
                let _ = write!(
                    html_output,
                    r#"<a href="{}" class="text-red-600 underline" target="_blank" rel="noopener noreferrer">"#,
                    html_escape(&dest_url),
                );
            }
            Event::End(TagEnd::Link) => html_output.push_str("</a>"),
            Event::Start(Tag::List(None)) => {
                html_output.push_str(r#"<ul class="list-disc ml-5 mb-2 space-y-1">"#);
            }
            Event::Start(Tag::List(Some(_))) => {
                html_output.push_str(r#"<ol class="list-decimal ml-5 mb-2 space-y-1">"#);
            }
            Event::End(TagEnd::List(false)) => html_output.push_str("</ul>"),
            Event::End(TagEnd::List(true)) => html_output.push_str("</ol>"),
            Event::Start(Tag::Item) => html_output.push_str("<li>"),
            Event::End(TagEnd::Item) => html_output.push_str("</li>"),
            Event::Start(Tag::Table(_)) => {
                html_output.push_str(r#"<div class="overflow-x-auto my-2"><table class="min-w-full border border-gray-200 text-sm">"#);
            }
            Event::End(TagEnd::Table) => html_output.push_str("</table></div>"),
            Event::Start(Tag::TableHead) => html_output.push_str(r#"<thead class="bg-gray-50">"#),
            Event::End(TagEnd::TableHead) => html_output.push_str("</thead>"),
            Event::Start(Tag::TableRow) => html_output.push_str("<tr>"),
            Event::End(TagEnd::TableRow) => html_output.push_str("</tr>"),
            Event::Start(Tag::TableCell) => {
                html_output.push_str(r#"<td class="border border-gray-200 px-2 py-1">"#);
            }
            Event::End(TagEnd::TableCell) => html_output.push_str("</td>"),
            Event::Code(text) => {
                let _ = write!(
                    html_output,
                    r#"<code class="bg-gray-100 px-1 rounded text-sm font-mono">{}</code>"#,
                    html_escape(&text)
                );
            }
            Event::Text(text) => html_output.push_str(&html_escape(&text)),
            // raw html from the model is shown, never interpreted
            Event::Html(raw) | Event::InlineHtml(raw) => html_output.push_str(&html_escape(&raw)),
            Event::SoftBreak | Event::HardBreak => {
                if in_code_block {
                    html_output.push('\n');
                } else {
                    html_output.push_str("<br>");
                }
            }
            _ => {}
        }
    }

    sanitize_html(&html_output)
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_formatting() {
        let html = markdown_to_html("## 리기산 가는 법\n\n**루체른**에서 유람선을 타세요.\n\n- 베기스\n- 비츠나우");
        assert!(html.contains("<h2"));
        assert!(html.contains("<strong"));
        assert!(html.contains("<ul"));
        assert!(html.contains("<li>베기스</li>"));
    }

    #[test]
    fn test_line_breaks_are_kept() {
        let html = markdown_to_html("첫째 줄\n둘째 줄");
        assert!(html.contains("첫째 줄<br>둘째 줄"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = markdown_to_html("<script>alert(1)</script> 안녕");
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_javascript_links_are_neutralised() {
        let html = markdown_to_html("[클릭](javascript:alert(1))");
        assert!(!html.to_lowercase().contains("javascript:"));
    }
}
