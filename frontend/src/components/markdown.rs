//! Markdown 渲染

use leptos::prelude::*;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// 链接与图片只允许 http(s)、mailto 和相对地址
fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    match lower.split_once(':') {
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => {
            matches!(scheme, "http" | "https" | "mailto")
        }
        _ => true,
    }
}

fn sanitize_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) { url } else { CowStr::Borrowed("") }
}

/// 转换为 HTML，原始 HTML 片段按文本输出
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
                link_type,
                dest_url: sanitize_url(dest_url),
                title,
                id,
            }),
            Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
                link_type,
                dest_url: sanitize_url(dest_url),
                title,
                id,
            }),
            other => other,
        });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[component]
pub fn Markdown(#[prop(into)] source: Signal<String>) -> impl IntoView {
    view! {
        <div class="prose prose-sm max-w-none" inner_html=move || to_html(&source.get())></div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_renders_emphasis() {
        let html = to_html("**Late blight** detected");
        assert!(html.contains("<strong>Late blight</strong>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = to_html("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_are_dropped() {
        let html = to_html("[see treatment](javascript:alert(document.cookie))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("see treatment"));

        let html = to_html("![leaf](JavaScript:alert(1)) [data](data:text/html,x)");
        assert!(!html.to_ascii_lowercase().contains("javascript:"));
        assert!(!html.contains("data:text/html"));
    }

    #[test]
    fn test_safe_links_are_kept() {
        let html = to_html("[guide](https://example.com/blight) [local](/images/a.jpg) [mail](mailto:help@example.com)");
        assert!(html.contains(r#"href="https://example.com/blight""#));
        assert!(html.contains(r#"href="/images/a.jpg""#));
        assert!(html.contains(r#"href="mailto:help@example.com""#));
    }
}
