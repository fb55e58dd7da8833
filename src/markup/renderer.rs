//! HTML rendering of typed write-up blocks.

use maud::{Markup, PreEscaped, html};
use tracing::warn;

use super::{AssetResolver, Block, Inline, ListMarker, MarkupDocument};
use crate::highlight::Highlighter;

/// Target of the click affordance around an image, given its source URL.
pub type PreviewFn<'a> = &'a dyn Fn(&str) -> String;

/// Renders a `MarkupDocument` to HTML.
///
/// Every block variant maps to a fixed element (`h1`-`h3`, `p`, `pre`,
/// `img`, `hr`, `li`). Text is always escaped by maud; the only
/// pre-escaped output is syntect's highlighted code, which escapes its
/// input itself. Image sources with script-capable schemes are dropped.
pub struct MarkupRenderer<'a> {
    highlighter: &'a Highlighter,
    resolver: Option<AssetResolver>,
    preview: Option<PreviewFn<'a>>,
}

impl<'a> MarkupRenderer<'a> {
    /// Creates renderer without link resolution or image previews.
    pub fn new(highlighter: &'a Highlighter) -> Self {
        Self {
            highlighter,
            resolver: None,
            preview: None,
        }
    }

    /// Resolves relative image sources with the given resolver.
    pub fn with_resolver(mut self, resolver: AssetResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Wraps each image in a link whose target the callback produces.
    ///
    /// The callback receives the resolved image URL, the same string that
    /// `image_sources` returns, and is called once per rendered image.
    pub fn with_preview(mut self, preview: PreviewFn<'a>) -> Self {
        self.preview = Some(preview);
        self
    }

    /// Renders all blocks in order.
    pub fn render(&self, document: &MarkupDocument) -> Markup {
        html! {
            @for block in document {
                (self.render_block(block))
            }
        }
    }

    /// Renders document to an HTML string.
    pub fn render_to_string(&self, document: &MarkupDocument) -> String {
        self.render(document).into_string()
    }

    /// Resolved, safe image URLs in document order without duplicates.
    pub fn image_sources(&self, document: &MarkupDocument) -> Vec<String> {
        let mut sources: Vec<String> = Vec::new();
        for src in document.image_sources() {
            if let Some(url) = self.image_url(src)
                && !sources.contains(&url)
            {
                sources.push(url);
            }
        }
        sources
    }

    fn render_block(&self, block: &Block) -> Markup {
        match block {
            Block::Heading { level, content } => {
                let inner = render_inlines(content);
                match level {
                    1 => html! { h1 class="md-heading" { (inner) } },
                    2 => html! { h2 class="md-heading" { (inner) } },
                    _ => html! { h3 class="md-heading" { (inner) } },
                }
            }
            Block::Paragraph(content) => html! {
                p { (render_inlines(content)) }
            },
            Block::CodeBlock { language, body } => self.render_code(language.as_deref(), body),
            Block::Image { alt, src } => self.render_image(alt, src),
            Block::Rule => html! { hr; },
            Block::ListItem { marker, content } => match marker {
                ListMarker::Bullet => html! {
                    li class="md-list-item" { (render_inlines(content)) }
                },
                ListMarker::Ordered(number) => html! {
                    li class="md-list-item md-list-ordered" value=(number) {
                        (render_inlines(content))
                    }
                },
            },
        }
    }

    fn render_code(&self, language: Option<&str>, body: &str) -> Markup {
        let highlighted = language.and_then(|lang| {
            self.highlighter
                .highlight_code(body, lang)
                .unwrap_or_else(|e| {
                    warn!("Falling back to plain code block: {:#}", e);
                    None
                })
        });

        html! {
            pre class="md-code" {
                @if let Some(lang) = language {
                    code class=(format!("language-{}", lang)) {
                        @if let Some(spans) = highlighted {
                            (PreEscaped(spans))
                        } @else {
                            (body)
                        }
                    }
                } @else {
                    code { (body) }
                }
            }
        }
    }

    fn render_image(&self, alt: &str, src: &str) -> Markup {
        let Some(url) = self.image_url(src) else {
            return html! { span class="md-image-blocked" { (alt) } };
        };

        match self.preview {
            Some(preview) => html! {
                a class="md-image" href=(preview(&url)) {
                    img src=(url) alt=(alt) loading="lazy";
                }
            },
            None => html! {
                img class="md-image" src=(url) alt=(alt) loading="lazy";
            },
        }
    }

    fn image_url(&self, src: &str) -> Option<String> {
        if !is_safe_source(src) {
            return None;
        }

        match &self.resolver {
            None => Some(src.to_string()),
            Some(resolver) => match resolver.resolve(src) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("Dropping image {}: {:#}", src, e);
                    None
                }
            },
        }
    }
}

fn render_inlines(inlines: &[Inline]) -> Markup {
    html! {
        @for inline in inlines {
            @match inline {
                Inline::Text(text) => { (text) },
                Inline::Strong(inner) => { strong { (render_inlines(inner)) } },
                Inline::Code(literal) => { code class="md-inline-code" { (literal) } },
            }
        }
    }
}

/// Returns false for image sources that could run script.
///
/// Rejects `javascript:` and `vbscript:` URLs and `data:` URIs that are not
/// images. Scheme matching ignores case and embedded whitespace or control
/// characters, which browsers also strip.
pub fn is_safe_source(src: &str) -> bool {
    let normalized: String = src
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if normalized.starts_with("javascript:") || normalized.starts_with("vbscript:") {
        return false;
    }

    if normalized.starts_with("data:") {
        return normalized.starts_with("data:image/") && !normalized.starts_with("data:image/svg");
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::transform;

    fn render(input: &str) -> String {
        let highlighter = Highlighter::new();
        MarkupRenderer::new(&highlighter).render_to_string(&transform(input))
    }

    #[test]
    fn test_render_bold_and_code_paragraph() {
        // Arrange
        let input = "**bold** and `code`";

        // Act
        let html = render(input);

        // Assert
        assert_eq!(
            html,
            "<p><strong>bold</strong> and <code class=\"md-inline-code\">code</code></p>"
        );
    }

    #[test]
    fn test_render_headings() {
        let html = render("# A\n## B\n### C");

        assert!(html.contains("<h1 class=\"md-heading\">A</h1>"));
        assert!(html.contains("<h2 class=\"md-heading\">B</h2>"));
        assert!(html.contains("<h3 class=\"md-heading\">C</h3>"));
    }

    #[test]
    fn test_fenced_script_is_literal() {
        // Arrange
        let input = "```\n<script>alert(1)</script>\n```";

        // Act
        let html = render(input);

        // Assert
        assert!(
            html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"),
            "Code should render as literal text: {}",
            html
        );
        assert!(!html.contains("<script>"), "No active script tag: {}", html);
    }

    #[test]
    fn test_fenced_script_with_language_is_literal() {
        let html = render("```html\n<script>alert(1)</script>\n```");

        assert!(!html.contains("<script>"), "No active script tag: {}", html);
        assert!(html.contains("language-html"));
    }

    #[test]
    fn test_unknown_language_renders_escaped_plain() {
        let html = render("```nolang\na < b && c\n```");

        assert!(html.contains("<code class=\"language-nolang\">a &lt; b &amp;&amp; c</code>"));
    }

    #[test]
    fn test_known_language_highlighted() {
        let html = render("```rust\nfn main() {}\n```");

        assert!(html.contains("<code class=\"language-rust\">"));
        assert!(html.contains("hl-"), "Should contain highlight spans: {}", html);
    }

    #[test]
    fn test_inline_text_escaped() {
        let html = render("<img src=x onerror=alert(1)> and `<b>`");

        assert!(!html.contains("<img"), "Raw tags must be escaped: {}", html);
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("<code class=\"md-inline-code\">&lt;b&gt;</code>"));
    }

    #[test]
    fn test_rule_and_list_items() {
        let html = render("---\n- one\n3. three");

        assert_eq!(
            html,
            "<hr><li class=\"md-list-item\">one</li>\
             <li class=\"md-list-item md-list-ordered\" value=\"3\">three</li>"
        );
    }

    #[test]
    fn test_image_without_preview() {
        let html = render("![shell](shot.png)");

        assert_eq!(
            html,
            "<img class=\"md-image\" src=\"shot.png\" alt=\"shell\" loading=\"lazy\">"
        );
    }

    #[test]
    fn test_image_preview_callback_receives_source() {
        // Arrange
        let highlighter = Highlighter::new();
        let seen = std::cell::RefCell::new(Vec::new());
        let preview = |src: &str| {
            seen.borrow_mut().push(src.to_string());
            format!("#preview-{}", src)
        };
        let renderer = MarkupRenderer::new(&highlighter).with_preview(&preview);

        // Act
        let html = renderer.render_to_string(&transform("![a](one.png)\n![b](two.png)"));

        // Assert
        assert_eq!(*seen.borrow(), vec!["one.png", "two.png"]);
        assert!(html.contains("<a class=\"md-image\" href=\"#preview-one.png\">"));
    }

    #[test]
    fn test_image_resolved_through_resolver() {
        // Arrange
        let highlighter = Highlighter::new();
        let renderer = MarkupRenderer::new(&highlighter)
            .with_resolver(AssetResolver::new("../content/", "writeups/a.md"));
        let doc = transform("![x](img/a.png)\n![y](img/a.png)\n![z](../../escape.png)");

        // Act
        let html = renderer.render_to_string(&doc);
        let sources = renderer.image_sources(&doc);

        // Assert
        assert!(html.contains("src=\"../content/writeups/img/a.png\""));
        assert!(html.contains("<span class=\"md-image-blocked\">z</span>"));
        assert_eq!(sources, vec!["../content/writeups/img/a.png"]);
    }

    #[test]
    fn test_script_image_source_blocked() {
        let html = render("![click](javascript:alert(1))");

        assert!(!html.contains("javascript"), "Should drop source: {}", html);
        assert!(html.contains("md-image-blocked"));
    }

    #[test]
    fn test_is_safe_source() {
        assert!(is_safe_source("img/a.png"));
        assert!(is_safe_source("https://example.com/a.png"));
        assert!(is_safe_source("data:image/png;base64,AAAA"));
        assert!(!is_safe_source("JavaScript:alert(1)"));
        assert!(!is_safe_source("java\tscript:alert(1)"));
        assert!(!is_safe_source("vbscript:msgbox"));
        assert!(!is_safe_source("data:text/html,<script>"));
        assert!(!is_safe_source("data:image/svg+xml,<svg onload=alert(1)>"));
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        assert_eq!(render(""), "");
    }
}
