//! Syntax highlighting for fenced code blocks with syntect.

use anyhow::{Context, Result, bail};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// CSS class prefix for highlighted spans.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Code highlighter holding the loaded syntax definitions.
///
/// Loading the default syntax set is expensive, so one highlighter is
/// created per site build and borrowed by every renderer.
pub struct Highlighter {
    syntax_set: SyntaxSet,
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Returns true if the fence language names a known syntax.
    pub fn supports(&self, language: &str) -> bool {
        self.syntax_set.find_syntax_by_token(language).is_some()
    }

    /// Highlights code with CSS classes.
    ///
    /// Output text is HTML-escaped by the generator; only `<span>` tags
    /// with `hl-*` classes are emitted.
    ///
    /// # Arguments
    ///
    /// * `code`: Literal code block body
    /// * `language`: Fence language token (rust, python, sh, ...)
    ///
    /// # Returns
    ///
    /// Highlighted HTML, or None when the language is unknown
    ///
    /// # Errors
    ///
    /// Returns error if syntect fails to parse a line
    pub fn highlight_code(&self, code: &str, language: &str) -> Result<Option<String>> {
        let Some(syntax) = self.syntax_set.find_syntax_by_token(language) else {
            return Ok(None);
        };

        if code.is_empty() {
            return Ok(Some(String::new()));
        }

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(Some(generator.finalize()))
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates the stylesheet for highlighted code from a bundled theme.
///
/// # Errors
///
/// Returns error if the theme name is unknown
pub fn theme_css(theme_name: &str) -> Result<String> {
    let themes = ThemeSet::load_defaults();
    let Some(theme) = themes.themes.get(theme_name) else {
        let mut known: Vec<&str> = themes.themes.keys().map(String::as_str).collect();
        known.sort_unstable();
        bail!(
            "Unknown theme: {} (available: {})",
            theme_name,
            known.join(", ")
        );
    };

    css_for_theme_with_class_style(theme, CLASS_STYLE)
        .with_context(|| format!("Failed to generate CSS for theme: {}", theme_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_known_language() {
        // Arrange
        let highlighter = Highlighter::new();

        // Act
        let html = highlighter
            .highlight_code("fn main() {}\n", "rust")
            .expect("Highlighting should succeed")
            .expect("Rust should be supported");

        // Assert
        assert!(
            html.contains("<span class=\"hl-"),
            "Should contain highlight spans: {}",
            html
        );
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_returns_none() {
        let highlighter = Highlighter::new();

        let result = highlighter
            .highlight_code("whatever", "notalanguage")
            .expect("Should not fail");

        assert!(result.is_none());
        assert!(!highlighter.supports("notalanguage"));
    }

    #[test]
    fn test_highlight_escapes_markup() {
        // Arrange
        let highlighter = Highlighter::new();
        let code = "const x = \"<script>alert('xss')</script>\";\n";

        // Act
        let html = highlighter
            .highlight_code(code, "js")
            .expect("Highlighting should succeed")
            .expect("JavaScript should be supported");

        // Assert
        assert!(html.contains("&lt;script&gt;"), "Should escape tag: {}", html);
        assert!(!html.contains("<script>"), "Should not emit raw tag: {}", html);
    }

    #[test]
    fn test_highlight_empty_code() {
        let highlighter = Highlighter::new();

        let html = highlighter
            .highlight_code("", "rust")
            .expect("Should handle empty code");

        assert_eq!(html.as_deref(), Some(""));
    }

    #[test]
    fn test_theme_css_known_theme() {
        let css = theme_css("InspiredGitHub").expect("Bundled theme should exist");

        assert!(css.contains(".hl-"), "Should use hl- class prefix");
    }

    #[test]
    fn test_theme_css_unknown_theme() {
        let err = theme_css("No Such Theme").expect_err("Unknown theme should fail");

        assert!(err.to_string().contains("Unknown theme"));
    }
}
