//! Inline style handling.
//!
//! Declarations are kept as an ordered list so that serializing an element's
//! style round-trips in declaration order, and so that "first declaration
//! wins" questions have a stable answer.

use regex::Regex;
use std::sync::LazyLock;

/// First `url(...)` reference in a style string, quoted or unquoted.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"url\(['"]?([^'")]+)['"]?\)"#).unwrap());

/// Parsed `style` attribute contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parse a raw `style` attribute value.
    ///
    /// Empty or nameless declarations are dropped; everything else is kept
    /// verbatim, including duplicate properties. Semicolons inside `url(...)`
    /// or quoted strings do not terminate a declaration.
    pub fn parse(text: &str) -> Self {
        let mut declarations = Vec::new();
        for decl in split_declarations(text) {
            let decl = decl.trim();
            if decl.is_empty() {
                continue;
            }
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            declarations.push((name.to_ascii_lowercase(), value.trim().to_string()));
        }
        Self { declarations }
    }

    /// Value of the first declaration of `property`, if any.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Replace the first declaration of `property`, or append one.
    pub fn set(&mut self, property: &str, value: &str) {
        let property = property.to_ascii_lowercase();
        if let Some(decl) = self.declarations.iter_mut().find(|(name, _)| *name == property) {
            decl.1 = value.to_string();
        } else {
            self.declarations.push((property, value.to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize back to `style` attribute syntax.
    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Split on `;` at the top level only: parenthesized groups and quoted
/// strings may contain semicolons (data URLs do).
fn split_declarations(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '\'' | '"' => {
                if quote == Some(c) {
                    quote = None;
                } else if quote.is_none() {
                    quote = Some(c);
                }
            }
            '(' if quote.is_none() => depth += 1,
            ')' if quote.is_none() => depth = depth.saturating_sub(1),
            ';' if quote.is_none() && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Extract the first `url(...)` reference from a full style string.
///
/// Returns `None` for malformed or absent references; multiple
/// `background-image` declarations on one element resolve to whichever URL
/// appears first in the serialized style.
pub fn first_background_url(style: &str) -> Option<&str> {
    URL_RE
        .captures(style)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|url| !url.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_get() {
        let style = InlineStyle::parse("color: red; background-image: url(a.png)");
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("background-image"), Some("url(a.png)"));
        assert_eq!(style.get("display"), None);
    }

    #[test]
    fn test_parse_skips_malformed_declarations() {
        let style = InlineStyle::parse("color red; : blue; ; width: 10px");
        assert_eq!(style.get("width"), Some("10px"));
        assert_eq!(style.to_css(), "width: 10px");
    }

    #[test]
    fn test_set_replaces_first_declaration() {
        let mut style = InlineStyle::parse("display: block");
        style.set("display", "none");
        assert_eq!(style.get("display"), Some("none"));
        assert_eq!(style.to_css(), "display: none");
    }

    #[test]
    fn test_property_names_are_case_insensitive() {
        let style = InlineStyle::parse("Background-Image: url(a.png)");
        assert_eq!(style.get("background-image"), Some("url(a.png)"));
    }

    #[test]
    fn test_data_url_value_survives_parsing() {
        let style = InlineStyle::parse(
            "background-image: url(data:image/gif;base64,R0lGODlh); color: red",
        );
        assert_eq!(
            style.get("background-image"),
            Some("url(data:image/gif;base64,R0lGODlh)")
        );
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(
            first_background_url(&style.to_css()),
            Some("data:image/gif;base64,R0lGODlh")
        );
    }

    #[test]
    fn test_first_url_unquoted() {
        assert_eq!(
            first_background_url("background-image: url(hero.jpg)"),
            Some("hero.jpg")
        );
    }

    #[test]
    fn test_first_url_quoted() {
        assert_eq!(
            first_background_url(r#"background-image: url("hero.jpg")"#),
            Some("hero.jpg")
        );
        assert_eq!(
            first_background_url("background-image: url('hero.jpg')"),
            Some("hero.jpg")
        );
    }

    #[test]
    fn test_first_url_wins_across_declarations() {
        let css = "background-image: url(first.png); background-image: url(second.png)";
        assert_eq!(first_background_url(css), Some("first.png"));
    }

    #[test]
    fn test_malformed_url_is_none() {
        assert_eq!(first_background_url("background-image: url()"), None);
        assert_eq!(first_background_url("background-image: none"), None);
        assert_eq!(first_background_url(""), None);
    }
}
