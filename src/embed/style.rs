//! Inline style declarations of an element
//!
//! A minimal reading and writing layer over the `style` attribute: ordered
//! declarations with a per-declaration `!important` flag. Values are kept
//! verbatim, so `url(...)` text, quotes and commas survive a round trip.

use kuchiki::NodeRef;
use std::fmt;

/// One `name: value [!important]` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<Declaration>,
}

impl InlineStyle {
    #[must_use]
    pub fn parse(css_text: &str) -> Self {
        let declarations = split_top_level(css_text, ';')
            .into_iter()
            .filter_map(parse_declaration)
            .collect();
        Self { declarations }
    }

    /// The element's current inline style; `None` for non-elements
    #[must_use]
    pub fn of(node: &NodeRef) -> Option<Self> {
        let element = node.as_element()?;
        let attributes = element.attributes.borrow();
        Some(Self::parse(attributes.get("style").unwrap_or_default()))
    }

    /// Serialize back into the element's `style` attribute
    pub fn write_to(&self, node: &NodeRef) {
        if let Some(element) = node.as_element() {
            element
                .attributes
                .borrow_mut()
                .insert("style", self.to_string());
        }
    }

    /// Value of the last declaration of `name`; `None` when absent or empty
    #[must_use]
    pub fn property_value(&self, name: &str) -> Option<&str> {
        self.find(name)
            .map(|d| d.value.as_str())
            .filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn is_important(&self, name: &str) -> bool {
        self.find(name).is_some_and(|d| d.important)
    }

    /// Replace the value of `name` in place, or append it
    pub fn set_property(&mut self, name: &str, value: impl Into<String>, important: bool) {
        let value = value.into();
        let name = normalize_name(name);
        match self.declarations.iter_mut().rev().find(|d| d.name == name) {
            Some(existing) => {
                existing.value = value;
                existing.important = important;
            }
            None => self.declarations.push(Declaration {
                name,
                value,
                important,
            }),
        }
    }

    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    fn find(&self, name: &str) -> Option<&Declaration> {
        let name = normalize_name(name);
        self.declarations.iter().rev().find(|d| d.name == name)
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {}", declaration.name, declaration.value)?;
            if declaration.important {
                f.write_str(" !important")?;
            }
            f.write_str(";")?;
        }
        Ok(())
    }
}

/// Custom properties are case-sensitive, everything else is not
fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    }
}

fn parse_declaration(text: &str) -> Option<Declaration> {
    let (name, value) = text.split_once(':')?;
    let name = normalize_name(name);
    if name.is_empty() {
        return None;
    }

    let mut value = value.trim();
    let mut important = false;
    if let Some(bang) = value.rfind('!')
        && value[bang + 1..].trim().eq_ignore_ascii_case("important")
    {
        important = true;
        value = value[..bang].trim_end();
    }

    Some(Declaration {
        name,
        value: value.to_string(),
        important,
    })
}

/// Split on `separator` outside of quotes, parentheses and escapes
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' | '\'' if quote == Some(c) => quote = None,
            '"' | '\'' if quote.is_none() => quote = Some(c),
            '(' if quote.is_none() => depth += 1,
            ')' if quote.is_none() => depth = depth.saturating_sub(1),
            _ if c == separator && quote.is_none() && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);

    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}
