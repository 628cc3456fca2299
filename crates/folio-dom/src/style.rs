//! Inline style declarations (element.style)

/// Ordered `property: value` declarations from the `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        style.set_css_text(css_text);
        style
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Value of `property`, if declared
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set `property`. An empty value removes the declaration, like
    /// assigning `''` through element.style.
    pub fn set(&mut self, property: &str, value: &str) {
        let property = property.trim().to_ascii_lowercase();
        let value = collapse_whitespace(value);
        if value.is_empty() {
            self.remove(&property);
            return;
        }
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some((_, v)) => *v = value,
            None => self.declarations.push((property, value)),
        }
    }

    /// Remove `property`; returns true if it was declared
    pub fn remove(&mut self, property: &str) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|(p, _)| p != property);
        self.declarations.len() != before
    }

    /// Length in pixels, for `Npx` or bare `0` values
    pub fn px(&self, property: &str) -> Option<f64> {
        let value = self.get(property)?;
        match value.strip_suffix("px") {
            Some(number) => number.trim().parse().ok(),
            None if value == "0" => Some(0.0),
            None => None,
        }
    }

    /// Serialize back to attribute form
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace all declarations from attribute text
    pub fn set_css_text(&mut self, css_text: &str) {
        self.declarations.clear();
        for declaration in css_text.split(';') {
            if let Some((property, value)) = declaration.split_once(':') {
                self.set(property, value);
            }
        }
    }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let style = InlineStyle::parse("height: 800px; overflow:hidden;");
        assert_eq!(style.get("height"), Some("800px"));
        assert_eq!(style.get("overflow"), Some("hidden"));
        assert_eq!(style.css_text(), "height: 800px; overflow: hidden;");
    }

    #[test]
    fn test_empty_value_removes() {
        let mut style = InlineStyle::new();
        style.set("overflow", "hidden");
        style.set("overflow", "");
        assert!(style.is_empty());
    }

    #[test]
    fn test_multiline_values_are_collapsed() {
        let mut style = InlineStyle::new();
        style.set("transform", "\n  perspective(1000px)\n  rotateY(1deg)\n");
        assert_eq!(style.get("transform"), Some("perspective(1000px) rotateY(1deg)"));
    }

    #[test]
    fn test_px() {
        let style = InlineStyle::parse("height: 120.5px; width: 50%; margin: 0");
        assert_eq!(style.px("height"), Some(120.5));
        assert_eq!(style.px("width"), None);
        assert_eq!(style.px("margin"), Some(0.0));
    }
}
