//! Class list (DOMTokenList)
//!
//! Space-separated class tokens with classList semantics.

/// Ordered, duplicate-free set of class tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        list.set_value(s);
        list
    }

    /// Get number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add token(s); returns true if anything changed
    pub fn add(&mut self, tokens: &[&str]) -> bool {
        let before = self.tokens.len();
        for token in tokens {
            if !token.is_empty() && !self.contains(token) {
                self.tokens.push(token.to_string());
            }
        }
        self.tokens.len() != before
    }

    /// Remove token(s); returns true if anything changed
    pub fn remove(&mut self, tokens: &[&str]) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| !tokens.contains(&t.as_str()));
        self.tokens.len() != before
    }

    /// Toggle token, returns new state
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let on = force.unwrap_or(!self.contains(token));
        if on {
            self.add(&[token]);
        } else {
            self.remove(&[token]);
        }
        on
    }

    /// Get value as string
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Replace all tokens from a space-separated string
    pub fn set_value(&mut self, value: &str) {
        self.tokens.clear();
        for token in value.split_whitespace() {
            self.add(&[token]);
        }
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_dedups() {
        let list = ClassList::from_string("nav-link  active nav-link");
        assert_eq!(list.len(), 2);
        assert_eq!(list.value(), "nav-link active");
    }

    #[test]
    fn test_add_remove_report_changes() {
        let mut list = ClassList::new();
        assert!(list.add(&["reveal", "active"]));
        assert!(!list.add(&["reveal"]));
        assert!(list.remove(&["active"]));
        assert!(!list.remove(&["active"]));
        assert_eq!(list.value(), "reveal");
    }

    #[test]
    fn test_toggle() {
        let mut list = ClassList::new();

        assert!(list.toggle("active", None));
        assert!(list.contains("active"));

        assert!(!list.toggle("active", None));
        assert!(!list.contains("active"));

        assert!(list.toggle("active", Some(true)));
        assert!(list.toggle("active", Some(true)));
        assert_eq!(list.len(), 1);
    }
}
