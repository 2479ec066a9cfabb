use super::scalar_model;
use crate::core::Observable;

scalar_model! {
    /// Free text, empty by default.
    ///
    /// ```rust
    /// use rok::scalar::Text;
    ///
    /// let mut text = Text::new("comment", "Comment");
    /// text.set_text("  \n");
    /// assert!(!text.has_anything());
    /// ```
    Text {
        kind: "Text",
        field: text: String = String::new(),
        input: impl Into<String>,
    }
}

impl Text {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.notify();
    }

    /// `true` if the text holds at least one non-whitespace character.
    pub fn has_anything(&self) -> bool {
        self.text.chars().any(|c| !c.is_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Model;

    #[test]
    fn defaults_to_empty() {
        let text = Text::default();
        assert_eq!(text.text(), "");
        assert!(!text.has_anything());
    }

    #[test]
    fn has_anything_ignores_whitespace() {
        let mut text = Text::new("comment", "Comment");

        text.set(" \t ");
        assert!(!text.has_anything());

        text.set_text(" x ");
        assert!(text.has_anything());
        assert_eq!(text.get(), " x ");
    }

    #[test]
    fn round_trip() {
        let mut source = Text::new("comment", "Comment");
        source.set("hello");

        let snapshot = source.extract();
        assert_eq!(snapshot.get("text"), Some(&serde_json::json!("hello")));

        let mut target = Text::default();
        target.restore(&snapshot).unwrap();
        assert_eq!(target.text(), "hello");
        assert_eq!(target.name(), "comment");

        target.reset();
        assert_eq!(target.text(), "");
    }
}
