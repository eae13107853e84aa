//! Lookahead window over the host parser's pending lexemes

/// Ordered read-only view of the alphanumeric lexemes pending recognition
///
/// The window is only valid for the duration of one feeder callback; it is
/// always handed out by reference so it cannot be retained.
pub trait LexemeWindow {
    /// Number of lexemes in the window
    fn lexeme_count(&self) -> usize;

    /// The i-th lexeme (0-based), or `None` past the end of the window
    fn lexeme(&self, index: usize) -> Option<&str>;

    /// Whether the window holds no lexemes
    fn is_empty(&self) -> bool {
        self.lexeme_count() == 0
    }
}

/// Window backed by a borrowed slice of tokens
#[derive(Debug, Clone, Copy)]
pub struct SliceWindow<'a, S: AsRef<str>> {
    lexemes: &'a [S],
}

impl<'a, S: AsRef<str>> SliceWindow<'a, S> {
    /// Wrap a slice of tokens
    ///
    /// # Examples
    ///
    /// ```
    /// use lkb_domain::{LexemeWindow, SliceWindow};
    ///
    /// let tokens = ["New", "York"];
    /// let window = SliceWindow::new(&tokens);
    /// assert_eq!(window.lexeme(1), Some("York"));
    /// ```
    pub fn new(lexemes: &'a [S]) -> Self {
        Self { lexemes }
    }
}

impl<S: AsRef<str>> LexemeWindow for SliceWindow<'_, S> {
    fn lexeme_count(&self) -> usize {
        self.lexemes.len()
    }

    fn lexeme(&self, index: usize) -> Option<&str> {
        self.lexemes.get(index).map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_window() {
        let tokens = vec!["Ada".to_string(), "Lovelace".to_string()];
        let window = SliceWindow::new(&tokens);

        assert_eq!(window.lexeme_count(), 2);
        assert_eq!(window.lexeme(0), Some("Ada"));
        assert_eq!(window.lexeme(2), None);
        assert!(!window.is_empty());
    }

    #[test]
    fn test_empty_window() {
        let tokens: [&str; 0] = [];
        let window = SliceWindow::new(&tokens);
        assert!(window.is_empty());
        assert_eq!(window.lexeme(0), None);
    }
}
