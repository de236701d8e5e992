/// A presentation hint for how new display text should appear.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Scroll {
    /// Replace the text in place.
    #[default]
    None,

    /// The new text scrolls in from below, pushing the old text up.
    Up,

    /// The new text scrolls in from above, pushing the old text down.
    Down,
}

/// The text-entry surface of the calculator.
///
/// Cursor positions are counted in characters, not bytes.
pub trait CalculatorDisplay {
    /// Returns the text currently shown.
    fn text(&self) -> &str;

    /// Replaces the text, moving the cursor to the end.
    fn set_text(&mut self, text: &str, scroll: Scroll);

    /// Inserts text at the cursor, moving the cursor past it.
    fn insert(&mut self, text: &str);

    /// Returns the position of the cursor.
    fn selection_start(&self) -> usize;

    /// Deletes the character before the cursor, like a press of the delete key.
    fn dispatch_delete(&mut self);
}

/// An in-memory [`CalculatorDisplay`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextDisplay {
    text: String,
    cursor: usize,
    last_scroll: Scroll,
}

impl TextDisplay {
    /// Creates an empty display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor, clamping it to the text.
    pub fn set_selection(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.text.chars().count());
    }

    /// Returns the scroll hint given with the last call to [`CalculatorDisplay::set_text`].
    pub fn last_scroll(&self) -> Scroll {
        self.last_scroll
    }

    /// Returns the byte offset of the cursor.
    fn byte_offset(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }
}

impl CalculatorDisplay for TextDisplay {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str, scroll: Scroll) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
        self.last_scroll = scroll;
    }

    fn insert(&mut self, text: &str) {
        let offset = self.byte_offset();
        self.text.insert_str(offset, text);
        self.cursor += text.chars().count();
    }

    fn selection_start(&self) -> usize {
        self.cursor
    }

    fn dispatch_delete(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let offset = self.byte_offset();
        self.text.remove(offset);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn insert_at_cursor() {
        let mut display = TextDisplay::new();
        display.insert("12");
        display.insert("\u{00d7}3");
        assert_eq!(display.text(), "12\u{00d7}3");
        assert_eq!(display.selection_start(), 4);

        display.set_selection(2);
        display.insert("0");
        assert_eq!(display.text(), "120\u{00d7}3");
        assert_eq!(display.selection_start(), 3);
    }

    #[test]
    fn delete_before_cursor() {
        let mut display = TextDisplay::new();
        display.set_text("1\u{2212}2", Scroll::Up);
        assert_eq!(display.last_scroll(), Scroll::Up);

        display.set_selection(2);
        display.dispatch_delete();
        assert_eq!(display.text(), "12");
        assert_eq!(display.selection_start(), 1);

        display.set_selection(0);
        display.dispatch_delete();
        assert_eq!(display.text(), "12");
    }

    #[test]
    fn selection_is_clamped() {
        let mut display = TextDisplay::new();
        display.set_text("\u{221e}", Scroll::None);
        display.set_selection(10);
        assert_eq!(display.selection_start(), 1);
    }
}
