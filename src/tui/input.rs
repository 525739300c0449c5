//! Input field handling for the terminal user interface.

/// A text input field with cursor position and active state management.
#[derive(Clone, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
            active: false,
        }
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let prev = previous_boundary(&self.value, self.cursor);
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    /// Move cursor one character to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = previous_boundary(&self.value, self.cursor);
        }
    }

    /// Move cursor one character to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.len() {
            let ch_len = self.value[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor += ch_len;
        }
    }

    /// Empty the field and reset the cursor.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// The trimmed field contents.
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

/// Byte index of the character boundary before `cursor`.
fn previous_boundary(s: &str, cursor: usize) -> usize {
    s[..cursor]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut field = InputField::new();
        field.handle_char('h');
        field.handle_char('i');
        assert_eq!(field.value, "hi");
        field.handle_backspace();
        assert_eq!(field.value, "h");
        assert_eq!(field.cursor, 1);
    }

    #[test]
    fn test_cursor_handles_multibyte() {
        let mut field = InputField::with_value("café");
        field.move_cursor_left();
        assert_eq!(field.cursor, 3);
        field.handle_backspace();
        assert_eq!(field.value, "caé");
    }
}
