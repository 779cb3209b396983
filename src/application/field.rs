/// A single-line text input with a cursor.
///
/// The cursor counts characters, not bytes, so accented names edit cleanly.
///
/// # Examples
///
/// ```
/// use promo_upload::application::TextField;
///
/// let mut field = TextField::with_value("Kovács");
/// field.move_home();
/// field.insert_char('É');
/// assert_eq!(field.value(), "ÉKovács");
/// assert_eq!(field.cursor(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field holding `value` with the cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.value.insert(offset, c);
        self.cursor += 1;
    }

    /// Inserts pasted text at the cursor. Line breaks are dropped.
    pub fn insert_str(&mut self, text: &str) {
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        let offset = self.byte_offset(self.cursor);
        self.value.insert_str(offset, &text);
        self.cursor += text.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let offset = self.byte_offset(self.cursor - 1);
            self.value.remove(offset);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let offset = self.byte_offset(self.cursor);
            self.value.remove(offset);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }
}
