//! State of the message composer: editable text plus submission history.

/// Maximum allowed input length in characters.
const MAX_INPUT_LENGTH: usize = 4096;

/// Number of submitted messages kept for Up/Down recall.
const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposerState {
    /// The current text being composed.
    text: String,
    /// Cursor position (character index, not byte).
    cursor_position: usize,
    /// Submitted texts, newest first.
    history: Vec<String>,
    /// Position in `history` while recalling; `None` when editing fresh text.
    history_index: Option<usize>,
}

impl ComposerState {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the cursor position (character index).
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[cfg(test)]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Inserts a character at the cursor.
    /// Returns false if the input would exceed the maximum length.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.text.chars().count() >= MAX_INPUT_LENGTH {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        self.text.insert(byte_idx, ch);
        self.cursor_position += 1;
        true
    }

    /// Deletes the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete_char_at(&mut self) {
        if self.cursor_position < self.text.chars().count() {
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.text.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.text.chars().count();
    }

    /// Replaces the content, e.g. with a selected prompt template.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().take(MAX_INPUT_LENGTH).collect();
        self.move_cursor_end();
        self.history_index = None;
    }

    /// Takes the text for sending. Blank input is left untouched and yields
    /// `None`.
    pub fn submit(&mut self) -> Option<String> {
        if self.text.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.text);
        self.cursor_position = 0;
        self.history_index = None;
        self.history.insert(0, text.clone());
        self.history.truncate(HISTORY_LIMIT);

        Some(text)
    }

    /// Recalls the next older history entry (Up).
    pub fn history_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let index = match self.history_index {
            None => 0,
            Some(index) => (index + 1).min(self.history.len() - 1),
        };
        self.recall(Some(index));
    }

    /// Recalls the next newer history entry (Down); past the newest entry the
    /// field is emptied.
    pub fn history_next(&mut self) {
        let index = match self.history_index {
            None | Some(0) => None,
            Some(index) => Some(index - 1),
        };
        self.recall(index);
    }

    fn recall(&mut self, index: Option<usize>) {
        self.text = index
            .and_then(|index| self.history.get(index).cloned())
            .unwrap_or_default();
        self.history_index = index;
        self.move_cursor_end();
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> ComposerState {
        let mut state = ComposerState::default();
        for ch in text.chars() {
            state.insert_char(ch);
        }
        state
    }

    #[test]
    fn new_state_is_empty() {
        let state = ComposerState::default();
        assert!(state.is_empty());
        assert_eq!(state.cursor_position(), 0);
        assert!(state.history().is_empty());
    }

    #[test]
    fn insert_char_at_middle_position() {
        let mut state = typed("Ho");
        state.move_cursor_left();
        state.insert_char('i');

        assert_eq!(state.text(), "Hio");
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn backspace_and_delete_edit_around_cursor() {
        let mut state = typed("abc");
        state.delete_char_before();
        assert_eq!(state.text(), "ab");

        state.move_cursor_home();
        state.delete_char_at();
        assert_eq!(state.text(), "b");
        assert_eq!(state.cursor_position(), 0);

        state.delete_char_before();
        assert_eq!(state.text(), "b");
    }

    #[test]
    fn cursor_stays_within_bounds() {
        let mut state = typed("ab");
        state.move_cursor_right();
        assert_eq!(state.cursor_position(), 2);

        state.move_cursor_home();
        state.move_cursor_left();
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn handles_unicode_characters() {
        let mut state = typed("Привет");
        state.delete_char_before();
        assert_eq!(state.text(), "Приве");

        state.move_cursor_home();
        state.delete_char_at();
        assert_eq!(state.text(), "риве");
    }

    #[test]
    fn insert_char_respects_max_length_limit() {
        let mut state = ComposerState::default();
        for _ in 0..MAX_INPUT_LENGTH {
            assert!(state.insert_char('x'));
        }
        assert!(!state.insert_char('y'));
        assert_eq!(state.text().chars().count(), MAX_INPUT_LENGTH);
    }

    #[test]
    fn submit_takes_text_and_records_history() {
        let mut state = typed("hello");

        assert_eq!(state.submit(), Some("hello".to_owned()));
        assert!(state.is_empty());
        assert_eq!(state.cursor_position(), 0);
        assert_eq!(state.history(), ["hello".to_owned()]);
    }

    #[test]
    fn submit_ignores_blank_text() {
        let mut state = typed("   ");

        assert_eq!(state.submit(), None);
        assert_eq!(state.text(), "   ");
        assert!(state.history().is_empty());
    }

    #[test]
    fn history_is_capped() {
        let mut state = ComposerState::default();
        for index in 0..(HISTORY_LIMIT + 5) {
            state.set_text(&format!("message {index}"));
            state.submit();
        }

        assert_eq!(state.history().len(), HISTORY_LIMIT);
        assert_eq!(state.history()[0], format!("message {}", HISTORY_LIMIT + 4));
    }

    #[test]
    fn up_and_down_walk_history() {
        let mut state = ComposerState::default();
        for text in ["first", "second", "third"] {
            state.set_text(text);
            state.submit();
        }

        state.history_previous();
        assert_eq!(state.text(), "third");
        state.history_previous();
        assert_eq!(state.text(), "second");
        state.history_previous();
        state.history_previous();
        assert_eq!(state.text(), "first");

        state.history_next();
        assert_eq!(state.text(), "second");
        state.history_next();
        state.history_next();
        assert_eq!(state.text(), "");
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let mut state = ComposerState::default();
        state.set_text("Tell me a joke");

        assert_eq!(state.text(), "Tell me a joke");
        assert_eq!(state.cursor_position(), 14);
    }
}
