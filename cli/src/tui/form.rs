//! Cursor and focus state for the add/edit dialog.
//!
//! Name and description are edited in place on the store's draft. The due
//! date is kept as typed text and parsed on submit, so relative entries like
//! `tom` or `+3d` work.

use todomaster_core::Draft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    DueDate,
    Priority,
}

impl FormField {
    pub const ORDER: [FormField; 4] = [
        FormField::Name,
        FormField::Description,
        FormField::DueDate,
        FormField::Priority,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Task Name",
            FormField::Description => "Task Description",
            FormField::DueDate => "Due Date",
            FormField::Priority => "Priority",
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, FormField::Priority)
    }

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub focus: FormField,
    pub due_input: String,
    /// Cursor in chars within the focused text field.
    pub cursor: usize,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            focus: FormField::Name,
            due_input: String::new(),
            cursor: 0,
        }
    }
}

impl FormState {
    /// Fresh state for `draft`, cursor at the end of the name.
    pub fn for_draft(draft: &Draft) -> Self {
        Self {
            focus: FormField::Name,
            due_input: draft
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            cursor: draft.name.chars().count(),
        }
    }

    pub fn focus(&mut self, field: FormField, draft: &Draft) {
        self.focus = field;
        self.cursor = self.text(draft).map(|s| s.chars().count()).unwrap_or(0);
    }

    /// Text of the focused field, if it is a text field.
    pub fn text<'d>(&'d self, draft: &'d Draft) -> Option<&'d str> {
        match self.focus {
            FormField::Name => Some(&draft.name),
            FormField::Description => Some(&draft.description),
            FormField::DueDate => Some(&self.due_input),
            FormField::Priority => None,
        }
    }

    fn text_mut<'d>(&'d mut self, draft: &'d mut Draft) -> Option<&'d mut String> {
        match self.focus {
            FormField::Name => Some(&mut draft.name),
            FormField::Description => Some(&mut draft.description),
            FormField::DueDate => Some(&mut self.due_input),
            FormField::Priority => None,
        }
    }

    pub fn input_char(&mut self, c: char, draft: &mut Draft) {
        let cursor = self.cursor;
        if let Some(text) = self.text_mut(draft) {
            let byte_index = byte_index(text, cursor);
            text.insert(byte_index, c);
            self.cursor += 1;
        }
    }

    pub fn delete_char(&mut self, draft: &mut Draft) {
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        if let Some(text) = self.text_mut(draft) {
            let byte_index = byte_index(text, cursor - 1);
            text.remove(byte_index);
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self, draft: &Draft) {
        let len = self.text(draft).map(|s| s.chars().count()).unwrap_or(0);
        if self.cursor < len {
            self.cursor += 1;
        }
    }
}

fn byte_index(text: &str, char_pos: usize) -> usize {
    text.chars().take(char_pos).map(|c| c.len_utf8()).sum()
}
