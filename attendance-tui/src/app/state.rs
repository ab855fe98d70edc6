#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Hr,
    Employee,
    QrDisplay,
}

impl View {
    pub const ALL: [View; 3] = [View::Hr, View::Employee, View::QrDisplay];

    pub fn title(self) -> &'static str {
        match self {
            View::Hr => "HR Dashboard",
            View::Employee => "Employee Dashboard",
            View::QrDisplay => "QR Display",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Hr => 0,
            View::Employee => 1,
            View::QrDisplay => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, s: &str) {
        *self = Self::from_str(s);
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos - 1;
        while !self.value.is_char_boundary(p) {
            p -= 1;
        }
        p
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    pub input: TextInput,
    pub checked: bool,
}

impl FormField {
    pub fn text(label: &'static str) -> Self {
        Self {
            label,
            kind: FieldKind::Text,
            input: TextInput::new(),
            checked: false,
        }
    }

    pub fn secret(label: &'static str) -> Self {
        Self {
            kind: FieldKind::Secret,
            ..Self::text(label)
        }
    }

    pub fn toggle(label: &'static str, checked: bool) -> Self {
        Self {
            kind: FieldKind::Toggle,
            checked,
            ..Self::text(label)
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.input.set(value);
        self
    }

    /// What the renderer shows for this field.
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Text => self.input.value.clone(),
            FieldKind::Secret => "•".repeat(self.input.value.chars().count()),
            FieldKind::Toggle => (if self.checked { "[x]" } else { "[ ]" }).to_string(),
        }
    }
}

/// A vertical list of labelled inputs with one focused field.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focused: usize,
    pub error: Option<String>,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            focused: 0,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focused)
    }

    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.focused_field_mut() else {
            return;
        };
        match field.kind {
            FieldKind::Toggle => {
                if c == ' ' {
                    field.checked = !field.checked;
                }
            }
            FieldKind::Text | FieldKind::Secret => field.input.insert(c),
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.input.backspace();
        }
    }

    pub fn move_cursor(&mut self, left: bool) {
        if let Some(field) = self.focused_field_mut() {
            if left {
                field.input.move_left();
            } else {
                field.input.move_right();
            }
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.input.trimmed())
            .unwrap_or_default()
    }

    /// Raw value without trimming, for passwords.
    pub fn raw_value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.input.value.as_str())
            .unwrap_or_default()
    }

    pub fn checked(&self, index: usize) -> bool {
        self.fields.get(index).is_some_and(|f| f.checked)
    }

    pub fn clear_secrets(&mut self) {
        for field in &mut self.fields {
            if field.kind == FieldKind::Secret {
                field.input.clear();
            }
        }
    }
}

/// Actions offered in a view's side menu. An action either runs straight
/// away or first opens its form.
pub trait MenuItem: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn has_form(self) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu<A: MenuItem> {
    pub selected: usize,
    pub open: Option<A>,
}

impl<A: MenuItem> Default for Menu<A> {
    fn default() -> Self {
        Self {
            selected: 0,
            open: None,
        }
    }
}

impl<A: MenuItem> Menu<A> {
    pub fn current(&self) -> A {
        A::ALL[self.selected.min(A::ALL.len() - 1)]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % A::ALL.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + A::ALL.len() - 1) % A::ALL.len();
    }

    pub fn is_form_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn close(&mut self) {
        self.open = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_cycles_in_both_directions() {
        assert_eq!(View::Hr.next(), View::Employee);
        assert_eq!(View::QrDisplay.next(), View::Hr);
        assert_eq!(View::Hr.previous(), View::QrDisplay);
    }

    #[test]
    fn text_input_handles_multibyte_chars() {
        let mut input = TextInput::new();
        input.insert('é');
        input.insert('x');
        input.move_left();
        input.backspace();
        assert_eq!(input.value, "x");
        assert_eq!(input.cursor, 0);
        input.move_right();
        assert_eq!(input.cursor, 1);
        input.move_right();
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn form_routes_input_to_focused_field() {
        let mut form = Form::new(vec![
            FormField::text("Name"),
            FormField::secret("Password"),
            FormField::toggle("Active", true),
        ]);
        form.input_char('a');
        form.next_field();
        form.input_char('p');
        form.input_char('w');
        form.next_field();
        form.input_char('x');
        form.input_char(' ');

        assert_eq!(form.value(0), "a");
        assert_eq!(form.raw_value(1), "pw");
        assert_eq!(form.fields[1].display_value(), "••");
        assert!(!form.checked(2));

        form.next_field();
        assert_eq!(form.focused, 0);
        form.previous_field();
        assert_eq!(form.focused, 2);

        form.clear_secrets();
        assert_eq!(form.raw_value(1), "");
        assert_eq!(form.value(0), "a");
    }
}
