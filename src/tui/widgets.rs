pub const COMPANY_FIELD: &str = "company";
pub const API_KEY_FIELD: &str = "api_key";

/// Form field representing a single input
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub sensitive: bool,
    pub value: String,
}

impl FormField {
    pub fn company(value: &str) -> Self {
        Self {
            id: COMPANY_FIELD,
            label: "Company",
            description: "Name of the company to analyze",
            sensitive: false,
            value: value.to_string(),
        }
    }

    pub fn api_key(value: &str, masked: bool) -> Self {
        Self {
            id: API_KEY_FIELD,
            label: "API key",
            description: "OpenAI API key, saved locally for next time",
            sensitive: masked,
            value: value.to_string(),
        }
    }

    /// Get display value (masked for sensitive)
    pub fn display_value(&self) -> String {
        if self.sensitive && !self.value.is_empty() {
            "*".repeat(self.value.chars().count().min(20))
        } else {
            self.value.clone()
        }
    }
}

/// Raw (untrimmed) values captured by the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub company: String,
    pub api_key: String,
}

/// Form state
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected: usize,
    pub editing: bool,
    /// Cursor position in chars within the selected field
    pub cursor_pos: usize,
}

impl FormState {
    pub fn new(company: &str, api_key: &str, mask_credential: bool) -> Self {
        let fields = vec![
            FormField::company(company),
            FormField::api_key(api_key, mask_credential),
        ];

        // Start on the first empty field
        let selected = fields.iter().position(|f| f.value.is_empty()).unwrap_or(0);

        Self {
            fields,
            selected,
            editing: false,
            cursor_pos: 0,
        }
    }

    pub fn current_field(&self) -> Option<&FormField> {
        self.fields.get(self.selected)
    }

    pub fn current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.selected)
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.fields.len() {
            self.selected += 1;
        }
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
        if let Some(field) = self.current_field() {
            self.cursor_pos = field.value.chars().count();
        }
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    pub fn insert_char(&mut self, c: char) {
        let pos = self.cursor_pos;
        if let Some(field) = self.current_field_mut() {
            let at = byte_offset(&field.value, pos);
            field.value.insert(at, c);
        }
        self.cursor_pos += 1;
    }

    pub fn delete_char(&mut self) {
        let pos = self.cursor_pos;
        if pos > 0 {
            if let Some(field) = self.current_field_mut() {
                let at = byte_offset(&field.value, pos - 1);
                field.value.remove(at);
            }
            self.cursor_pos -= 1;
        }
    }

    /// Clear the selected field
    pub fn clear_current(&mut self) {
        if let Some(field) = self.current_field_mut() {
            field.value.clear();
        }
        self.cursor_pos = 0;
    }

    pub fn values(&self) -> FormValues {
        let value_of = |id: &str| {
            self.fields
                .iter()
                .find(|f| f.id == id)
                .map(|f| f.value.clone())
                .unwrap_or_default()
        };

        FormValues {
            company: value_of(COMPANY_FIELD),
            api_key: value_of(API_KEY_FIELD),
        }
    }
}

fn byte_offset(value: &str, char_pos: usize) -> usize {
    value
        .char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefilled_key_selects_company() {
        let state = FormState::new("", "sk-saved", true);
        assert_eq!(state.selected, 0);
        assert_eq!(state.values().api_key, "sk-saved");

        let state = FormState::new("Acme", "", true);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_typing_and_deleting() {
        let mut state = FormState::new("", "", true);
        state.start_editing();
        for c in "Acmé".chars() {
            state.insert_char(c);
        }
        state.delete_char();
        state.insert_char('e');
        state.stop_editing();

        assert_eq!(state.values().company, "Acme");
        assert!(!state.editing);
    }

    #[test]
    fn test_editing_appends_at_end() {
        let mut state = FormState::new("Acme", "", true);
        state.selected = 0;
        state.start_editing();
        state.insert_char('!');
        assert_eq!(state.values().company, "Acme!");
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut state = FormState::new("Acme", "sk", true);
        state.move_up();
        assert_eq!(state.selected, 0);
        state.move_down();
        state.move_down();
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_credential_is_masked() {
        let state = FormState::new("Acme", "sk-secret", true);
        assert_eq!(state.fields[1].display_value(), "*********");
        assert_eq!(state.fields[0].display_value(), "Acme");

        let unmasked = FormState::new("Acme", "sk-secret", false);
        assert_eq!(unmasked.fields[1].display_value(), "sk-secret");
    }

    #[test]
    fn test_clear_current() {
        let mut state = FormState::new("Acme", "sk", true);
        state.selected = 1;
        state.clear_current();
        assert_eq!(
            state.values(),
            FormValues {
                company: "Acme".to_string(),
                api_key: String::new(),
            }
        );
    }
}
