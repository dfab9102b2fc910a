//! Schema-driven modal form.
//!
//! One `tui-input` line per schema field. Raw text is coerced and validated
//! through [`SchemaExt`] on submit; problems are shown inline next to the
//! offending field and the form stays open.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use serde_json::Value;
use tui_input::{Input, InputRequest};

use networth_core::{FieldError, FieldType, FormData, FormField, FormSchema, SchemaExt};

use crate::theme;
use crate::widgets::centered;

const LABEL_WIDTH: usize = 22;

/// What the owner should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Continue,
    Submit,
    Cancel,
}

/// Text shown for an existing JSON value in an input box.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "yes".into(),
        Value::Bool(false) => "no".into(),
        other => other.to_string(),
    }
}

pub struct Form {
    title: String,
    schema: FormSchema,
    inputs: Vec<Input>,
    focus: usize,
    errors: Vec<FieldError>,
    /// Values the form was opened with, when editing an existing record.
    original: Option<FormData>,
}

impl Form {
    /// Build a form for `schema`, pre-filled from `initial`.
    pub fn new(title: impl Into<String>, schema: FormSchema, initial: &FormData) -> Self {
        let inputs = schema
            .fields
            .iter()
            .map(|f| Input::new(initial.get(&f.name).map(display_value).unwrap_or_default()))
            .collect();
        Self {
            title: title.into(),
            schema,
            inputs,
            focus: 0,
            errors: Vec::new(),
            original: None,
        }
    }

    /// Build a form editing an existing record. Fields the user blanks out
    /// are submitted as `null`.
    pub fn for_edit(title: impl Into<String>, schema: FormSchema, initial: &FormData) -> Self {
        Self {
            original: Some(initial.clone()),
            ..Self::new(title, schema, initial)
        }
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.schema.fields.get(self.focus)
    }

    #[cfg(test)]
    pub fn value(&self, name: &str) -> Option<&str> {
        let idx = self.schema.fields.iter().position(|f| f.name == name)?;
        self.inputs.get(idx).map(Input::value)
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    fn is_last(&self) -> bool {
        self.focus + 1 >= self.inputs.len()
    }

    fn next(&mut self) {
        if !self.inputs.is_empty() {
            self.focus = (self.focus + 1) % self.inputs.len();
        }
    }

    fn prev(&mut self) {
        if !self.inputs.is_empty() {
            self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
        }
    }

    fn set_focused_value(&mut self, value: String) {
        if let Some(input) = self.inputs.get_mut(self.focus) {
            *input = Input::new(value);
        }
    }

    /// Space flips a checkbox between yes and no.
    fn toggle_checkbox(&mut self) {
        let checked = self
            .inputs
            .get(self.focus)
            .is_some_and(|i| matches!(i.value().trim(), "yes" | "true" | "y" | "1" | "on" | "x"));
        self.set_focused_value(if checked { "no" } else { "yes" }.into());
    }

    /// Left/right walk through a select field's choices.
    fn cycle_option(&mut self, forward: bool) {
        let Some(options) = self.focused_field().and_then(|f| f.options.clone()) else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = self.inputs.get(self.focus).map(Input::value).unwrap_or_default();
        let next = match options.iter().position(|o| o.value == current) {
            Some(i) if forward => (i + 1) % options.len(),
            Some(i) => (i + options.len() - 1) % options.len(),
            None => 0,
        };
        if let Some(option) = options.get(next) {
            self.set_focused_value(option.value.clone());
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        let field_type = self.focused_field().map(|f| f.field_type);

        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => return FormOutcome::Cancel,
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => return FormOutcome::Submit,
            (_, KeyCode::Enter) if self.is_last() => return FormOutcome::Submit,
            (_, KeyCode::Enter | KeyCode::Tab | KeyCode::Down) => self.next(),
            (_, KeyCode::BackTab | KeyCode::Up) => self.prev(),
            (_, KeyCode::Char(' ')) if field_type == Some(FieldType::Checkbox) => {
                self.toggle_checkbox();
            }
            (_, KeyCode::Left) if field_type == Some(FieldType::Select) => self.cycle_option(false),
            (_, KeyCode::Right) if field_type == Some(FieldType::Select) => self.cycle_option(true),
            (_, code) => {
                let request = match code {
                    KeyCode::Char(c) => Some(InputRequest::InsertChar(c)),
                    KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
                    KeyCode::Delete => Some(InputRequest::DeleteNextChar),
                    KeyCode::Left => Some(InputRequest::GoToPrevChar),
                    KeyCode::Right => Some(InputRequest::GoToNextChar),
                    KeyCode::Home => Some(InputRequest::GoToStart),
                    KeyCode::End => Some(InputRequest::GoToEnd),
                    _ => None,
                };
                if let (Some(request), Some(input)) = (request, self.inputs.get_mut(self.focus)) {
                    input.handle(request);
                }
            }
        }
        FormOutcome::Continue
    }

    /// Coerce and validate. On failure the errors are kept for display and
    /// focus jumps to the first bad field.
    pub fn collect(&mut self) -> Option<FormData> {
        let pairs = self
            .schema
            .fields
            .iter()
            .zip(&self.inputs)
            .map(|(f, i)| (f.name.as_str(), i.value()));
        let built = match &self.original {
            Some(original) => self.schema.build_update(pairs, original),
            None => self.schema.build_form(pairs),
        };
        match built {
            Ok(data) => {
                self.errors.clear();
                Some(data)
            }
            Err(errors) => {
                if let Some(idx) = errors
                    .first()
                    .and_then(|e| self.schema.fields.iter().position(|f| f.name == e.field))
                {
                    self.focus = idx;
                }
                self.errors = errors;
                None
            }
        }
    }

    fn field_error(&self, name: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == name)
    }

    fn help_line(&self) -> Line<'static> {
        let Some(field) = self.focused_field() else {
            return Line::default();
        };
        let text = match (&field.options, &field.help_text, &field.placeholder) {
            (Some(options), _, _) if !options.is_empty() => format!(
                "←/→ choices: {}",
                options.iter().map(|o| o.label.as_str()).collect::<Vec<_>>().join(", ")
            ),
            (_, Some(help), _) => help.clone(),
            (_, _, Some(placeholder)) => format!("e.g. {placeholder}"),
            _ if field.field_type == FieldType::Checkbox => "space toggles".into(),
            _ if field.field_type == FieldType::Date => "YYYY-MM-DD".into(),
            _ => String::new(),
        };
        Line::styled(text, theme::key_hint())
    }

    /// Render as a centered popup. `status` is an extra line (submit
    /// progress or the backend's error) shown above the key hints.
    pub fn render(&self, frame: &mut Frame, area: Rect, status: Option<Line<'_>>) {
        let field_rows = self.schema.fields.len() + self.errors.len();
        let height = u16::try_from(field_rows + 6).unwrap_or(u16::MAX);
        let popup = centered(area, 72, height);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(theme::surface());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let value_width = usize::from(inner.width).saturating_sub(LABEL_WIDTH + 1).max(1);
        let mut lines: Vec<Line> = Vec::with_capacity(field_rows + 4);
        let mut cursor_row = 0;

        for (idx, (field, input)) in self.schema.fields.iter().zip(&self.inputs).enumerate() {
            let focused = idx == self.focus;
            let marker = if field.required { "*" } else { "" };
            let label = format!("{}{marker}", field.display_label());
            let label_style = if focused { theme::tab_active() } else { theme::text() };
            let scroll = input.visual_scroll(value_width);
            let visible: String = input.value().chars().skip(scroll).take(value_width).collect();

            if focused {
                cursor_row = lines.len();
            }
            lines.push(Line::from(vec![
                Span::styled(format!("{label:>width$} ", width = LABEL_WIDTH), label_style),
                Span::styled(visible, if focused { theme::table_selected() } else { theme::text() }),
            ]));
            if let Some(err) = self.field_error(&field.name) {
                lines.push(Line::from(vec![
                    Span::raw(" ".repeat(LABEL_WIDTH + 1)),
                    Span::styled(err.message.clone(), theme::error()),
                ]));
            }
        }

        lines.push(Line::default());
        lines.push(self.help_line());
        lines.push(status.unwrap_or_default());
        lines.push(Line::styled(
            "Tab next  Shift+Tab prev  Ctrl+S save  Esc cancel",
            theme::key_hint(),
        ));

        let visible_rows = usize::from(inner.height);
        let offset = cursor_row.saturating_sub(visible_rows.saturating_sub(5));
        let offset_u16 = u16::try_from(offset).unwrap_or(0);
        frame.render_widget(Paragraph::new(lines).scroll((offset_u16, 0)), inner);

        if let Some(input) = self.inputs.get(self.focus) {
            let col = input.visual_cursor().saturating_sub(input.visual_scroll(value_width));
            let x = inner.x + u16::try_from(LABEL_WIDTH + 1 + col).unwrap_or(0);
            let y = inner.y + u16::try_from(cursor_row - offset).unwrap_or(0);
            if x < inner.right() && y < inner.bottom() {
                frame.set_cursor_position((x, y));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema() -> FormSchema {
        serde_json::from_value(json!({
            "name": "cash_holding",
            "fields": [
                {"name": "account_name", "type": "text", "label": "Account", "required": true},
                {"name": "current_balance", "type": "currency", "required": true},
                {"name": "account_type", "type": "select",
                 "options": [{"value": "checking", "label": "Checking"},
                             {"value": "savings", "label": "Savings"}]},
                {"name": "is_joint", "type": "checkbox"}
            ]
        }))
        .unwrap()
    }

    fn press(form: &mut Form, code: KeyCode) -> FormOutcome {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(form: &mut Form, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    #[test]
    fn typed_values_are_coerced() {
        let mut form = Form::new("Add", schema(), &FormData::new());
        type_text(&mut form, "Rainy day");
        press(&mut form, KeyCode::Tab);
        type_text(&mut form, "1,500");
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Right);
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Char(' '));

        let data = form.collect().unwrap();
        assert_eq!(data["account_name"], json!("Rainy day"));
        assert_eq!(data["current_balance"], json!(1500));
        assert_eq!(data["account_type"], json!("checking"));
        assert_eq!(data["is_joint"], json!(true));
    }

    #[test]
    fn missing_required_field_keeps_form_open() {
        let mut form = Form::new("Add", schema(), &FormData::new());
        type_text(&mut form, "Rainy day");
        assert!(form.collect().is_none());
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors()[0].field, "current_balance");
        assert_eq!(form.focused_field().unwrap().name, "current_balance");
    }

    #[test]
    fn prefill_and_navigation() {
        let initial: FormData = serde_json::from_value(json!({
            "account_name": "Checking",
            "current_balance": 42.5,
            "is_joint": false
        }))
        .unwrap();
        let mut form = Form::new("Edit", schema(), &initial);
        assert_eq!(form.value("account_name"), Some("Checking"));
        assert_eq!(form.value("current_balance"), Some("42.5"));
        assert_eq!(form.value("is_joint"), Some("no"));

        press(&mut form, KeyCode::BackTab);
        assert_eq!(form.focused_field().unwrap().name, "is_joint");
        assert_eq!(press(&mut form, KeyCode::Enter), FormOutcome::Submit);
        assert_eq!(press(&mut form, KeyCode::Esc), FormOutcome::Cancel);
    }

    #[test]
    fn clearing_a_field_on_edit_sends_null() {
        let initial: FormData = serde_json::from_value(json!({
            "account_name": "Checking",
            "current_balance": 42.5,
            "account_type": "savings"
        }))
        .unwrap();
        let mut form = Form::for_edit("Edit", schema(), &initial);
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Tab);
        for _ in 0.."savings".len() {
            press(&mut form, KeyCode::Backspace);
        }

        let data = form.collect().unwrap();
        assert_eq!(data["account_type"], Value::Null);
        assert_eq!(data["current_balance"], json!(42.5));
        assert_eq!(data["is_joint"], json!(false));
    }

    #[test]
    fn backspace_edits_the_focused_input() {
        let mut form = Form::new("Add", schema(), &FormData::new());
        type_text(&mut form, "abc");
        press(&mut form, KeyCode::Backspace);
        assert_eq!(form.value("account_name"), Some("ab"));
    }
}
