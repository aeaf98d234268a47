//! Patient data input form.
//!
//! Two kinds of widget: free numeric entry (validated against the field
//! range on submit) and choice fields cycling the fixed option labels.
//! Choice widgets are the reason unknown categorical labels cannot reach
//! the encoder: there is no way to type one.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{
    yes_no_from_label, ChestPainType, PatientRecord, RestingEcg, Sex, StSlope, YES_NO_LABELS,
};
use crate::tui::styles::ClinicalTheme;

/// Input widget of a form field.
#[derive(Debug, Clone)]
pub enum FieldInput {
    /// Free numeric entry.
    Numeric {
        value: String,
        min: f64,
        max: f64,
        /// Whether decimal input is allowed (Oldpeak only).
        decimals: bool,
    },
    /// One of a fixed set of labels.
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

/// Form field definition.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub input: FieldInput,
}

impl FormField {
    fn numeric(label: &'static str, hint: &'static str, min: f64, max: f64) -> Self {
        Self {
            label,
            hint,
            input: FieldInput::Numeric {
                value: String::new(),
                min,
                max,
                decimals: false,
            },
        }
    }

    fn decimal(label: &'static str, hint: &'static str, min: f64, max: f64) -> Self {
        Self {
            label,
            hint,
            input: FieldInput::Numeric {
                value: String::new(),
                min,
                max,
                decimals: true,
            },
        }
    }

    fn choice(label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            label,
            hint: "",
            input: FieldInput::Choice {
                options,
                selected: 0,
            },
        }
    }
}

/// Patient form state.
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField::numeric("Edad", "años (1-120)", 1.0, 120.0),
                FormField::choice("Sexo", &Sex::LABELS),
                FormField::choice("Dolor torácico", &ChestPainType::LABELS),
                FormField::numeric("Presión en reposo", "mm Hg (0-250)", 0.0, 250.0),
                FormField::numeric("Colesterol sérico", "mg/dl (0-600)", 0.0, 600.0),
                FormField::choice("Glucemia en ayunas > 120", &YES_NO_LABELS),
                FormField::choice("ECG en reposo", &RestingEcg::LABELS),
                FormField::numeric("Frecuencia cardíaca máx.", "lpm (60-220)", 60.0, 220.0),
                FormField::choice("Angina por ejercicio", &YES_NO_LABELS),
                FormField::decimal("Oldpeak", "mm (0.0-6.0)", 0.0, 6.0),
                FormField::choice("Pendiente ST", &StSlope::LABELS),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl PatientFormState {
    /// Move to the next field.
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field.
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field (numeric fields only).
    pub fn input_char(&mut self, c: char) {
        if let FieldInput::Numeric {
            value, decimals, ..
        } = &mut self.fields[self.selected_field].input
        {
            if c.is_ascii_digit() || (*decimals && c == '.' && !value.contains('.')) {
                value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character of the current field.
    pub fn delete_char(&mut self) {
        if let FieldInput::Numeric { value, .. } = &mut self.fields[self.selected_field].input {
            value.pop();
        }
    }

    /// Clear the current field.
    pub fn clear_field(&mut self) {
        if let FieldInput::Numeric { value, .. } = &mut self.fields[self.selected_field].input {
            value.clear();
        }
    }

    /// Cycle the current choice field backwards.
    pub fn cycle_prev(&mut self) {
        if let FieldInput::Choice { options, selected } =
            &mut self.fields[self.selected_field].input
        {
            *selected = if *selected == 0 {
                options.len() - 1
            } else {
                *selected - 1
            };
            self.error_message = None;
        }
    }

    /// Cycle the current choice field forwards.
    pub fn cycle_next(&mut self) {
        if let FieldInput::Choice { options, selected } =
            &mut self.fields[self.selected_field].input
        {
            *selected = (*selected + 1) % options.len();
            self.error_message = None;
        }
    }

    fn numeric_value(&self, index: usize) -> Result<f64, String> {
        let field = &self.fields[index];
        let FieldInput::Numeric {
            value, min, max, ..
        } = &field.input
        else {
            unreachable!("field {index} is not numeric");
        };

        let parsed: f64 = value
            .parse()
            .map_err(|_| format!("{}: valor no numérico", field.label))?;

        if parsed < *min || parsed > *max {
            return Err(format!(
                "{}: debe estar entre {} y {}",
                field.label, min, max
            ));
        }

        Ok(parsed)
    }

    fn choice_label(&self, index: usize) -> &'static str {
        match &self.fields[index].input {
            FieldInput::Choice { options, selected } => options[*selected],
            FieldInput::Numeric { .. } => unreachable!("field {index} is not a choice"),
        }
    }

    /// Validate and convert the form into a `PatientRecord`.
    ///
    /// Numeric fields are parsed and range-checked; choice fields carry
    /// labels straight from the fixed option tables, so label parsing
    /// cannot fail in practice but is still checked.
    ///
    /// # Errors
    /// Returns the first violation as a user-facing message.
    pub fn to_patient_record(&self) -> Result<PatientRecord, String> {
        let age = self.numeric_value(0)? as u32;
        let sex = Sex::from_label(self.choice_label(1)).map_err(|e| e.to_string())?;
        let chest_pain =
            ChestPainType::from_label(self.choice_label(2)).map_err(|e| e.to_string())?;
        let resting_bp = self.numeric_value(3)? as u32;
        let cholesterol = self.numeric_value(4)? as u32;
        let fasting_bs =
            yes_no_from_label("FastingBS", self.choice_label(5)).map_err(|e| e.to_string())?;
        let resting_ecg =
            RestingEcg::from_label(self.choice_label(6)).map_err(|e| e.to_string())?;
        let max_hr = self.numeric_value(7)? as u32;
        let exercise_angina = yes_no_from_label("ExerciseAngina", self.choice_label(8))
            .map_err(|e| e.to_string())?;
        // The original slider steps by 0.1; free text entry rounds to the
        // same granularity at submit time.
        let oldpeak = (self.numeric_value(9)? * 10.0).round() / 10.0;
        let st_slope = StSlope::from_label(self.choice_label(10)).map_err(|e| e.to_string())?;

        Ok(PatientRecord {
            age,
            sex,
            chest_pain,
            resting_bp,
            cholesterol,
            fasting_bs,
            resting_ecg,
            max_hr,
            exercise_angina,
            oldpeak,
            st_slope,
        })
    }

    /// Load the original form's default values.
    pub fn load_sample_data(&mut self) {
        let samples = ["50", "120", "200", "150", "0.0"];
        let mut n = 0;
        for field in self.fields.iter_mut() {
            match &mut field.input {
                FieldInput::Numeric { value, .. } => {
                    *value = samples[n].to_string();
                    n += 1;
                }
                FieldInput::Choice { selected, .. } => *selected = 0,
            }
        }
        self.error_message = None;
    }
}

/// Render the patient data input form.
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicalTheme::text()),
        Span::styled("Predicción de Riesgo de Infarto", ClinicalTheme::title()),
        Span::styled(
            " │ Introduce los valores del paciente",
            ClinicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            ClinicalTheme::border_focused()
        } else {
            ClinicalTheme::border()
        };
        let title_style = if is_selected {
            ClinicalTheme::focused()
        } else {
            ClinicalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = match &field.input {
            FieldInput::Numeric { value, .. } => {
                let value_display = if value.is_empty() {
                    Span::styled(field.hint, ClinicalTheme::text_muted())
                } else {
                    Span::styled(value.as_str(), ClinicalTheme::text())
                };
                Line::from(vec![
                    Span::raw(" "),
                    value_display,
                    if is_selected {
                        Span::styled("▌", ClinicalTheme::focused())
                    } else {
                        Span::raw("")
                    },
                ])
            }
            FieldInput::Choice { options, selected } => {
                if is_selected {
                    Line::from(vec![
                        Span::styled(" ◀ ", ClinicalTheme::key_hint()),
                        Span::styled(options[*selected], ClinicalTheme::text()),
                        Span::styled(" ▶", ClinicalTheme::key_hint()),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw("   "),
                        Span::styled(options[*selected], ClinicalTheme::text()),
                    ])
                }
            }
        };

        let widget = Paragraph::new(content).block(block);
        f.render_widget(widget, chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", ClinicalTheme::danger()),
            Span::styled(err.clone(), ClinicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", ClinicalTheme::key_hint()),
            Span::styled("Navegar ", ClinicalTheme::key_desc()),
            Span::styled("[←→] ", ClinicalTheme::key_hint()),
            Span::styled("Opción ", ClinicalTheme::key_desc()),
            Span::styled("[Enter] ", ClinicalTheme::key_hint()),
            Span::styled("Predecir riesgo ", ClinicalTheme::key_desc()),
            Span::styled("[S] ", ClinicalTheme::key_hint()),
            Span::styled("Valores de ejemplo ", ClinicalTheme::key_desc()),
            Span::styled("[Esc] ", ClinicalTheme::key_hint()),
            Span::styled("Salir", ClinicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_builds_canonical_record() {
        let mut form = PatientFormState::default();
        form.load_sample_data();

        let record = form.to_patient_record().expect("sample should parse");
        assert_eq!(record.age, 50);
        assert_eq!(record.sex, Sex::Male);
        assert_eq!(record.chest_pain, ChestPainType::TypicalAngina);
        assert_eq!(record.resting_bp, 120);
        assert_eq!(record.cholesterol, 200);
        assert!(!record.fasting_bs);
        assert_eq!(record.resting_ecg, RestingEcg::Normal);
        assert_eq!(record.max_hr, 150);
        assert!(!record.exercise_angina);
        assert!(record.oldpeak.abs() < f64::EPSILON);
        assert_eq!(record.st_slope, StSlope::Up);
    }

    #[test]
    fn test_empty_numeric_field_is_rejected() {
        let form = PatientFormState::default();
        let err = form.to_patient_record().unwrap_err();
        assert!(err.contains("Edad"));
    }

    #[test]
    fn test_age_widget_boundaries() {
        let mut form = PatientFormState::default();
        form.load_sample_data();

        for (input, ok) in [("1", true), ("120", true), ("0", false), ("121", false)] {
            if let FieldInput::Numeric { value, .. } = &mut form.fields[0].input {
                *value = input.to_string();
            }
            assert_eq!(form.to_patient_record().is_ok(), ok, "Edad={input}");
        }
    }

    #[test]
    fn test_choice_cycling_wraps() {
        let mut form = PatientFormState::default();
        form.selected_field = 1; // Sexo

        form.cycle_next();
        assert_eq!(form.choice_label(1), "Femenino");
        form.cycle_next();
        assert_eq!(form.choice_label(1), "Masculino");
        form.cycle_prev();
        assert_eq!(form.choice_label(1), "Femenino");
    }

    #[test]
    fn test_input_char_filters_non_numeric() {
        let mut form = PatientFormState::default();
        form.input_char('a');
        form.input_char('5');
        form.input_char('.'); // Edad is an integer field
        form.input_char('0');
        if let FieldInput::Numeric { value, .. } = &form.fields[0].input {
            assert_eq!(value, "50");
        }
    }

    #[test]
    fn test_input_char_ignored_on_choice_fields() {
        let mut form = PatientFormState::default();
        form.selected_field = 1;
        form.input_char('5');
        assert_eq!(form.choice_label(1), "Masculino");
    }

    #[test]
    fn test_oldpeak_rounds_to_slider_step() {
        let mut form = PatientFormState::default();
        form.load_sample_data();
        if let FieldInput::Numeric { value, .. } = &mut form.fields[9].input {
            *value = "2.34".to_string();
        }
        let record = form.to_patient_record().expect("should parse");
        assert!((record.oldpeak - 2.3).abs() < 1e-12);
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = PatientFormState::default();
        form.prev_field();
        assert_eq!(form.selected_field, form.fields.len() - 1);
        form.next_field();
        assert_eq!(form.selected_field, 0);
    }
}
