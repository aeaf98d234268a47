//! Screening outcome view: one of two literal messages.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{Assessment, RiskLabel};
use crate::tui::styles::ClinicalTheme;

/// Render the screening outcome.
pub fn render_outcome(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_outcome_header(f, chunks[0]);
    render_outcome_content(f, chunks[1], assessment);
    render_outcome_footer(f, chunks[2]);
}

fn render_outcome_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicalTheme::text()),
        Span::styled("Resultado", ClinicalTheme::title()),
        Span::styled(" │ Evaluación de riesgo", ClinicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_outcome_content(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let label_style = ClinicalTheme::risk_label(assessment.label);
    let border_style = match assessment.label {
        RiskLabel::Low => ClinicalTheme::success(),
        RiskLabel::High => ClinicalTheme::danger(),
    };

    let icon = match assessment.label {
        RiskLabel::Low => "OK",
        RiskLabel::High => "!",
    };

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} {}", icon, assessment.label),
            label_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(assessment.label.message(), label_style)),
        Line::from(""),
        Line::from(Span::styled(
            assessment
                .created_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            ClinicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(content, area);
}

fn render_outcome_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[N] ", ClinicalTheme::key_hint()),
        Span::styled("Nueva evaluación ", ClinicalTheme::key_desc()),
        Span::styled("[Esc] ", ClinicalTheme::key_hint()),
        Span::styled("Volver al formulario", ClinicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicalTheme::border()),
    );

    f.render_widget(footer, area);
}
