use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Tabs},
    Frame,
};

use crate::app::{App, Field, Figure, Focus};
use crate::format::{format_currency, format_currency_whole, format_number, CURRENCY_SYMBOL};

pub fn ui(f: &mut Frame, app: &mut App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(9),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("EMI Calculator")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    render_inputs(f, app, chunks[1]);
    render_summary(f, app, chunks[2], now);
    render_schedule(f, app, chunks[3]);

    let help = Paragraph::new(help_text(app.focus))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[4]);
}

fn help_text(focus: Focus) -> &'static str {
    match focus {
        Focus::Input(_) => "Tab: field | ←/→: slide | 0-9: edit | Enter: schedule | q: quit",
        Focus::Table => "←/→: page | 1-9: jump | g/G: first/last | Esc: back | q: quit",
    }
}

fn render_inputs(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); 3].as_ref())
        .split(area);

    for (field, row) in Field::ALL.iter().zip(rows.iter()) {
        let control = app.control(*field);
        let focused = app.focus == Focus::Input(*field);
        let accent = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
            .split(*row);

        let marker = if focused { "▶ " } else { "  " };
        let invalid = control.value().is_none();
        let text_style = if invalid {
            Style::default().fg(Color::Red)
        } else {
            accent
        };
        let text = match field {
            Field::Principal => format!("{marker}{CURRENCY_SYMBOL} {}", control.text()),
            Field::InterestRate => format!("{marker}{}%", control.text()),
            Field::Tenure => format!("{marker}{} years", control.text()),
        };
        let input = Paragraph::new(text)
            .style(text_style)
            .block(Block::default().borders(Borders::ALL).title(control.label()));
        f.render_widget(input, cols[0]);

        let range = control.range();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(if focused {
                Style::default().fg(Color::Blue).bg(Color::Gray)
            } else {
                Style::default().fg(Color::DarkGray).bg(Color::Black)
            })
            .ratio(control.fill_ratio())
            .label(format!("{} to {}", range.min, range.max));
        f.render_widget(gauge, cols[1]);
    }
}

fn render_summary(f: &mut Frame, app: &App, area: Rect, now: Instant) {
    let shown = |figure: Figure| {
        let counter = app.counter(figure);
        let value = counter.value_at(now);
        if counter.is_running(now) {
            format_currency_whole(value)
        } else {
            format_currency(value)
        }
    };

    let text = vec![
        Line::from(vec![
            Span::styled("Monthly EMI: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(shown(Figure::MonthlyEmi), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Total Interest: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(shown(Figure::TotalInterest), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("Total Payment: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(shown(Figure::TotalPayment), Style::default().fg(Color::Cyan)),
        ]),
    ];

    let summary = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Loan Summary"))
        .alignment(Alignment::Left);
    f.render_widget(summary, area);
}

fn render_schedule(f: &mut Frame, app: &mut App, area: Rect) {
    if app.schedule().is_none() {
        let hint = Paragraph::new("Press Enter to view the amortization schedule")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Amortization Schedule"));
        f.render_widget(hint, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(area);

    let header = Row::new(vec!["Month", "EMI", "Interest", "Principal", "Balance"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .height(1);

    let rows: Vec<Row> = app
        .current_page()
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.period.to_string()),
                Cell::from(format!("{CURRENCY_SYMBOL}{}", format_number(row.payment))),
                Cell::from(format!("{CURRENCY_SYMBOL}{}", format_number(row.interest_portion))),
                Cell::from(format!("{CURRENCY_SYMBOL}{}", format_number(row.principal_portion))),
                Cell::from(format!("{CURRENCY_SYMBOL}{}", format_number(row.remaining_balance))),
            ])
            .height(1)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(18),
    ];

    let pagination = *app.pagination();
    let border_style = if app.focus == Focus::Table {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(
                    "Amortization Schedule (page {}/{})",
                    pagination.current(),
                    pagination.pages()
                )),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.table_state);

    let titles: Vec<String> = (1..=pagination.pages()).map(|page| page.to_string()).collect();
    let pages = Tabs::new(titles)
        .select(pagination.current().saturating_sub(1))
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
        .divider(" ");
    f.render_widget(pages, chunks[1]);
}
