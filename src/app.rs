//! Interactive application state and key handling.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;

use crate::animation::CounterAnimation;
use crate::calculator::{compute_summary, AmortizationRow, LoanParameters, PaymentSummary};
use crate::config::Config;
use crate::control::BoundControl;
use crate::error::CalcResult;
use crate::schedule::{Pagination, Schedule};

/// Slider jump for PageUp/PageDown on an input.
const BIG_STEP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Principal,
    InterestRate,
    Tenure,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Principal, Field::InterestRate, Field::Tenure];

    fn index(self) -> usize {
        match self {
            Field::Principal => 0,
            Field::InterestRate => 1,
            Field::Tenure => 2,
        }
    }

    fn next(self) -> Field {
        match self {
            Field::Principal => Field::InterestRate,
            Field::InterestRate => Field::Tenure,
            Field::Tenure => Field::Principal,
        }
    }

    fn prev(self) -> Field {
        match self {
            Field::Principal => Field::Tenure,
            Field::InterestRate => Field::Principal,
            Field::Tenure => Field::InterestRate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input(Field),
    Table,
}

/// Which summary figure a counter shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Figure {
    MonthlyEmi,
    TotalInterest,
    TotalPayment,
}

impl Figure {
    fn index(self) -> usize {
        match self {
            Figure::MonthlyEmi => 0,
            Figure::TotalInterest => 1,
            Figure::TotalPayment => 2,
        }
    }
}

pub struct App {
    pub focus: Focus,
    controls: [BoundControl; 3],
    summary: Option<PaymentSummary>,
    counters: [CounterAnimation; 3],
    schedule: Option<Schedule>,
    pagination: Pagination,
    pub table_state: TableState,
}

impl App {
    /// Builds the app from configuration and runs the initial calculation.
    pub fn new(config: &Config, now: Instant) -> Self {
        let inputs = &config.inputs;
        let duration = config.display.animation_duration();
        let mut app = Self {
            focus: Focus::Input(Field::Principal),
            controls: [
                BoundControl::new("Loan Amount", inputs.principal.range(), inputs.principal.default),
                BoundControl::new(
                    "Interest Rate (%)",
                    inputs.interest_rate.range(),
                    inputs.interest_rate.default,
                ),
                BoundControl::new("Tenure (years)", inputs.tenure.range(), inputs.tenure.default),
            ],
            summary: None,
            counters: [CounterAnimation::new(duration); 3],
            schedule: None,
            pagination: Pagination::new(0, config.display.page_size),
            table_state: TableState::default(),
        };
        app.recalculate(now);
        app
    }

    pub fn control(&self, field: Field) -> &BoundControl {
        &self.controls[field.index()]
    }

    fn control_mut(&mut self, field: Field) -> &mut BoundControl {
        &mut self.controls[field.index()]
    }

    /// Last successfully computed summary.
    pub fn summary(&self) -> Option<&PaymentSummary> {
        self.summary.as_ref()
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn counter(&self, figure: Figure) -> &CounterAnimation {
        &self.counters[figure.index()]
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.counters.iter().any(|c| c.is_running(now))
    }

    pub fn parameters(&self) -> CalcResult<LoanParameters> {
        LoanParameters::parse(
            self.control(Field::Principal).text(),
            self.control(Field::InterestRate).text(),
            self.control(Field::Tenure).text(),
        )
    }

    /// Recomputes the summary from the current inputs.
    ///
    /// Invalid input leaves everything on screen untouched and returns `false`.
    pub fn recalculate(&mut self, now: Instant) -> bool {
        let params = match self.parameters() {
            Ok(params) => params,
            Err(err) => {
                log::debug!("skipping update: {err}");
                return false;
            }
        };
        let summary = match compute_summary(&params) {
            Ok(summary) => summary,
            Err(err) => {
                log::debug!("skipping update: {err}");
                return false;
            }
        };

        let shown = summary.rounded();
        self.counters[Figure::MonthlyEmi.index()].retarget(shown.periodic_payment, now);
        self.counters[Figure::TotalInterest.index()].retarget(shown.total_interest, now);
        self.counters[Figure::TotalPayment.index()].retarget(shown.total_payment, now);
        self.summary = Some(summary);

        let stale = self
            .schedule
            .as_ref()
            .is_some_and(|schedule| schedule.params() != &params);
        if stale {
            self.build_schedule(&params);
        }
        true
    }

    /// Builds the amortization table for the current inputs and shows page 1.
    pub fn generate_schedule(&mut self) -> bool {
        match self.parameters() {
            Ok(params) => self.build_schedule(&params),
            Err(err) => {
                log::debug!("not generating schedule: {err}");
                false
            }
        }
    }

    fn build_schedule(&mut self, params: &LoanParameters) -> bool {
        match Schedule::build(params) {
            Ok(schedule) => {
                let page_size = self.pagination.page_size();
                log::info!(
                    "schedule rebuilt: {} rows, {} pages",
                    schedule.len(),
                    schedule.page_count(page_size)
                );
                self.pagination = Pagination::new(schedule.len(), page_size);
                self.schedule = Some(schedule);
                self.table_state.select(None);
                true
            }
            Err(err) => {
                log::debug!("not generating schedule: {err}");
                false
            }
        }
    }

    pub fn current_page(&self) -> &[AmortizationRow] {
        match &self.schedule {
            Some(schedule) => schedule.page(self.pagination.current(), self.pagination.page_size()),
            None => &[],
        }
    }

    /// Handles one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        match self.focus {
            Focus::Input(field) => self.handle_input_key(field, key, now),
            Focus::Table => self.handle_table_key(key),
        }
    }

    fn handle_input_key(&mut self, field: Field, key: KeyEvent, now: Instant) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                self.focus = Focus::Input(field.next());
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
                self.focus = Focus::Input(field.prev());
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.control_mut(field).step_up(1);
                self.recalculate(now);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.control_mut(field).step_down(1);
                self.recalculate(now);
            }
            KeyCode::PageUp => {
                self.control_mut(field).step_up(BIG_STEP);
                self.recalculate(now);
            }
            KeyCode::PageDown => {
                self.control_mut(field).step_down(BIG_STEP);
                self.recalculate(now);
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                if self.control_mut(field).push_char(c) {
                    self.recalculate(now);
                }
            }
            KeyCode::Backspace => {
                self.control_mut(field).pop_char();
                self.recalculate(now);
            }
            KeyCode::Enter | KeyCode::Char('g') => {
                if self.generate_schedule() {
                    self.focus = Focus::Table;
                }
            }
            _ => {}
        }
        false
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab | KeyCode::Backspace => {
                self.focus = Focus::Input(Field::Principal);
            }
            KeyCode::Char('n') | KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => {
                self.turn_page(Pagination::next);
            }
            KeyCode::Char('p') | KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => {
                self.turn_page(Pagination::prev);
            }
            KeyCode::Home | KeyCode::Char('g') => self.turn_page(Pagination::first),
            KeyCode::End | KeyCode::Char('G') => self.turn_page(Pagination::last),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                if let Some(page) = c.to_digit(10) {
                    self.turn_page(|p| p.go_to(page as usize));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let rows = self.current_page().len();
                let next = self.table_state.selected().map_or(0, |i| i + 1);
                if next < rows {
                    self.table_state.select(Some(next));
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(current) = self.table_state.selected() {
                    self.table_state.select(Some(current.saturating_sub(1)));
                }
            }
            _ => {}
        }
        false
    }

    fn turn_page(&mut self, turn: impl FnOnce(&mut Pagination)) {
        let before = self.pagination.current();
        turn(&mut self.pagination);
        if self.pagination.current() != before {
            self.table_state.select(None);
        }
    }
}
