//! Paged access to a computed amortization schedule.

use serde::Serialize;

use crate::calculator::{compute_schedule, AmortizationRow, LoanParameters};
use crate::error::CalcResult;

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Returns the 1-based `page_number` of `rows`.
///
/// Pages past the end (or page 0) come back empty rather than failing. A
/// `page_size` of zero has no pages.
pub fn get_page(rows: &[AmortizationRow], page_number: usize, page_size: usize) -> &[AmortizationRow] {
    if page_number == 0 || page_size == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_rows.div_ceil(page_size)
}

/// A fully materialized schedule together with the parameters it came from.
///
/// The rows are never edited in place; a parameter change builds a new
/// `Schedule` and drops the old one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    params: LoanParameters,
    rows: Vec<AmortizationRow>,
}

impl Schedule {
    pub fn build(params: &LoanParameters) -> CalcResult<Self> {
        Ok(Self {
            params: *params,
            rows: compute_schedule(params)?,
        })
    }

    pub fn params(&self) -> &LoanParameters {
        &self.params
    }

    pub fn rows(&self) -> &[AmortizationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page(&self, page_number: usize, page_size: usize) -> &[AmortizationRow] {
        get_page(&self.rows, page_number, page_size)
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        page_count(self.rows.len(), page_size)
    }
}

/// Page selector state for the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: usize,
    page_size: usize,
    pages: usize,
}

impl Pagination {
    pub fn new(total_rows: usize, page_size: usize) -> Self {
        Self {
            current: 1,
            page_size,
            pages: page_count(total_rows, page_size),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn next(&mut self) {
        self.go_to(self.current + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.current.saturating_sub(1));
    }

    pub fn first(&mut self) {
        self.go_to(1);
    }

    pub fn last(&mut self) {
        self.go_to(self.pages);
    }

    /// Moves to `page`, clamped into `1..=pages`.
    pub fn go_to(&mut self, page: usize) {
        self.current = page.clamp(1, self.pages.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(principal: f64, rate: f64, tenure: f64) -> Schedule {
        Schedule::build(&LoanParameters::new(principal, rate, tenure).unwrap()).unwrap()
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 12), 0);
        assert_eq!(page_count(12, 12), 1);
        assert_eq!(page_count(13, 12), 2);
        assert_eq!(page_count(360, 12), 30);
        assert_eq!(page_count(10, 0), 0);
    }

    #[test]
    fn pages_reassemble_the_schedule() {
        let schedule = sample(1_500_000.0, 8.5, 7.5);
        assert_eq!(schedule.len(), 90);

        let pages = schedule.page_count(12);
        assert_eq!(pages, 8);

        let joined: Vec<AmortizationRow> = (1..=pages)
            .flat_map(|page| schedule.page(page, 12).iter().copied())
            .collect();
        assert_eq!(joined, schedule.rows().to_vec());
        assert_eq!(schedule.page(8, 12).len(), 6);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let schedule = sample(100_000.0, 10.0, 1.0);
        assert!(schedule.page(0, 12).is_empty());
        assert!(schedule.page(2, 12).is_empty());
        assert!(schedule.page(usize::MAX, 12).is_empty());
        assert!(schedule.page(1, 0).is_empty());
        assert_eq!(schedule.page(1, 12).len(), 12);
    }

    #[test]
    fn page_slices_are_contiguous() {
        let schedule = sample(300_000.0, 9.0, 3.0);
        let page = schedule.page(2, 12);
        assert_eq!(page.first().map(|r| r.period), Some(13));
        assert_eq!(page.last().map(|r| r.period), Some(24));
    }

    #[test]
    fn pagination_clamps_to_available_pages() {
        let mut pagination = Pagination::new(30, 12);
        assert_eq!(pagination.current(), 1);
        assert_eq!(pagination.pages(), 3);

        pagination.prev();
        assert_eq!(pagination.current(), 1);

        pagination.next();
        pagination.next();
        pagination.next();
        assert_eq!(pagination.current(), 3);

        pagination.first();
        assert_eq!(pagination.current(), 1);

        pagination.last();
        assert_eq!(pagination.current(), 3);

        pagination.go_to(9);
        assert_eq!(pagination.current(), 3);
    }
}
