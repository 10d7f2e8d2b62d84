//! Loan EMI calculator: installment and amortization arithmetic, paged
//! schedule access, and the terminal front end built on top of them.

pub mod animation;
pub mod app;
pub mod calculator;
pub mod config;
pub mod control;
pub mod error;
pub mod format;
pub mod output;
pub mod schedule;
pub mod ui;

pub use calculator::{compute_schedule, compute_summary, AmortizationRow, LoanParameters, PaymentSummary};
pub use error::{CalcError, CalcResult};
pub use schedule::{get_page, page_count, Pagination, Schedule};
