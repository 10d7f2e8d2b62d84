use emicalc::calculator::round_cents;
use emicalc::{compute_schedule, compute_summary, get_page, page_count, CalcError, LoanParameters, Schedule};
use pretty_assertions::assert_eq;

const LOANS: &[(f64, f64, f64)] = &[
    (100_000.0, 10.0, 1.0),
    (100_000.0, 8.5, 5.0),
    (2_500_000.0, 7.1, 20.0),
    (10_000_000.0, 20.0, 30.0),
    (10_000.0, 1.0, 1.0),
    (450_000.0, 0.0, 15.0),
    (75_000.0, 12.0, 2.5),
];

fn params(principal: f64, rate: f64, tenure: f64) -> LoanParameters {
    LoanParameters::new(principal, rate, tenure).unwrap()
}

#[test]
fn worked_example() {
    let summary = compute_summary(&params(100_000.0, 10.0, 1.0)).unwrap().rounded();

    assert_eq!(summary.periodic_payment, 8_791.59);
    // totals multiply the unrounded installment, so they sit two cents under
    // 12 x 8791.59
    assert_eq!(summary.total_payment, 105_499.06);
    assert_eq!(summary.total_interest, 5_499.06);
    assert!((summary.total_payment - 105_499.08).abs() <= 0.02);
}

#[test]
fn summary_totals_hold_for_every_loan() {
    for &(principal, rate, tenure) in LOANS {
        let p = params(principal, rate, tenure);
        let summary = compute_summary(&p).unwrap();
        let months = f64::from(p.period_count());

        assert!((summary.total_payment - summary.periodic_payment * months).abs() < 0.01);
        assert!((summary.total_interest - (summary.total_payment - principal)).abs() < 0.01);
        assert!(summary.periodic_payment > 0.0);
        assert!(summary.total_interest >= -0.01);
    }
}

#[test]
fn zero_rate_has_no_interest() {
    let p = params(450_000.0, 0.0, 15.0);
    let summary = compute_summary(&p).unwrap();
    assert_eq!(summary.periodic_payment, 450_000.0 / 180.0);
    assert!(summary.total_interest.abs() < 0.01);

    let rows = compute_schedule(&p).unwrap();
    assert!(rows.iter().all(|r| r.interest_portion == 0.0));
}

#[test]
fn schedule_repays_principal_for_every_loan() {
    for &(principal, rate, tenure) in LOANS {
        let p = params(principal, rate, tenure);
        let rows = compute_schedule(&p).unwrap();
        assert_eq!(rows.len(), p.period_count() as usize);

        let repaid: f64 = rows.iter().map(|r| r.principal_portion).sum();
        assert!(
            (repaid - principal).abs() < 0.01,
            "{principal} at {rate}% over {tenure}y repaid {repaid}"
        );

        let last = rows.last().unwrap();
        assert_eq!(round_cents(last.remaining_balance), 0.0);
        assert!(rows.iter().all(|r| r.remaining_balance >= 0.0));
    }
}

#[test]
fn schedule_and_summary_agree() {
    for &(principal, rate, tenure) in LOANS {
        let p = params(principal, rate, tenure);
        let summary = compute_summary(&p).unwrap();
        let rows = compute_schedule(&p).unwrap();

        let paid: f64 = rows.iter().map(|r| r.payment).sum();
        let interest: f64 = rows.iter().map(|r| r.interest_portion).sum();
        assert!((paid - summary.total_payment).abs() < 0.01);
        assert!((interest - summary.total_interest).abs() < 0.01);
    }
}

#[test]
fn installment_increases_with_principal() {
    for &rate in &[0.0, 4.5, 10.0, 20.0] {
        let mut last = 0.0;
        for step in 1..=50 {
            let principal = f64::from(step) * 25_000.0;
            let payment = compute_summary(&params(principal, rate, 10.0))
                .unwrap()
                .periodic_payment;
            assert!(payment > last);
            last = payment;
        }
    }
}

#[test]
fn twelve_row_pages_rebuild_schedule() {
    for &(principal, rate, tenure) in LOANS {
        let schedule = Schedule::build(&params(principal, rate, tenure)).unwrap();
        let pages = page_count(schedule.len(), 12);

        let mut joined = Vec::with_capacity(schedule.len());
        for page in 1..=pages {
            let rows = get_page(schedule.rows(), page, 12);
            assert!(!rows.is_empty() && rows.len() <= 12);
            joined.extend_from_slice(rows);
        }
        assert_eq!(joined, schedule.rows().to_vec());
        assert!(get_page(schedule.rows(), pages + 1, 12).is_empty());
    }
}

#[test]
fn invalid_input_produces_nothing() {
    assert!(matches!(
        LoanParameters::new(f64::NAN, 10.0, 1.0),
        Err(CalcError::InvalidInput { field: "principal", .. })
    ));
    assert!(matches!(
        LoanParameters::parse("100000", "", "1"),
        Err(CalcError::InvalidInput { field: "interest_rate", .. })
    ));
    assert!(matches!(
        LoanParameters::parse("100000", "10", "-2"),
        Err(CalcError::InvalidInput { field: "tenure", .. })
    ));

    let bad = LoanParameters {
        principal: -5.0,
        annual_rate_percent: 10.0,
        tenure_years: 1.0,
    };
    assert!(compute_summary(&bad).is_err());
    assert!(compute_schedule(&bad).is_err());
    assert!(Schedule::build(&bad).is_err());
}

#[test]
fn loans_outside_slider_ranges_stay_finite() {
    for &(principal, rate, tenure) in &[
        (100_000.0, 1e-15, 1.0),
        (100_000.0, 1e-9, 30.0),
        (100_000.0, 20.0, 999.0),
        (1.0, 500.0, 1.0),
        (1e12, 0.5, 1_000.0),
    ] {
        let p = params(principal, rate, tenure);
        let summary = compute_summary(&p).unwrap();
        assert!(summary.periodic_payment.is_finite() && summary.periodic_payment > 0.0);
        assert!(summary.total_payment.is_finite());

        let rows = compute_schedule(&p).unwrap();
        assert!(rows
            .iter()
            .all(|r| r.interest_portion.is_finite() && r.remaining_balance.is_finite()));
        assert_eq!(rows.last().map(|r| r.remaining_balance), Some(0.0));
    }
}

#[test]
fn tenure_longer_than_schedule_limit_is_invalid() {
    use emicalc::calculator::MAX_PERIOD_COUNT;

    let longest = f64::from(MAX_PERIOD_COUNT) / 12.0;
    assert!(LoanParameters::new(100_000.0, 5.0, longest).is_ok());
    for tenure in [longest + 1.0, 5_000.0, 1e12] {
        assert!(matches!(
            LoanParameters::new(100_000.0, 5.0, tenure),
            Err(CalcError::InvalidInput { field: "tenure", .. })
        ));
    }
}
