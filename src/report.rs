//! Canned date-range reports over the ledger.
//!
//! Each report is an inclusive date range computed from "today"; the ledger
//! screen can be narrowed to it with `Transaction::within`.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::ledger::Transaction;

/// Inclusive date range; an open end matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, tx: &Transaction) -> bool {
        tx.within(self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    MonthToDate,
    PriorMonth,
    YearToDate,
    PriorYear,
}

impl Report {
    pub const ALL: [Report; 4] = [Report::MonthToDate, Report::PriorMonth, Report::YearToDate, Report::PriorYear];

    pub fn name(self) -> &'static str {
        match self {
            Report::MonthToDate => "Month To Date",
            Report::PriorMonth => "Prior Month",
            Report::YearToDate => "Year To Date",
            Report::PriorYear => "Prior Year",
        }
    }

    /// The report's range as seen from `today`.
    pub fn range(self, today: NaiveDate) -> DateRange {
        let month_start = today - Days::new(u64::from(today.day0()));
        let year_start = today - Days::new(u64::from(today.ordinal0()));
        match self {
            Report::MonthToDate => DateRange { from: Some(month_start), to: None },
            Report::PriorMonth => DateRange {
                from: month_start.checked_sub_months(Months::new(1)),
                to: month_start.pred_opt(),
            },
            Report::YearToDate => DateRange { from: Some(year_start), to: None },
            Report::PriorYear => DateRange {
                from: year_start.checked_sub_months(Months::new(12)),
                to: year_start.pred_opt(),
            },
        }
    }

    /// Count and total of the rows falling in the report.
    pub fn summarize<'a>(self, rows: impl IntoIterator<Item = &'a Transaction>, today: NaiveDate) -> Summary {
        let range = self.range(today);
        rows.into_iter()
            .filter(|tx| range.contains(tx))
            .fold(Summary::default(), |acc, tx| Summary { count: acc.count + 1, total: acc.total + tx.amount })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} transactions totalling ${:.2}", self.count, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(date: NaiveDate, amount: f64) -> Transaction {
        Transaction::new(date.and_hms_opt(12, 0, 0).unwrap(), "Row", "Vendor", amount)
    }

    #[test]
    fn test_ranges_mid_year() {
        let today = ymd(2024, 5, 17);
        assert_eq!(Report::MonthToDate.range(today), DateRange { from: Some(ymd(2024, 5, 1)), to: None });
        assert_eq!(
            Report::PriorMonth.range(today),
            DateRange { from: Some(ymd(2024, 4, 1)), to: Some(ymd(2024, 4, 30)) }
        );
        assert_eq!(Report::YearToDate.range(today), DateRange { from: Some(ymd(2024, 1, 1)), to: None });
        assert_eq!(
            Report::PriorYear.range(today),
            DateRange { from: Some(ymd(2023, 1, 1)), to: Some(ymd(2023, 12, 31)) }
        );
    }

    #[test]
    fn test_prior_month_in_january_is_last_december() {
        let range = Report::PriorMonth.range(ymd(2024, 1, 1));
        assert_eq!(range, DateRange { from: Some(ymd(2023, 12, 1)), to: Some(ymd(2023, 12, 31)) });
    }

    #[test]
    fn test_prior_month_ends_on_leap_day() {
        let range = Report::PriorMonth.range(ymd(2024, 3, 31));
        assert_eq!(range.to, Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        let today = ymd(2024, 3, 15);
        let mtd = Report::MonthToDate.range(today);
        assert!(mtd.contains(&tx(ymd(2024, 3, 1), 1.0)));
        assert!(!mtd.contains(&tx(ymd(2024, 2, 29), 1.0)));

        let prior = Report::PriorMonth.range(today);
        assert!(prior.contains(&tx(ymd(2024, 2, 1), 1.0)));
        assert!(prior.contains(&tx(ymd(2024, 2, 29), 1.0)));
        assert!(!prior.contains(&tx(ymd(2024, 3, 1), 1.0)));
        assert!(!prior.contains(&tx(ymd(2024, 1, 31), 1.0)));

        let prior_year = Report::PriorYear.range(today);
        assert!(prior_year.contains(&tx(ymd(2023, 12, 31), 1.0)));
        assert!(!prior_year.contains(&tx(ymd(2024, 1, 1), 1.0)));
    }

    #[test]
    fn test_summarize() {
        let today = ymd(2024, 1, 10);
        let rows = vec![
            tx(ymd(2024, 1, 2), 100.0),
            tx(ymd(2024, 1, 9), -25.5),
            tx(ymd(2023, 12, 31), -10.0),
            tx(ymd(2022, 6, 1), 7.0),
        ];
        let mtd = Report::MonthToDate.summarize(&rows, today);
        assert_eq!(mtd, Summary { count: 2, total: 74.5 });
        assert_eq!(mtd.to_string(), "2 transactions totalling $74.50");

        assert_eq!(Report::PriorMonth.summarize(&rows, today).count, 1);
        assert_eq!(Report::PriorYear.summarize(&rows, today).total, -10.0);
        assert_eq!(Report::YearToDate.summarize(&rows, today).count, 2);
    }
}
