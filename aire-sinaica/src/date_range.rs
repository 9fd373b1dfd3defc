use chrono::{Months, NaiveDate};

/// A half-open date interval `[start, end)`.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// An iterator that splits `[self.0, self.1)` into consecutive spans of at
/// most one calendar month, in chronological order, with the final span
/// clipped to the overall end. Empty when start >= end.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct MonthRange(pub NaiveDate, pub NaiveDate);

impl Iterator for MonthRange {
    type Item = DateSpan;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 >= self.1 {
            return None;
        }
        let next = self
            .0
            .checked_add_months(Months::new(1))
            .unwrap_or(self.1);
        let span = DateSpan {
            start: self.0,
            end: next.min(self.1),
        };
        self.0 = next;
        Some(span)
    }
}
