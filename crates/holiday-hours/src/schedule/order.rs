use std::cmp::Ordering;

use super::dates::date_sort_key;
use super::domain::HolidayRecord;

/// Returns a copy of `records` in ascending date order.
///
/// The sort is stable: holidays on the same date keep their input order. Records whose
/// date does not parse trail the valid ones, also in input order.
pub fn sort_by_date(records: &[HolidayRecord]) -> Vec<HolidayRecord> {
    let mut keyed: Vec<_> = records
        .iter()
        .map(|record| (date_sort_key(&record.date), record))
        .collect();
    keyed.sort_by(|(left, _), (right, _)| compare_keys(left, right));
    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

fn compare_keys<T: Ord>(left: &Option<T>, right: &Option<T>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::domain::HolidayStatus;

    fn names(records: &[HolidayRecord]) -> Vec<&str> {
        records.iter().map(|record| record.name.as_str()).collect()
    }

    #[test]
    fn empty_input_sorts_to_empty() {
        assert!(sort_by_date(&[]).is_empty());
    }

    #[test]
    fn ties_keep_input_order_and_input_is_untouched() {
        let input = vec![
            HolidayRecord::closed("B", "2024-12-25"),
            HolidayRecord::new("A", "2024-12-25", HolidayStatus::Normal),
            HolidayRecord::closed("Earlier", "2024-11-28"),
        ];
        let snapshot = input.clone();

        let sorted = sort_by_date(&input);

        assert_eq!(names(&sorted), ["Earlier", "B", "A"]);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn orders_by_date_value_not_text() {
        let input = vec![
            HolidayRecord::closed("Late UTC", "2024-12-24T23:00:00Z"),
            HolidayRecord::closed("Early offset", "2024-12-25T01:00:00+03:00"),
            HolidayRecord::closed("Broken", "someday"),
            HolidayRecord::closed("Plain", "2024-12-24"),
        ];

        let sorted = sort_by_date(&input);

        assert_eq!(names(&sorted), ["Plain", "Early offset", "Late UTC", "Broken"]);
    }
}
