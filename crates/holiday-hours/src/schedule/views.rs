use chrono::NaiveDate;
use serde::Serialize;

use super::dates::{is_upcoming_on, parse_holiday_date};
use super::domain::{HolidayHours, HolidayRecord, HolidayStatus};
use super::editor::HolidaySchedule;
use super::format::format_date;
use super::status::{derive_status, DisplayStatusView};

/// A holiday as listed on the public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayView {
    pub name: String,
    pub date: String,
    pub formatted_date: String,
    pub status: HolidayStatus,
    pub status_label: &'static str,
    pub display: DisplayStatusView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub upcoming: bool,
}

impl HolidayView {
    pub fn from_record(record: &HolidayRecord, today: NaiveDate) -> Self {
        Self {
            name: record.name.clone(),
            date: record.date.clone(),
            formatted_date: format_date(&record.date),
            status: record.status,
            status_label: record.status.label(),
            display: derive_status(record).view(),
            notes: record.notes.clone(),
            upcoming: is_upcoming_on(&record.date, today),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextHolidayView {
    pub name: String,
    pub date: String,
    pub formatted_date: String,
    pub days_away: i64,
}

/// Counts by effective hours, so a special holiday without times counts as normal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub total: usize,
    pub closed: usize,
    pub special_hours: usize,
    pub normal_hours: usize,
    pub upcoming: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_holiday: Option<NextHolidayView>,
}

impl HolidaySchedule {
    /// Date-ordered views for rendering, evaluated against `today`.
    pub fn views(&self, today: NaiveDate) -> Vec<HolidayView> {
        self.sorted()
            .iter()
            .map(|record| HolidayView::from_record(record, today))
            .collect()
    }

    pub fn summary(&self, today: NaiveDate) -> ScheduleSummary {
        let mut summary = ScheduleSummary {
            total: self.len(),
            ..ScheduleSummary::default()
        };

        for record in self.records() {
            match record.hours() {
                HolidayHours::Closed => summary.closed += 1,
                HolidayHours::Special { .. } => summary.special_hours += 1,
                HolidayHours::Normal => summary.normal_hours += 1,
            }
        }

        let upcoming = self.upcoming(today);
        summary.upcoming = upcoming.len();
        summary.next_holiday = upcoming.first().and_then(|record| {
            let day = parse_holiday_date(&record.date)?;
            Some(NextHolidayView {
                name: record.name.clone(),
                date: record.date.clone(),
                formatted_date: format_date(&record.date),
                days_away: (day - today).num_days(),
            })
        });

        summary
    }
}
