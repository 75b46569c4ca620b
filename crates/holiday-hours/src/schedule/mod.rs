//! Holiday records and the rules that turn them into what a public page shows.
//!
//! Everything except [`HolidaySchedule`]'s editing methods is a pure read of its
//! inputs and may be called from any thread.

mod dates;
pub mod domain;
mod editor;
mod format;
mod order;
pub mod router;
mod status;
pub mod views;

pub use dates::{date_sort_key, is_upcoming, is_upcoming_now, is_upcoming_on, parse_holiday_date};
pub use domain::{HolidayHours, HolidayRecord, HolidayStatus};
pub use editor::{
    HolidaySchedule, ScheduleEdit, ScheduleError, DEFAULT_SPECIAL_CLOSE, DEFAULT_SPECIAL_OPEN,
};
pub use format::{format_date, format_time, INVALID_DATE};
pub use order::sort_by_date;
pub use router::schedule_router;
pub use status::{
    derive_status, DisplayStatus, DisplayStatusView, StatusColor, StatusIcon, CLOSED_TEXT,
    NORMAL_TEXT,
};
pub use views::{HolidayView, NextHolidayView, ScheduleSummary};
