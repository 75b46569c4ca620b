use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::{is_upcoming_on, parse_holiday_date};
use super::domain::{HolidayRecord, HolidayStatus};
use super::order::sort_by_date;
use crate::catalog::{find_preset, PresetHoliday};

/// Opening time filled in when a holiday is switched to special hours.
pub const DEFAULT_SPECIAL_OPEN: &str = "09:00";
/// Closing time filled in when a holiday is switched to special hours.
pub const DEFAULT_SPECIAL_CLOSE: &str = "17:00";

/// The holidays configured for one business page, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySchedule {
    holidays: Vec<HolidayRecord>,
}

impl HolidaySchedule {
    pub fn new(holidays: Vec<HolidayRecord>) -> Self {
        Self { holidays }
    }

    pub fn records(&self) -> &[HolidayRecord] {
        &self.holidays
    }

    pub fn into_records(self) -> Vec<HolidayRecord> {
        self.holidays
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&HolidayRecord> {
        self.holidays.iter().find(|record| record.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Records in ascending date order, see [`sort_by_date`].
    pub fn sorted(&self) -> Vec<HolidayRecord> {
        sort_by_date(&self.holidays)
    }

    /// Sorted records falling on or after `today`.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<HolidayRecord> {
        self.sorted()
            .into_iter()
            .filter(|record| is_upcoming_on(&record.date, today))
            .collect()
    }

    /// Selects a preset holiday as `closed`, or deselects it when already present.
    /// Returns whether the preset is selected afterwards.
    pub fn toggle_preset(&mut self, preset: &PresetHoliday) -> bool {
        if self.contains(preset.name) {
            self.holidays.retain(|record| record.name != preset.name);
            false
        } else {
            self.holidays.push(preset.to_record());
            true
        }
    }

    /// Adds a custom holiday, closed by default.
    pub fn add_custom(&mut self, name: &str, date: &str) -> Result<&HolidayRecord, ScheduleError> {
        let name = name.trim();
        let date = date.trim();
        if name.is_empty() || date.is_empty() {
            return Err(ScheduleError::IncompleteCustomHoliday);
        }
        if parse_holiday_date(date).is_none() {
            return Err(ScheduleError::InvalidDate(date.to_string()));
        }
        if self.contains(name) {
            return Err(ScheduleError::DuplicateHoliday(name.to_string()));
        }

        self.holidays.push(HolidayRecord::closed(name, date));
        self.holidays
            .last()
            .ok_or_else(|| ScheduleError::UnknownHoliday(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Result<HolidayRecord, ScheduleError> {
        let index = self.position(name)?;
        Ok(self.holidays.remove(index))
    }

    /// Changes a holiday's status. Switching to special hours keeps any existing times
    /// and fills the missing ones with the 09:00–17:00 defaults; every other status
    /// clears both times.
    pub fn set_status(&mut self, name: &str, status: HolidayStatus) -> Result<(), ScheduleError> {
        let record = self.record_mut(name)?;
        record.status = status;
        if status == HolidayStatus::Special {
            fill_if_blank(&mut record.open_time, DEFAULT_SPECIAL_OPEN);
            fill_if_blank(&mut record.close_time, DEFAULT_SPECIAL_CLOSE);
        } else {
            record.open_time = None;
            record.close_time = None;
        }
        Ok(())
    }

    pub fn set_open_time(&mut self, name: &str, time: &str) -> Result<(), ScheduleError> {
        self.record_mut(name)?.open_time = non_empty(time);
        Ok(())
    }

    pub fn set_close_time(&mut self, name: &str, time: &str) -> Result<(), ScheduleError> {
        self.record_mut(name)?.close_time = non_empty(time);
        Ok(())
    }

    /// Sets the free-text note; an empty string clears it.
    pub fn set_notes(&mut self, name: &str, notes: &str) -> Result<(), ScheduleError> {
        self.record_mut(name)?.notes = non_empty(notes);
        Ok(())
    }

    /// Applies one dashboard edit.
    pub fn apply(&mut self, edit: ScheduleEdit) -> Result<(), ScheduleError> {
        match edit {
            ScheduleEdit::TogglePreset { name } => {
                let preset = find_preset(&name).ok_or(ScheduleError::UnknownPreset(name))?;
                self.toggle_preset(preset);
            }
            ScheduleEdit::AddCustom { name, date } => {
                self.add_custom(&name, &date)?;
            }
            ScheduleEdit::Remove { name } => {
                self.remove(&name)?;
            }
            ScheduleEdit::SetStatus { name, status } => self.set_status(&name, status)?,
            ScheduleEdit::SetOpenTime { name, time } => self.set_open_time(&name, &time)?,
            ScheduleEdit::SetCloseTime { name, time } => self.set_close_time(&name, &time)?,
            ScheduleEdit::SetNotes { name, notes } => self.set_notes(&name, &notes)?,
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Result<usize, ScheduleError> {
        self.holidays
            .iter()
            .position(|record| record.name == name)
            .ok_or_else(|| ScheduleError::UnknownHoliday(name.to_string()))
    }

    fn record_mut(&mut self, name: &str) -> Result<&mut HolidayRecord, ScheduleError> {
        let index = self.position(name)?;
        Ok(&mut self.holidays[index])
    }
}

impl From<Vec<HolidayRecord>> for HolidaySchedule {
    fn from(holidays: Vec<HolidayRecord>) -> Self {
        Self::new(holidays)
    }
}

impl FromIterator<HolidayRecord> for HolidaySchedule {
    fn from_iter<I: IntoIterator<Item = HolidayRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn fill_if_blank(slot: &mut Option<String>, default: &str) {
    if slot.as_deref().map_or(true, str::is_empty) {
        *slot = Some(default.to_string());
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A single change made from the creation wizard or the owner dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScheduleEdit {
    TogglePreset { name: String },
    AddCustom { name: String, date: String },
    Remove { name: String },
    SetStatus { name: String, status: HolidayStatus },
    SetOpenTime { name: String, time: String },
    SetCloseTime { name: String, time: String },
    SetNotes { name: String, notes: String },
}

/// Error raised when editing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("holiday '{0}' is not part of this schedule")]
    UnknownHoliday(String),
    #[error("holiday '{0}' is already part of this schedule")]
    DuplicateHoliday(String),
    #[error("'{0}' is not a preset holiday")]
    UnknownPreset(String),
    #[error("a custom holiday needs both a name and a date")]
    IncompleteCustomHoliday,
    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),
}
