use serde::{Deserialize, Serialize};

/// How a business operates on a given holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayStatus {
    Closed,
    Special,
    Normal,
}

impl HolidayStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Closed, Self::Special, Self::Normal]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Closed => "Closed",
            Self::Special => "Special Hours",
            Self::Normal => "Normal Hours",
        }
    }
}

/// One named calendar exception to a business's regular hours, as exchanged with the
/// backend. `name` is the key callers use for lookups; it is not deduplicated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub name: String,
    pub date: String,
    pub status: HolidayStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HolidayRecord {
    pub fn new(name: impl Into<String>, date: impl Into<String>, status: HolidayStatus) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            status,
            open_time: None,
            close_time: None,
            notes: None,
        }
    }

    pub fn closed(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self::new(name, date, HolidayStatus::Closed)
    }

    pub fn special(
        name: impl Into<String>,
        date: impl Into<String>,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        Self {
            open_time: Some(open.into()),
            close_time: Some(close.into()),
            ..Self::new(name, date, HolidayStatus::Special)
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Resolves the loosely-typed wire record into its effective hours.
    ///
    /// A `special` record missing either time (or carrying an empty one) degrades to
    /// [`HolidayHours::Normal`]. Times on `closed` and `normal` records are ignored.
    pub fn hours(&self) -> HolidayHours<'_> {
        match self.status {
            HolidayStatus::Closed => HolidayHours::Closed,
            HolidayStatus::Special => match (present(&self.open_time), present(&self.close_time)) {
                (Some(open), Some(close)) => HolidayHours::Special { open, close },
                _ => HolidayHours::Normal,
            },
            HolidayStatus::Normal => HolidayHours::Normal,
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|raw| !raw.is_empty())
}

/// Effective opening hours of a holiday once incomplete data has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayHours<'a> {
    Closed,
    Special { open: &'a str, close: &'a str },
    Normal,
}
