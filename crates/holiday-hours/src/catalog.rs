//! Fixed presets offered while creating a page.

use serde::{Deserialize, Serialize};

use crate::schedule::HolidayRecord;

/// A commonly observed holiday offered as a one-click selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetHoliday {
    pub name: &'static str,
    pub date: &'static str,
}

impl PresetHoliday {
    /// New selections start out closed.
    pub fn to_record(&self) -> HolidayRecord {
        HolidayRecord::closed(self.name, self.date)
    }
}

pub const PRESET_HOLIDAYS: [PresetHoliday; 10] = [
    PresetHoliday {
        name: "Thanksgiving Day",
        date: "2024-11-28",
    },
    PresetHoliday {
        name: "Christmas Eve",
        date: "2024-12-24",
    },
    PresetHoliday {
        name: "Christmas Day",
        date: "2024-12-25",
    },
    PresetHoliday {
        name: "New Year's Eve",
        date: "2024-12-31",
    },
    PresetHoliday {
        name: "New Year's Day",
        date: "2025-01-01",
    },
    PresetHoliday {
        name: "Martin Luther King Jr. Day",
        date: "2025-01-20",
    },
    PresetHoliday {
        name: "Presidents' Day",
        date: "2025-02-17",
    },
    PresetHoliday {
        name: "Memorial Day",
        date: "2025-05-26",
    },
    PresetHoliday {
        name: "Independence Day",
        date: "2025-07-04",
    },
    PresetHoliday {
        name: "Labor Day",
        date: "2025-09-01",
    },
];

pub fn find_preset(name: &str) -> Option<&'static PresetHoliday> {
    PRESET_HOLIDAYS.iter().find(|preset| preset.name == name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Retail,
    Restaurant,
    Cafe,
    Service,
    Salon,
    Other,
}

impl BusinessType {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Retail,
            Self::Restaurant,
            Self::Cafe,
            Self::Service,
            Self::Salon,
            Self::Other,
        ]
    }

    pub const fn value(self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Restaurant => "restaurant",
            Self::Cafe => "cafe",
            Self::Service => "service",
            Self::Salon => "salon",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Retail => "Retail Store",
            Self::Restaurant => "Restaurant",
            Self::Cafe => "Café",
            Self::Service => "Service Business",
            Self::Salon => "Salon/Spa",
            Self::Other => "Other",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|kind| kind.value().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// Flat fee charged once per page, in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Price {
    pub amount_minor: u32,
    pub currency: &'static str,
}

impl Price {
    pub fn display(&self) -> String {
        format!("${}.{:02}", self.amount_minor / 100, self.amount_minor % 100)
    }
}

pub const PRICE: Price = Price {
    amount_minor: 900,
    currency: "USD",
};
