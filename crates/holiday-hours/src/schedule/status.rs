use serde::Serialize;

use super::domain::{HolidayHours, HolidayRecord};
use super::format::format_time;

/// Symbolic marker shown next to a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    Lock,
    Clock,
    Check,
}

impl StatusIcon {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Lock => "🔒",
            Self::Clock => "⏰",
            Self::Check => "✓",
        }
    }
}

/// Semantic colour of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Danger,
    Info,
    Success,
}

impl StatusColor {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Success => "success",
        }
    }

    /// Utility class the public page template uses for this colour.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Danger => "text-red-600",
            Self::Info => "text-blue-600",
            Self::Success => "text-green-600",
        }
    }
}

/// Presentation-ready projection of a [`HolidayRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayStatus {
    pub icon: StatusIcon,
    pub text: String,
    pub color: StatusColor,
}

impl DisplayStatus {
    pub fn view(&self) -> DisplayStatusView {
        DisplayStatusView {
            icon: self.icon,
            symbol: self.icon.symbol(),
            text: self.text.clone(),
            color: self.color,
            color_class: self.color.css_class(),
        }
    }
}

/// Serialized badge including the literal symbol and CSS class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayStatusView {
    pub icon: StatusIcon,
    pub symbol: &'static str,
    pub text: String,
    pub color: StatusColor,
    pub color_class: &'static str,
}

pub const CLOSED_TEXT: &str = "Closed";
pub const NORMAL_TEXT: &str = "Normal Hours";

/// Derives the badge shown for a holiday. Total over every record: a `special` record
/// with incomplete times renders exactly like a `normal` one.
pub fn derive_status(record: &HolidayRecord) -> DisplayStatus {
    match record.hours() {
        HolidayHours::Closed => DisplayStatus {
            icon: StatusIcon::Lock,
            text: CLOSED_TEXT.to_string(),
            color: StatusColor::Danger,
        },
        HolidayHours::Special { open, close } => DisplayStatus {
            icon: StatusIcon::Clock,
            text: format!("{} - {}", format_time(open), format_time(close)),
            color: StatusColor::Info,
        },
        HolidayHours::Normal => DisplayStatus {
            icon: StatusIcon::Check,
            text: NORMAL_TEXT.to_string(),
            color: StatusColor::Success,
        },
    }
}
