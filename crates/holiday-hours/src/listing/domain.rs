use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{BusinessType, DayOfWeek};
use crate::schedule::{format_time, HolidayRecord, HolidaySchedule};

pub const DEFAULT_VIEW_SOURCE: &str = "direct";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
        }
    }
}

/// A business owning one holiday hours page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "type", default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub paystack_customer_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
}

impl Business {
    pub fn kind(&self) -> Option<BusinessType> {
        self.business_type.as_deref().and_then(BusinessType::from_value)
    }

    /// Only paid pages are published.
    pub fn is_live(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

impl DayHours {
    pub fn display(&self) -> String {
        format!("{} - {}", format_time(&self.open), format_time(&self.close))
    }
}

/// Regular weekly opening hours keyed by lowercase weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegularHours(pub BTreeMap<DayOfWeek, DayHours>);

impl RegularHours {
    pub fn get(&self, day: DayOfWeek) -> Option<&DayHours> {
        self.0.get(&day)
    }

    pub fn set(&mut self, day: DayOfWeek, open: impl Into<String>, close: impl Into<String>) {
        self.0.insert(
            day,
            DayHours {
                open: open.into(),
                close: close.into(),
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Regular hours for the weekday `date` falls on.
    pub fn on(&self, date: NaiveDate) -> Option<&DayHours> {
        self.get(date.weekday().into())
    }

    /// Monday-first rows for display; days without hours are left out.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        DayOfWeek::ordered()
            .into_iter()
            .filter_map(|day| self.get(day).map(|hours| (day.label(), hours.display())))
            .collect()
    }
}

/// The public page of a business. Its id equals the business id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub business_id: Uuid,
    #[serde(default)]
    pub holidays: Vec<HolidayRecord>,
    #[serde(default)]
    pub regular_hours: RegularHours,
    #[serde(default)]
    pub custom_css: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn schedule(&self) -> HolidaySchedule {
        HolidaySchedule::new(self.holidays.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSource {
    pub date: NaiveDate,
    pub source: String,
    pub count: u64,
}

/// View counters of a page, bucketed per day and traffic source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    pub id: Uuid,
    pub page_id: Uuid,
    pub views: u64,
    #[serde(default)]
    pub last_viewed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sources: Vec<ViewSource>,
}

impl Analytics {
    pub fn new(page_id: Uuid) -> Self {
        Self {
            id: page_id,
            page_id,
            views: 0,
            last_viewed: None,
            sources: Vec::new(),
        }
    }

    /// Counts one view from `source` (blank means direct traffic) at `now` and returns
    /// the new total.
    pub fn record_view(&mut self, source: &str, now: DateTime<Utc>) -> u64 {
        let source = match source.trim() {
            "" => DEFAULT_VIEW_SOURCE,
            other => other,
        };
        let today = now.date_naive();

        self.views += 1;
        self.last_viewed = Some(now);

        match self
            .sources
            .iter_mut()
            .find(|bucket| bucket.date == today && bucket.source == source)
        {
            Some(bucket) => bucket.count += 1,
            None => self.sources.push(ViewSource {
                date: today,
                source: source.to_string(),
                count: 1,
            }),
        }

        self.views
    }

    pub fn views_by_source(&self) -> BTreeMap<&str, u64> {
        let mut totals = BTreeMap::new();
        for bucket in &self.sources {
            *totals.entry(bucket.source.as_str()).or_insert(0) += bucket.count;
        }
        totals
    }
}
