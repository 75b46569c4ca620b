use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{Business, Page, PaymentStatus, RegularHours, DEFAULT_VIEW_SOURCE};
use crate::schedule::HolidayRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBusinessRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
}

impl CreateBusinessRequest {
    pub fn validate(&self) -> Result<(), ListingError> {
        if self.name.trim().is_empty() {
            return Err(ListingError::MissingField("name"));
        }
        validate_email(&self.email)
    }

    /// Builds the stored business, pending payment.
    pub fn into_business(self, id: Uuid, now: DateTime<Utc>) -> Result<Business, ListingError> {
        self.validate()?;
        Ok(Business {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone,
            address: self.address,
            business_type: self.business_type,
            paystack_customer_id: None,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            last_edited: now,
        })
    }
}

/// Partial business update; only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBusinessRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
}

impl UpdateBusinessRequest {
    pub fn apply_to(self, business: &mut Business, now: DateTime<Utc>) -> Result<(), ListingError> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(name) = self.name {
            if name.trim().is_empty() {
                return Err(ListingError::MissingField("name"));
            }
            business.name = name;
        }
        if let Some(email) = self.email {
            business.email = email;
        }
        if self.phone.is_some() {
            business.phone = self.phone;
        }
        if self.address.is_some() {
            business.address = self.address;
        }
        if self.business_type.is_some() {
            business.business_type = self.business_type;
        }
        business.last_edited = now;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePageRequest {
    pub business_id: Uuid,
    pub holidays: Vec<HolidayRecord>,
    #[serde(default)]
    pub regular_hours: RegularHours,
}

impl CreatePageRequest {
    /// A page shares its id with the business it belongs to.
    pub fn into_page(self, now: DateTime<Utc>) -> Page {
        Page {
            id: self.business_id,
            business_id: self.business_id,
            holidays: self.holidays,
            regular_hours: self.regular_hours,
            custom_css: None,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays: Option<Vec<HolidayRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_hours: Option<RegularHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
}

impl UpdatePageRequest {
    pub fn apply_to(self, page: &mut Page, now: DateTime<Utc>) {
        if let Some(holidays) = self.holidays {
            page.holidays = holidays;
        }
        if let Some(regular_hours) = self.regular_hours {
            page.regular_hours = regular_hours;
        }
        if self.custom_css.is_some() {
            page.custom_css = self.custom_css;
        }
        page.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementViewRequest {
    #[serde(default = "default_view_source")]
    pub source: String,
}

fn default_view_source() -> String {
    DEFAULT_VIEW_SOURCE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicLinkRequest {
    pub email: String,
    pub business_id: Uuid,
}

impl MagicLinkRequest {
    /// Edit links are only issued to the owner's address, compared case-insensitively.
    pub fn check_owner(&self, business: &Business) -> Result<(), ListingError> {
        if business.id != self.business_id {
            return Err(ListingError::BusinessMismatch);
        }
        if !business.email.trim().eq_ignore_ascii_case(self.email.trim()) {
            return Err(ListingError::NotOwner);
        }
        Ok(())
    }
}

/// Claims carried by a verified magic-link token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub business_id: String,
    pub email: String,
    /// Expiry as a unix timestamp in seconds.
    pub exp: i64,
}

impl TokenClaims {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Grants dashboard access to `business` while the token is live and was issued
    /// for that business and its owner's address.
    pub fn authorize(&self, business: &Business, now: DateTime<Utc>) -> Result<(), ListingError> {
        if self.is_expired(now) {
            return Err(ListingError::TokenExpired);
        }
        if self.business_id.trim() != business.id.to_string() {
            return Err(ListingError::BusinessMismatch);
        }
        if !business.email.trim().eq_ignore_ascii_case(self.email.trim()) {
            return Err(ListingError::NotOwner);
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), ListingError> {
    if email.trim().is_empty() {
        return Err(ListingError::MissingField("email"));
    }
    if !EmailAddress::is_valid(email.trim()) {
        return Err(ListingError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid e-mail address")]
    InvalidEmail(String),
    #[error("request targets a different business")]
    BusinessMismatch,
    #[error("email does not match business owner")]
    NotOwner,
    #[error("magic link has expired, request a new one")]
    TokenExpired,
}
