//! JSON contracts of the hosted backend: businesses, pages, analytics, magic links and
//! payment status. Only the shapes and the pure rules attached to them live here.

pub mod domain;
mod links;
pub mod requests;

pub use domain::{
    Analytics, Business, DayHours, Page, PaymentStatus, RegularHours, ViewSource,
    DEFAULT_VIEW_SOURCE,
};
pub use links::{LinkError, SiteLinks};
pub use requests::{
    CreateBusinessRequest, CreatePageRequest, IncrementViewRequest, ListingError,
    MagicLinkRequest, TokenClaims, UpdateBusinessRequest, UpdatePageRequest,
};
