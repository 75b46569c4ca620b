//! Holiday hours pages for small businesses.
//!
//! The [`schedule`] module holds the rules that turn a list of holiday records into
//! what a public page shows: status badges, readable dates and times, and a stable
//! chronological order. The [`wizard`] module drives page creation, [`catalog`] carries
//! the fixed presets offered to new businesses, and [`listing`] mirrors the JSON
//! contracts of the hosted backend.

pub mod catalog;
pub mod config;
pub mod error;
pub mod listing;
pub mod schedule;
pub mod telemetry;
pub mod wizard;
