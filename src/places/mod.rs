//! Place lookup, validation and enrichment
//!
//! The [`PlaceLookup`] trait is the only seam that talks to the place
//! provider; everything above it works on [`PlaceHit`] values. The enricher
//! applies the validation policy (type whitelist/blacklist, address
//! confirmation, rating floors) and produces [`crate::models::Recommendation`]
//! records, either from article-sourced candidates or via the direct-search
//! fallback.

pub mod classify;
pub mod client;
pub mod enrich;
pub mod types;

pub use classify::classify;
pub use client::{GooglePlacesClient, PlaceHit, PlaceLookup};
pub use enrich::{PlaceEnricher, RejectReason};
