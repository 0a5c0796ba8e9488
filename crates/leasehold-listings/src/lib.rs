//! Real-time listing subscription for Leasehold.
//!
//! Pages that show properties don't poll. They subscribe to the listing
//! collection and get the full current snapshot pushed to them every time
//! it changes. The document store that really does this lives outside
//! Leasehold; this crate pins down the contract ([`ListingFeed`],
//! [`Subscription`]) and ships an in-process implementation
//! ([`InMemoryListingFeed`]) for tests and demos.

mod feed;
mod memory;
mod types;

pub use feed::{ListingFeed, SnapshotCallback, Subscription};
pub use memory::InMemoryListingFeed;
pub use types::{Listing, ListingId, ListingKind};
