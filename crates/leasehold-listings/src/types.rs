//! Listing documents as they come out of the document store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Document ID of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listing-{}", self.0)
    }
}

impl From<&str> for ListingId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// What is being rented out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Apartment,
    House,
    Storage,
}

/// One rentable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub kind: ListingKind,
    /// Monthly rent in cents.
    pub monthly_rent_cents: u64,
    /// `false` once the unit is leased.
    pub available: bool,
}

impl Listing {
    /// Returns `true` for storage units.
    pub fn is_storage(&self) -> bool {
        self.kind == ListingKind::Storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_deserializes_camel_case_document() {
        let raw = r#"{
            "id": "unit-4b",
            "title": "Two-bed near the river",
            "kind": "apartment",
            "monthlyRentCents": 145000,
            "available": true
        }"#;

        let listing: Listing = serde_json::from_str(raw).unwrap();

        assert_eq!(listing.id, ListingId::from("unit-4b"));
        assert_eq!(listing.kind, ListingKind::Apartment);
        assert_eq!(listing.monthly_rent_cents, 145_000);
        assert!(!listing.is_storage());
    }

    #[test]
    fn test_listing_id_display() {
        assert_eq!(ListingId::from("a1").to_string(), "listing-a1");
    }
}
