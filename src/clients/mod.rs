//! Clients - HTTP Clients for External APIs
//!
//! This module contains HTTP clients for communicating with external APIs.

pub mod google_places;

pub use google_places::{GooglePlacesClient, PlacesProvider};
