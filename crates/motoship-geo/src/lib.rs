//! Address-to-shipping-cost resolution engine.
//!
//! Given a free-text Indian customer address (optionally embedding a 6-digit
//! pincode) and an order value, produces a deterministic shipping cost,
//! distance estimate, and resolved coordinates. Resolution is layered:
//!
//! 1. pincode geocoding (cached for the life of the process) priced by the
//!    static postal-zone table;
//! 2. text-strategy geocoding plus a routed driving distance, priced by
//!    distance bands;
//! 3. an offline heuristic fallback that always succeeds, so
//!    [`ShippingPipeline::estimate`] can never fail a checkout.

pub mod cache;
pub mod client;
pub mod cost;
pub mod error;
pub mod fallback;
pub mod pincode;
pub mod pipeline;
pub mod resolver;
pub mod score;
pub mod strategy;
pub mod types;

pub use cache::PincodeCache;
pub use client::{GeocodingClient, RoutingClient};
pub use cost::FREE_SHIPPING_THRESHOLD;
pub use error::GeoError;
pub use pipeline::ShippingPipeline;
pub use types::{
    Confidence, Coordinates, GeocodeResult, PincodeValidation, QuoteMethod, ShippingQuote,
};
