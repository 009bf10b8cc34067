// Encar listing API
//
// Unauthenticated read-side endpoint: `GET /v1/readside/vehicle/{id}`
// returns photos, category, spec and advertisement blocks for one listing.

pub mod client;
pub mod models;

pub use client::EncarClient;
pub use models::{EncarAdvertisement, EncarCategory, EncarPhoto, EncarSpec, EncarVehicle};
