// HeyDealer dealer API
//
// Cookie-authenticated endpoint: `GET /v2/dealers/web/cars/{id}`. The
// session cookies belong to the dealer web origin and are forwarded
// explicitly as a `Cookie` header.

pub mod client;
pub mod models;

pub use client::HeyDealerClient;
pub use models::{HeyDealerAuction, HeyDealerCar, HeyDealerCarHistory, HeyDealerDetail};
