// carsnap-api: Async Rust clients for the Encar and HeyDealer listing APIs

pub mod encar;
pub mod error;
pub mod heydealer;
pub mod media;
pub mod relay;
pub mod scalar;
pub mod transport;

mod response;

pub use encar::EncarClient;
pub use error::Error;
pub use heydealer::HeyDealerClient;
pub use media::MediaClient;
pub use relay::{Relay, RelayHandle, RelayResponse};
pub use scalar::Scalar;
pub use transport::TransportConfig;
