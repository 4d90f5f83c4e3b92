//! Outbound integrations used by the API server.
//!
//! Each integration sits behind an `async-trait` trait so handlers depend on
//! `Arc<dyn Trait>` and tests can swap in in-memory fakes:
//!
//! - [`images::ImageStore`]: Cloudinary image hosting.
//! - [`gateway::PaymentGateway`]: Meezan hosted payment page registration.
//! - [`geolocation::GeoLocator`]: IP address lookup for donation records.

pub mod error;
pub mod gateway;
pub mod geolocation;
pub mod images;

pub use error::CloudError;
pub use gateway::{GatewayOrder, MeezanConfig, MeezanGateway, PaymentGateway, RegisteredOrder};
pub use geolocation::{GeoLocator, IpApiLocator};
pub use images::{CloudinaryConfig, CloudinaryStore, ImageFile, ImageStore, UploadedImage};
