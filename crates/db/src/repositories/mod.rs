//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod about_repo;
pub mod admin_repo;
pub mod contact_message_repo;
pub mod contact_settings_repo;
pub mod donation_repo;
pub mod donation_settings_repo;
pub mod donor_repo;
pub mod project_repo;
pub mod statistics_repo;

pub use about_repo::AboutRepo;
pub use admin_repo::AdminRepo;
pub use contact_message_repo::ContactMessageRepo;
pub use contact_settings_repo::ContactSettingsRepo;
pub use donation_repo::DonationRepo;
pub use donation_settings_repo::DonationSettingsRepo;
pub use donor_repo::DonorRepo;
pub use project_repo::ProjectRepo;
pub use statistics_repo::StatisticsRepo;
