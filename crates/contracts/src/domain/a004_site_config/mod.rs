pub mod aggregate;
pub mod social;

pub use aggregate::{validate_logo, SiteConfigEntry, LOGO_KEY, SOCIAL_KEY};
pub use social::{BusinessGroup, SocialConfig, SocialNetwork};
