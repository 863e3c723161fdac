//! Command implementations for the sitectl CLI

pub mod fetch;
pub mod image_url;
pub mod menus;
pub mod serve;

pub use fetch::run_fetch;
pub use image_url::run_image_url;
pub use menus::run_menus;
pub use serve::run_serve;

/// Site origin used by the client-side commands
pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
