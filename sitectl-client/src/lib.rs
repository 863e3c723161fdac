//! sitectl-client: data hooks over the content endpoint
//!
//! A [`Session`] owns one cache slot per key. Hooks read through those
//! slots, so concurrent identical fetches share a single request and a
//! value fetched once is reused for the rest of the session.

pub mod api;
pub mod data;
pub mod error;
pub mod menu;
pub mod session;
pub mod settings;

pub use api::{ApiClient, SiteApi};
pub use data::{AsyncData, DataState};
pub use error::ClientError;
pub use menu::{MenuHook, Menus, FOOTER_MENU_TITLE, MAIN_MENU_TITLE};
pub use session::Session;
pub use settings::{SettingsView, SiteSettingsHook};
