//! sitectl-core: content records and the rules that shape them
//!
//! Shared by the query server and the client hooks:
//! - typed content records with passthrough of unmodelled fields
//! - list coercion and anchor normalization
//! - image CDN URLs
//! - process configuration

pub mod config;
pub mod error;
pub mod image;
pub mod lists;
pub mod model;
pub mod normalize;
pub mod slug;

pub use config::{PublicConfig, SanityConfig, ServerSection, SiteConfig};
pub use error::{Result, SiteError};
pub use image::ImageUrlBuilder;
pub use model::{
    Gallery, GallerySummary, LinkTarget, Menu, MenuItem, NewsItem, Page, Section, SectionType,
    Service, SiteSettings, TeamMember, Tip,
};
pub use normalize::{normalized, Normalize};
pub use slug::anchor_id;
