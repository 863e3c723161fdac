//! Content records as they travel from the content store to the site.
//!
//! Every record keeps the fields this crate does not model in `extra`, so
//! serializing a record gives back what the store sent plus normalization.

pub mod asset;
pub mod menu;
pub mod page;
pub mod records;
pub mod settings;

pub use asset::{Asset, ImageSource};
pub use menu::{LinkTarget, Menu, MenuItem, PageRef, SectionRef, Slug, Target};
pub use page::{Page, Section, SectionType};
pub use records::{Gallery, GalleryItem, GallerySummary, NewsItem, Service, Subservice, TeamMember, Tip, TipLink};
pub use settings::{ContactInfo, Favicon, PreloaderImage, SiteSettings};

/// Upstream fields carried through without a typed home
pub type Extra = serde_json::Map<String, serde_json::Value>;
