//! Pages and their typed sections

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Extra, ImageSource, Slug};
use crate::lists::one_or_many;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<ImageSource>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub sections: Vec<Section>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One block of page content.
///
/// `sectionType` names which `<type>Content` field carries the payload;
/// the other content fields are absent or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_type: Option<SectionType>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Page {
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_ref().and_then(|s| s.current.as_deref())
    }

    pub fn sections_of(&self, kind: &SectionType) -> impl Iterator<Item = &Section> {
        let kind = kind.clone();
        self.sections
            .iter()
            .filter(move |s| s.section_type.as_ref() == Some(&kind))
    }
}

impl Section {
    /// The populated content block selected by `sectionType`
    pub fn content(&self) -> Option<&Value> {
        let key = self.section_type.as_ref()?.content_key();
        self.extra.get(&key).filter(|v| !v.is_null())
    }
}

macro_rules! section_types {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Known section variants. Names the store sends that this list does
        /// not know are kept verbatim in `Other`.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum SectionType {
            $($variant,)+
            Other(String),
        }

        impl SectionType {
            pub const KNOWN: &'static [SectionType] = &[$(SectionType::$variant),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(SectionType::$variant => $name,)+
                    SectionType::Other(name) => name,
                }
            }
        }

        impl From<String> for SectionType {
            fn from(name: String) -> Self {
                match name.as_str() {
                    $($name => SectionType::$variant,)+
                    _ => SectionType::Other(name),
                }
            }
        }
    };
}

section_types! {
    Hero => "hero",
    Basic => "basic",
    Image => "image",
    SectionImages => "sectionImages",
    TipsFromTheTable => "tipsFromTheTable",
    Reviews => "reviews",
    Instagram => "instagram",
    Headline => "headline",
    Contact => "contact",
    HomeScroll => "homeScroll",
    TwoColumn => "twoColumn",
    Nested => "nested",
    Banner => "banner",
    News => "news",
    SelectedNews => "selectedNews",
    Quote => "quote",
    GoogleMap => "googleMap",
    Text => "text",
    Marquee => "marquee",
    ServiceLinks => "serviceLinks",
    DualCarousel => "dualCarousel",
    SingleCarousel => "singleCarousel",
    Usps => "usps",
    Service => "service",
    HorizontalCarousel => "horizontalCarousel",
    SelectedPages => "selectedPages",
    SelectedServices => "selectedServices",
}

impl SectionType {
    /// Field holding this variant's payload, e.g. `heroContent`
    pub fn content_key(&self) -> String {
        format!("{}Content", self.as_str())
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SectionType::Other(_))
    }
}

impl From<&str> for SectionType {
    fn from(name: &str) -> Self {
        SectionType::from(name.to_string())
    }
}

impl From<SectionType> for String {
    fn from(kind: SectionType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
