//! Navigation menus

use serde::{Deserialize, Serialize};

use super::Extra;
use crate::lists::one_or_many;

/// A menu record, looked up by `title`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub items: Vec<MenuItem>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<LinkTarget>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Where a menu item points: a page, a section on a page, or an external URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRef {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionRef {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slug {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Resolved view of a [`LinkTarget`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Page {
        slug: &'a str,
    },
    Section {
        page_slug: Option<&'a str>,
        anchor: &'a str,
    },
    External(&'a str),
}

impl Menu {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl PageRef {
    pub fn slug(&self) -> Option<&str> {
        self.slug
            .as_ref()
            .and_then(|slug| slug.current.as_deref())
            .filter(|s| !s.is_empty())
    }
}

impl LinkTarget {
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref().filter(|a| !a.is_empty())
    }

    /// Section with an anchor wins over a page, a page over a raw URL.
    pub fn target(&self) -> Option<Target<'_>> {
        let page_slug = self.page.as_ref().and_then(PageRef::slug);
        if let (Some(_), Some(anchor)) = (&self.section, self.anchor()) {
            return Some(Target::Section { page_slug, anchor });
        }
        if let Some(slug) = page_slug {
            return Some(Target::Page { slug });
        }
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(Target::External)
    }

    pub fn href(&self) -> Option<String> {
        Some(match self.target()? {
            Target::Page { slug } => format!("/{slug}"),
            Target::Section {
                page_slug: Some(slug),
                anchor,
            } => format!("/{slug}#{anchor}"),
            Target::Section {
                page_slug: None,
                anchor,
            } => format!("#{anchor}"),
            Target::External(url) => url.to_string(),
        })
    }
}
