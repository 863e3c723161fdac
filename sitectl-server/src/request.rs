//! Typed content requests.
//!
//! The endpoint receives loose query-string parameters. They are turned
//! into exactly one [`ContentRequest`] variant before anything touches the
//! content store, so a bad request never reaches upstream.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Query string as received on `GET /api/sanity`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub menu_title: Option<String>,
    pub identifier: Option<String>,
    pub identifier_type: Option<String>,
    pub section_type: Option<String>,
    pub title: Option<String>,
    pub id: Option<String>,
    pub limit: Option<String>,
}

/// How a page is looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLookup {
    Slug,
    RouteName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    SiteSettings,
    Menu { title: String },
    Page { identifier: String, lookup: PageLookup },
    Section { section_type: String, title: Option<String> },
    HomeScroll,
    News { limit: Option<u32> },
    Services,
    Team,
    Tips,
    Galleries,
    Gallery { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("missing request type")]
    MissingType,

    #[error("unrecognized request type '{0}'")]
    UnknownType(String),

    #[error("'{param}' is required for type '{kind}'")]
    MissingParam {
        kind: &'static str,
        param: &'static str,
    },
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Leading integer of `value`, the way a browser's `parseInt` reads it:
/// `"5abc"` is 5, `"abc"` is nothing
fn leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let n: i64 = rest[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}

fn require(value: Option<String>, kind: &'static str, param: &'static str) -> Result<String, RequestError> {
    present(value).ok_or(RequestError::MissingParam { kind, param })
}

impl TryFrom<RawQuery> for ContentRequest {
    type Error = RequestError;

    fn try_from(raw: RawQuery) -> Result<Self, Self::Error> {
        let kind = present(raw.kind);
        if kind.as_deref() == Some("siteSettings") {
            return Ok(Self::SiteSettings);
        }
        // past settings, a menu title selects the menu lookup whatever the type says
        if let Some(title) = present(raw.menu_title) {
            return Ok(Self::Menu { title });
        }

        let kind = kind.ok_or(RequestError::MissingType)?;
        let request = match kind.as_str() {
            "menu" => return Err(RequestError::MissingParam {
                kind: "menu",
                param: "menuTitle",
            }),
            "page" => Self::Page {
                identifier: require(raw.identifier, "page", "identifier")?,
                lookup: match raw.identifier_type.as_deref() {
                    Some("slug") => PageLookup::Slug,
                    _ => PageLookup::RouteName,
                },
            },
            "section" => Self::Section {
                section_type: require(raw.section_type, "section", "sectionType")?,
                title: present(raw.title),
            },
            "sectionHomeScroll" => Self::HomeScroll,
            "news" => Self::News {
                limit: raw
                    .limit
                    .as_deref()
                    .and_then(leading_int)
                    .and_then(|n| u32::try_from(n).ok())
                    .filter(|&n| n > 0),
            },
            "service" => Self::Services,
            "team" => Self::Team,
            "tips" => Self::Tips,
            "galleries" => Self::Galleries,
            "gallery" => Self::Gallery {
                id: require(raw.id, "gallery", "id")?,
            },
            _ => return Err(RequestError::UnknownType(kind)),
        };
        Ok(request)
    }
}

impl ContentRequest {
    /// Wire name of the request type
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SiteSettings => "siteSettings",
            Self::Menu { .. } => "menu",
            Self::Page { .. } => "page",
            Self::Section { .. } => "section",
            Self::HomeScroll => "sectionHomeScroll",
            Self::News { .. } => "news",
            Self::Services => "service",
            Self::Team => "team",
            Self::Tips => "tips",
            Self::Galleries => "galleries",
            Self::Gallery { .. } => "gallery",
        }
    }
}

impl fmt::Display for ContentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu { title } => write!(f, "menu '{title}'"),
            Self::Page { identifier, lookup } => write!(f, "page {lookup:?} '{identifier}'"),
            Self::Section { section_type, .. } => write!(f, "section '{section_type}'"),
            Self::Gallery { id } => write!(f, "gallery '{id}'"),
            other => f.write_str(other.kind()),
        }
    }
}
