//! List records: news, services, team, tips, galleries

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Asset, Extra, ImageSource};
use crate::lists::one_or_many;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<ImageSource>,
    /// Link out instead of an article page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offsite_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_title: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub subservices: Vec<Subservice>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subservice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_rank: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tip {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<ImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<TipLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_rank: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_blank: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Gallery listing entry: first item as thumbnail plus a count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GallerySummary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub items: Vec<GalleryItem>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Image or video entry in a gallery
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(rename = "_type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn service_subservices_null() {
        let service: Service = serde_json::from_value(json!({
            "_id": "svc",
            "title": "Facial",
            "subservices": null
        }))
        .unwrap();
        assert!(service.subservices.is_empty());
    }

    #[test]
    fn gallery_summary_reads_count() {
        let summary: GallerySummary = serde_json::from_value(json!({
            "_id": "g1",
            "title": "Garden",
            "thumbnail": { "asset": { "url": "https://cdn.sanity.io/images/x/y/a.jpg" } },
            "itemCount": 12
        }))
        .unwrap();
        assert_eq!(summary.item_count, Some(12));
        assert_eq!(
            summary.thumbnail.unwrap().resolved_url(),
            Some("https://cdn.sanity.io/images/x/y/a.jpg")
        );
    }

    #[test]
    fn news_keeps_unmodelled_fields() {
        let item: NewsItem = serde_json::from_value(json!({
            "_id": "n1",
            "publishedAt": "2024-05-01T09:00:00Z",
            "excerpt": "Short",
            "category": null
        }))
        .unwrap();
        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["excerpt"], "Short");
        assert_eq!(back["publishedAt"], "2024-05-01T09:00:00Z");
    }
}
