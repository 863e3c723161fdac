//! Image and file asset references

use serde::{Deserialize, Serialize};

use super::Extra;

/// An asset as it appears inside an image field.
///
/// Dereferenced assets (`asset->`) carry `url`; plain references carry only
/// `_ref`, from which a CDN URL can still be built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// An image field: `{ asset, alt, ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ImageSource {
    /// Resolved delivery URL, when the asset was dereferenced upstream
    pub fn resolved_url(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .and_then(|asset| asset.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_survive_round_trip() {
        let raw = json!({
            "_type": "image",
            "asset": { "_ref": "image-abc-png", "_type": "reference" },
            "hotspot": { "x": 0.5 }
        });
        let image: ImageSource = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(image.asset.as_ref().unwrap().reference.as_deref(), Some("image-abc-png"));
        assert_eq!(serde_json::to_value(&image).unwrap(), raw);
    }

    #[test]
    fn empty_url_is_not_resolved() {
        let image: ImageSource =
            serde_json::from_value(json!({ "asset": { "url": "" } })).unwrap();
        assert_eq!(image.resolved_url(), None);
    }
}
