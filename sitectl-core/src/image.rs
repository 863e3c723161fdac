//! CDN URLs for image assets

use crate::config::SanityConfig;
use crate::model::ImageSource;

const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Builds image URLs for one project/dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    pub fn from_config(config: &SanityConfig) -> Self {
        Self::new(&config.project_id, &config.dataset)
    }

    /// URL for an image field.
    ///
    /// A dereferenced asset's `url` is returned as-is; otherwise the URL is
    /// built from `asset._ref`. `None` for anything missing or malformed.
    pub fn url_for(&self, source: Option<&ImageSource>) -> Option<String> {
        let source = source?;
        if let Some(url) = source.resolved_url() {
            return Some(url.to_string());
        }
        let reference = source.asset.as_ref()?.reference.as_deref()?;
        self.url_for_ref(reference)
    }

    /// URL for an asset reference of the form `<kind>-<id>-<extension>`.
    ///
    /// Everything between the kind and the extension is the file id, so
    /// `image-abc-800x600-jpg` maps to `abc-800x600.jpg`.
    pub fn url_for_ref(&self, reference: &str) -> Option<String> {
        let (kind, rest) = reference.split_once('-')?;
        let (id, extension) = rest.rsplit_once('-')?;
        let valid = !kind.is_empty()
            && !id.is_empty()
            && !extension.is_empty()
            && extension.chars().all(|c| c.is_ascii_alphanumeric())
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return None;
        }
        Some(format!(
            "{CDN_BASE}/{}/{}/{id}.{extension}",
            self.project_id, self.dataset
        ))
    }
}

impl Default for ImageUrlBuilder {
    fn default() -> Self {
        Self::from_config(&SanityConfig::default())
    }
}
