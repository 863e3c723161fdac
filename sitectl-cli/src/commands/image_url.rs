//! `sitectl image-url`: asset reference to CDN URL

use anyhow::{bail, Result};
use clap::Parser;
use sitectl_core::{ImageUrlBuilder, SiteConfig};

#[derive(Parser, Debug)]
pub struct ImageUrlArgs {
    /// Asset reference, e.g. image-abc123-2000x3000-jpg
    #[arg(value_name = "REF")]
    pub reference: String,

    /// Project id (default: from config)
    #[arg(long)]
    pub project_id: Option<String>,

    /// Dataset (default: from config)
    #[arg(long)]
    pub dataset: Option<String>,
}

fn builder(args: &ImageUrlArgs, config: &SiteConfig) -> ImageUrlBuilder {
    ImageUrlBuilder::new(
        args.project_id
            .clone()
            .unwrap_or_else(|| config.sanity.project_id.clone()),
        args.dataset
            .clone()
            .unwrap_or_else(|| config.sanity.dataset.clone()),
    )
}

pub fn run_image_url(args: ImageUrlArgs, config: &SiteConfig) -> Result<()> {
    match builder(&args, config).url_for_ref(args.reference.trim()) {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => bail!("'{}' is not an image asset reference", args.reference),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_config() {
        let args = ImageUrlArgs {
            reference: "image-abc123-png".into(),
            project_id: Some("other".into()),
            dataset: None,
        };
        let url = builder(&args, &SiteConfig::default())
            .url_for_ref(&args.reference)
            .unwrap();
        assert_eq!(url, "https://cdn.sanity.io/images/other/production/abc123.png");
    }
}
