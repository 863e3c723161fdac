//! `sitectl fetch`: one request against a running endpoint

use anyhow::{Context, Result};
use clap::Parser;
use sitectl_client::ApiClient;

use super::DEFAULT_SITE_URL;

#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Request type (siteSettings, page, section, news, service, team, tips, galleries, gallery, ...)
    #[arg(value_name = "TYPE")]
    pub kind: Option<String>,

    /// Site origin serving /api/sanity
    #[arg(long, env = "SITECTL_URL", default_value = DEFAULT_SITE_URL)]
    pub url: String,

    /// Menu title (selects the menu lookup)
    #[arg(long)]
    pub menu_title: Option<String>,

    /// Page slug or route name
    #[arg(long)]
    pub identifier: Option<String>,

    /// Look the page up by slug instead of route name
    #[arg(long)]
    pub slug: bool,

    /// Section type for `section`
    #[arg(long)]
    pub section_type: Option<String>,

    /// Section title filter for `section`
    #[arg(long)]
    pub title: Option<String>,

    /// Document id for `gallery`
    #[arg(long)]
    pub id: Option<String>,

    /// Maximum number of entries for `news`
    #[arg(long)]
    pub limit: Option<u32>,

    /// Single-line JSON instead of pretty output
    #[arg(long)]
    pub compact: bool,
}

impl FetchArgs {
    /// Query-string pairs in endpoint naming
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let mut push = |name: &'static str, value: Option<String>| {
            if let Some(value) = value {
                params.push((name, value));
            }
        };
        push("type", self.kind.clone());
        push("menuTitle", self.menu_title.clone());
        push("identifier", self.identifier.clone());
        push("identifierType", self.slug.then(|| "slug".to_string()));
        push("sectionType", self.section_type.clone());
        push("title", self.title.clone());
        push("id", self.id.clone());
        push("limit", self.limit.map(|n| n.to_string()));
        params
    }
}

pub async fn run_fetch(args: FetchArgs) -> Result<()> {
    if args.kind.is_none() && args.menu_title.is_none() {
        anyhow::bail!("Give a request TYPE or --menu-title");
    }

    let client = ApiClient::new(&args.url).context("Invalid --url")?;
    let params = args.params();
    let borrowed: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();

    let value = client
        .query(&borrowed)
        .await
        .with_context(|| format!("Request to {} failed", client.endpoint()))?;

    let output = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    println!("{output}");
    Ok(())
}
