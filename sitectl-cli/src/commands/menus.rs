//! `sitectl menus`: resolve menus the way the site does

use anyhow::{Context, Result};
use clap::Parser;
use sitectl_client::{Menus, Session};
use sitectl_core::Menu;

use super::DEFAULT_SITE_URL;

#[derive(Parser, Debug)]
pub struct MenusArgs {
    /// Site origin serving /api/sanity
    #[arg(long, env = "SITECTL_URL", default_value = DEFAULT_SITE_URL)]
    pub url: String,

    /// Print the resolved menus as JSON
    #[arg(long)]
    pub json: bool,
}

fn render_menu(label: &str, menu: Option<&Menu>) -> String {
    let Some(menu) = menu else {
        return format!("{label}: (none)\n");
    };
    let mut out = format!("{label}: {}\n", menu.title.as_deref().unwrap_or("(untitled)"));
    for item in &menu.items {
        let text = item.text.as_deref().unwrap_or("");
        let href = item.to.as_ref().and_then(|to| to.href()).unwrap_or_default();
        out.push_str(&format!("  {text:<24} {href}\n"));
    }
    out
}

fn render(menus: &Menus) -> String {
    let mut out = render_menu("Main menu", menus.main_menu.as_ref());
    out.push_str(&render_menu("Footer menu", menus.footer_menu.as_ref()));
    out
}

pub async fn run_menus(args: MenusArgs) -> Result<()> {
    let mut session = Session::connect(&args.url).context("Invalid --url")?;
    let menus = session.start().await.context("Failed to resolve menus")?;

    if let Some(err) = session.settings().error() {
        tracing::warn!(error = %err, "site settings unavailable, main menu looked up by title");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&menus)?);
    } else {
        print!("{}", render(&menus));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_hrefs() {
        let main: Menu = serde_json::from_value(json!({
            "title": "Main Menu",
            "items": [
                { "text": "About", "to": { "page": { "slug": { "current": "about" } } } },
                { "text": "Story", "to": { "section": { "title": "Our Story" }, "anchor": "our-story" } }
            ]
        }))
        .unwrap();
        let text = render(&Menus {
            main_menu: Some(main),
            footer_menu: None,
        });
        assert!(text.contains("Main menu: Main Menu"));
        assert!(text.contains("/about"));
        assert!(text.contains("#our-story"));
        assert!(text.contains("Footer menu: (none)"));
    }
}
