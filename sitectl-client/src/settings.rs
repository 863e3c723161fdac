//! Site settings hook.
//!
//! The settings singleton is fetched once per session and is never fatal:
//! a failed fetch is logged and the hook answers with empty settings, whose
//! accessors fall back to the site defaults.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use sitectl_core::model::{ContactInfo, ImageSource, PreloaderImage};
use sitectl_core::{normalized, Menu, SiteSettings};
use tokio::sync::watch;

use crate::api::SiteApi;
use crate::data::{AsyncData, DataState};
use crate::error::ClientError;

pub const SITE_SETTINGS_KEY: &str = "siteSettings-v2";

pub struct SiteSettingsHook {
    api: Arc<dyn SiteApi>,
    data: AsyncData<Arc<SiteSettings>>,
}

impl SiteSettingsHook {
    pub fn new(api: Arc<dyn SiteApi>) -> Self {
        Self {
            api,
            data: AsyncData::new(SITE_SETTINGS_KEY),
        }
    }

    /// Start from settings the server already computed; no fetch happens
    pub fn hydrated(api: Arc<dyn SiteApi>, settings: SiteSettings) -> Self {
        Self {
            api,
            data: AsyncData::hydrated(SITE_SETTINGS_KEY, Arc::new(normalized(settings))),
        }
    }

    fn fetcher(&self) -> impl FnOnce() -> BoxFuture<'static, Result<Arc<SiteSettings>, ClientError>> {
        let api = self.api.clone();
        move || {
            Box::pin(async move {
                let settings = api.site_settings().await?;
                Ok(Arc::new(normalized(settings)))
            })
        }
    }

    /// Settings for this session, fetched on first use
    pub async fn load(&self) -> Arc<SiteSettings> {
        match self.data.load(self.fetcher()).await {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch site settings, using defaults");
                Arc::new(SiteSettings::default())
            }
        }
    }

    pub async fn refresh(&self) -> Arc<SiteSettings> {
        self.data
            .refresh(self.fetcher())
            .await
            .unwrap_or_default()
    }

    /// Current settings without fetching; defaults until loaded
    pub fn current(&self) -> Arc<SiteSettings> {
        self.data.get().unwrap_or_default()
    }

    pub fn view(&self) -> SettingsView {
        SettingsView::from(self.current().as_ref())
    }

    pub fn pending(&self) -> bool {
        self.data.pending()
    }

    pub fn error(&self) -> Option<ClientError> {
        self.data.error()
    }

    pub fn subscribe(&self) -> watch::Receiver<DataState<Arc<SiteSettings>>> {
        self.data.subscribe()
    }
}

/// Every derived field presentation code reads, with fallbacks applied
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub title: String,
    pub contact_info: Vec<ContactInfo>,
    pub opening_times: Vec<Value>,
    pub facebook_url: String,
    pub linkedin_url: String,
    pub instagram_url: String,
    pub preloader_images: Vec<PreloaderImage>,
    pub logotype: Option<ImageSource>,
    pub booking_title: String,
    pub booking_link: String,
    pub favicon_url: String,
    pub favicon_png_url: String,
    pub favicon_dark_png_url: String,
    pub apple_touch_icon_url: String,
    pub android_icon_url: String,
    pub disable_preloader: bool,
    pub disable_page_transition: bool,
    pub main_navigation_menu: Option<Menu>,
    pub footer_menus_left: Vec<Menu>,
    pub footer_menus_right: Vec<Menu>,
    pub newsletter_action_url: String,
    pub newsletter_title_footer: String,
    pub newsletter_title_hero: String,
    pub newsletter_placeholder: String,
    pub cookies_message: Vec<Value>,
    pub google_analytics_id: String,
}

impl From<&SiteSettings> for SettingsView {
    fn from(s: &SiteSettings) -> Self {
        Self {
            title: s.title().to_string(),
            contact_info: s.contact_info.clone(),
            opening_times: s.opening_times.clone(),
            facebook_url: s.facebook_url().to_string(),
            linkedin_url: s.linkedin_url().to_string(),
            instagram_url: s.instagram_url().to_string(),
            preloader_images: s.preloader_images.clone(),
            logotype: s.logotype.clone(),
            booking_title: s.booking_title().to_string(),
            booking_link: s.booking_link().to_string(),
            favicon_url: s.favicon_url().to_string(),
            favicon_png_url: s.favicon_png_url().to_string(),
            favicon_dark_png_url: s.favicon_dark_png_url().to_string(),
            apple_touch_icon_url: s.apple_touch_icon_url().to_string(),
            android_icon_url: s.android_icon_url().to_string(),
            disable_preloader: s.preloader_disabled(),
            disable_page_transition: s.page_transition_disabled(),
            main_navigation_menu: s.main_navigation_menu.clone(),
            footer_menus_left: s.footer_menus_left.clone(),
            footer_menus_right: s.footer_menus_right.clone(),
            newsletter_action_url: s.newsletter_action_url().to_string(),
            newsletter_title_footer: s.newsletter_title_footer().to_string(),
            newsletter_title_hero: s.newsletter_title_hero().to_string(),
            newsletter_placeholder: s.newsletter_placeholder().to_string(),
            cookies_message: s.cookies_message.clone(),
            google_analytics_id: s.google_analytics_id().to_string(),
        }
    }
}
