//! A browsing session: one settings hook, one menu hook, one cache.

use std::sync::Arc;

use sitectl_core::SiteSettings;
use tokio::task::JoinHandle;

use crate::api::{ApiClient, SiteApi};
use crate::error::ClientError;
use crate::menu::{MenuHook, Menus};
use crate::settings::SiteSettingsHook;

pub struct Session {
    settings: Arc<SiteSettingsHook>,
    menus: Arc<MenuHook>,
    watcher: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(api: Arc<dyn SiteApi>) -> Self {
        Self::with_settings_hook(api.clone(), SiteSettingsHook::new(api))
    }

    /// Session seeded with server-rendered settings
    pub fn hydrated(api: Arc<dyn SiteApi>, settings: SiteSettings) -> Self {
        Self::with_settings_hook(api.clone(), SiteSettingsHook::hydrated(api, settings))
    }

    /// Session against a running site, e.g. `http://localhost:3000`
    pub fn connect(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self::new(Arc::new(ApiClient::new(base_url)?)))
    }

    fn with_settings_hook(api: Arc<dyn SiteApi>, settings: SiteSettingsHook) -> Self {
        let settings = Arc::new(settings);
        let menus = Arc::new(MenuHook::new(api, settings.clone()));
        Self {
            settings,
            menus,
            watcher: None,
        }
    }

    pub fn settings(&self) -> &SiteSettingsHook {
        &self.settings
    }

    pub fn menus(&self) -> &Arc<MenuHook> {
        &self.menus
    }

    /// Load settings and menus, then keep the main menu in step with the
    /// settings for the rest of the session.
    pub async fn start(&mut self) -> Result<Menus, ClientError> {
        self.settings.load().await;
        let menus = self.menus.load().await?;
        if self.watcher.is_none() {
            self.watcher = Some(self.menus.watch());
        }
        Ok(menus)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::tests::StubApi;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn start_loads_everything_once() {
        let api = StubApi::with_settings(json!({
            "title": "Spa",
            "mainNavigationMenu": { "_id": "m", "title": "Spa Menu", "items": [{ "text": "Home" }] }
        }));
        let mut session = Session::new(api.clone());

        let menus = session.start().await.unwrap();
        assert_eq!(menus.main_menu.unwrap().title.as_deref(), Some("Spa Menu"));
        assert_eq!(session.settings().view().title, "Spa");

        session.start().await.unwrap();
        assert_eq!(api.settings_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn hydrated_session_skips_settings_fetch() {
        let api = StubApi::with_settings(json!({}));
        let settings: SiteSettings = serde_json::from_value(json!({ "title": "Rendered" })).unwrap();
        let mut session = Session::hydrated(api.clone(), settings);

        session.start().await.unwrap();
        assert_eq!(session.settings().current().title(), "Rendered");
        assert_eq!(api.settings_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn connect_rejects_bad_url() {
        assert!(Session::connect("::not-a-url").is_err());
    }
}
