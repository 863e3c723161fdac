//! Menu hook.
//!
//! The main menu is the one selected in site settings when it has items,
//! otherwise the menu titled "Main Menu". The footer menu is looked up by
//! title. [`MenuHook::watch`] re-resolves the main menu whenever the
//! settings switch to a different menu.

use std::sync::{Arc, Weak};

use futures::future::BoxFuture;
use serde::Serialize;
use sitectl_core::{normalized, Menu, SiteSettings};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::SiteApi;
use crate::data::{AsyncData, DataState};
use crate::error::ClientError;
use crate::settings::SiteSettingsHook;

pub const MAIN_MENU_TITLE: &str = "Main Menu";
pub const FOOTER_MENU_TITLE: &str = "Footer";

const MAIN_MENU_KEY: &str = "mainMenu";
const FOOTER_MENU_KEY: &str = "footerMenu";

type MenuFetch = BoxFuture<'static, Result<Option<Menu>, ClientError>>;

/// Both menus as resolved for this session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Menus {
    pub main_menu: Option<Menu>,
    pub footer_menu: Option<Menu>,
}

pub struct MenuHook {
    api: Arc<dyn SiteApi>,
    settings: Arc<SiteSettingsHook>,
    main: AsyncData<Option<Menu>>,
    footer: AsyncData<Option<Menu>>,
}

fn by_title(api: Arc<dyn SiteApi>, title: &'static str) -> impl FnOnce() -> MenuFetch {
    move || {
        Box::pin(async move {
            let menu = api.menu_by_title(title).await?;
            Ok(normalized(menu))
        })
    }
}

fn main_menu_fetch(api: Arc<dyn SiteApi>, settings: Arc<SiteSettings>) -> impl FnOnce() -> MenuFetch {
    move || {
        Box::pin(async move {
            if let Some(menu) = settings.selected_main_menu() {
                tracing::debug!(menu = ?menu.title, "main menu taken from site settings");
                return Ok(Some(normalized(menu.clone())));
            }
            let menu = api.menu_by_title(MAIN_MENU_TITLE).await?;
            Ok(normalized(menu))
        })
    }
}

impl MenuHook {
    pub fn new(api: Arc<dyn SiteApi>, settings: Arc<SiteSettingsHook>) -> Self {
        Self {
            api,
            settings,
            main: AsyncData::new(MAIN_MENU_KEY),
            footer: AsyncData::new(FOOTER_MENU_KEY),
        }
    }

    /// Resolve both menus. Errors reach the caller only here, on first load;
    /// they are also kept in the error slots.
    pub async fn load(&self) -> Result<Menus, ClientError> {
        let settings = self.settings.load().await;
        let (main, footer) = tokio::join!(
            self.main
                .load(main_menu_fetch(self.api.clone(), settings)),
            self.footer
                .load(by_title(self.api.clone(), FOOTER_MENU_TITLE)),
        );

        let main = main.inspect_err(|e| tracing::error!(error = %e, "error fetching main menu"))?;
        let footer =
            footer.inspect_err(|e| tracing::error!(error = %e, "error fetching footer menu"))?;
        Ok(Menus {
            main_menu: main,
            footer_menu: footer,
        })
    }

    /// Fetch both menus again; failures only land in the error slots
    pub async fn refresh(&self) -> Menus {
        let (main, footer) = tokio::join!(self.refresh_main(), self.refresh_footer());
        Menus {
            main_menu: main,
            footer_menu: footer,
        }
    }

    async fn refresh_main(&self) -> Option<Menu> {
        let settings = self.settings.current();
        self.main
            .refresh(main_menu_fetch(self.api.clone(), settings))
            .await
            .flatten()
    }

    /// Resolve the main menu from the current settings, superseding any
    /// fetch still running against the previous selection
    async fn reselect_main(&self) -> Option<Menu> {
        let settings = self.settings.current();
        self.main
            .restart(main_menu_fetch(self.api.clone(), settings))
            .await
            .flatten()
    }

    async fn refresh_footer(&self) -> Option<Menu> {
        self.footer
            .refresh(by_title(self.api.clone(), FOOTER_MENU_TITLE))
            .await
            .flatten()
    }

    /// Follow the settings and re-resolve the main menu when the selected
    /// menu changes. The task ends once the hook is dropped.
    pub fn watch(self: &Arc<Self>) -> JoinHandle<()> {
        let mut rx = self.settings.subscribe();
        let hook: Weak<Self> = Arc::downgrade(self);
        let mut selected = selected_id(&rx.borrow_and_update());

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let current = selected_id(&rx.borrow_and_update());
                if current == selected {
                    continue;
                }
                tracing::info!(from = ?selected, to = ?current, "main menu selection changed");
                selected = current;

                let Some(hook) = hook.upgrade() else { break };
                hook.reselect_main().await;
            }
        })
    }

    pub fn main_menu(&self) -> Option<Menu> {
        self.main.get().flatten()
    }

    pub fn footer_menu(&self) -> Option<Menu> {
        self.footer.get().flatten()
    }

    pub fn main_menu_pending(&self) -> bool {
        self.main.pending()
    }

    pub fn footer_menu_pending(&self) -> bool {
        self.footer.pending()
    }

    pub fn main_menu_error(&self) -> Option<ClientError> {
        self.main.error()
    }

    pub fn footer_menu_error(&self) -> Option<ClientError> {
        self.footer.error()
    }

    pub fn subscribe_main(&self) -> watch::Receiver<DataState<Option<Menu>>> {
        self.main.subscribe()
    }
}

fn selected_id(state: &DataState<Arc<SiteSettings>>) -> Option<String> {
    state
        .data
        .as_ref()
        .and_then(|settings| settings.selected_main_menu_id())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::tests::StubApi;
    use serde_json::json;
    use std::time::Duration;

    fn hook(api: Arc<StubApi>) -> Arc<MenuHook> {
        let settings = Arc::new(SiteSettingsHook::new(api.clone()));
        Arc::new(MenuHook::new(api, settings))
    }

    #[tokio::test]
    async fn main_menu_from_settings() {
        let api = StubApi::with_settings(json!({
            "mainNavigationMenu": {
                "_id": "menu-a",
                "title": "Spa Menu",
                "items": [{ "text": "Story", "to": { "section": { "title": "Our Story" } } }]
            }
        }));
        api.add_menu(json!({ "title": "Footer", "items": null }));
        let menus = hook(api.clone()).load().await.unwrap();

        let main = menus.main_menu.unwrap();
        assert_eq!(main.title.as_deref(), Some("Spa Menu"));
        assert_eq!(main.items[0].to.as_ref().unwrap().anchor(), Some("our-story"));
        assert!(menus.footer_menu.unwrap().items.is_empty());
        assert_eq!(*api.menu_calls.lock().unwrap(), vec!["Footer".to_string()]);
    }

    #[tokio::test]
    async fn empty_selected_menu_falls_back_to_title() {
        let api = StubApi::with_settings(json!({
            "mainNavigationMenu": { "_id": "menu-a", "title": "Spa Menu", "items": null }
        }));
        api.add_menu(json!({
            "title": "Main Menu",
            "items": { "text": "Home", "to": { "page": { "slug": { "current": "home" } } } }
        }));
        let menus = hook(api.clone()).load().await.unwrap();

        let main = menus.main_menu.unwrap();
        assert_eq!(main.title.as_deref(), Some("Main Menu"));
        assert_eq!(main.items.len(), 1);
        assert!(api.menu_calls.lock().unwrap().contains(&"Main Menu".to_string()));
    }

    #[tokio::test]
    async fn missing_menus_are_none() {
        let api = StubApi::with_settings(json!({}));
        let menus = hook(api).load().await.unwrap();
        assert_eq!(menus, Menus::default());
    }

    #[tokio::test]
    async fn settings_failure_still_resolves_by_title() {
        let api = Arc::new(StubApi::default());
        api.fail_settings();
        api.add_menu(json!({ "title": "Main Menu", "items": [] }));
        let menus = hook(api).load().await.unwrap();
        assert_eq!(menus.main_menu.unwrap().title.as_deref(), Some("Main Menu"));
    }

    #[tokio::test]
    async fn main_menu_follows_settings_selection() {
        let api = StubApi::with_settings(json!({
            "mainNavigationMenu": { "_id": "menu-a", "title": "A", "items": [{ "text": "one" }] }
        }));
        let settings = Arc::new(SiteSettingsHook::new(api.clone()));
        let menus = Arc::new(MenuHook::new(api.clone(), settings.clone()));

        menus.load().await.unwrap();
        assert_eq!(menus.main_menu().unwrap().title.as_deref(), Some("A"));

        let mut rx = menus.subscribe_main();
        let watcher = menus.watch();

        api.set_settings(json!({
            "mainNavigationMenu": { "_id": "menu-b", "title": "B", "items": [{ "text": "two" }] }
        }));
        settings.refresh().await;

        tokio::time::timeout(
            Duration::from_secs(5),
            rx.wait_for(|state| {
                state
                    .data
                    .as_ref()
                    .and_then(|menu| menu.as_ref())
                    .and_then(|menu| menu.title.as_deref())
                    == Some("B")
            }),
        )
        .await
        .unwrap()
        .unwrap();

        watcher.abort();
    }

    #[tokio::test]
    async fn reselection_ignores_fetch_for_old_settings() {
        let api = Arc::new(StubApi::default());
        api.add_menu(json!({ "title": "Main Menu", "items": [{ "text": "by title" }] }));
        let settings = Arc::new(SiteSettingsHook::new(api.clone()));
        let menus = Arc::new(MenuHook::new(api.clone(), settings.clone()));

        // a main menu fetch built from the empty settings is still running
        let (release, gate) = tokio::sync::oneshot::channel::<()>();
        let stale_api = api.clone();
        let stale = tokio::spawn({
            let menus = menus.clone();
            async move {
                menus
                    .main
                    .refresh(move || -> MenuFetch {
                        Box::pin(async move {
                            let _ = gate.await;
                            Ok(normalized(stale_api.menu_by_title(MAIN_MENU_TITLE).await?))
                        })
                    })
                    .await
            }
        });
        while !menus.main_menu_pending() {
            tokio::task::yield_now().await;
        }

        api.set_settings(json!({
            "mainNavigationMenu": { "_id": "menu-b", "title": "B", "items": [{ "text": "two" }] }
        }));
        settings.refresh().await;
        let main = menus.reselect_main().await.unwrap();
        assert_eq!(main.title.as_deref(), Some("B"));

        release.send(()).unwrap();
        stale.await.unwrap();
        assert_eq!(menus.main_menu().unwrap().title.as_deref(), Some("B"));
    }
}
