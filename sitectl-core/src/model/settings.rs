//! Site-wide settings singleton

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Extra, ImageSource, Menu};
use crate::lists::one_or_many;

pub const DEFAULT_SITE_TITLE: &str = "Coughton Court";
pub const DEFAULT_BOOKING_TITLE: &str = "Book Your Appointment Now";
pub const DEFAULT_NEWSLETTER_PLACEHOLDER: &str = "Enter your email";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub contact_info: Vec<ContactInfo>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub opening_times: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub preloader_images: Vec<PreloaderImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logotype: Option<ImageSource>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub footer_logos: Vec<ImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<Favicon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_preloader: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_page_transition: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_navigation_menu: Option<Menu>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub footer_menus_left: Vec<Menu>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub footer_menus_right: Vec<Menu>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter_action_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter_title_footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter_title_hero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter_placeholder: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub cookies_message: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Square image shown before the site finishes loading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreloaderImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_left_right: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favicon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<ImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon_png: Option<ImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon_dark_png: Option<ImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_touch_icon: Option<ImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_icon: Option<ImageSource>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn text_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().filter(|s| !s.is_empty()).unwrap_or(fallback)
}

fn icon_url(icon: &Option<ImageSource>) -> &str {
    icon.as_ref()
        .and_then(ImageSource::resolved_url)
        .unwrap_or("")
}

// Read-only views with the fallbacks presentation code relies on. Empty
// strings count as unset.
impl SiteSettings {
    pub fn title(&self) -> &str {
        text_or(&self.title, DEFAULT_SITE_TITLE)
    }

    pub fn facebook_url(&self) -> &str {
        text_or(&self.facebook_url, "")
    }

    pub fn linkedin_url(&self) -> &str {
        text_or(&self.linkedin_url, "")
    }

    pub fn instagram_url(&self) -> &str {
        text_or(&self.instagram_url, "")
    }

    pub fn booking_title(&self) -> &str {
        text_or(&self.booking_title, DEFAULT_BOOKING_TITLE)
    }

    pub fn booking_link(&self) -> &str {
        text_or(&self.booking_link, "")
    }

    pub fn favicon_url(&self) -> &str {
        self.favicon.as_ref().map_or("", |f| icon_url(&f.favicon))
    }

    pub fn favicon_png_url(&self) -> &str {
        self.favicon.as_ref().map_or("", |f| icon_url(&f.favicon_png))
    }

    pub fn favicon_dark_png_url(&self) -> &str {
        self.favicon.as_ref().map_or("", |f| icon_url(&f.favicon_dark_png))
    }

    pub fn apple_touch_icon_url(&self) -> &str {
        self.favicon.as_ref().map_or("", |f| icon_url(&f.apple_touch_icon))
    }

    pub fn android_icon_url(&self) -> &str {
        self.favicon.as_ref().map_or("", |f| icon_url(&f.android_icon))
    }

    pub fn preloader_disabled(&self) -> bool {
        self.disable_preloader == Some(true)
    }

    pub fn page_transition_disabled(&self) -> bool {
        self.disable_page_transition == Some(true)
    }

    pub fn newsletter_action_url(&self) -> &str {
        text_or(&self.newsletter_action_url, "")
    }

    pub fn newsletter_title_footer(&self) -> &str {
        text_or(&self.newsletter_title_footer, "")
    }

    pub fn newsletter_title_hero(&self) -> &str {
        text_or(&self.newsletter_title_hero, "")
    }

    pub fn newsletter_placeholder(&self) -> &str {
        text_or(&self.newsletter_placeholder, DEFAULT_NEWSLETTER_PLACEHOLDER)
    }

    pub fn google_analytics_id(&self) -> &str {
        text_or(&self.google_analytics_id, "")
    }

    /// Main navigation menu chosen in settings, if it has any items
    pub fn selected_main_menu(&self) -> Option<&Menu> {
        self.main_navigation_menu.as_ref().filter(|menu| !menu.is_empty())
    }

    /// Identity of the selected main menu, used to notice a switch
    pub fn selected_main_menu_id(&self) -> Option<&str> {
        self.main_navigation_menu
            .as_ref()
            .and_then(|menu| menu.id.as_deref().or(menu.title.as_deref()))
    }
}
