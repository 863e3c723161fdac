//! Post-deserialization fixups applied before records leave the server
//! and again when the client hooks receive them.
//!
//! List coercion already happens while decoding (see [`crate::lists`]);
//! what is left is anchor synthesis for section links. Normalizing twice
//! gives the same result as normalizing once.

use crate::model::{LinkTarget, Menu, SiteSettings};
use crate::slug::anchor_id;

pub trait Normalize {
    fn normalize(&mut self);
}

impl<T: Normalize> Normalize for Option<T> {
    fn normalize(&mut self) {
        if let Some(inner) = self {
            inner.normalize();
        }
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(&mut self) {
        for item in self.iter_mut() {
            item.normalize();
        }
    }
}

impl Normalize for LinkTarget {
    /// Fill in `anchor` from the section title when the editor left it blank
    fn normalize(&mut self) {
        if self.anchor().is_some() {
            return;
        }
        if let Some(section) = &self.section {
            if let Some(anchor) = anchor_id(section.title.as_deref()) {
                self.anchor = Some(anchor);
            }
        }
    }
}

impl Normalize for Menu {
    fn normalize(&mut self) {
        for item in &mut self.items {
            item.to.normalize();
        }
    }
}

impl Normalize for SiteSettings {
    fn normalize(&mut self) {
        self.main_navigation_menu.normalize();
        self.footer_menus_left.normalize();
        self.footer_menus_right.normalize();
    }
}

/// Consume, normalize, return
pub fn normalized<T: Normalize>(mut value: T) -> T {
    value.normalize();
    value
}
