use crate::indicator::{menu_entries, IndicatorState, MenuEntry};
use log::warn;
use tray_icon::menu::{IsMenuItem, Menu, MenuId, MenuItem, PredefinedMenuItem};

/// The dropdown menu for tray-icon backends.
///
/// Items that fail to append are left out; the rest of the menu still works.
pub struct DateMenu {
    pub menu: Menu,
    // One slot per label entry, in menu order
    labels: Vec<Option<MenuItem>>,
    quit: Option<MenuItem>,
}

impl DateMenu {
    pub fn new(state: &IndicatorState) -> Self {
        let menu = Menu::new();
        let mut labels = Vec::new();
        let mut quit = None;

        for entry in menu_entries(state) {
            match entry {
                MenuEntry::Label(text) => {
                    let item = MenuItem::new(text, false, None);
                    labels.push(append(&menu, &item).then_some(item));
                }
                MenuEntry::Separator => {
                    append(&menu, &PredefinedMenuItem::separator());
                }
                MenuEntry::Quit(text) => {
                    let item = MenuItem::new(text, true, None);
                    if append(&menu, &item) {
                        quit = Some(item);
                    }
                }
            }
        }

        Self { menu, labels, quit }
    }

    /// Refresh label text in place.
    pub fn update(&self, state: &IndicatorState) {
        let texts = menu_entries(state).into_iter().filter_map(|entry| match entry {
            MenuEntry::Label(text) => Some(text),
            _ => None,
        });

        for (slot, text) in self.labels.iter().zip(texts) {
            if let Some(item) = slot {
                item.set_text(text);
            }
        }
    }

    pub fn is_quit(&self, id: &MenuId) -> bool {
        self.quit.as_ref().is_some_and(|item| item.id() == id)
    }
}

fn append(menu: &Menu, item: &dyn IsMenuItem) -> bool {
    match menu.append(item) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to add menu item, leaving it out: {}", e);
            false
        }
    }
}
