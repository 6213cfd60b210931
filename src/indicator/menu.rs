use super::IndicatorState;
use crate::calendar::Locale;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Non-interactive text
    Label(String),
    Separator,
    Quit(String),
}

pub fn quit_label(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Quit",
        Locale::Persian => "خروج",
    }
}

/// Dropdown layout: date, optional Gregorian date, quit.
pub fn menu_entries(state: &IndicatorState) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry::Label(state.label.clone()), MenuEntry::Separator];

    if let Some(gregorian) = &state.gregorian {
        entries.push(MenuEntry::Label(gregorian.clone()));
        entries.push(MenuEntry::Separator);
    }

    entries.push(MenuEntry::Quit(quit_label(state.locale).to_string()));
    entries
}
