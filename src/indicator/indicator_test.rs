use super::{date_labels, Indicator, Tick};
use crate::calendar::{FixedClock, Locale};
use crate::config::constants::DEFAULT_ICON_NAME;
use crate::config::Settings;
use crate::icon::{render, IconColors, IconRenderer, IconStyle, TrayIconImage};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn settings() -> Settings {
    Settings {
        locale: Locale::English,
        ..Default::default()
    }
}

fn rendered_day(indicator: &Indicator<FixedClock>) -> u32 {
    match &indicator.state().icon {
        TrayIconImage::Rendered(icon) => icon.day,
        other => panic!("expected a rendered icon, got {other:?}"),
    }
}

#[test]
fn test_startup_on_day_five() {
    // 5 Mehr 1405
    let clock = FixedClock::new(date(2026, 9, 27));
    let indicator = Indicator::new(&settings(), clock);
    let state = indicator.state();

    assert_eq!(state.label, "Yekshanbeh, 05 Mehr 1405");
    assert_eq!(state.gregorian.as_deref(), Some("Gregorian: 2026-09-27"));
    assert_eq!(rendered_day(&indicator), 5);

    let TrayIconImage::Rendered(icon) = &state.icon else {
        unreachable!()
    };
    assert!(icon.path.exists());
    assert_eq!(icon.image, IconRenderer::default().render_day(5).unwrap());
    assert_eq!(render::font_px_for_day(icon.day), render::LARGE_FONT_PX);
}

#[test]
fn test_tick_with_unchanged_day_keeps_icon() {
    let clock = FixedClock::new(date(2026, 9, 27));
    let mut indicator = Indicator::new(&settings(), clock);
    let before = indicator.state().clone();

    let outcome = indicator.refresh();

    assert!(!outcome.changed());
    assert_eq!(indicator.state(), &before);
    assert!(!indicator.tick(Tick::Check));
}

#[test]
fn test_rollover_from_nine_to_ten_regenerates_icon() {
    // 9 Mehr 1405
    let clock = FixedClock::new(date(2026, 10, 1));
    let mut indicator = Indicator::new(&settings(), clock.clone());
    assert_eq!(rendered_day(&indicator), 9);
    let old_path = match &indicator.state().icon {
        TrayIconImage::Rendered(icon) => icon.path.clone(),
        _ => unreachable!(),
    };

    clock.set(date(2026, 10, 2));
    let outcome = indicator.refresh();

    assert!(outcome.label_changed);
    assert!(outcome.icon_changed);
    assert_eq!(rendered_day(&indicator), 10);
    assert_eq!(indicator.state().label, "Jomeh, 10 Mehr 1405");
    assert_eq!(render::font_px_for_day(10), render::SMALL_FONT_PX);
    assert!(!old_path.exists(), "stale icon should be pruned");
}

#[test]
fn test_force_tick_requests_update_without_changes() {
    let clock = FixedClock::new(date(2026, 9, 27));
    let mut indicator = Indicator::new(&settings(), clock);

    assert!(indicator.tick(Tick::Force));
    assert!(!indicator.tick(Tick::Check));
}

#[test]
fn test_static_style_never_renders() {
    let settings = Settings {
        icon_style: IconStyle::Static,
        ..settings()
    };
    let clock = FixedClock::new(date(2026, 10, 1));
    let mut indicator = Indicator::new(&settings, clock.clone());

    assert_eq!(indicator.state().icon, TrayIconImage::Themed(DEFAULT_ICON_NAME));
    assert!(indicator.icon_dir().is_none());

    clock.set(date(2026, 10, 2));
    let outcome = indicator.refresh();

    assert!(outcome.label_changed);
    assert!(!outcome.icon_changed);
}

#[test]
fn test_render_failure_falls_back_to_default_icon() {
    let settings = Settings {
        colors: IconColors {
            background: [0, 0, 0],
            foreground: [0, 0, 0],
        },
        ..settings()
    };
    let clock = FixedClock::new(date(2026, 9, 27));
    let mut indicator = Indicator::new(&settings, clock);

    assert_eq!(indicator.state().icon, TrayIconImage::Themed(DEFAULT_ICON_NAME));
    assert_eq!(indicator.state().label, "Yekshanbeh, 05 Mehr 1405");

    // Regeneration is retried but yields the same fallback
    let outcome = indicator.refresh();
    assert!(!outcome.icon_changed);
}

#[test]
fn test_gregorian_line_can_be_hidden() {
    let settings = Settings {
        show_gregorian: false,
        ..settings()
    };
    let indicator = Indicator::new(&settings, FixedClock::new(date(2026, 9, 27)));

    assert!(indicator.state().gregorian.is_none());
}

#[test]
fn test_close_removes_icon_directory() {
    let indicator = Indicator::new(&settings(), FixedClock::new(date(2026, 9, 27)));
    let dir = indicator.icon_dir().unwrap().to_path_buf();
    assert!(dir.exists());

    indicator.close().unwrap();

    assert!(!dir.exists());
}

#[test]
fn test_date_labels_use_custom_format() {
    let settings = Settings {
        date_format: "%Y/%m/%d".to_string(),
        show_gregorian: false,
        ..settings()
    };

    let labels = date_labels(&settings, date(2024, 3, 20)).unwrap();

    assert_eq!(labels.label, "1403/01/01");
    assert_eq!(labels.gregorian, None);
    assert_eq!(labels.date.day(), 1);
}
