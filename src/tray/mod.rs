// Platform-specific tray implementations
// Linux uses ksni (StatusNotifierItem via D-Bus, no GTK event loop required)
// macOS/Windows use tray-icon (requires winit event loop)

#[cfg(not(target_os = "linux"))]
pub mod menu;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::{DateTray, SystemTray};

#[cfg(not(target_os = "linux"))]
mod tray_icon_impl;

#[cfg(not(target_os = "linux"))]
pub use tray_icon_impl::SystemTray;

/// Convert RGBA pixels to ARGB32 in network byte order, the layout
/// StatusNotifierItem pixmaps use.
pub fn rgba_to_argb(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| [px[3], px[0], px[1], px[2]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_to_argb() {
        let rgba = [1, 2, 3, 4, 10, 20, 30, 40];
        assert_eq!(rgba_to_argb(&rgba), vec![4, 1, 2, 3, 40, 10, 20, 30]);
    }

    #[test]
    fn test_rgba_to_argb_ignores_partial_pixel() {
        assert_eq!(rgba_to_argb(&[1, 2, 3]), Vec::<u8>::new());
    }
}
