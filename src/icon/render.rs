use super::IconColors;
use crate::config::constants::ICON_SIZE;
use crate::error::{IndicatorError, Result};
use ab_glyph::{point, Font, FontRef, PxScale, Rect, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut};

// Bold sans digits, embedded so icons look the same on every host
const DIGIT_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Font size, in pixels per em, for single-digit days.
pub const LARGE_FONT_PX: f32 = 18.0;
/// Font size, in pixels per em, for two-digit days.
pub const SMALL_FONT_PX: f32 = 14.0;

/// Font size used for `day`: larger for one digit so both widths fit the circle.
pub fn font_px_for_day(day: u32) -> f32 {
    if day < 10 {
        LARGE_FONT_PX
    } else {
        SMALL_FONT_PX
    }
}

fn digit_font() -> Result<FontRef<'static>> {
    FontRef::try_from_slice(DIGIT_FONT)
        .map_err(|e| IndicatorError::Render(format!("Invalid embedded font: {e}")))
}

// PxScale is relative to the font's line height, not its em square
fn em_scale(font: &FontRef<'_>, px_per_em: f32) -> Result<PxScale> {
    let units_per_em = font
        .units_per_em()
        .ok_or_else(|| IndicatorError::Render("Font has no units per em".to_string()))?;
    Ok(PxScale::from(
        px_per_em * font.height_unscaled() / units_per_em,
    ))
}

/// Pixel bounds of the inked area of `text`, laid out the way
/// `draw_text_mut` lays it out when drawn at (0, 0).
fn ink_bounds(font: &FontRef<'_>, scale: PxScale, text: &str) -> Option<Rect> {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0;
    let mut last = None;
    let mut bounds: Option<Rect> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);

        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue;
        };
        if let Some(last) = last {
            caret += scaled.kern(id, last);
        }
        last = Some(id);

        let bb = outlined.px_bounds();
        bounds = Some(match bounds {
            None => bb,
            Some(b) => Rect {
                min: point(b.min.x.min(bb.min.x), b.min.y.min(bb.min.y)),
                max: point(b.max.x.max(bb.max.x), b.max.y.max(bb.max.y)),
            },
        });
    }

    bounds
}

/// Draws the tray icon: a filled circle with the day-of-month on top.
#[derive(Debug, Clone)]
pub struct IconRenderer {
    size: u32,
    colors: IconColors,
}

impl Default for IconRenderer {
    fn default() -> Self {
        Self::new(IconColors::default())
    }
}

impl IconRenderer {
    pub fn new(colors: IconColors) -> Self {
        Self {
            size: ICON_SIZE,
            colors,
        }
    }

    pub fn colors(&self) -> &IconColors {
        &self.colors
    }

    /// Circle without digits, used where no day icon can be shown.
    pub fn render_placeholder(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.size, self.size);
        self.draw_background(&mut image);
        image
    }

    pub fn render_day(&self, day: u32) -> Result<RgbaImage> {
        if !(1..=31).contains(&day) {
            return Err(IndicatorError::Render(format!(
                "Day of month out of range: {day}"
            )));
        }
        if self.colors.background == self.colors.foreground {
            return Err(IndicatorError::Render(
                "Foreground and background colors are identical".to_string(),
            ));
        }

        let font = digit_font()?;
        let text = day.to_string();
        let scale = em_scale(&font, font_px_for_day(day))?;
        let bounds = ink_bounds(&font, scale, &text)
            .ok_or_else(|| IndicatorError::Render(format!("No glyphs for {text:?}")))?;

        // Center the inked box, not the advance box
        let size = self.size as f32;
        let x = ((size - bounds.width()) / 2.0 - bounds.min.x).round() as i32;
        let y = ((size - bounds.height()) / 2.0 - bounds.min.y).round() as i32;

        let mut image = self.render_placeholder();
        draw_text_mut(
            &mut image,
            Rgba(self.colors.foreground_rgba()),
            x,
            y,
            scale,
            &font,
            &text,
        );

        Ok(image)
    }

    fn draw_background(&self, image: &mut RgbaImage) {
        let center = (self.size / 2) as i32;
        let radius = (self.size / 2) as i32 - 2;
        draw_filled_circle_mut(
            image,
            (center, center),
            radius,
            Rgba(self.colors.background_rgba()),
        );
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;
