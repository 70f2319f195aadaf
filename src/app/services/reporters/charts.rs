//! PNG chart rendering
//!
//! Two fixed-layout charts are produced from a summary:
//! - a pie chart of valid vs invalid rows
//! - a bar chart with one bar per rule, in registration order
//!
//! Titles and labels need a TrueType font. When none can be found the
//! charts are still drawn, just without text.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use swash::FontRef;
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::shape::ShapeContext;
use swash::zeno::{Format, Vector};
use tracing::{debug, info, warn};

use crate::app::services::summary::ValidationSummary;
use crate::config::ChartConfig;
use crate::constants::{FONT_SEARCH_PATHS, chart};
use crate::{Error, Result};

/// Result of a chart stage that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    /// The chart was written to this path
    Written(PathBuf),
    /// Nothing to draw; no file was produced
    Skipped { reason: String },
}

/// Slice angles in whole degrees as (valid, invalid)
///
/// The valid slice is truncated to whole degrees and the invalid slice takes
/// the remainder of the circle. `None` when there is nothing to draw.
pub fn slice_angles(valid: usize, invalid: usize) -> Option<(u32, u32)> {
    let total = valid + invalid;
    if total == 0 {
        return None;
    }
    let valid_angle = (360.0 * valid as f64 / total as f64) as u32;
    Some((valid_angle, 360 - valid_angle))
}

/// Bar heights in pixels, one per rule in registration order
///
/// Each bar is `value / (max + 1)` of the full chart height, truncated, so
/// even the largest bar stays below the full height.
pub fn bar_heights(summary: &ValidationSummary) -> Vec<u32> {
    let divisor = summary.max_rule_errors() + 1;
    let full = chart::BAR_MAX_HEIGHT as usize;
    summary
        .rule_errors
        .iter()
        .map(|entry| (entry.count * full / divisor) as u32)
        .collect()
}

fn rgba([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Check that `data` holds a font swash can read
fn is_usable_font(data: &[u8]) -> bool {
    FontRef::from_index(data, 0).is_some()
}

/// Find a font: the configured one, else the first well-known system font
fn load_font(config: &ChartConfig) -> Result<Option<Vec<u8>>> {
    if let Some(path) = &config.font_path {
        let data = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read font {}", path.display()), e))?;
        if !is_usable_font(&data) {
            return Err(Error::configuration(format!(
                "Invalid font file {}",
                path.display()
            )));
        }
        debug!("Using chart font {}", path.display());
        return Ok(Some(data));
    }

    for candidate in FONT_SEARCH_PATHS {
        let Ok(data) = std::fs::read(candidate) else {
            continue;
        };
        if is_usable_font(&data) {
            debug!("Using chart font {}", candidate);
            return Ok(Some(data));
        }
    }

    warn!("No usable font found; charts will be rendered without titles or labels");
    Ok(None)
}

/// Shaping and rasterizing state for the text of one chart
struct TextPainter<'a> {
    font: FontRef<'a>,
    shape_context: ShapeContext,
    scale_context: ScaleContext,
}

impl<'a> TextPainter<'a> {
    fn new(font_data: &'a [u8]) -> Option<Self> {
        Some(Self {
            font: FontRef::from_index(font_data, 0)?,
            shape_context: ShapeContext::new(),
            scale_context: ScaleContext::new(),
        })
    }

    /// Draw `text` starting at `x` with its baseline at `baseline`
    fn draw(&mut self, image: &mut RgbaImage, text: &str, x: i32, baseline: i32, size: f32) {
        let color = rgba(chart::TEXT);
        let mut shaper = self.shape_context.builder(self.font).size(size).build();
        shaper.add_str(text);
        let mut scaler = self.scale_context.builder(self.font).size(size).build();

        let mut pen_x = x as f32;
        shaper.shape_with(|cluster| {
            for glyph in cluster.glyphs {
                let rendered = Render::new(&[
                    Source::ColorOutline(0),
                    Source::ColorBitmap(StrikeWith::BestFit),
                    Source::Outline,
                ])
                .format(Format::Alpha)
                .offset(Vector::new(glyph.x, glyph.y))
                .render(&mut scaler, glyph.id);

                if let Some(glyph_image) = rendered {
                    let placement = glyph_image.placement;
                    let left = (pen_x + placement.left as f32) as i32;
                    let top = baseline - placement.top;

                    for py in 0..placement.height {
                        for px in 0..placement.width {
                            let alpha = glyph_coverage(&glyph_image, px, py);
                            blend(image, left + px as i32, top + py as i32, color, alpha);
                        }
                    }
                }

                pen_x += glyph.advance;
            }
        });
    }
}

/// Coverage of pixel (px, py) in a rendered glyph
///
/// Outline masks carry one byte per pixel. Color glyphs carry RGBA, and only
/// their alpha channel is used since chart text has a single color.
pub(super) fn glyph_coverage(glyph: &Image, px: u32, py: u32) -> u8 {
    let index = (py * glyph.placement.width + px) as usize;
    let byte = match glyph.content {
        Content::Mask => index,
        Content::Color | Content::SubpixelMask => index * 4 + 3,
    };
    glyph.data.get(byte).copied().unwrap_or(0)
}

/// Alpha-blend `color` over the pixel at (x, y); off-canvas pixels are ignored
fn blend(image: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, alpha: u8) {
    if alpha == 0 || x < 0 || y < 0 || x as u32 >= image.width() || y as u32 >= image.height() {
        return;
    }
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    let a = alpha as f32 / 255.0;
    for channel in 0..3 {
        pixel[channel] = (color[channel] as f32 * a + pixel[channel] as f32 * (1.0 - a)) as u8;
    }
    pixel[3] = 255;
}

/// Renders both charts onto fixed-size canvases
pub struct ChartRenderer {
    width: u32,
    height: u32,
    font: Option<Vec<u8>>,
}

impl ChartRenderer {
    /// Create a renderer, locating a font for text
    pub fn new(config: &ChartConfig) -> Result<Self> {
        Ok(Self {
            width: config.width,
            height: config.height,
            font: load_font(config)?,
        })
    }

    /// Create a renderer that draws shapes only
    pub fn without_text(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            font: None,
        }
    }

    /// Whether titles and labels will be drawn
    pub fn has_text(&self) -> bool {
        self.font.is_some()
    }

    fn blank_canvas(&self) -> RgbaImage {
        RgbaImage::from_pixel(self.width, self.height, rgba(chart::BACKGROUND))
    }

    fn text_painter(&self) -> Option<TextPainter<'_>> {
        self.font.as_deref().and_then(TextPainter::new)
    }

    /// Pie chart of valid vs invalid rows; `None` when both are zero
    pub fn render_validity_chart(&self, summary: &ValidationSummary) -> Option<RgbaImage> {
        let (valid_angle, _) = slice_angles(summary.valid_rows, summary.invalid_rows)?;
        let mut image = self.blank_canvas();

        let radius = chart::PIE_DIAMETER as f64 / 2.0;
        let center_x = chart::PIE_LEFT as f64 + radius;
        let center_y = chart::PIE_TOP as f64 + radius;
        let valid_color = rgba(chart::PIE_VALID_COLOR);
        let invalid_color = rgba(chart::PIE_INVALID_COLOR);

        let left = chart::PIE_LEFT.max(0) as u32;
        let top = chart::PIE_TOP.max(0) as u32;
        let right = (left + chart::PIE_DIAMETER).min(self.width);
        let bottom = (top + chart::PIE_DIAMETER).min(self.height);

        for y in top..bottom {
            for x in left..right {
                // Angles run counter-clockwise from 3 o'clock, y grows downwards
                let dx = x as f64 + 0.5 - center_x;
                let dy = center_y - (y as f64 + 0.5);
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
                let color = if angle < valid_angle as f64 {
                    valid_color
                } else {
                    invalid_color
                };
                image.put_pixel(x, y, color);
            }
        }

        if let Some(mut text) = self.text_painter() {
            text.draw(
                &mut image,
                &format!("Valid: {}", summary.valid_rows),
                chart::PIE_LABEL_X,
                chart::PIE_VALID_LABEL_BASELINE,
                chart::LABEL_SCALE,
            );
            text.draw(
                &mut image,
                &format!("Invalid: {}", summary.invalid_rows),
                chart::PIE_LABEL_X,
                chart::PIE_INVALID_LABEL_BASELINE,
                chart::LABEL_SCALE,
            );
            text.draw(
                &mut image,
                chart::PIE_TITLE,
                chart::TITLE_X,
                chart::TITLE_BASELINE,
                chart::PIE_TITLE_SCALE,
            );
        }

        Some(image)
    }

    /// Bar chart of failure counts per rule
    pub fn render_error_chart(&self, summary: &ValidationSummary) -> RgbaImage {
        let mut image = self.blank_canvas();
        let mut text = self.text_painter();

        if let Some(text) = text.as_mut() {
            text.draw(
                &mut image,
                chart::BAR_TITLE,
                chart::TITLE_X,
                chart::TITLE_BASELINE,
                chart::BAR_TITLE_SCALE,
            );
        }

        let bar_color = rgba(chart::BAR_COLOR);
        let outline_color = rgba(chart::TEXT);
        let mut x = chart::BAR_START_X;

        for (entry, height) in summary.rule_errors.iter().zip(bar_heights(summary)) {
            let top = chart::BAR_BASELINE_Y - height as i32;
            if height > 0 {
                draw_filled_rect_mut(
                    &mut image,
                    Rect::at(x, top).of_size(chart::BAR_WIDTH, height),
                    bar_color,
                );
            }
            // Outline spans one extra pixel each way, so an empty bar is a line
            draw_hollow_rect_mut(
                &mut image,
                Rect::at(x, top).of_size(chart::BAR_WIDTH + 1, height + 1),
                outline_color,
            );
            if let Some(text) = text.as_mut() {
                text.draw(
                    &mut image,
                    &entry.rule,
                    x + chart::BAR_LABEL_OFFSET_X,
                    chart::BAR_LABEL_BASELINE,
                    chart::LABEL_SCALE,
                );
            }
            x += chart::BAR_STEP_X;
        }

        image
    }

    /// Render and save the validity chart, skipping it when there are no rows
    pub fn write_validity_chart(
        &self,
        summary: &ValidationSummary,
        path: &Path,
    ) -> Result<ChartOutcome> {
        match self.render_validity_chart(summary) {
            Some(image) => save_png(&image, path),
            None => {
                info!("No rows to chart; skipping {}", path.display());
                Ok(ChartOutcome::Skipped {
                    reason: "no valid or invalid rows".to_string(),
                })
            }
        }
    }

    /// Render and save the error chart
    pub fn write_error_chart(&self, summary: &ValidationSummary, path: &Path) -> Result<ChartOutcome> {
        save_png(&self.render_error_chart(summary), path)
    }
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<ChartOutcome> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| Error::chart_write_failed(path, e.to_string()))?;
    info!("Chart saved as '{}'", path.display());
    Ok(ChartOutcome::Written(path.to_path_buf()))
}
