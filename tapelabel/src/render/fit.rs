//! Scaling lines of text to the tape width
//!
//! Each line has a *width-fit* scale, the one that makes it exactly as wide as the tape. The
//! *normalize* weight blends it with the smallest width-fit scale of all lines: at 0 every line
//! fills the width with its own font size, at 1 every line shares the font size of the longest
//! line.

use itertools::Itertools as _;
use log::debug;

use crate::config::RenderConfig;
use crate::font::{Extent, Font};
use crate::label::LabelError;
use crate::raster::Bitmap;

/// The scale that makes text of `natural` width (at scale 1) exactly `target` wide, or `None` for
/// text without width.
#[expect(clippy::cast_precision_loss, reason = "pixel widths are far below 2^24")]
#[must_use]
pub fn width_fit_scale(natural: u32, target: u32) -> Option<f32> {
    (natural > 0).then(|| target as f32 / natural as f32)
}

/// Linear blend between the shared scale (at `normalize == 1`) and a line's own scale (at
/// `normalize == 0`).
#[must_use]
pub fn blend(shared: f32, own: f32, normalize: f32) -> f32 {
    normalize * shared + (1.0 - normalize) * own
}

/// One line after fitting
pub struct FittedLine<'t, 'c> {
    text: &'t str,
    font: Option<Box<dyn Font + 'c>>,
    scale: Option<f32>,
    extent: Extent,
    x: i32,
    y: u32,
}

impl FittedLine<'_, '_> {
    /// The applied scale, `None` for a line without width.
    #[must_use]
    pub const fn scale(&self) -> Option<f32> {
        self.scale
    }

    /// Size at the applied scale.
    #[must_use]
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    /// Position of the line's box inside the block.
    #[must_use]
    pub const fn position(&self) -> (i32, u32) {
        (self.x, self.y)
    }
}

/// Lines stacked top to bottom, each scaled and aligned
pub struct FittedLines<'t, 'c> {
    lines: Vec<FittedLine<'t, 'c>>,
    height: u32,
}

impl<'t, 'c> FittedLines<'t, 'c> {
    /// Fits `lines` to the width of `config`.
    ///
    /// `normalize` blends the scales (see the [module docs](self)) and `align` places each line
    /// horizontally, 0 flush left and 1 flush right. Lines without width are kept as zero-sized
    /// entries and do not take part in the shared scale; the text gap only separates lines that
    /// follow something with height.
    ///
    /// # Errors
    /// Any error from [`RenderConfig::value_font`].
    pub fn fit<S: AsRef<str>>(
        lines: &'t [S],
        config: &'c dyn RenderConfig,
        normalize: f32,
        align: f32,
    ) -> Result<Self, LabelError> {
        let width = config.width_px();
        let base = config.value_font(1.0)?;
        let own_scales: Vec<Option<f32>> = lines
            .iter()
            .map(|line| width_fit_scale(base.measure(line.as_ref()).width, width))
            .collect();
        let shared = own_scales.iter().flatten().copied().min_by(f32::total_cmp);

        let mut fitted = Vec::with_capacity(lines.len());
        let mut height = 0;
        for (line, own) in lines.iter().zip(own_scales) {
            let text = line.as_ref();
            let (font, scale, extent) = match own.zip(shared) {
                Some((own, shared)) => {
                    let scale = blend(shared, own, normalize);
                    let font = config.value_font(scale)?;
                    let extent = font.measure(text);
                    (Some(font), Some(scale), extent)
                }
                None => (None, None, Extent::ZERO),
            };
            if height > 0 && extent.height > 0 {
                height += config.gap_text_px();
            }
            fitted.push(FittedLine {
                text,
                font,
                scale,
                extent,
                x: aligned(width, extent.width, align),
                y: height,
            });
            height += extent.height;
        }
        debug!(
            "fitted {} lines to {width}px at scales [{}]",
            fitted.len(),
            fitted
                .iter()
                .map(|line| line.scale.map_or_else(|| "-".to_owned(), |s| format!("{s:.3}")))
                .join(", ")
        );
        Ok(Self {
            lines: fitted,
            height,
        })
    }

    /// The fitted lines, in input order.
    #[must_use]
    pub fn lines(&self) -> &[FittedLine<'t, 'c>] {
        &self.lines
    }

    /// Total height, gaps included.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Draws every line onto `canvas` at its position.
    #[expect(clippy::cast_possible_wrap, reason = "block heights are far below i32::MAX")]
    pub fn draw(&self, canvas: &mut Bitmap) {
        for line in &self.lines {
            if let Some(font) = &line.font {
                font.draw(canvas, line.x, line.y as i32, line.text);
            }
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "pixel widths are far below 2^24"
)]
fn aligned(container: u32, width: u32, align: f32) -> i32 {
    (align * (container as f32 - width as f32)).round() as i32
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{FittedLines, blend, width_fit_scale};
    use crate::config::test::TestConfig;
    use crate::font::Extent;
    use crate::raster::Bitmap;

    fn config() -> TestConfig {
        TestConfig {
            width: 60,
            gap_text: 2,
            ..TestConfig::default()
        }
    }

    fn scales(fitted: &FittedLines<'_, '_>) -> Vec<Option<f32>> {
        fitted.lines().iter().map(|line| line.scale()).collect()
    }

    #[test]
    fn width_fit() {
        assert_eq!(width_fit_scale(0, 64), None);
        assert_relative_eq!(width_fit_scale(32, 64).unwrap(), 2.0);
        assert_relative_eq!(width_fit_scale(128, 64).unwrap(), 0.5);
    }

    #[test]
    fn blend_endpoints() {
        assert_relative_eq!(blend(1.5, 4.0, 0.0), 4.0);
        assert_relative_eq!(blend(1.5, 4.0, 1.0), 1.5);
        assert_relative_eq!(blend(1.5, 4.0, 0.5), 2.75);
        assert_relative_eq!(blend(1.5, 4.0, 0.2), 0.2 * 1.5 + 0.8 * 4.0);
    }

    #[test]
    fn every_line_fills_the_width() {
        let config = config();
        let lines = ["a", "abc", "abcdef", "abcdefghijkl"];
        let fitted = FittedLines::fit(&lines, &config, 0.0, 0.5).unwrap();
        for line in fitted.lines() {
            assert!(line.extent().width.abs_diff(60) <= 1, "{}", line.extent().width);
            assert_eq!(line.position().0, 0);
        }
        assert_eq!(
            scales(&fitted),
            [Some(12.0), Some(4.0), Some(2.0), Some(1.0)]
        );
    }

    #[test]
    fn shared_font_size() {
        let config = config();
        let lines = ["abc", "abcdef"];
        let fitted = FittedLines::fit(&lines, &config, 1.0, 0.0).unwrap();
        assert_eq!(scales(&fitted), [Some(2.0), Some(2.0)]);
        let [short, long] = fitted.lines() else {
            panic!("two lines expected");
        };
        assert_eq!(
            short.extent(),
            Extent {
                width: 30,
                height: 14
            }
        );
        assert_eq!(short.position(), (0, 0));
        assert_eq!(long.position(), (0, 16));
        assert_eq!(fitted.height(), 14 + 2 + 14);
    }

    #[test]
    fn alignment_weight() {
        let config = config();
        let lines = ["abc", "abcdef"];
        let right = FittedLines::fit(&lines, &config, 1.0, 1.0).unwrap();
        assert_eq!(right.lines()[0].position().0, 30);
        let center = FittedLines::fit(&lines, &config, 1.0, 0.5).unwrap();
        assert_eq!(center.lines()[0].position().0, 15);
    }

    #[test]
    fn partial_normalization() {
        let config = config();
        let lines = ["abc", "abcdef"];
        let fitted = FittedLines::fit(&lines, &config, 0.25, 0.0).unwrap();
        let [Some(short), Some(long)] = scales(&fitted)[..] else {
            panic!("both lines have width");
        };
        assert_relative_eq!(short, 0.25 * 2.0 + 0.75 * 4.0);
        assert_relative_eq!(long, 2.0);
    }

    #[test]
    fn degenerate_input() {
        let config = config();
        let none: [&str; 0] = [];
        let fitted = FittedLines::fit(&none, &config, 0.5, 0.5).unwrap();
        assert!(fitted.lines().is_empty());
        assert_eq!(fitted.height(), 0);

        let lines = ["", "abc", ""];
        let fitted = FittedLines::fit(&lines, &config, 1.0, 0.5).unwrap();
        assert_eq!(scales(&fitted), [None, Some(4.0), None]);
        assert_eq!(fitted.height(), 28);
        assert_eq!(fitted.lines()[1].position(), (0, 0));
    }

    #[test]
    fn drawing_stays_on_canvas() {
        let config = config();
        let lines = ["ab", "abcd"];
        let fitted = FittedLines::fit(&lines, &config, 0.0, 0.5).unwrap();
        let mut canvas = Bitmap::blank(60, fitted.height());
        fitted.draw(&mut canvas);
        assert!(!canvas.row_is_blank(0));
        assert!(!canvas.row_is_blank(fitted.height() - 1));
        let (top, bottom) = canvas.blank_margins();
        assert_eq!((top, bottom), (0, 0));
    }
}
