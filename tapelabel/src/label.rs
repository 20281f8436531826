//! Stacking blocks into a finished label

use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::config::RenderConfig;
use crate::raster::Bitmap;
use crate::render::{Block, Renderable};

/// A finished label: blocks stacked top to bottom, with blank rows trimmed from both ends
///
/// The raster is never empty; a label without ink is a single blank row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    raster: Bitmap,
}

impl Label {
    /// Renders every item with `config` and stacks the blocks.
    ///
    /// # Errors
    /// [`LabelError::ZeroWidth`] if the configured width is 0, or the first error from rendering
    /// an item.
    pub fn render(
        items: &[&dyn Renderable],
        config: &dyn RenderConfig,
    ) -> Result<Self, LabelError> {
        let width = config.width_px();
        if width == 0 {
            return Err(LabelError::ZeroWidth);
        }
        let blocks = items
            .iter()
            .map(|item| item.produce(config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::compose(&blocks, width, config.gap_block_px()))
    }

    /// Stacks `blocks` with `gap` blank rows between neighbours, then trims.
    ///
    /// Blocks are expected to be `width` wide; anything wider is clipped.
    #[must_use]
    pub fn compose(blocks: &[Block], width: u32, gap: u32) -> Self {
        let gaps = u32::try_from(blocks.len().saturating_sub(1)).unwrap_or(u32::MAX);
        let height = blocks
            .iter()
            .map(Block::height)
            .fold(gap.saturating_mul(gaps), u32::saturating_add);
        if blocks.is_empty() || height == 0 {
            return Self::blank(width);
        }

        let mut raster = Bitmap::blank(width, height);
        let mut y = 0;
        for block in blocks {
            raster.paste(block.raster(), y);
            y = y.saturating_add(block.height()).saturating_add(gap);
        }

        let (top, bottom) = raster.blank_margins();
        let trimmed = raster.trimmed();
        debug!(
            "stacked {} blocks into {height} rows, trimmed {top} above and {bottom} below",
            blocks.len()
        );
        if trimmed.height() == 0 {
            Self::blank(width)
        } else {
            Self { raster: trimmed }
        }
    }

    fn blank(width: u32) -> Self {
        Self {
            raster: Bitmap::blank(width, 1),
        }
    }

    /// The pixels.
    #[must_use]
    pub const fn raster(&self) -> &Bitmap {
        &self.raster
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Height in pixels, at least 1.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Writes the label as a two-tone PNG.
    ///
    /// # Errors
    /// [`LabelError::Save`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), LabelError> {
        self.raster
            .save_png(path)
            .map_err(|source| LabelError::Save {
                path: path.to_owned(),
                source,
            })?;
        info!(
            "wrote {}x{} label to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}

/// Renders `items` and writes the label to [`RenderConfig::destination`].
///
/// # Errors
/// See [`Label::render`] and [`Label::save`].
pub fn generate_label(
    items: &[&dyn Renderable],
    config: &dyn RenderConfig,
) -> Result<Label, LabelError> {
    let label = Label::render(items, config)?;
    label.save(config.destination())?;
    Ok(label)
}

/// An error while building or saving a label
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LabelError {
    /// The configured tape width is 0.
    #[error("label width must be positive")]
    ZeroWidth,
    /// A font was requested at a scale that is not finite and positive.
    #[error("cannot scale a font by {0}")]
    DegenerateScale(f32),
    /// A font file could not be read.
    #[error("cannot read font {}: {source}", .path.display())]
    FontRead {
        /// The font file
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },
    /// A font file could not be parsed.
    #[error("cannot parse font {}: {reason}", .path.display())]
    FontParse {
        /// The font file
        path: PathBuf,
        /// Why the parser rejected it
        reason: &'static str,
    },
    /// The label could not be written.
    #[error("cannot write label to {}: {source}", .path.display())]
    Save {
        /// The destination
        path: PathBuf,
        /// The underlying error
        source: image::ImageError,
    },
}
