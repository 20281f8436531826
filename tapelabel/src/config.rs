//! Render configuration
//!
//! [`RenderConfig`] is everything the layout code needs to know about the tape and the fonts.
//! [`Settings`] is its serializable counterpart, read from a TOML file and turned into a
//! [`TrueTypeConfig`](crate::font::truetype::TrueTypeConfig) once the font files are loaded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::font::Font;
use crate::label::LabelError;

/// Tape geometry and fonts
pub trait RenderConfig {
    /// Printable width of the tape, in pixels. Every block and the final label have exactly this
    /// width.
    fn width_px(&self) -> u32;

    /// Vertical gap between lines inside one block.
    fn gap_text_px(&self) -> u32;

    /// Vertical gap between blocks.
    fn gap_block_px(&self) -> u32;

    /// The font for values and free text, at `scale` times its base size. Larger scales give
    /// larger glyphs.
    ///
    /// # Errors
    /// [`LabelError::DegenerateScale`] if `scale` is not finite and positive.
    fn value_font(&self, scale: f32) -> Result<Box<dyn Font + '_>, LabelError>;

    /// The font for text outside `{...}` spans in subtexts.
    fn plain_annotation_font(&self) -> &dyn Font;

    /// How far plain annotation text is moved down, to line it up with the bracket font.
    fn plain_annotation_offset_px(&self) -> u32 {
        0
    }

    /// The font for text inside `{...}` spans in subtexts.
    fn bracket_annotation_font(&self) -> &dyn Font;

    /// Where the finished label is written.
    fn destination(&self) -> &Path;
}

/// Checks a scale requested from [`RenderConfig::value_font`].
///
/// # Errors
/// [`LabelError::DegenerateScale`] unless `scale` is finite and positive.
pub fn check_scale(scale: f32) -> Result<f32, LabelError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(LabelError::DegenerateScale(scale))
    }
}

/// A font file and the pixel size to rasterize it at
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FontSettings {
    /// Path to a TrueType or OpenType file
    pub path: PathBuf,
    /// Size in pixels at scale 1
    pub size: f32,
    /// Downward offset, only used for the prefix font
    #[serde(default)]
    pub offset_px: u32,
}

impl FontSettings {
    fn new(path: &str, size: f32, offset_px: u32) -> Self {
        Self {
            path: PathBuf::from(path),
            size,
            offset_px,
        }
    }
}

/// Contents of a settings file
///
/// Every key is optional; the defaults describe 9 mm tape printed at 180 dpi.
///
/// ```
/// # use tapelabel::config::Settings;
/// let settings = Settings::from_toml(r#"
///     width_px = 128
///
///     [value_font]
///     path = "fonts/DejaVuSans-Bold.ttf"
///     size = 20.0
/// "#).unwrap();
/// assert_eq!(settings.width_px, 128);
/// assert_eq!(settings.gap_block_px, 6);
/// assert_eq!(settings.value_font.size, 20.0);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Printable width in pixels
    pub width_px: u32,
    /// Gap between lines of one block
    pub gap_text_px: u32,
    /// Gap between blocks
    pub gap_block_px: u32,
    /// Where the PNG is written
    pub output: PathBuf,
    /// Font for values and free text
    pub value_font: FontSettings,
    /// Font for text outside `{...}` in subtexts
    pub prefix_font: FontSettings,
    /// Font for text inside `{...}` in subtexts
    pub annotation_font: FontSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width_px: 64,
            gap_text_px: 2,
            gap_block_px: 6,
            output: PathBuf::from("data/label.png"),
            value_font: FontSettings::new("data/fonts/Roboto-Bold.ttf", 14.0, 0),
            prefix_font: FontSettings::new("data/fonts/PressStart2P.ttf", 8.0, 3),
            annotation_font: FontSettings::new("data/fonts/Greenscreen.ttf", 12.0, 0),
        }
    }
}

impl Settings {
    /// Reads a settings file.
    ///
    /// # Errors
    /// See [`SettingsError`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parses the contents of a settings file.
    ///
    /// # Errors
    /// [`SettingsError::Parse`] on malformed TOML, unknown keys or wrongly typed values.
    pub fn from_toml(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }
}

/// An error reading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("cannot read settings file {}: {source}", .path.display())]
    Read {
        /// The settings file
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },
    /// The file is not a valid settings file.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
pub(crate) mod test {
    use std::path::{Path, PathBuf};

    use super::{RenderConfig, Settings, check_scale};
    use crate::font::Font;
    use crate::font::test::BlockFont;
    use crate::label::LabelError;

    /// Small tape with block fonts; the value font is 5 pixels per character at scale 1.
    pub(crate) struct TestConfig {
        pub width: u32,
        pub gap_text: u32,
        pub gap_block: u32,
        pub value: BlockFont,
        pub plain: BlockFont,
        pub bracket: BlockFont,
        pub offset: u32,
        pub destination: PathBuf,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                width: 40,
                gap_text: 2,
                gap_block: 6,
                value: BlockFont::new(5.0, 7.0),
                plain: BlockFont::new(3.0, 3.0),
                bracket: BlockFont::new(2.0, 5.0),
                offset: 1,
                destination: PathBuf::from("label.png"),
            }
        }
    }

    impl RenderConfig for TestConfig {
        fn width_px(&self) -> u32 {
            self.width
        }

        fn gap_text_px(&self) -> u32 {
            self.gap_text
        }

        fn gap_block_px(&self) -> u32 {
            self.gap_block
        }

        fn value_font(&self, scale: f32) -> Result<Box<dyn Font + '_>, LabelError> {
            Ok(Box::new(self.value.scaled(check_scale(scale)?)))
        }

        fn plain_annotation_font(&self) -> &dyn Font {
            &self.plain
        }

        fn plain_annotation_offset_px(&self) -> u32 {
            self.offset
        }

        fn bracket_annotation_font(&self) -> &dyn Font {
            &self.bracket
        }

        fn destination(&self) -> &Path {
            &self.destination
        }
    }

    #[test]
    fn degenerate_scales() {
        assert!(check_scale(0.5).is_ok());
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                check_scale(scale),
                Err(LabelError::DegenerateScale(_))
            ));
        }
    }

    #[test]
    fn empty_settings_are_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn prefix_offset() {
        let settings = Settings::from_toml(
            r#"
            [prefix_font]
            path = "mono.ttf"
            size = 6.0
            offset_px = 2
            "#,
        )
        .unwrap();
        assert_eq!(settings.prefix_font.offset_px, 2);
        assert_eq!(settings.annotation_font, Settings::default().annotation_font);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml("widht_px = 10").is_err());
        assert!(Settings::from_toml("width_px = \"wide\"").is_err());
    }
}
