//! A crate for composing monochrome labels for narrow thermal tape.
//!
//! # Features
//!
//! - Free text where every line is scaled to fill the tape width, with a weight blending towards a
//!   shared font size ([`TextBlock`](crate::render::TextBlock))
//! - Component values enlarged to the tape width, with subtext lines below them
//!   ([`ValueBlock`](crate::render::ValueBlock))
//! - A two-font markup for subtexts: `"I:{0603}"` sets `0603` in the annotation font
//!   ([`markup`](crate::render::markup))
//! - Stacking and trimming into a finished two-tone PNG ([`Label`](crate::label::Label))
//!
//! # Example
//!
//! ```no_run
//! # use tapelabel::config::Settings;
//! # use tapelabel::font::truetype::TrueTypeConfig;
//! # use tapelabel::label::generate_label;
//! # use tapelabel::parts::{Capacitor, CapacitorType, Resistor, Size};
//! # use tapelabel::render::{Renderable, TextBlock};
//! let config = TrueTypeConfig::load(Settings::load("label.toml")?)?;
//! let heading = TextBlock::new(["Drawer 3"]);
//! let resistor = Resistor::new("100k", Size::SmdI0603);
//! let capacitor = Capacitor::new("10μ", Size::SmdM2012).dielectric(CapacitorType::Ceramic);
//! let items: [&dyn Renderable; 3] = [&heading, &resistor, &capacitor];
//! let label = generate_label(&items, &config)?;
//! assert_eq!(label.width(), config.settings().width_px);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature flags
//!
//! - `parts` (default): adds the component kinds in [`parts`](crate::parts) and the package sizes
//!   of the `tapelabel-sizes` package (via a dependency)

pub mod config;
pub mod font;
pub mod label;
#[cfg(feature = "parts")]
pub mod parts;
pub mod raster;
pub mod render;

pub use config::{RenderConfig, Settings};
pub use label::{Label, LabelError, generate_label};
pub use render::{Block, Renderable, TextBlock, ValueBlock};
