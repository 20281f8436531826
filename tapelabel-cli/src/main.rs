//! Renders a sheet of label items to a PNG for a tape printer

mod sheet;

use std::fmt::{self, Display};
use std::path::PathBuf;

use anyhow::{Context as _, Result, bail, ensure};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use tapelabel::config::Settings;
use tapelabel::font::truetype::TrueTypeConfig;
use tapelabel::label::{LabelError, generate_label};
use tapelabel::parts::Size;
use tapelabel::render::{Renderable, TextBlock};

use sheet::Sheet;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if cli.list_sizes {
        list_sizes();
        return Ok(());
    }

    let items = cli.items()?;
    let config = TrueTypeConfig::load(cli.settings()?).context("cannot load fonts")?;
    let items: Vec<&dyn Renderable> = items.iter().map(AsRef::as_ref).collect();
    let label = generate_label(&items, &config)?;
    info!(
        "{} items in a {}x{} label",
        items.len(),
        label.width(),
        label.height()
    );
    Ok(())
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TOML file with one [[item]] table per block
    sheet: Option<PathBuf>,
    /// TOML settings file
    #[arg(short = 'c', long)]
    settings: Option<PathBuf>,
    /// Where to write the PNG
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Tape width in pixels
    #[arg(short = 'w', long)]
    width: Option<u32>,
    /// A line of free text, printed after the sheet
    #[arg(short = 't', long = "text")]
    text: Vec<String>,
    /// How far the --text lines share one font size, from 0 to 1
    #[arg(long, default_value_t = 0.0)]
    normalize: f32,
    /// Horizontal position of the --text lines, from 0 (left) to 1 (right)
    #[arg(long, conflicts_with = "justify")]
    align: Option<f32>,
    /// Named horizontal position of the --text lines
    #[arg(short = 'j', long, default_value_t)]
    justify: Alignment,
    /// Print the known package sizes and exit
    #[arg(long)]
    list_sizes: bool,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(output) = &self.output {
            settings.output.clone_from(output);
        }
        if let Some(width) = self.width {
            settings.width_px = width;
        }
        ensure!(settings.width_px > 0, LabelError::ZeroWidth);
        debug!("{settings:?}");
        Ok(settings)
    }

    fn items(&self) -> Result<Vec<Box<dyn Renderable>>> {
        if self.sheet.is_none() && self.text.is_empty() {
            bail!("nothing to print: give a sheet or at least one --text line");
        }
        let sheet = match &self.sheet {
            Some(path) => Sheet::load(path)?,
            None => Sheet::default(),
        };
        let mut items = sheet
            .items
            .into_iter()
            .map(sheet::Item::into_renderable)
            .collect::<Result<Vec<_>>>()?;
        if !self.text.is_empty() {
            let align = self
                .align
                .unwrap_or_else(|| tapelabel::render::Alignment::from(self.justify).weight());
            items.push(Box::new(
                TextBlock::new(&self.text)
                    .normalize(self.normalize)
                    .align(align),
            ));
        }
        Ok(items)
    }
}

fn list_sizes() {
    for size in Size::ALL {
        let name = size.name();
        let lines = size.lines().join(" / ");
        if size.is_alias() {
            println!("{name:<12} {lines}  (same as {})", size.canonical());
        } else {
            println!("{name:<12} {lines}");
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
#[value(rename_all = "kebab-case")]
enum Alignment {
    Start,
    #[default]
    Center,
    End,
}

impl From<Alignment> for tapelabel::render::Alignment {
    fn from(value: Alignment) -> Self {
        match value {
            Alignment::Start => Self::Start,
            Alignment::Center => Self::Center,
            Alignment::End => Self::End,
        }
    }
}

impl Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Center => write!(f, "center"),
            Self::End => write!(f, "end"),
        }
    }
}
