//! Sheets: TOML files listing the items of one label

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use tapelabel::parts::{
    Capacitor, CapacitorType, Diode, Inductor, InductorCore, InductorType, Resistor, Size,
    descriptor,
};
use tapelabel::render::{Renderable, TextBlock};

/// The items of a label, top to bottom
///
/// ```toml
/// [[item]]
/// kind = "resistor"
/// value = "100k"
/// size = "SMD_I0603"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Sheet {
    #[serde(default, rename = "item")]
    pub items: Vec<Item>,
}

impl Sheet {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("cannot read sheet {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("cannot parse sheet {}", path.display()))
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Text {
        lines: Vec<String>,
        #[serde(default)]
        normalize: f32,
        #[serde(default = "centered")]
        align: f32,
    },
    Resistor {
        value: String,
        size: String,
    },
    Capacitor {
        value: String,
        size: String,
        #[serde(rename = "type")]
        dielectric: Option<String>,
    },
    Inductor {
        value: String,
        size: String,
        core: Option<String>,
        winding: Option<String>,
        shielded: Option<bool>,
    },
    Diode {
        value: String,
        size: String,
    },
}

const fn centered() -> f32 {
    0.5
}

fn size(name: &str) -> Result<Size> {
    Size::from_name(name).with_context(|| format!("unknown size {name:?}, see --list-sizes"))
}

impl Item {
    pub fn into_renderable(self) -> Result<Box<dyn Renderable>> {
        let item: Box<dyn Renderable> = match self {
            Self::Text {
                lines,
                normalize,
                align,
            } => Box::new(TextBlock::new(lines).normalize(normalize).align(align)),
            Self::Resistor { value, size: name } => Box::new(Resistor::new(value, size(&name)?)),
            Self::Capacitor {
                value,
                size: name,
                dielectric,
            } => {
                let mut capacitor = Capacitor::new(value, size(&name)?);
                if let Some(dielectric) = dielectric {
                    capacitor =
                        capacitor.dielectric(descriptor(&dielectric, CapacitorType::from_name));
                }
                Box::new(capacitor)
            }
            Self::Inductor {
                value,
                size: name,
                core,
                winding,
                shielded,
            } => {
                let mut inductor = Inductor::new(value, size(&name)?);
                if let Some(core) = core {
                    inductor = inductor.core(descriptor(&core, InductorCore::from_name));
                }
                if let Some(winding) = winding {
                    inductor =
                        inductor.construction(descriptor(&winding, InductorType::from_name));
                }
                if let Some(shielded) = shielded {
                    inductor = inductor.shielded(shielded);
                }
                Box::new(inductor)
            }
            Self::Diode { value, size: name } => Box::new(Diode::new(value, size(&name)?)),
        };
        Ok(item)
    }
}
