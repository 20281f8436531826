//! Electronic components
//!
//! Every component is a value with a unit and a package [`Size`], plus whatever descriptors the
//! kind has. They all render through the same [`ValueBlock`]; a kind only decides its unit and
//! its subtext lines.
//!
//! Only available with the `parts` feature.

use std::borrow::Cow;
use std::fmt::{self, Display};

pub use tapelabel_sizes::Size;

use crate::config::RenderConfig;
use crate::label::LabelError;
use crate::render::{Block, Renderable, ValueBlock};

/// A component with a value, shown as a [`ValueBlock`]
pub trait Component {
    /// The value as given, for example `"100k"`.
    fn value(&self) -> &str;

    /// The unit appended to the value, if any.
    fn unit(&self) -> Option<&'static str>;

    /// Lines shown below the value, top to bottom.
    fn subtexts(&self) -> Vec<Cow<'_, str>>;

    /// Everything that gets rendered.
    fn value_block(&self) -> ValueBlock<'_> {
        let block = ValueBlock::new(self.value()).subtexts(self.subtexts());
        match self.unit() {
            Some(unit) => block.unit(unit),
            None => block,
        }
    }
}

macro_rules! renderable_components {
    ($($component:ty),*) => {
        $(
            impl Renderable for $component {
                fn produce(&self, config: &dyn RenderConfig) -> Result<Block, LabelError> {
                    self.value_block().produce(config)
                }
            }
        )*
    };
}

renderable_components!(Resistor, Capacitor, Inductor, Diode);

macro_rules! descriptors {
    (
        $(#[$meta:meta])*
        $kind:ident {
            $($name:ident ($id:literal) => $text:literal,)*
            ;
            $($alias:ident ($alias_id:literal) => $target:ident,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        #[non_exhaustive]
        pub enum $kind {
            $(
                #[doc = concat!("`", $text, "`")]
                $name,
            )*
            $(
                #[doc = concat!("Same as [`", stringify!($kind), "::", stringify!($target), "`]")]
                $alias,
            )*
        }

        impl $kind {
            /// An array containing all the variants, aliases included
            pub const ALL: [Self; const{0 $(+ {_ = $id; 1})* $(+ {_ = $alias_id; 1})*}] =
                [$(Self::$name,)* $(Self::$alias,)*];

            /// The text printed on the label
            #[must_use]
            pub const fn text(self) -> &'static str {
                match self {
                    $(Self::$name => $text,)*
                    $(Self::$alias => Self::$target.text(),)*
                }
            }

            /// Match an identifier such as `"CERAMIC"` to a variant
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($id => Some(Self::$name),)*
                    $($alias_id => Some(Self::$alias),)*
                    _ => None,
                }
            }
        }

        impl PartialEq for $kind {
            fn eq(&self, other: &Self) -> bool {
                self.text() == other.text()
            }
        }

        impl Eq for $kind {}

        impl Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.text())
            }
        }

        impl From<$kind> for Cow<'static, str> {
            fn from(value: $kind) -> Self {
                Cow::Borrowed(value.text())
            }
        }
    };
}

descriptors! {
    /// Capacitor dielectrics
    CapacitorType {
        Ceramic("CERAMIC") => "Ceramic",
        Electrolytic("ELECTROLYTIC") => "E-lyte",
        Tantalum("TANTALUM") => "Tantalum",
        Polypropylene("POLYPROPYLENE") => "PP/MKP",
        Polyester("POLYESTER") => "PETP/MKT",
        Supercap("SUPERCAP") => "Supercap",
        Edlc("EDLC") => "EDLC",
        ;
        Mkp("MKP") => Polypropylene,
        Petp("PETP") => Polyester,
        Mkt("MKT") => Polyester,
    }
}

descriptors! {
    /// Inductor core materials
    InductorCore {
        Air("AIR") => "Air",
        Ferrite("FERRITE") => "Fer.",
        Iron("IRON") => "Iron",
        Powder("POWDER") => "Pwd.",
        Ceramic("CERAMIC") => "Cer.",
        ;
    }
}

descriptors! {
    /// Inductor constructions
    InductorType {
        Wirewound("WIREWOUND") => "Wiw",
        Multilayer("MULTILAYER") => "MLa",
        Laminated("LAMINATED") => "Lam",
        Toroidal("TOROIDAL") => "Tor",
        Planar("PLANAR") => "Pln",
        ;
    }
}

/// Looks `name` up with `from_name`, falling back to the name itself as free text.
pub fn descriptor<D>(name: &str, from_name: impl Fn(&str) -> Option<D>) -> Cow<'static, str>
where
    D: Into<Cow<'static, str>>,
{
    from_name(name).map_or_else(|| Cow::Owned(name.to_owned()), Into::into)
}

/// A resistor; the unit is `Ω`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resistor {
    value: String,
    size: Size,
}

impl Resistor {
    /// A resistor of `value` in a `size` package.
    #[must_use]
    pub fn new(value: impl Into<String>, size: Size) -> Self {
        Self {
            value: value.into(),
            size,
        }
    }
}

impl Component for Resistor {
    fn value(&self) -> &str {
        &self.value
    }

    fn unit(&self) -> Option<&'static str> {
        Some("Ω")
    }

    fn subtexts(&self) -> Vec<Cow<'_, str>> {
        size_lines(self.size).collect()
    }
}

/// A capacitor; the unit is `F` and the dielectric, if given, is the first subtext
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capacitor {
    value: String,
    size: Size,
    dielectric: Option<Cow<'static, str>>,
}

impl Capacitor {
    /// A capacitor of `value` in a `size` package.
    #[must_use]
    pub fn new(value: impl Into<String>, size: Size) -> Self {
        Self {
            value: value.into(),
            size,
            dielectric: None,
        }
    }

    /// Sets the dielectric: a [`CapacitorType`] or free text.
    #[must_use]
    pub fn dielectric(mut self, dielectric: impl Into<Cow<'static, str>>) -> Self {
        self.dielectric = Some(dielectric.into());
        self
    }
}

impl Component for Capacitor {
    fn value(&self) -> &str {
        &self.value
    }

    fn unit(&self) -> Option<&'static str> {
        Some("F")
    }

    fn subtexts(&self) -> Vec<Cow<'_, str>> {
        self.dielectric
            .as_deref()
            .filter(|dielectric| !dielectric.is_empty())
            .map(Cow::Borrowed)
            .into_iter()
            .chain(size_lines(self.size))
            .collect()
    }
}

/// An inductor; the unit is `H`
///
/// Core and construction share one subtext line (`"Fer./Wiw"`), shielding gets a line of its own
/// when known, and the size lines follow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inductor {
    value: String,
    size: Size,
    core: Option<Cow<'static, str>>,
    construction: Option<Cow<'static, str>>,
    shielded: Option<bool>,
}

impl Inductor {
    /// An inductor of `value` in a `size` package.
    #[must_use]
    pub fn new(value: impl Into<String>, size: Size) -> Self {
        Self {
            value: value.into(),
            size,
            core: None,
            construction: None,
            shielded: None,
        }
    }

    /// Sets the core material: an [`InductorCore`] or free text.
    #[must_use]
    pub fn core(mut self, core: impl Into<Cow<'static, str>>) -> Self {
        self.core = Some(core.into());
        self
    }

    /// Sets the construction: an [`InductorType`] or free text.
    #[must_use]
    pub fn construction(mut self, construction: impl Into<Cow<'static, str>>) -> Self {
        self.construction = Some(construction.into());
        self
    }

    /// Sets whether the inductor is shielded.
    #[must_use]
    pub const fn shielded(mut self, shielded: bool) -> Self {
        self.shielded = Some(shielded);
        self
    }
}

impl Component for Inductor {
    fn value(&self) -> &str {
        &self.value
    }

    fn unit(&self) -> Option<&'static str> {
        Some("H")
    }

    fn subtexts(&self) -> Vec<Cow<'_, str>> {
        let material = [self.core.as_deref(), self.construction.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        let shielding = self
            .shielded
            .map(|shielded| if shielded { "Shielded" } else { "Unshield" });
        (!material.is_empty())
            .then_some(Cow::Owned(material))
            .into_iter()
            .chain(shielding.map(Cow::Borrowed))
            .chain(size_lines(self.size))
            .collect()
    }
}

/// A diode, identified by its part number; there is no unit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diode {
    part: String,
    size: Size,
}

impl Diode {
    /// A diode such as `"1N4148"` in a `size` package.
    #[must_use]
    pub fn new(part: impl Into<String>, size: Size) -> Self {
        Self {
            part: part.into(),
            size,
        }
    }
}

impl Component for Diode {
    fn value(&self) -> &str {
        &self.part
    }

    fn unit(&self) -> Option<&'static str> {
        None
    }

    fn subtexts(&self) -> Vec<Cow<'_, str>> {
        size_lines(self.size).collect()
    }
}

fn size_lines<'a>(size: Size) -> impl Iterator<Item = Cow<'a, str>> {
    size.lines().iter().copied().map(Cow::Borrowed)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{
        Capacitor, CapacitorType, Component, Diode, Inductor, InductorCore, InductorType,
        Resistor, Size, descriptor,
    };
    use crate::config::test::TestConfig;
    use crate::label::Label;
    use crate::render::Renderable;

    fn subtexts(component: &impl Component) -> Vec<String> {
        component
            .subtexts()
            .into_iter()
            .map(Cow::into_owned)
            .collect()
    }

    #[test]
    fn resistor() {
        let resistor = Resistor::new("100k", Size::SmdI0603);
        assert_eq!(resistor.value_block().display_value(), "100kΩ");
        assert_eq!(subtexts(&resistor), ["I:{0603}", "M:{1608}"]);
    }

    #[test]
    fn capacitor() {
        let plain = Capacitor::new("10μ", Size::SmdI0805);
        assert_eq!(plain.value_block().display_value(), "10μF");
        assert_eq!(subtexts(&plain), ["I:{0805}", "M:{2012}"]);

        let typed = plain.dielectric(CapacitorType::Mkt);
        assert_eq!(subtexts(&typed), ["PETP/MKT", "I:{0805}", "M:{2012}"]);

        let custom = Capacitor::new("1p", Size::Tht).dielectric("Mica");
        assert_eq!(subtexts(&custom), ["Mica", "THT"]);
    }

    #[test]
    fn inductor() {
        let bare = Inductor::new("1m", Size::SmdI1210);
        assert_eq!(bare.value_block().display_value(), "1mH");
        assert_eq!(subtexts(&bare), ["I:{1210}", "M:{3225}"]);

        let full = Inductor::new("10µ", Size::ThtRadial)
            .core(InductorCore::Ferrite)
            .construction(InductorType::Wirewound)
            .shielded(false);
        assert_eq!(subtexts(&full), ["Fer./Wiw", "Unshield", "THT RAD"]);

        let shielded = Inductor::new("4.7µ", Size::Tht)
            .construction(InductorType::Planar)
            .shielded(true);
        assert_eq!(subtexts(&shielded), ["Pln", "Shielded", "THT"]);
    }

    #[test]
    fn diode() {
        let diode = Diode::new("1N4148", Size::ThtAxial);
        assert_eq!(diode.value_block().display_value(), "1N4148");
        assert_eq!(subtexts(&diode), ["THT AXL"]);
    }

    #[test]
    fn descriptor_aliases() {
        assert_eq!(CapacitorType::Mkp, CapacitorType::Polypropylene);
        assert_eq!(CapacitorType::Petp, CapacitorType::Mkt);
        assert_ne!(CapacitorType::Ceramic, CapacitorType::Tantalum);
        for kind in CapacitorType::ALL {
            assert_eq!(CapacitorType::from_name(&format!("{kind:?}").to_uppercase()), Some(kind));
        }
        assert_eq!(descriptor("MKP", CapacitorType::from_name), "PP/MKP");
        assert_eq!(descriptor("Mica", CapacitorType::from_name), "Mica");
        assert_eq!(descriptor("FERRITE", InductorCore::from_name), "Fer.");
    }

    #[test]
    fn aliases_render_identically() {
        let config = TestConfig::default();
        let imperial = Resistor::new("4k7", Size::SmdI0402).produce(&config).unwrap();
        let metric = Resistor::new("4k7", Size::SmdM1005).produce(&config).unwrap();
        assert_eq!(imperial, metric);

        let melf = Diode::new("LL4148", Size::MiniMelf).produce(&config).unwrap();
        let mma = Diode::new("LL4148", Size::MelfMma).produce(&config).unwrap();
        assert_eq!(melf.raster().to_string(), mma.raster().to_string());
    }

    #[test]
    fn three_components() {
        let config = TestConfig::default();
        let resistor = Resistor::new("100k", Size::SmdI0603);
        let capacitor = Capacitor::new("10μ", Size::SmdI0805);
        let inductor = Inductor::new("1m", Size::SmdI1206);
        let items: [&dyn Renderable; 3] = [&resistor, &capacitor, &inductor];
        let blocks: Vec<_> = items
            .iter()
            .map(|item| item.produce(&config).unwrap())
            .collect();
        let label = Label::render(&items, &config).unwrap();
        let stacked: u32 = blocks.iter().map(|block| block.height()).sum::<u32>() + 2 * 6;
        let top = blocks[0].raster().blank_margins().0;
        let bottom = blocks[2].raster().blank_margins().1;
        assert_eq!(label.width(), config.width);
        assert_eq!(label.height(), stacked - top - bottom);
    }
}
