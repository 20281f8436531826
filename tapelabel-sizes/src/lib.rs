//! Package size codes to be used by the `tapelabel` crate.
//!
//! Every identifier maps to one or two short display lines. Several identifiers may denote the
//! same package (for example the imperial `0603` and the metric `1608`); these aliases compare
//! equal because equality is decided by the display lines, never by the identifier.
//!
//! ```
//! # use tapelabel_sizes::Size;
//! assert_eq!(Size::SmdM1608, Size::SmdI0603);
//! assert_eq!(Size::SmdM1608.lines(), ["I:{0603}", "M:{1608}"]);
//! assert_eq!(Size::from_name("MELF"), Some(Size::MelfMmb));
//! ```

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

macro_rules! sizes {
    (
        $($name:ident ($id:literal) => [$($line:literal),+],)*
        ;
        $($alias:ident ($alias_id:literal) => $target:ident,)*
    ) => {

        /// Package sizes
        #[derive(Debug, Clone, Copy)]
        #[non_exhaustive]
        pub enum Size {
            $(
                #[doc = concat!("`", $id, "`")]
                $name,
            )*
            $(
                #[doc = concat!("`", $alias_id, "`, same package as [`Size::", stringify!($target), "`]")]
                $alias,
            )*
        }

        impl Size {
            /// An array containing all the identifiers, aliases included
            pub const ALL: [Self; const{0 $(+ {_ = $id; 1})* $(+ {_ = $alias_id; 1})*}] =
                [$(Self::$name,)* $(Self::$alias,)*];

            /// The display lines, possibly containing `{...}` annotation spans
            #[must_use]
            pub const fn lines(self) -> &'static [&'static str] {
                match self {
                    $(Self::$name => &[$($line),+],)*
                    $(Self::$alias => Self::$target.lines(),)*
                }
            }

            /// The identifier this one is an alias of, or itself
            #[must_use]
            pub const fn canonical(self) -> Self {
                match self {
                    $(Self::$name => Self::$name,)*
                    $(Self::$alias => Self::$target,)*
                }
            }

            /// Returns true if this identifier is an alias of another one.
            #[must_use]
            pub const fn is_alias(self) -> bool {
                match self {
                    $(Self::$name => false,)*
                    $(Self::$alias => true,)*
                }
            }

            /// The identifier as written in sheets
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => $id,)*
                    $(Self::$alias => $alias_id,)*
                }
            }

            /// Match an identifier to a size
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($id => Some(Self::$name),)*
                    $($alias_id => Some(Self::$alias),)*
                    _ => None,
                }
            }
        }

    };
}

sizes! {
    Tht("THT") => ["THT"],
    ThtAxial("THT_AXIAL") => ["THT AXL"],
    ThtRadial("THT_RADIAL") => ["THT RAD"],

    To5("TO_5") => ["TO-5"],
    To92("TO_92") => ["TO-92"],
    To220("TO_220") => ["TO-220"],
    To220Ac("TO_220_AC") => ["TO-220AC"],

    SmdI01005("SMD_I01005") => ["I:{01005}", "M:{ 0402}"],
    SmdI0201("SMD_I0201") => ["I:{0201}", "M:{0603}"],
    SmdI0402("SMD_I0402") => ["I:{0402}", "M:{1005}"],
    SmdI0603("SMD_I0603") => ["I:{0603}", "M:{1608}"],
    SmdI0805("SMD_I0805") => ["I:{0805}", "M:{2012}"],
    SmdI1008("SMD_I1008") => ["I:{1008}", "M:{2520}"],
    SmdI1206("SMD_I1206") => ["I:{1206}", "M:{3216}"],
    SmdI1210("SMD_I1210") => ["I:{1210}", "M:{3225}"],
    SmdI1812("SMD_I1812") => ["I:{1812}", "M:{4532}"],
    SmdI2010("SMD_I2010") => ["I:{2010}", "M:{5025}"],
    SmdI2512("SMD_I2512") => ["I:{2512}", "M:{6332}"],

    MelfMmu("MELF_MMU") => ["MELF MMU", "{0102}"],
    MelfMma("MELF_MMA") => ["MELF MMA", "{0204}"],
    MelfMmb("MELF_MMB") => ["MELF MMB", "{0207}"],
    ;
    SmdM0402("SMD_M0402") => SmdI01005,
    SmdM0603("SMD_M0603") => SmdI0201,
    SmdM1005("SMD_M1005") => SmdI0402,
    SmdM1608("SMD_M1608") => SmdI0603,
    SmdM2012("SMD_M2012") => SmdI0805,
    SmdM2520("SMD_M2520") => SmdI1008,
    SmdM3216("SMD_M3216") => SmdI1206,
    SmdM3225("SMD_M3225") => SmdI1210,
    SmdM4532("SMD_M4532") => SmdI1812,
    SmdM5025("SMD_M5025") => SmdI2010,
    SmdM6332("SMD_M6332") => SmdI2512,

    MicroMelf("MICRO_MELF") => MelfMmu,
    MiniMelf("MINI_MELF") => MelfMma,
    Melf("MELF") => MelfMmb,
}

impl PartialEq for Size {
    fn eq(&self, other: &Self) -> bool {
        self.lines() == other.lines()
    }
}

impl Eq for Size {}

impl Hash for Size {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lines().hash(state);
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Size;

    #[test]
    fn aliases_resolve_to_canonical_lines() {
        for size in Size::ALL {
            let canonical = size.canonical();
            assert!(!canonical.is_alias(), "{size} resolves to another alias");
            assert_eq!(size, canonical);
            assert_eq!(size.lines(), canonical.lines());
        }
    }

    #[test]
    fn names_round_trip() {
        for size in Size::ALL {
            let parsed = Size::from_name(size.name()).unwrap();
            assert_eq!(parsed.name(), size.name());
        }
        assert_eq!(Size::from_name("SMD_I9999"), None);
    }

    #[test]
    fn display_lines_are_short() {
        for size in Size::ALL {
            assert!(matches!(size.lines().len(), 1 | 2), "{size}");
        }
    }

    #[test]
    fn hashing_follows_equality() {
        let distinct: HashSet<Size> = Size::ALL.into_iter().collect();
        let canonical = Size::ALL.iter().filter(|size| !size.is_alias()).count();
        assert_eq!(distinct.len(), canonical);
    }

    #[test]
    fn distinct_packages_differ() {
        assert_ne!(Size::SmdI0603, Size::SmdI0805);
        assert_ne!(Size::Melf, Size::MiniMelf);
        assert_eq!(Size::MicroMelf, Size::MelfMmu);
    }
}
