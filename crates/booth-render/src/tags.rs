//! Closed string enumerations (filter, frame, mask, style, ...).
//!
//! Every tag type parses leniently: an unrecognized string maps to the
//! type's fallback variant instead of failing, so a stale or misspelled tag
//! coming from a saved job degrades to a no-op.

macro_rules! closed_tag {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
        fallback = $fallback:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "&'static str")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in catalogue order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire tag for this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }

            /// Parse a tag, falling back for anything unrecognized.
            pub fn from_tag(tag: &str) -> Self {
                match tag.trim() {
                    $($tag => $name::$variant,)+
                    _ => $name::$fallback,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$fallback
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                Self::from_tag(&tag)
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                Self::from_tag(tag)
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Ok(Self::from_tag(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use closed_tag;
