//! Enum-by-code field domains.
//!
//! glTF stores most enumerations as either WebGL integer constants
//! (`"wrapS": 33071`) or fixed strings (`"type": "VEC3"`). Each domain is a
//! closed Rust enum with an explicit code table. Decoded fields hold a
//! [`Coded<T>`] so that a decoder running in lenient mode can keep a code it
//! does not recognize without losing it on re-serialization.

use std::fmt;

use serde::{Serialize, Serializer};

/// A closed set of variants, each bound to exactly one wire code.
pub trait CodedEnum: Copy + Eq + fmt::Debug + Sized + 'static {
    /// Wire representation of the code (`u32` or `String`).
    type Code: Clone + Eq + fmt::Debug + fmt::Display + Serialize;

    /// Human readable name of the domain, used in diagnostics.
    const DOMAIN: &'static str;

    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Maps a wire code to its variant.
    fn from_code(code: &Self::Code) -> Option<Self>;

    /// Returns the wire code of this variant.
    fn code(self) -> Self::Code;

    /// Returns the variant's name as written in the glTF specification.
    fn name(self) -> &'static str;
}

/// Declares an enum whose variants map to WebGL integer constants.
macro_rules! gl_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $domain:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $code,
            )+
        }

        impl $crate::coded::CodedEnum for $name {
            type Code = u32;
            const DOMAIN: &'static str = $domain;
            const VARIANTS: &'static [Self] = &[$($name::$variant),+];

            fn from_code(code: &u32) -> Option<Self> {
                match *code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn code(self) -> u32 {
                self as u32
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }
    };
}

/// Declares an enum whose variants map to fixed JSON strings.
macro_rules! str_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $domain:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Returns the JSON string for this variant.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }
        }

        impl $crate::coded::CodedEnum for $name {
            type Code = String;
            const DOMAIN: &'static str = $domain;
            const VARIANTS: &'static [Self] = &[$($name::$variant),+];

            fn from_code(code: &String) -> Option<Self> {
                match code.as_str() {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn code(self) -> String {
                self.as_str().to_string()
            }

            fn name(self) -> &'static str {
                self.as_str()
            }
        }
    };
}

pub(crate) use gl_enum;
pub(crate) use str_enum;

/// A decoded enum field: either a recognized variant or the raw code that
/// was passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coded<T: CodedEnum> {
    Known(T),
    Unknown(T::Code),
}

impl<T: CodedEnum> Coded<T> {
    /// Wraps a raw code, recognizing it when possible.
    pub fn from_code(code: T::Code) -> Self {
        match T::from_code(&code) {
            Some(known) => Coded::Known(known),
            None => Coded::Unknown(code),
        }
    }

    /// Returns the recognized variant, if any.
    pub fn known(&self) -> Option<T> {
        match self {
            Coded::Known(value) => Some(*value),
            Coded::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Coded::Known(_))
    }

    /// Returns the wire code, whether recognized or not.
    pub fn code(&self) -> T::Code {
        match self {
            Coded::Known(value) => value.code(),
            Coded::Unknown(code) => code.clone(),
        }
    }
}

impl<T: CodedEnum> From<T> for Coded<T> {
    fn from(value: T) -> Self {
        Coded::Known(value)
    }
}

impl<T: CodedEnum> PartialEq<T> for Coded<T> {
    fn eq(&self, other: &T) -> bool {
        self.known() == Some(*other)
    }
}

impl<T: CodedEnum> fmt::Display for Coded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coded::Known(value) => write!(f, "{} ({})", value.name(), value.code()),
            Coded::Unknown(code) => write!(f, "unknown {} ({})", T::DOMAIN, code),
        }
    }
}

impl<T: CodedEnum> Serialize for Coded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.code().serialize(serializer)
    }
}
