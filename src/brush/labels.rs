use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Name of a paint color. Usually a CSS color name ("cyan"), but any token will do
/// as long as the palette knows how to paint it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorLabel(String);

/// Opaque token for the brush's secondary attribute (pressure, texture...). Never
/// interpreted as a number; the palette decides what each token looks like.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuxLabel(String);

macro_rules! string_label {
    ($name:ident) => {
        impl $name {
            pub fn new(label: impl Into<String>) -> Self {
                $name(label.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                $name::new(label)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name::new(s))
            }
        }
    };
}

string_label!(ColorLabel);
string_label!(AuxLabel);
