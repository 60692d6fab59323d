//! Analysis target platforms and their string keys.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A platform a documentation pass is analysed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    /// Shared code compiled for every platform.
    Common,
    /// JavaScript target.
    Js,
    /// JVM bytecode target.
    Jvm,
    /// Native binary target.
    Native,
}

impl Platform {
    /// Every platform, in key order.
    pub const ALL: [Self; 4] = [Self::Common, Self::Js, Self::Jvm, Self::Native];
    /// Platform used when a pass does not name one.
    pub const DEFAULT: Self = Self::Jvm;

    /// Look up a platform by key, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedPlatformKey` with the original input when
    /// the key matches none of `jvm`, `js`, `native`, `common`.
    pub fn from_key(key: &str) -> Result<Self, Error> {
        let normalized = key.to_lowercase();
        return Self::ALL
            .into_iter()
            .find(|p| return p.key() == normalized)
            .ok_or_else(|| return Error::UnsupportedPlatformKey { key: key.to_string() });
    }

    /// The canonical lowercase key.
    pub const fn key(self) -> &'static str {
        return match self {
            Self::Common => "common",
            Self::Js => "js",
            Self::Jvm => "jvm",
            Self::Native => "native",
        };
    }
}

impl Default for Platform {
    fn default() -> Self {
        return Self::DEFAULT;
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(self.key());
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return Self::from_key(s);
    }
}

impl TryFrom<String> for Platform {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        return Self::from_key(&value);
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        return platform.key().to_string();
    }
}
