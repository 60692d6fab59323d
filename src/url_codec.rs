//! Explicit url parse/format pair used wherever a configuration is
//! (de)serialized. Attach to a field with `#[serde(with = "url_codec")]`,
//! or `url_codec::option` for `Option<Url>`.

use serde::{Deserialize, Deserializer, Serializer};
use url::Url;

use crate::error::Error;

/// Parse an absolute url. `field` names the config field for diagnostics.
///
/// # Errors
///
/// Returns `Error::MalformedUrl` if `value` is not an absolute url.
pub fn parse(field: &str, value: &str) -> Result<Url, Error> {
    return Url::parse(value).map_err(|e| {
        return Error::MalformedUrl {
            field: field.to_string(),
            reason: e.to_string(),
            value: value.to_string(),
        };
    });
}

/// Canonical external form: absolute and percent-encoded.
pub fn format(url: &Url) -> String {
    return url.as_str().to_string();
}

/// Serde adapter writing a url as its canonical string.
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn serialize<S: Serializer>(url: &Url, serializer: S) -> Result<S::Ok, S::Error> {
    return serializer.serialize_str(&format(url));
}

/// Serde adapter reading a url from a string.
///
/// # Errors
///
/// Fails with the deserializer's custom error if the string is malformed.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Url, D::Error> {
    let raw = String::deserialize(deserializer)?;
    return parse("url", &raw).map_err(serde::de::Error::custom);
}

/// The same codec for optional url fields.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use url::Url;

    /// Serde adapter writing an optional url.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's error.
    #[allow(clippy::ref_option, reason = "signature dictated by serde(with)")]
    pub fn serialize<S: Serializer>(url: &Option<Url>, serializer: S) -> Result<S::Ok, S::Error> {
        return match url {
            Some(u) => serializer.serialize_some(&super::format(u)),
            None => serializer.serialize_none(),
        };
    }

    /// Serde adapter reading an optional url.
    ///
    /// # Errors
    ///
    /// Fails with the deserializer's custom error if the string is malformed.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Url>, D::Error> {
        return deserialize_field("url", deserializer);
    }

    /// Like `deserialize`, but names `field` in the error. Wrap it in a
    /// per-field function for `deserialize_with`.
    ///
    /// # Errors
    ///
    /// Fails with the deserializer's custom error if the string is malformed.
    pub fn deserialize_field<'de, D: Deserializer<'de>>(field: &str, deserializer: D) -> Result<Option<Url>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        return raw
            .map(|s| return super::parse(field, &s))
            .transpose()
            .map_err(serde::de::Error::custom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_is_canonical() {
        let url = parse("url", "HTTPS://Example.org/a b").unwrap();
        assert_eq!(format(&url), "https://example.org/a%20b");
    }

    #[test]
    fn roundtrip_preserves_value() {
        for raw in [
            "https://example.org/docs/",
            "https://example.org/docs/index.html?x=1#frag",
            "file:///tmp/package-list",
            "http://[::1]:8080/api/",
        ] {
            let url = parse("url", raw).unwrap();
            let again = parse("url", &format(&url)).unwrap();
            assert_eq!(again, url);
            assert_eq!(format(&again), format(&url));
        }
    }

    #[test]
    fn relative_input_is_rejected() {
        match parse("external_documentation_links.url", "docs/index.html") {
            Err(Error::MalformedUrl { field, value, .. }) => {
                assert_eq!(field, "external_documentation_links.url");
                assert_eq!(value, "docs/index.html");
            },
            other => panic!("expected MalformedUrl, got {other:?}"),
        }
    }
}
