//! External documentation links and the rules that complete a partial
//! declaration into one.

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::Error;
use crate::url_codec;

/// Relative reference resolved against a link's base url when no package
/// list is declared.
pub const PACKAGE_LIST: &str = "package-list";

/// A complete external documentation link. Both urls are absolute.
/// Only produced by `ExternalDocumentationLinkBuilder::build()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExternalDocumentationLinkBuilder")]
pub struct ExternalDocumentationLink {
    /// Index file listing the packages documented at `url`.
    #[serde(serialize_with = "url_codec::serialize")]
    pub package_list_url: Url,
    /// Base url of the external documentation site.
    #[serde(serialize_with = "url_codec::serialize")]
    pub url: Url,
}

impl ExternalDocumentationLink {
    /// Shorthand for `from_strings(url, package_list_url)?.build()`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedUrl` if either string fails to parse.
    pub fn parse(url: &str, package_list_url: Option<&str>) -> Result<Self, Error> {
        return ExternalDocumentationLinkBuilder::from_strings(url, package_list_url)?.build();
    }
}

/// A possibly incomplete link declaration, as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocumentationLinkBuilder {
    /// Explicit package list location.
    #[serde(
        default,
        deserialize_with = "deserialize_package_list_url",
        serialize_with = "url_codec::option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub package_list_url: Option<Url>,
    /// Base url of the external documentation site.
    #[serde(
        default,
        deserialize_with = "deserialize_url",
        serialize_with = "url_codec::option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<Url>,
}

/// Read `package_list_url`, naming it in parse errors.
fn deserialize_package_list_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Url>, D::Error> {
    return url_codec::option::deserialize_field("package_list_url", deserializer);
}

/// Read `url`, naming it in parse errors.
fn deserialize_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Url>, D::Error> {
    return url_codec::option::deserialize_field("url", deserializer);
}

impl ExternalDocumentationLinkBuilder {
    /// Parse raw strings into a builder. Malformed input fails here,
    /// before `build()` is ever called.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedUrl` naming the field that failed.
    pub fn from_strings(url: &str, package_list_url: Option<&str>) -> Result<Self, Error> {
        let url = url_codec::parse("url", url)?;
        let package_list_url = package_list_url
            .map(|s| return url_codec::parse("package_list_url", s))
            .transpose()?;
        return Ok(Self {
            package_list_url,
            url: Some(url),
        });
    }

    /// Resolve the declaration into a complete link.
    ///
    /// With both urls set they are used as-is. With only `url` set the
    /// package list is `url` joined with `package-list` under standard
    /// relative reference resolution, so a base ending in a file name has
    /// that last segment replaced.
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompleteExternalLink` if `url` is absent, or
    /// `Error::MalformedUrl` if `url` cannot serve as a base (e.g. `mailto:`).
    pub fn build(&self) -> Result<ExternalDocumentationLink, Error> {
        let Some(url) = self.url.as_ref() else {
            return Err(Error::IncompleteExternalLink);
        };

        let package_list_url = match self.package_list_url.as_ref() {
            Some(explicit) => explicit.clone(),
            None => url.join(PACKAGE_LIST).map_err(|e| {
                return Error::MalformedUrl {
                    field: "url".to_string(),
                    reason: e.to_string(),
                    value: url_codec::format(url),
                };
            })?,
        };

        log::debug!("resolved external link {url} -> {package_list_url}");
        return Ok(ExternalDocumentationLink {
            package_list_url,
            url: url.clone(),
        });
    }

    /// Set the explicit package list url.
    #[must_use]
    pub fn with_package_list_url(mut self, package_list_url: Url) -> Self {
        self.package_list_url = Some(package_list_url);
        return self;
    }

    /// Set the base url.
    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        return self;
    }
}

impl TryFrom<ExternalDocumentationLinkBuilder> for ExternalDocumentationLink {
    type Error = Error;

    fn try_from(builder: ExternalDocumentationLinkBuilder) -> Result<Self, Self::Error> {
        return builder.build();
    }
}

impl From<ExternalDocumentationLink> for ExternalDocumentationLinkBuilder {
    fn from(link: ExternalDocumentationLink) -> Self {
        return Self {
            package_list_url: Some(link.package_list_url),
            url: Some(link.url),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        return Url::parse(s).unwrap();
    }

    #[test]
    fn directory_base_appends_package_list() {
        let link = ExternalDocumentationLinkBuilder::default()
            .with_url(url("https://example.org/docs/"))
            .build()
            .unwrap();
        assert_eq!(link.url.as_str(), "https://example.org/docs/");
        assert_eq!(link.package_list_url.as_str(), "https://example.org/docs/package-list");
    }

    #[test]
    fn file_base_replaces_last_segment() {
        let link = ExternalDocumentationLink::parse("https://example.com/docs/index.html", None).unwrap();
        assert_eq!(link.package_list_url.as_str(), "https://example.com/docs/package-list");
    }

    #[test]
    fn slashless_base_resolves_against_parent() {
        let link = ExternalDocumentationLink::parse("https://example.org/docs", None).unwrap();
        assert_eq!(link.package_list_url.as_str(), "https://example.org/package-list");
    }

    #[test]
    fn explicit_package_list_is_kept() {
        let link = ExternalDocumentationLink::parse("https://example.org/a", Some("https://example.org/b")).unwrap();
        assert_eq!(link.url.as_str(), "https://example.org/a");
        assert_eq!(link.package_list_url.as_str(), "https://example.org/b");
    }

    #[test]
    fn missing_url_is_incomplete() {
        let empty = ExternalDocumentationLinkBuilder::default();
        assert!(matches!(empty.build(), Err(Error::IncompleteExternalLink)));

        let only_list = ExternalDocumentationLinkBuilder::default().with_package_list_url(url("https://example.org/b"));
        assert!(matches!(only_list.build(), Err(Error::IncompleteExternalLink)));
    }

    #[test]
    fn build_leaves_builder_untouched() {
        let builder = ExternalDocumentationLinkBuilder::default().with_url(url("https://example.org/docs/"));
        let first = builder.build().unwrap();
        assert_eq!(builder.package_list_url, None);
        assert_eq!(builder.build().unwrap(), first);
    }

    #[test]
    fn malformed_strings_fail_before_build() {
        match ExternalDocumentationLinkBuilder::from_strings("https://example.org/", Some("not a url")) {
            Err(Error::MalformedUrl { field, value, .. }) => {
                assert_eq!(field, "package_list_url");
                assert_eq!(value, "not a url");
            },
            other => panic!("expected MalformedUrl, got {other:?}"),
        }
        assert!(matches!(
            ExternalDocumentationLinkBuilder::from_strings("::", None),
            Err(Error::MalformedUrl { .. })
        ));
    }

    #[test]
    fn cannot_be_a_base_url_is_rejected() {
        let result = ExternalDocumentationLink::parse("mailto:docs@example.org", None);
        assert!(matches!(result, Err(Error::MalformedUrl { .. })));
    }
}
