//! Configuration schema for multi-pass documentation generation.
//!
//! A [`Configuration`] names where output goes and holds one
//! [`PassConfiguration`] per documented module and platform. Each pass
//! carries its source roots, per-package overrides, source links, and
//! external documentation links. Links declared with only a base url are
//! completed by [`ExternalDocumentationLinkBuilder::build`].

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod external_link;
pub mod platform;
pub mod types;
pub mod url_codec;

pub use crate::config::{Configuration, PassConfiguration};
pub use crate::error::Error;
pub use crate::external_link::{ExternalDocumentationLink, ExternalDocumentationLinkBuilder};
pub use crate::platform::Platform;
pub use crate::types::{PackageOptions, SourceLinkDefinition, SourceRoot};
