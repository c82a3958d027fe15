use thiserror::Error;

#[derive(Error, Debug)]
/// Sitemap error
pub enum SitemapError {
    /// A field, entry or document broke a sitemap protocol rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An element uses a namespace prefix the document never declared.
    #[error("Namespace prefix `{0}` is not declared on the document root")]
    UndeclaredNamespace(String),

    #[error("XML writer from: {0}")]
    Xml(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
