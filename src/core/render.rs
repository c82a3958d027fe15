use std::fmt;

use crate::core::{
    config::SitemapConfig,
    element::{Element, NamespaceMap, invalid_xml_char},
    format::{FieldSpec, FormatContext, Formatted},
    source::AttributeSource,
    validate::Validator,
    value::FieldValue,
};
use crate::error::SitemapError;

/// Root element of URL-bearing sitemaps.
pub const URLSET: &str = "urlset";

/// URLs of this length or longer are rejected by search engines.
pub const MAX_URL_LENGTH: usize = 2048;

/// Outcome of rendering one entry: `Ok(None)` means the entry was dropped
/// after a logged validation failure.
pub type RenderResult = Result<Option<Element>, SitemapError>;

/// A sitemap profile.
///
/// A variant names the root element, declares the namespaces its elements use
/// and turns one entry into one top-level element. Extension profiles reuse
/// [`render_url`](crate::sitemap::simple::render_url) and append their own
/// elements to its result.
pub trait Variant<E: ?Sized> {
    fn root_element(&self) -> &'static str {
        URLSET
    }

    fn namespaces(&self) -> NamespaceMap {
        NamespaceMap::default()
    }

    fn render_entry(&self, ctx: &RenderContext<'_, E>, entry: &E) -> RenderResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    /// `https` for requests received over a secure connection.
    pub fn from_secure(secure: bool) -> Self {
        if secure { Protocol::Https } else { Protocol::Http }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protocol and domain prepended to entry locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub protocol: Protocol,
    pub domain: String,
}

impl Default for Site {
    fn default() -> Self {
        Self::new(Protocol::Http, "localhost")
    }
}

impl Site {
    pub fn new(protocol: Protocol, domain: impl Into<String>) -> Self {
        Self {
            protocol,
            domain: domain.into(),
        }
    }

    pub fn http(domain: impl Into<String>) -> Self {
        Self::new(Protocol::Http, domain)
    }

    pub fn https(domain: impl Into<String>) -> Self {
        Self::new(Protocol::Https, domain)
    }

    /// `protocol://domain` followed by `path`.
    pub fn full_url(&self, path: &str) -> String {
        format!("{}://{}{}", self.protocol, self.domain, path)
    }

    /// Leaves absolute URLs untouched, joins everything else with [`full_url`](Site::full_url).
    pub fn absolute_url(&self, location: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            location.to_string()
        } else {
            self.full_url(location)
        }
    }
}

/// Everything a variant needs while rendering the entries of one document.
pub struct RenderContext<'a, E: ?Sized> {
    source: &'a dyn AttributeSource<E>,
    site: &'a Site,
    config: &'a SitemapConfig,
    validator: Validator,
}

impl<'a, E: ?Sized> RenderContext<'a, E> {
    pub fn new(source: &'a dyn AttributeSource<E>, site: &'a Site, config: &'a SitemapConfig) -> Self {
        Self {
            source,
            site,
            config,
            validator: Validator::new(config.debug),
        }
    }

    pub fn site(&self) -> &Site {
        self.site
    }

    pub fn config(&self) -> &SitemapConfig {
        self.config
    }

    /// See [`Validator::ensure`].
    pub fn ensure<F>(&self, condition: bool, message: F) -> Result<bool, SitemapError>
    where
        F: FnOnce() -> String,
    {
        self.validator.ensure(condition, message)
    }

    /// Resolves `field`; `null` values count as absent.
    pub fn get(&self, field: &str, entry: &E) -> Option<FieldValue> {
        self.source
            .resolve(field, entry)
            .filter(|value| !value.is_null())
    }

    /// Resolves and validates a required field.
    pub fn require(&self, field: &str, entry: &E) -> Result<Option<FieldValue>, SitemapError> {
        let value = self.get(field, entry);
        self.ensure(value.is_some(), || format!("Required field \"{}\" missing", field))?;
        Ok(value)
    }

    /// `url` if it is shorter than 2048 characters and holds only XML characters.
    pub fn check_url(&self, url: String) -> Result<Option<String>, SitemapError> {
        let short = url.chars().count() < MAX_URL_LENGTH;
        if !self.ensure(short, || {
            format!("URL \"{}\" invalid, must be shorter than {} characters", url, MAX_URL_LENGTH)
        })? {
            return Ok(None);
        }

        let invalid = invalid_xml_char(&url);
        if !self.ensure(invalid.is_none(), || {
            format!("URL {:?} invalid, {}", url, not_allowed(invalid))
        })? {
            return Ok(None);
        }
        Ok(Some(url))
    }

    /// `false` when the formatted field holds a character XML 1.0 cannot carry.
    fn check_chars(&self, field: &str, invalid: Option<char>) -> Result<bool, SitemapError> {
        self.ensure(invalid.is_none(), || {
            format!("Field \"{}\" invalid, {}", field, not_allowed(invalid))
        })
    }

    /// Formats one resolved field value with the formatter of `spec`.
    pub fn format(
        &self,
        spec: &FieldSpec,
        prefix: Option<&'static str>,
        value: &FieldValue,
    ) -> Result<Option<Formatted>, SitemapError> {
        (spec.format)(value, &FormatContext::new(self.config, prefix))
    }

    /// Resolves, formats and appends `fields` to `parent`, in order.
    ///
    /// Absent fields are skipped. Text results become an element named after
    /// the field in the `prefix` namespace, node results are appended as-is.
    pub fn append_fields(
        &self,
        parent: &mut Element,
        prefix: Option<&'static str>,
        fields: &[FieldSpec],
        entry: &E,
    ) -> Result<(), SitemapError> {
        for spec in fields {
            let value = if spec.required {
                self.require(spec.name, entry)?
            } else {
                self.get(spec.name, entry)
            };
            let Some(value) = value else {
                continue;
            };

            match self.format(spec, prefix, &value)? {
                Some(Formatted::Text(text)) => {
                    if self.check_chars(spec.name, invalid_xml_char(&text))? {
                        parent.push(Element::qualified(prefix, spec.name).with_text(text))
                    }
                }
                Some(Formatted::Nodes(nodes)) => {
                    if self.check_chars(spec.name, nodes.iter().find_map(Element::invalid_char))? {
                        parent.extend(nodes)
                    }
                }
                None => {}
            }
        }
        Ok(())
    }
}

fn not_allowed(invalid: Option<char>) -> String {
    format!(
        "character U+{:04X} is not allowed in XML",
        invalid.map_or(0, u32::from)
    )
}
