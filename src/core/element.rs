use std::io::Write;

use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::SitemapError;

/// Namespace of the sitemaps.org protocol, always the default namespace.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Whether `c` matches the XML 1.0 `Char` production.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// First character of `text` that an XML 1.0 document cannot carry.
pub fn invalid_xml_char(text: &str) -> Option<char> {
    text.chars().find(|c| !is_xml_char(*c))
}

/// Namespace declarations of a sitemap document.
///
/// The default (unprefixed) slot always holds [`SITEMAP_NS`]; extensions add
/// prefixed slots that are declared on the document root.
///
/// ```
/// use sitemap_ext::core::element::NamespaceMap;
///
/// let namespaces = NamespaceMap::default().with("image", "http://www.google.com/schemas/sitemap-image/1.1");
/// assert!(namespaces.contains("image"));
/// assert!(!namespaces.contains("video"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceMap {
    default: &'static str,
    prefixed: Vec<(&'static str, &'static str)>,
}

impl Default for NamespaceMap {
    fn default() -> Self {
        Self {
            default: SITEMAP_NS,
            prefixed: Vec::new(),
        }
    }
}

impl NamespaceMap {
    /// Adds (or replaces) a prefixed namespace.
    pub fn with(mut self, prefix: &'static str, uri: &'static str) -> Self {
        match self.prefixed.iter_mut().find(|(known, _)| *known == prefix) {
            Some(slot) => slot.1 = uri,
            None => self.prefixed.push((prefix, uri)),
        }
        self
    }

    /// Namespace URI bound to `prefix`, `None` meaning the default slot.
    pub fn uri(&self, prefix: Option<&str>) -> Option<&'static str> {
        match prefix {
            None => Some(self.default),
            Some(prefix) => self
                .prefixed
                .iter()
                .find(|(known, _)| *known == prefix)
                .map(|(_, uri)| *uri),
        }
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.uri(Some(prefix)).is_some()
    }

    /// `xmlns` attributes to put on the root, default namespace first.
    pub fn declarations(&self) -> Vec<(String, &'static str)> {
        std::iter::once(("xmlns".to_string(), self.default))
            .chain(
                self.prefixed
                    .iter()
                    .map(|(prefix, uri)| (format!("xmlns:{}", prefix), *uri)),
            )
            .collect()
    }
}

/// One node of a sitemap document.
///
/// Names are stored qualified (`video:title`); the prefix must be declared by
/// the [`NamespaceMap`] of the document the element ends up in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Element named `local` in the `prefix` namespace (default namespace when `None`).
    pub fn qualified(prefix: Option<&str>, local: &str) -> Self {
        match prefix {
            Some(prefix) => Self::new(format!("{}:{}", prefix, local)),
            None => Self::new(local),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn extend<I: IntoIterator<Item = Element>>(&mut self, children: I) {
        self.children.extend(children);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace prefix of the element name, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// First character of the subtree's text or attribute values that XML 1.0 cannot carry.
    pub fn invalid_char(&self) -> Option<char> {
        self.text
            .as_deref()
            .and_then(invalid_xml_char)
            .or_else(|| {
                self.attributes
                    .iter()
                    .find_map(|(_, value)| invalid_xml_char(value))
            })
            .or_else(|| self.children.iter().find_map(Element::invalid_char))
    }

    /// Fails on the first element or attribute prefix missing from `namespaces`.
    pub fn check_namespaces(&self, namespaces: &NamespaceMap) -> Result<(), SitemapError> {
        let attribute_prefixes = self
            .attributes
            .iter()
            .filter_map(|(name, _)| name.split_once(':').map(|(prefix, _)| prefix))
            .filter(|prefix| *prefix != "xmlns" && *prefix != "xml");

        for prefix in self.prefix().into_iter().chain(attribute_prefixes) {
            if !namespaces.contains(prefix) {
                return Err(SitemapError::UndeclaredNamespace(prefix.to_string()));
            }
        }

        self.children
            .iter()
            .try_for_each(|child| child.check_namespaces(namespaces))
    }

    /// Writes the element and its subtree.
    pub fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), SitemapError> {
        self.write_with(writer, &[])
    }

    /// Writes the element with extra attributes (namespace declarations) in front of its own.
    pub(crate) fn write_with<W: Write>(
        &self,
        writer: &mut Writer<W>,
        extra_attributes: &[(String, &str)],
    ) -> Result<(), SitemapError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in extra_attributes {
            start.push_attribute((name.as_str(), *value));
        }
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| SitemapError::Xml(format!("Failed to write <{}/>: {}", self.name, e)));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| SitemapError::Xml(format!("Failed to write <{}>: {}", self.name, e)))?;

        if let Some(text) = &self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| SitemapError::Xml(format!("Failed to write text of <{}>: {}", self.name, e)))?;
        }

        for child in &self.children {
            child.write(writer)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| SitemapError::Xml(format!("Failed to write </{}>: {}", self.name, e)))
    }

    /// Compact serialization of the subtree, without declaration.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SitemapError> {
        let mut writer = Writer::new(Vec::new());
        self.write(&mut writer)?;
        Ok(writer.into_inner())
    }

    pub fn to_xml_string(&self) -> Result<String, SitemapError> {
        String::from_utf8(self.to_bytes()?)
            .map_err(|e| SitemapError::Xml(format!("Serialized element is not UTF-8: {}", e)))
    }
}
