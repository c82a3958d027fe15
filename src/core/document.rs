use std::io::Write;

use quick_xml::{
    Writer,
    events::{BytesDecl, Event},
};

use crate::core::element::{Element, NamespaceMap};
use crate::error::SitemapError;

/// A sitemap document: the root element and the namespaces declared on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
    namespaces: NamespaceMap,
}

impl Document {
    pub fn new(root_element: &str, namespaces: NamespaceMap) -> Self {
        Self {
            root: Element::new(root_element),
            namespaces,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn namespaces(&self) -> &NamespaceMap {
        &self.namespaces
    }

    /// Top-level entry elements (`url` or `sitemap`).
    pub fn entries(&self) -> &[Element] {
        self.root.children()
    }

    /// Appends an entry element after checking its namespace prefixes.
    pub fn append(&mut self, entry: Element) -> Result<(), SitemapError> {
        entry.check_namespaces(&self.namespaces)?;
        self.root.push(entry);
        Ok(())
    }

    /// Writes the XML declaration and the whole tree to `wtr`.
    pub fn write_to<W: Write>(&self, wtr: W, pretty: bool) -> Result<W, SitemapError> {
        let mut writer = if pretty {
            Writer::new_with_indent(wtr, b' ', 2)
        } else {
            Writer::new(wtr)
        };

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| SitemapError::Xml(format!("Failed to write XML declaration: {}", e)))?;

        let declarations = self.namespaces.declarations();
        self.root.write_with(&mut writer, &declarations)?;

        let mut wtr = writer.into_inner();
        if pretty {
            wtr.write_all(b"\n")
                .map_err(|e| SitemapError::Xml(format!("Failed to write XML end: {}", e)))?;
        }
        wtr.flush()
            .map_err(|e| SitemapError::Xml(format!("Failed to flush XML output: {}", e)))?;
        Ok(wtr)
    }

    pub fn to_bytes(&self, pretty: bool) -> Result<Vec<u8>, SitemapError> {
        self.write_to(Vec::new(), pretty)
    }
}
