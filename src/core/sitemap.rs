use std::{
    borrow::Borrow,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    time::{Duration, Instant},
};

use log::{debug, info};

use crate::core::{
    config::SitemapConfig,
    document::Document,
    render::{Protocol, RenderContext, Site, Variant},
    source::{AttributeSource, NoAttributes},
};
use crate::error::SitemapError;

static NO_ATTRIBUTES: NoAttributes = NoAttributes;

/// Summary of one render.
#[derive(Debug, Clone)]
pub struct RenderExecution {
    /// The time when rendering started
    pub start: Instant,
    /// The time when the document was fully written
    pub end: Instant,
    pub duration: Duration,
    /// Entries appended to the document
    pub entry_count: usize,
    /// Entries dropped after a logged validation failure
    pub skip_count: usize,
    /// Serialized size of the appended entries
    pub byte_count: usize,
    /// Whether the size budget stopped the render early
    pub truncated: bool,
}

impl RenderExecution {
    fn log_summary(&self) {
        info!(
            "Sitemap rendered: {} entries, {} skipped, {} bytes{}",
            self.entry_count,
            self.skip_count,
            self.byte_count,
            if self.truncated { " (truncated)" } else { "" }
        );
    }
}

/// A configured sitemap, ready to render entry sequences.
///
/// Each call to [`render`](Sitemap::render) builds a fresh document, so the
/// same sitemap can render many entry sequences one after the other.
pub struct Sitemap<'a, E: ?Sized> {
    variant: &'a dyn Variant<E>,
    source: &'a dyn AttributeSource<E>,
    site: Site,
    config: SitemapConfig,
}

impl<E: ?Sized> Sitemap<'_, E> {
    pub fn config(&self) -> &SitemapConfig {
        &self.config
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Renders `entries` to an XML byte string.
    pub fn render<I>(&self, entries: I) -> Result<Vec<u8>, SitemapError>
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        let (document, mut execution) = self.build_document(entries)?;
        let bytes = document.to_bytes(self.config.pretty)?;
        execution.end = Instant::now();
        execution.duration = execution.start.elapsed();
        execution.log_summary();
        Ok(bytes)
    }

    /// Renders `entries` into `wtr` and reports what happened.
    pub fn render_to<W, I>(&self, wtr: W, entries: I) -> Result<RenderExecution, SitemapError>
    where
        W: Write,
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        let (document, mut execution) = self.build_document(entries)?;
        document.write_to(BufWriter::new(wtr), self.config.pretty)?;
        execution.end = Instant::now();
        execution.duration = execution.start.elapsed();
        execution.log_summary();
        Ok(execution)
    }

    /// Renders `entries` into a new file at `path`.
    pub fn render_to_path<P, I>(&self, path: P, entries: I) -> Result<RenderExecution, SitemapError>
    where
        P: AsRef<Path>,
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        let file = File::create(path)
            .map_err(|e| SitemapError::Xml(format!("Failed to create XML file: {}", e)))?;
        self.render_to(file, entries)
    }

    /// Builds the document tree for `entries`, enforcing the size budget.
    ///
    /// Entries are consumed one at a time. Once the serialized size of the
    /// appended entries exceeds `max_size` no further entry is read; the
    /// entries already appended stay in the document.
    pub fn build_document<I>(&self, entries: I) -> Result<(Document, RenderExecution), SitemapError>
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        let start = Instant::now();
        debug!("Start of sitemap render: <{}>", self.variant.root_element());

        let ctx = RenderContext::new(self.source, &self.site, &self.config);
        let mut document = Document::new(self.variant.root_element(), self.variant.namespaces());
        let mut entry_count = 0;
        let mut skip_count = 0;
        let mut byte_count = 0;
        let mut truncated = false;

        for entry in entries {
            let Some(element) = self.variant.render_entry(&ctx, entry.borrow())? else {
                skip_count += 1;
                continue;
            };

            let size = element.to_bytes()?.len();
            document.append(element)?;
            byte_count += size;
            entry_count += 1;
            debug!("Entry {} appended: {} bytes", entry_count, size);

            if byte_count > self.config.max_size {
                ctx.ensure(false, || format!("Maximum size of {} exceeded", self.config.max_size))?;
                truncated = true;
                break;
            }
        }

        debug!("End of sitemap render: {} entries", entry_count);

        Ok((
            document,
            RenderExecution {
                start,
                end: Instant::now(),
                duration: start.elapsed(),
                entry_count,
                skip_count,
                byte_count,
                truncated,
            },
        ))
    }
}

/// Builder for [`Sitemap`]s.
///
/// # Examples
///
/// ```
/// use sitemap_ext::core::config::SitemapConfig;
/// use sitemap_ext::core::sitemap::SitemapBuilder;
/// use sitemap_ext::core::source::AttributeMap;
/// use sitemap_ext::sitemap::UrlSitemap;
///
/// let source = AttributeMap::new()
///     .with("location", |path: &String| Some(path.as_str().into()))
///     .constant("changefreq", "weekly");
///
/// let sitemap = SitemapBuilder::<String>::new(&UrlSitemap)
///     .source(&source)
///     .domain("example.com")
///     .config(SitemapConfig::default().pretty(false))
///     .build();
///
/// let xml = sitemap.render(vec!["/a".to_string()]).unwrap();
/// let xml = String::from_utf8(xml).unwrap();
/// assert!(xml.contains("<url><loc>http://example.com/a</loc><changefreq>weekly</changefreq></url>"));
/// ```
pub struct SitemapBuilder<'a, E: ?Sized> {
    variant: &'a dyn Variant<E>,
    source: &'a dyn AttributeSource<E>,
    site: Site,
    config: SitemapConfig,
}

impl<'a, E: ?Sized> SitemapBuilder<'a, E> {
    pub fn new(variant: &'a dyn Variant<E>) -> SitemapBuilder<'a, E> {
        Self {
            variant,
            source: &NO_ATTRIBUTES,
            site: Site::default(),
            config: SitemapConfig::default(),
        }
    }

    pub fn source(mut self, source: &'a dyn AttributeSource<E>) -> SitemapBuilder<'a, E> {
        self.source = source;
        self
    }

    pub fn site(mut self, site: Site) -> SitemapBuilder<'a, E> {
        self.site = site;
        self
    }

    pub fn domain(mut self, domain: &str) -> SitemapBuilder<'a, E> {
        self.site.domain = domain.to_string();
        self
    }

    /// Uses `https` when the originating request was secure.
    pub fn secure(mut self, secure: bool) -> SitemapBuilder<'a, E> {
        self.site.protocol = Protocol::from_secure(secure);
        self
    }

    pub fn config(mut self, config: SitemapConfig) -> SitemapBuilder<'a, E> {
        self.config = config;
        self
    }

    pub fn build(self) -> Sitemap<'a, E> {
        Sitemap {
            variant: self.variant,
            source: self.source,
            site: self.site,
            config: self.config,
        }
    }
}
