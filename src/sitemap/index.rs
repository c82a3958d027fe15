use crate::core::{
    element::Element,
    render::{RenderContext, RenderResult, Variant},
};

/// Root element of a sitemap index.
pub const SITEMAPINDEX: &str = "sitemapindex";

/// A `<sitemapindex>` listing other sitemaps.
///
/// Entries are the sitemap URLs themselves. Absolute URLs are used as given,
/// paths are joined with the protocol and domain of the site. No attribute
/// source is consulted.
///
/// ```
/// use sitemap_ext::core::config::SitemapConfig;
/// use sitemap_ext::core::sitemap::SitemapBuilder;
/// use sitemap_ext::sitemap::SitemapIndex;
///
/// let index = SitemapBuilder::<str>::new(&SitemapIndex)
///     .domain("example.com")
///     .config(SitemapConfig::default().pretty(false))
///     .build();
///
/// let xml = String::from_utf8(index.render(["/sitemap-simple.xml"]).unwrap()).unwrap();
/// assert!(xml.contains("<sitemap><loc>http://example.com/sitemap-simple.xml</loc></sitemap>"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SitemapIndex;

impl<E: AsRef<str> + ?Sized> Variant<E> for SitemapIndex {
    fn root_element(&self) -> &'static str {
        SITEMAPINDEX
    }

    fn render_entry(&self, ctx: &RenderContext<'_, E>, entry: &E) -> RenderResult {
        let Some(url) = ctx.check_url(ctx.site().absolute_url(entry.as_ref()))? else {
            return Ok(None);
        };
        Ok(Some(
            Element::new("sitemap").with_child(Element::new("loc").with_text(url)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::SitemapConfig, render::Site, source::NoAttributes};

    #[test]
    fn sitemap_element_holds_only_loc() {
        let site = Site::http("example.com");
        let config = SitemapConfig::default();
        let ctx: RenderContext<'_, str> = RenderContext::new(&NoAttributes, &site, &config);

        let element = SitemapIndex
            .render_entry(&ctx, "http://example.com/sitemap-a.xml")
            .unwrap()
            .unwrap();
        assert_eq!(element.name(), "sitemap");
        assert_eq!(element.children().len(), 1);
        assert_eq!(
            element.child("loc").and_then(Element::text),
            Some("http://example.com/sitemap-a.xml")
        );
    }

    #[test]
    fn root_is_sitemapindex() {
        assert_eq!(Variant::<str>::root_element(&SitemapIndex), "sitemapindex");
    }

    #[test]
    fn long_sitemap_url_fails_in_debug() {
        let site = Site::http("example.com");
        let config = SitemapConfig::default().debug(true);
        let ctx: RenderContext<'_, String> = RenderContext::new(&NoAttributes, &site, &config);

        let url = format!("http://example.com/{}.xml", "a".repeat(2048));
        assert!(SitemapIndex.render_entry(&ctx, &url).is_err());
    }
}
