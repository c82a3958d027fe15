use crate::core::{
    element::Element,
    format::{self, FieldSpec},
    render::{RenderContext, RenderResult, Variant},
};

/// Field holding the path of an entry, joined with protocol and domain.
pub const LOCATION: FieldSpec = FieldSpec::required("location", format::text);

/// Optional `<url>` children, in protocol order.
pub const OPTIONAL_FIELDS: [FieldSpec; 3] = [
    FieldSpec::optional("priority", format::priority),
    FieldSpec::optional("changefreq", format::changefreq),
    FieldSpec::optional("lastmod", format::lastmod),
];

/// Builds the `<url>` element shared by every URL-bearing profile.
///
/// The location is always joined with the protocol and domain of the site.
/// The entry is dropped when it has no location, when the joined URL is 2048
/// characters or longer, or when it holds characters XML cannot carry.
pub fn render_url<E: ?Sized>(ctx: &RenderContext<'_, E>, entry: &E) -> RenderResult {
    let Some(location) = ctx.require(LOCATION.name, entry)? else {
        return Ok(None);
    };
    let Some(url) = ctx.check_url(ctx.site().full_url(&location.to_string()))? else {
        return Ok(None);
    };

    let mut element = Element::new("url");
    element.push(Element::new("loc").with_text(url));
    ctx.append_fields(&mut element, None, &OPTIONAL_FIELDS, entry)?;
    Ok(Some(element))
}

/// Plain sitemaps.org `<urlset>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlSitemap;

impl<E: ?Sized> Variant<E> for UrlSitemap {
    fn render_entry(&self, ctx: &RenderContext<'_, E>, entry: &E) -> RenderResult {
        render_url(ctx, entry)
    }
}
