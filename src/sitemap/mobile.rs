use crate::core::{
    element::{Element, NamespaceMap},
    render::{RenderContext, RenderResult, Variant},
};

use super::simple::render_url;

pub const MOBILE_PREFIX: &str = "mobile";
pub const MOBILE_NS: &str = "http://www.google.com/schemas/sitemap-mobile/1.0";

/// `<urlset>` whose URLs are all flagged with an empty `<mobile:mobile/>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MobileSitemap;

impl<E: ?Sized> Variant<E> for MobileSitemap {
    fn namespaces(&self) -> NamespaceMap {
        NamespaceMap::default().with(MOBILE_PREFIX, MOBILE_NS)
    }

    fn render_entry(&self, ctx: &RenderContext<'_, E>, entry: &E) -> RenderResult {
        Ok(render_url(ctx, entry)?.map(|url| url.with_child(Element::qualified(Some(MOBILE_PREFIX), "mobile"))))
    }
}
