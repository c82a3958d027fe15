use crate::core::{
    element::NamespaceMap,
    format::{FieldSpec, FormatContext, FormatResult, Formatted},
    render::{RenderContext, RenderResult, Variant},
    value::FieldValue,
};

use super::simple::render_url;

pub const IMAGE_PREFIX: &str = "image";
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Search engines ignore images past this count on a single page.
pub const MAX_IMAGES: usize = 1000;

/// Children of `<image:image>`, in protocol order.
pub const IMAGE_ATTRS: [&str; 5] = ["loc", "caption", "geo_location", "title", "license"];

pub const IMAGE_FIELDS: [FieldSpec; 1] = [FieldSpec::optional("images", images)];

/// One `<image:image>` per record; absent and null keys are left out.
pub fn images(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let items = match value {
        FieldValue::List(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };

    let mut nodes = Vec::with_capacity(items.len().min(MAX_IMAGES));
    for item in items {
        if nodes.len() == MAX_IMAGES {
            ctx.ensure(false, || {
                format!("Maximum number of images ({}) reached on a single page", MAX_IMAGES)
            })?;
            break;
        }

        let Some(record) = item.as_record() else {
            ctx.ensure(false, || format!("Image {:?} invalid, must be a record", item))?;
            continue;
        };

        let mut image = ctx.element("image");
        for attr in IMAGE_ATTRS {
            if let Some(value) = record.get(attr).filter(|value| !value.is_null()) {
                image.push(ctx.element(attr).with_text(value.to_string()));
            }
        }
        nodes.push(image);
    }

    Ok(Some(Formatted::Nodes(nodes)))
}

/// `<urlset>` with Google image extensions.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageSitemap;

impl<E: ?Sized> Variant<E> for ImageSitemap {
    fn namespaces(&self) -> NamespaceMap {
        NamespaceMap::default().with(IMAGE_PREFIX, IMAGE_NS)
    }

    fn render_entry(&self, ctx: &RenderContext<'_, E>, entry: &E) -> RenderResult {
        let Some(mut url) = render_url(ctx, entry)? else {
            return Ok(None);
        };
        ctx.append_fields(&mut url, Some(IMAGE_PREFIX), &IMAGE_FIELDS, entry)?;
        Ok(Some(url))
    }
}
