use crate::core::{
    element::{Element, NamespaceMap},
    format::{self, FieldSpec, FormatContext, FormatResult, Formatted},
    render::{RenderContext, RenderResult, Variant},
    value::FieldValue,
};

use super::simple::render_url;

pub const VIDEO_PREFIX: &str = "video";
pub const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";

/// Longest accepted video, in seconds (8 hours, exclusive).
pub const MAX_DURATION: i64 = 28800;

/// Highest accepted rating.
pub const MAX_RATING: f64 = 5.0;

/// Children of `<video:video>`, in protocol order.
pub const VIDEO_FIELDS: [FieldSpec; 17] = [
    FieldSpec::required("thumbnail_loc", format::text),
    FieldSpec::required("title", format::text),
    FieldSpec::required("description", format::text),
    FieldSpec::optional("content_loc", format::text),
    FieldSpec::optional("player_loc", format::text),
    FieldSpec::optional("duration", duration),
    FieldSpec::optional("expiration_date", format::datetime),
    FieldSpec::optional("rating", rating),
    FieldSpec::optional("view_count", view_count),
    FieldSpec::optional("publication_date", format::datetime),
    FieldSpec::optional("family_friendly", format::boolean),
    FieldSpec::optional("restriction", restriction),
    FieldSpec::optional("gallery_loc", gallery_loc),
    FieldSpec::optional("prices", prices),
    FieldSpec::optional("requires_subscription", format::boolean),
    FieldSpec::optional("uploader", uploader),
    FieldSpec::optional("live", format::boolean),
];

/// Seconds, strictly between 0 and 8 hours.
pub fn duration(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let seconds = value.as_i64().filter(|seconds| (1..MAX_DURATION).contains(seconds));
    if !ctx.ensure(seconds.is_some(), || {
        format!("Duration {} invalid, must be less than 8hrs ({} seconds)", value, MAX_DURATION)
    })? {
        return Ok(None);
    }
    Ok(seconds.map(|seconds| Formatted::Text(seconds.to_string())))
}

/// Between 0.0 and 5.0, floored to one decimal.
pub fn rating(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let rating = value.as_f64().filter(|rating| (0.0..=MAX_RATING).contains(rating));
    if !ctx.ensure(rating.is_some(), || {
        format!("Rating {} invalid, must be between 0 and {}", value, MAX_RATING)
    })? {
        return Ok(None);
    }
    Ok(rating.map(|rating| Formatted::Text(format::format_one_decimal(rating))))
}

pub fn view_count(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let count = value.as_i64();
    if !ctx.ensure(count.is_some(), || format!("View count {} invalid, must be an integer", value))? {
        return Ok(None);
    }
    Ok(count.map(|count| Formatted::Text(count.to_string())))
}

/// `(relationship, countries)`: countries are space separated country codes.
pub fn restriction(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let Some((relationship, countries)) = value.as_pair() else {
        ctx.ensure(false, || {
            format!("Restriction {:?} invalid, must be a (relationship, countries) pair", value)
        })?;
        return Ok(None);
    };

    let element = ctx
        .element("restriction")
        .with_attribute("relationship", relationship.to_string())
        .with_text(countries.to_string());
    Ok(Some(Formatted::Nodes(vec![element])))
}

/// Gallery URL, optionally paired with a title attribute.
pub fn gallery_loc(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let element = match value.as_pair() {
        Some((url, title)) => ctx
            .element("gallery_loc")
            .with_attribute("title", title.to_string())
            .with_text(url.to_string()),
        None => ctx.element("gallery_loc").with_text(value.to_string()),
    };
    Ok(Some(Formatted::Nodes(vec![element])))
}

/// One `<video:price>` per record: `value` is the text, other keys are attributes.
pub fn prices(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let records = match value {
        FieldValue::List(records) => records.as_slice(),
        single => std::slice::from_ref(single),
    };

    let mut nodes = Vec::with_capacity(records.len());
    for record in records {
        let amount = record.get("value").and_then(FieldValue::as_f64);
        let Some(attributes) = record.as_record().filter(|_| amount.is_some()) else {
            ctx.ensure(false, || format!("Price {:?} invalid, must have a numeric value", record))?;
            continue;
        };

        let mut price = ctx.element("price");
        for (name, attribute) in attributes.iter().filter(|(name, _)| name.as_str() != "value") {
            price = price.with_attribute(name.as_str(), attribute.to_string());
        }
        if let Some(amount) = record.get("value") {
            price = price.with_text(amount.to_string());
        }
        nodes.push(price);
    }

    Ok(Some(Formatted::Nodes(nodes)))
}

/// Uploader name, optionally paired with the URL of their profile.
pub fn uploader(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let element = match value.as_pair() {
        Some((name, info)) => ctx
            .element("uploader")
            .with_attribute("info", info.to_string())
            .with_text(name.to_string()),
        None => ctx.element("uploader").with_text(value.to_string()),
    };
    Ok(Some(Formatted::Nodes(vec![element])))
}

/// `<urlset>` with Google video extensions.
#[derive(Debug, Default, Clone, Copy)]
pub struct VideoSitemap;

impl<E: ?Sized> Variant<E> for VideoSitemap {
    fn namespaces(&self) -> NamespaceMap {
        NamespaceMap::default().with(VIDEO_PREFIX, VIDEO_NS)
    }

    fn render_entry(&self, ctx: &RenderContext<'_, E>, entry: &E) -> RenderResult {
        let Some(mut url) = render_url(ctx, entry)? else {
            return Ok(None);
        };

        let mut video = Element::qualified(Some(VIDEO_PREFIX), "video");
        ctx.append_fields(&mut video, Some(VIDEO_PREFIX), &VIDEO_FIELDS, entry)?;
        url.push(video);
        Ok(Some(url))
    }
}
