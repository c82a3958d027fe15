use crate::core::{
    element::{Element, NamespaceMap},
    format::{self, FieldSpec, FormatContext, FormatResult, Formatted},
    render::{RenderContext, RenderResult, Variant},
    value::FieldValue,
};

use super::simple::render_url;

pub const NEWS_PREFIX: &str = "news";
pub const NEWS_NS: &str = "http://www.google.com/schemas/sitemap-news/0.9";

/// Accepted `<news:access>` levels, lowercase.
pub const ACCESSES: [&str; 2] = ["subscription", "registration"];

/// Accepted `<news:genres>` values.
pub const GENRES: [&str; 6] = ["PressRelease", "Satire", "Blog", "OpEd", "Opinion", "UserGenerated"];

/// Children of `<news:news>`, in protocol order.
pub const NEWS_FIELDS: [FieldSpec; 8] = [
    FieldSpec::required("publication", publication),
    FieldSpec::optional("access", access),
    FieldSpec::optional("genres", genres),
    FieldSpec::required("publication_date", format::datetime),
    FieldSpec::required("title", format::text),
    FieldSpec::optional("geo_locations", format::text),
    FieldSpec::optional("keywords", format::comma_separated),
    FieldSpec::optional("stock_tickers", format::comma_separated),
];

/// `<news:publication>` holding the publication's name and language.
pub fn publication(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let name = value.get("name").filter(|name| !name.is_null());
    let language = value.get("language").filter(|language| !language.is_null());
    let (Some(name), Some(language)) = (name, language) else {
        ctx.ensure(false, || {
            format!("Publication {:?} invalid, must have a name and a language", value)
        })?;
        return Ok(None);
    };

    let element = ctx
        .element("publication")
        .with_child(ctx.element("name").with_text(name.to_string()))
        .with_child(ctx.element("language").with_text(language.to_string()));
    Ok(Some(Formatted::Nodes(vec![element])))
}

/// Case-insensitive access level, written title-cased.
pub fn access(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let level = value
        .as_str()
        .map(str::to_lowercase)
        .filter(|level| ACCESSES.contains(&level.as_str()));
    if !ctx.ensure(level.is_some(), || {
        format!("Access level {} invalid, must be one of {}", value, ACCESSES.join(","))
    })? {
        return Ok(None);
    }
    Ok(level.map(|level| Formatted::Text(title_case(&level))))
}

/// Comma separated genres; one unknown genre leaves the field out.
pub fn genres(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let items = match value {
        FieldValue::List(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };

    for item in items {
        let known = item.as_str().is_some_and(|genre| GENRES.contains(&genre));
        if !ctx.ensure(known, || {
            format!("Genre {} invalid, must be one of {}", item, GENRES.join(","))
        })? {
            return Ok(None);
        }
    }
    Ok(Some(Formatted::Text(format::format_comma_sep(value))))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `<urlset>` with Google News extensions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NewsSitemap;

impl<E: ?Sized> Variant<E> for NewsSitemap {
    fn namespaces(&self) -> NamespaceMap {
        NamespaceMap::default().with(NEWS_PREFIX, NEWS_NS)
    }

    fn render_entry(&self, ctx: &RenderContext<'_, E>, entry: &E) -> RenderResult {
        let Some(mut url) = render_url(ctx, entry)? else {
            return Ok(None);
        };

        let mut news = Element::qualified(Some(NEWS_PREFIX), "news");
        ctx.append_fields(&mut news, Some(NEWS_PREFIX), &NEWS_FIELDS, entry)?;
        url.push(news);
        Ok(Some(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::SitemapConfig, render::Site, source::AttributeMap};
    use crate::error::SitemapError;
    use chrono::NaiveDate;

    fn text_of(result: FormatResult) -> Option<String> {
        match result.unwrap() {
            Some(Formatted::Text(text)) => Some(text),
            Some(Formatted::Nodes(nodes)) => panic!("Expected text, got {:?}", nodes),
            None => None,
        }
    }

    #[test]
    fn access_is_title_cased() {
        let config = SitemapConfig::default().debug(true);
        let ctx = FormatContext::new(&config, Some(NEWS_PREFIX));

        assert_eq!(text_of(access(&"subscription".into(), &ctx)), Some("Subscription".to_string()));
        assert_eq!(text_of(access(&"REGISTRATION".into(), &ctx)), Some("Registration".to_string()));
        assert!(access(&"free".into(), &ctx).is_err());
    }

    #[test]
    fn genres_must_all_be_known() {
        let config = SitemapConfig::default().debug(true);
        let ctx = FormatContext::new(&config, Some(NEWS_PREFIX));

        assert_eq!(
            text_of(genres(&["PressRelease", "Blog"].into(), &ctx)),
            Some("PressRelease, Blog".to_string())
        );
        assert_eq!(text_of(genres(&"Satire".into(), &ctx)), Some("Satire".to_string()));
        match genres(&["Blog", "Gossip"].into(), &ctx) {
            Err(SitemapError::Validation(message)) => assert!(message.contains("Gossip")),
            other => panic!("Expected Validation error, got {:?}", other),
        }

        let lenient = SitemapConfig::default();
        let ctx = FormatContext::new(&lenient, Some(NEWS_PREFIX));
        assert_eq!(genres(&["Blog", "Gossip"].into(), &ctx).unwrap(), None);
    }

    #[test]
    fn publication_needs_name_and_language() {
        let config = SitemapConfig::default().debug(true);
        let ctx = FormatContext::new(&config, Some(NEWS_PREFIX));

        let value = FieldValue::record([("name", "The Example Times"), ("language", "en")]);
        match publication(&value, &ctx).unwrap() {
            Some(Formatted::Nodes(nodes)) => assert_eq!(
                nodes[0].to_xml_string().unwrap(),
                "<news:publication><news:name>The Example Times</news:name><news:language>en</news:language></news:publication>"
            ),
            other => panic!("Expected nodes, got {:?}", other),
        }

        let value = FieldValue::record([("name", "The Example Times")]);
        assert!(publication(&value, &ctx).is_err());
    }

    #[test]
    fn news_element_follows_url_children() {
        let source: AttributeMap<'_, str> = AttributeMap::new()
            .with("location", |path: &str| Some(FieldValue::from(path)))
            .constant("publication", FieldValue::record([("name", "Times"), ("language", "en")]))
            .constant(
                "publication_date",
                NaiveDate::from_ymd_opt(2010, 1, 1).and_then(|day| day.and_hms_opt(12, 0, 0)),
            )
            .with("title", |path: &str| Some(FieldValue::from(path)))
            .constant("keywords", ["business", "merger"]);
        let site = Site::http("example.com");
        let config = SitemapConfig::default().debug(true);
        let ctx: RenderContext<'_, str> = RenderContext::new(&source, &site, &config);

        let url = NewsSitemap.render_entry(&ctx, "/story").unwrap().unwrap();
        let news = url.child("news:news").unwrap();
        let names: Vec<&str> = news.children().iter().map(Element::name).collect();
        assert_eq!(
            names,
            vec!["news:publication", "news:publication_date", "news:title", "news:keywords"]
        );
        assert_eq!(
            news.child("news:publication_date").and_then(Element::text),
            Some("2010-01-01T12:00:00")
        );
    }

    #[test]
    fn missing_title_fails_in_debug() {
        let source: AttributeMap<'_, str> = AttributeMap::new()
            .with("location", |path: &str| Some(FieldValue::from(path)))
            .constant("publication", FieldValue::record([("name", "Times"), ("language", "en")]))
            .constant("publication_date", NaiveDate::from_ymd_opt(2010, 1, 1));
        let site = Site::default();
        let config = SitemapConfig::default().debug(true);
        let ctx: RenderContext<'_, str> = RenderContext::new(&source, &site, &config);

        match NewsSitemap.render_entry(&ctx, "/story") {
            Err(SitemapError::Validation(message)) => assert!(message.contains("\"title\"")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
