use std::collections::HashMap;

use crate::core::value::FieldValue;

/// Resolves field values for the entries of a sitemap.
///
/// The builder never looks inside an entry itself: every field, including the
/// `location` of an URL, is asked to the source. Returning `None` means the
/// source does not know the field and the element is skipped.
///
/// Any closure `Fn(&str, &E) -> Option<FieldValue>` is a source:
///
/// ```
/// use sitemap_ext::core::source::AttributeSource;
/// use sitemap_ext::core::value::FieldValue;
///
/// struct Page {
///     slug: &'static str,
/// }
///
/// let source = |field: &str, page: &Page| match field {
///     "location" => Some(FieldValue::from(format!("/pages/{}", page.slug))),
///     _ => None,
/// };
///
/// let page = Page { slug: "about" };
/// assert_eq!(source.resolve("location", &page), Some(FieldValue::from("/pages/about")));
/// assert_eq!(source.get("priority", &page, Some(FieldValue::from(0.5))), Some(FieldValue::from(0.5)));
/// ```
pub trait AttributeSource<E: ?Sized> {
    /// Value of `field` for `entry`, `None` when the source does not define it.
    fn resolve(&self, field: &str, entry: &E) -> Option<FieldValue>;

    /// Like [`resolve`](AttributeSource::resolve) with a fallback for undefined fields.
    fn get(&self, field: &str, entry: &E, default: Option<FieldValue>) -> Option<FieldValue> {
        self.resolve(field, entry).or(default)
    }
}

impl<E, F> AttributeSource<E> for F
where
    E: ?Sized,
    F: Fn(&str, &E) -> Option<FieldValue>,
{
    fn resolve(&self, field: &str, entry: &E) -> Option<FieldValue> {
        self(field, entry)
    }
}

/// A source that defines no field at all.
///
/// Used by sitemaps whose entries carry their own data, like the index.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAttributes;

impl<E: ?Sized> AttributeSource<E> for NoAttributes {
    fn resolve(&self, _field: &str, _entry: &E) -> Option<FieldValue> {
        None
    }
}

/// Resolves fields as keys of JSON object entries.
///
/// A `null` member is reported as [`FieldValue::Null`], which the builder
/// treats as an absent field.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonAttributes;

impl AttributeSource<serde_json::Value> for JsonAttributes {
    fn resolve(&self, field: &str, entry: &serde_json::Value) -> Option<FieldValue> {
        entry.get(field).map(FieldValue::from)
    }
}

type PerEntry<'a, E> = Box<dyn Fn(&E) -> Option<FieldValue> + 'a>;

enum Attribute<'a, E: ?Sized> {
    Static(FieldValue),
    PerEntry(PerEntry<'a, E>),
}

/// Field registry mixing per-entry computations and constant values.
///
/// # Examples
///
/// ```
/// use sitemap_ext::core::source::{AttributeMap, AttributeSource};
/// use sitemap_ext::core::value::FieldValue;
///
/// struct Article {
///     id: u32,
/// }
///
/// let source = AttributeMap::new()
///     .with("location", |article: &Article| Some(format!("/articles/{}", article.id).into()))
///     .constant("changefreq", "daily");
///
/// let article = Article { id: 7 };
/// assert_eq!(source.resolve("location", &article), Some(FieldValue::from("/articles/7")));
/// assert_eq!(source.resolve("changefreq", &article), Some(FieldValue::from("daily")));
/// assert_eq!(source.resolve("priority", &article), None);
/// ```
pub struct AttributeMap<'a, E: ?Sized> {
    attributes: HashMap<String, Attribute<'a, E>>,
}

impl<E: ?Sized> Default for AttributeMap<'_, E> {
    fn default() -> Self {
        Self {
            attributes: HashMap::new(),
        }
    }
}

impl<'a, E: ?Sized> AttributeMap<'a, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes `field` from each entry.
    pub fn with<F>(mut self, field: &str, compute: F) -> Self
    where
        F: Fn(&E) -> Option<FieldValue> + 'a,
    {
        self.attributes
            .insert(field.to_string(), Attribute::PerEntry(Box::new(compute)));
        self
    }

    /// Uses the same value of `field` for every entry.
    pub fn constant(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.attributes
            .insert(field.to_string(), Attribute::Static(value.into()));
        self
    }

    pub fn defines(&self, field: &str) -> bool {
        self.attributes.contains_key(field)
    }
}

impl<E: ?Sized> AttributeSource<E> for AttributeMap<'_, E> {
    fn resolve(&self, field: &str, entry: &E) -> Option<FieldValue> {
        match self.attributes.get(field)? {
            Attribute::Static(value) => Some(value.clone()),
            Attribute::PerEntry(compute) => compute(entry),
        }
    }
}
