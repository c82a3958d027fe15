/// Rendering options handed to every sitemap.
pub mod config;

/// Document tree and serialization.
pub mod document;

/// XML element nodes and namespace maps.
pub mod element;

/// Field descriptors and the shared field formatters.
pub mod format;

/// Variant strategy trait and the per-render context.
pub mod render;

/// Sitemap builder driving a variant across entries.
pub mod sitemap;

/// Attribute sources resolving field values for entries.
pub mod source;

/// The validation contract shared by all formatters.
pub mod validate;

/// Dynamic field values.
pub mod value;
