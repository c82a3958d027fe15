#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 <div align="center">
   <h1>sitemap-ext</h1>
   <h3>Attribute-driven sitemap XML with Google extensions</h3>

   ![license](https://shields.io/badge/license-MIT%2FApache--2.0-blue)

  </div>

 # sitemap-ext

 Builds [sitemaps.org](https://www.sitemaps.org/protocol.html) documents from any sequence of entries.
 The builder never inspects an entry itself: every field is asked to an **attribute source**, so the same
 entries can feed a plain sitemap, a news sitemap or a video sitemap without any change to their type.

 ## Core Concepts

- **Variant:** A sitemap profile. It names the root element, declares its namespaces and turns one entry into one element.
- **AttributeSource:** Resolves field values (`location`, `priority`, `images`, ...) for an entry. Closures, `AttributeMap` and `JsonAttributes` are provided.
- **Formatter:** Validates and formats one field value (`priority` floored to one decimal, booleans as `yes`/`no`, ...).
- **Validator:** The single validation contract. With `DEBUG` on a failure aborts the render, otherwise it is logged and the offending field or entry is left out.
- **Sitemap:** A variant, a source, a site and a configuration, ready to render entries to bytes, a writer or a file.

 ## Features

The extension profiles can be enabled one by one:

| **Feature** | **Description**                                         |
|-------------|---------------------------------------------------------|
| image       | Enables `ImageSitemap` (`image:` namespace)             |
| video       | Enables `VideoSitemap` (`video:` namespace)             |
| news        | Enables `NewsSitemap` (`news:` namespace)               |
| mobile      | Enables `MobileSitemap` (`mobile:` namespace)           |
| full        | Enables all available features (default)                |

`UrlSitemap` and `SitemapIndex` are always available.

 ## Getting Started
 Make sure you activated the suitable features crate on Cargo.toml:

```toml
[dependencies]
sitemap-ext = { version = "<version>", features = ["<full|image|video|news|mobile>"] }
```

Then, on your main.rs:

```rust
# use chrono::NaiveDate;
# use sitemap_ext::{
#     core::{config::SitemapConfig, sitemap::SitemapBuilder, source::AttributeMap, value::FieldValue},
#     error::SitemapError,
#     sitemap::UrlSitemap,
# };
struct Article {
    slug: String,
    published: NaiveDate,
}

fn main() -> Result<(), SitemapError> {
    let articles = vec![Article {
        slug: "hello-world".to_string(),
        published: NaiveDate::from_ymd_opt(2013, 1, 1).unwrap(),
    }];

    let source = AttributeMap::new()
        .with("location", |article: &Article| Some(FieldValue::from(format!("/blog/{}", article.slug))))
        .with("lastmod", |article: &Article| Some(FieldValue::from(article.published)))
        .constant("changefreq", "monthly")
        .constant("priority", 0.8);

    let sitemap = SitemapBuilder::<Article>::new(&UrlSitemap)
        .source(&source)
        .domain("example.com")
        .secure(true)
        .config(SitemapConfig::default().pretty(false))
        .build();

    let xml = String::from_utf8(sitemap.render(&articles)?).unwrap();
    assert!(xml.contains(
        "<url><loc>https://example.com/blog/hello-world</loc><priority>0.8</priority>\
         <changefreq>monthly</changefreq><lastmod>2013-01-01</lastmod></url>"
    ));

    Ok(())
}
```

 ## Configuration

`SitemapConfig` can be built in code or read from JSON with the same keys as the settings it mirrors:

```rust
# use sitemap_ext::core::config::SitemapConfig;
let config = SitemapConfig::from_json(r#"{"DEBUG": true, "MAX_SIZE": 1048576, "PRETTY": false}"#).unwrap();
assert!(config.debug);
assert_eq!(config.max_size, 1048576);
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.

 ## Contribution
 Unless you explicitly state otherwise, any contribution intentionally submitted
 for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
 dual licensed as above, without any additional terms or conditions

 */

/// Core module for sitemap rendering
pub mod core;

/// Error types for sitemap rendering
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of sitemap profiles (for exemple: plain urlset and sitemap index)
pub mod sitemap;
