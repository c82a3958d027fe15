#![allow(dead_code)]

mod mocks;

pub use mocks::MockFile;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use sitemap_ext::core::{source::AttributeMap, value::FieldValue};

/// Name shared by every fixture model, escaped as `&amp;` in the output.
pub const NAME: &str = "section/page.php&q=name";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub update_date: NaiveDateTime,
    pub pub_date: NaiveDateTime,
}

impl Model {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            update_date: noon(2013, 1, 1),
            pub_date: noon(2010, 1, 1),
        }
    }

    pub fn absolute_url(&self) -> String {
        format!("/models/{}", self.name)
    }
}

pub fn noon(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .unwrap()
}

pub fn models(count: usize) -> Vec<Model> {
    (0..count).map(|_| Model::new(NAME)).collect()
}

/// Location, priority 1, daily and the update day as lastmod.
pub fn simple_source<'a>() -> AttributeMap<'a, Model> {
    AttributeMap::new()
        .with("location", |model: &Model| Some(model.absolute_url().into()))
        .constant("priority", 1)
        .constant("changefreq", "daily")
        .with("lastmod", |model: &Model| Some(model.update_date.date().into()))
}

pub fn news_source<'a>() -> AttributeMap<'a, Model> {
    simple_source()
        .constant(
            "publication",
            FieldValue::record([("name", "The Example Timesname"), ("language", "en")]),
        )
        .constant("access", "Subscription")
        .constant("genres", ["PressRelease", "Blog"])
        .with("publication_date", |model: &Model| Some(model.pub_date.into()))
        .with("title", |model: &Model| Some(FieldValue::from(&model.name)))
        .constant("keywords", ["business", "merger", "acquisition"])
        .constant("stock_tickers", ["NASDAQ:A", "NASDAQ:B"])
}

pub fn video_source<'a>() -> AttributeMap<'a, Model> {
    simple_source()
        .constant("thumbnail_loc", "http://www.example.com/thumbs/123.jpg")
        .with("title", |model: &Model| Some(FieldValue::from(&model.name)))
        .constant(
            "description",
            "Alkis shows you how to get perfectly done steaks every time",
        )
        .constant("content_loc", "http://www.example.com/video123.flv")
        .constant("duration", 600)
        .with("expiration_date", |model: &Model| {
            Some((model.pub_date + TimeDelta::days(10)).into())
        })
        .constant("rating", 4.2)
        .constant("view_count", 12345)
        .with("publication_date", |model: &Model| Some(model.pub_date.into()))
        .constant("family_friendly", true)
        .constant("restriction", ("allow", "IE GB US CA"))
        .constant("gallery_loc", ("http://cooking.example.com", "Cooking Videos"))
        .constant(
            "prices",
            vec![
                FieldValue::record([
                    ("currency", FieldValue::from("USD")),
                    ("value", FieldValue::from(1.99)),
                    ("type", FieldValue::from("rent")),
                    ("resolution", FieldValue::from("SD")),
                ]),
                FieldValue::record([
                    ("currency", FieldValue::from("USD")),
                    ("value", FieldValue::from(10.99)),
                    ("type", FieldValue::from("own")),
                    ("resolution", FieldValue::from("HD")),
                ]),
            ],
        )
        .constant("requires_subscription", false)
        .constant(
            "uploader",
            ("GrillyMcGrillerson", "http://www.example.com/users/grillymcgrillerson"),
        )
        .constant("live", true)
}

pub fn image_source<'a>() -> AttributeMap<'a, Model> {
    simple_source().constant(
        "images",
        vec![FieldValue::record([
            ("loc", "http://www.example.com/image"),
            ("geo_location", "Washington DC"),
            ("caption", "Full size image"),
            ("license", "http://www.example.com/license"),
        ])],
    )
}

/// Asserts that every fragment appears in `xml`.
pub fn assert_contains(xml: &str, fragments: &[&str]) {
    for fragment in fragments {
        assert!(xml.contains(fragment), "Missing {}\n{}", fragment, xml);
    }
}
