//! Sitemap profiles.
//!
//! Every profile implements [`Variant`](crate::core::render::Variant). The
//! URL-bearing extensions compose [`simple::render_url`] with their own
//! elements; the [`SitemapIndex`] lists other sitemaps.
//!
//! | Profile          | Root           | Extra namespace                                       |
//! |------------------|----------------|-------------------------------------------------------|
//! | [`UrlSitemap`]   | `urlset`       |                                                       |
//! | [`SitemapIndex`] | `sitemapindex` |                                                       |
//! | `ImageSitemap`   | `urlset`       | `image` http://www.google.com/schemas/sitemap-image/1.1 |
//! | `VideoSitemap`   | `urlset`       | `video` http://www.google.com/schemas/sitemap-video/1.1 |
//! | `NewsSitemap`    | `urlset`       | `news` http://www.google.com/schemas/sitemap-news/0.9   |
//! | `MobileSitemap`  | `urlset`       | `mobile` http://www.google.com/schemas/sitemap-mobile/1.0 |
pub mod index;
pub mod simple;

#[cfg(feature = "image")]
pub mod image;

#[cfg(feature = "mobile")]
pub mod mobile;

#[cfg(feature = "news")]
pub mod news;

#[cfg(feature = "video")]
pub mod video;

pub use index::SitemapIndex;
pub use simple::UrlSitemap;

#[cfg(feature = "image")]
pub use image::ImageSitemap;

#[cfg(feature = "mobile")]
pub use mobile::MobileSitemap;

#[cfg(feature = "news")]
pub use news::NewsSitemap;

#[cfg(feature = "video")]
pub use video::VideoSitemap;
