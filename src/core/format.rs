use chrono::FixedOffset;

use crate::core::{
    config::SitemapConfig,
    element::Element,
    validate::Validator,
    value::{FieldValue, Temporal},
};
use crate::error::SitemapError;

/// Accepted `<changefreq>` tokens.
pub const FREQS: [&str; 7] = ["always", "hourly", "daily", "weekly", "monthly", "yearly", "never"];

/// Output of a field formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted {
    /// Text of a single element named after the field.
    Text(String),
    /// Ready-made elements appended as they are.
    Nodes(Vec<Element>),
}

/// `Ok(None)` means the value failed validation and the field is left out.
pub type FormatResult = Result<Option<Formatted>, SitemapError>;

/// Validates and formats one field value.
pub type FormatFn = fn(&FieldValue, &FormatContext<'_>) -> FormatResult;

/// Static description of one field of a sitemap variant.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub format: FormatFn,
}

impl FieldSpec {
    pub const fn optional(name: &'static str, format: FormatFn) -> Self {
        Self {
            name,
            required: false,
            format,
        }
    }

    pub const fn required(name: &'static str, format: FormatFn) -> Self {
        Self {
            name,
            required: true,
            format,
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("required", &self.required)
            .finish()
    }
}

/// What a formatter may use besides the value itself.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    validator: Validator,
    prefix: Option<&'static str>,
    config: &'a SitemapConfig,
}

impl<'a> FormatContext<'a> {
    pub fn new(config: &'a SitemapConfig, prefix: Option<&'static str>) -> Self {
        Self {
            validator: Validator::new(config.debug),
            prefix,
            config,
        }
    }

    /// See [`Validator::ensure`].
    pub fn ensure<F>(&self, condition: bool, message: F) -> Result<bool, SitemapError>
    where
        F: FnOnce() -> String,
    {
        self.validator.ensure(condition, message)
    }

    /// Namespace prefix of the elements built by the formatter.
    pub fn prefix(&self) -> Option<&'static str> {
        self.prefix
    }

    /// Element named `local` in the formatter's namespace.
    pub fn element(&self, local: &str) -> Element {
        Element::qualified(self.prefix, local)
    }

    pub fn time_zone(&self) -> Option<FixedOffset> {
        self.config.offset()
    }
}

/// `yes` for truthy values, `no` otherwise.
pub fn format_bool(value: &FieldValue) -> String {
    let token = if value.is_truthy() { "yes" } else { "no" };
    token.to_string()
}

/// Joins lists with `", "`; scalars come back unchanged.
pub fn format_comma_sep(value: &FieldValue) -> String {
    value.to_string()
}

/// `YYYY-MM-DD`, dropping any time of day.
pub fn format_date(value: &Temporal) -> String {
    value.date().format("%Y-%m-%d").to_string()
}

/// ISO 8601. Naive datetimes get `offset` when one is configured; bare dates
/// fall back to [`format_date`].
pub fn format_datetime(value: &Temporal, offset: Option<FixedOffset>) -> String {
    match value {
        Temporal::Date(_) => format_date(value),
        Temporal::Naive(datetime) => {
            let zoned = offset.and_then(|offset| datetime.and_local_timezone(offset).single());
            match zoned {
                Some(zoned) => zoned.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string(),
                None => datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            }
        }
        Temporal::Zoned(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string(),
    }
}

/// Floors to one decimal and prints it (`1` becomes `1.0`).
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).floor() / 10.0)
}

fn temporal(value: &FieldValue, ctx: &FormatContext<'_>) -> Result<Option<Temporal>, SitemapError> {
    let parsed = value.as_temporal();
    ctx.ensure(parsed.is_some(), || format!("Date \"{}\" invalid, must be a date or datetime", value))?;
    Ok(parsed)
}

/// Default formatter: the value as text, lists comma separated.
pub fn text(value: &FieldValue, _ctx: &FormatContext<'_>) -> FormatResult {
    Ok(Some(Formatted::Text(format_comma_sep(value))))
}

pub fn boolean(value: &FieldValue, _ctx: &FormatContext<'_>) -> FormatResult {
    Ok(Some(Formatted::Text(format_bool(value))))
}

pub fn comma_separated(value: &FieldValue, _ctx: &FormatContext<'_>) -> FormatResult {
    Ok(Some(Formatted::Text(format_comma_sep(value))))
}

pub fn date(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    Ok(temporal(value, ctx)?.map(|value| Formatted::Text(format_date(&value))))
}

pub fn datetime(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    Ok(temporal(value, ctx)?.map(|value| Formatted::Text(format_datetime(&value, ctx.time_zone()))))
}

/// Dates stay dates, datetimes keep their time of day.
pub fn lastmod(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    Ok(temporal(value, ctx)?.map(|value| {
        if value.has_time() {
            Formatted::Text(format_datetime(&value, ctx.time_zone()))
        } else {
            Formatted::Text(format_date(&value))
        }
    }))
}

pub fn priority(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let number = value.as_f64().filter(|priority| (0.0..=1.0).contains(priority));
    if !ctx.ensure(number.is_some(), || format!("Priority {:?} invalid, must be between 0 and 1", value))? {
        return Ok(None);
    }
    Ok(number.map(|priority| Formatted::Text(format_one_decimal(priority))))
}

pub fn changefreq(value: &FieldValue, ctx: &FormatContext<'_>) -> FormatResult {
    let freq = value.as_str().filter(|freq| FREQS.contains(freq));
    if !ctx.ensure(freq.is_some(), || {
        format!("Change frequency \"{}\" invalid, must be one of {}", value, FREQS.join(","))
    })? {
        return Ok(None);
    }
    Ok(freq.map(|freq| Formatted::Text(freq.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn text_of(result: FormatResult) -> Option<String> {
        match result.unwrap() {
            Some(Formatted::Text(text)) => Some(text),
            Some(Formatted::Nodes(nodes)) => panic!("Expected text, got {:?}", nodes),
            None => None,
        }
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn booleans_are_yes_no() {
        assert_eq!(format_bool(&true.into()), "yes");
        assert_eq!(format_bool(&false.into()), "no");
    }

    #[test]
    fn comma_sep_joins_lists_and_passes_scalars() {
        assert_eq!(format_comma_sep(&["a", "b"].into()), "a, b");
        assert_eq!(format_comma_sep(&"x".into()), "x");
    }

    #[test]
    fn priority_floors_to_one_decimal() {
        let config = SitemapConfig::default().debug(true);
        let ctx = FormatContext::new(&config, None);

        assert_eq!(text_of(priority(&1.into(), &ctx)), Some("1.0".to_string()));
        assert_eq!(text_of(priority(&0.into(), &ctx)), Some("0.0".to_string()));
        assert_eq!(text_of(priority(&0.55.into(), &ctx)), Some("0.5".to_string()));
        assert_eq!(text_of(priority(&0.05.into(), &ctx)), Some("0.0".to_string()));
        assert_eq!(text_of(priority(&"0.8".into(), &ctx)), Some("0.8".to_string()));
    }

    #[test]
    fn priority_out_of_range_fails() {
        let config = SitemapConfig::default().debug(true);
        let ctx = FormatContext::new(&config, None);

        assert!(priority(&(-100).into(), &ctx).is_err());
        assert!(priority(&1.01.into(), &ctx).is_err());
        assert!(priority(&"high".into(), &ctx).is_err());

        let lenient = SitemapConfig::default();
        let ctx = FormatContext::new(&lenient, None);
        assert_eq!(priority(&(-0.1).into(), &ctx).unwrap(), None);
    }

    #[test]
    fn changefreq_accepts_only_known_tokens() {
        let config = SitemapConfig::default().debug(true);
        let ctx = FormatContext::new(&config, None);

        for freq in FREQS {
            assert_eq!(text_of(changefreq(&freq.into(), &ctx)), Some(freq.to_string()));
        }
        match changefreq(&"when i feel like it".into(), &ctx) {
            Err(SitemapError::Validation(message)) => {
                assert!(message.contains("when i feel like it"));
                assert!(message.contains("always,hourly,daily"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn dates_drop_time_of_day() {
        let noon = day(2013, 1, 1).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(format_date(&Temporal::Naive(noon)), "2013-01-01");
        assert_eq!(format_date(&Temporal::Date(day(2013, 1, 1))), "2013-01-01");
    }

    #[test]
    fn datetimes_are_iso_8601() {
        let noon = day(2010, 1, 1).and_hms_opt(12, 0, 0).unwrap();
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();

        assert_eq!(format_datetime(&Temporal::Naive(noon), None), "2010-01-01T12:00:00");
        assert_eq!(
            format_datetime(&Temporal::Naive(noon), Some(eastern)),
            "2010-01-01T12:00:00-05:00"
        );
        assert_eq!(
            format_datetime(&Temporal::Zoned(eastern.from_local_datetime(&noon).unwrap()), None),
            "2010-01-01T12:00:00-05:00"
        );
        assert_eq!(format_datetime(&Temporal::Date(day(2010, 1, 1)), None), "2010-01-01");
    }

    #[test]
    fn lastmod_follows_time_of_day() {
        let config = SitemapConfig::default().debug(true);
        let ctx = FormatContext::new(&config, None);
        let noon = day(2013, 1, 1).and_hms_opt(12, 0, 0).unwrap();

        assert_eq!(text_of(lastmod(&day(2013, 1, 1).into(), &ctx)), Some("2013-01-01".to_string()));
        assert_eq!(text_of(lastmod(&noon.into(), &ctx)), Some("2013-01-01T12:00:00".to_string()));
        assert_eq!(text_of(lastmod(&"2013-01-01".into(), &ctx)), Some("2013-01-01".to_string()));
        assert!(lastmod(&"last tuesday".into(), &ctx).is_err());
    }

    #[test]
    fn configured_offset_stamps_naive_datetimes() {
        let config = SitemapConfig::default().time_zone(FixedOffset::east_opt(3600).unwrap());
        let ctx = FormatContext::new(&config, None);
        let noon = day(2013, 1, 1).and_hms_opt(12, 0, 0).unwrap();

        assert_eq!(
            text_of(datetime(&noon.into(), &ctx)),
            Some("2013-01-01T12:00:00+01:00".to_string())
        );
    }

    #[test]
    fn context_builds_prefixed_elements() {
        let config = SitemapConfig::default();
        let ctx = FormatContext::new(&config, Some("video"));
        assert_eq!(ctx.prefix(), Some("video"));
        assert_eq!(ctx.element("price").name(), "video:price");
    }
}
