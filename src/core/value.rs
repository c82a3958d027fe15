use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// A value resolved for one field of one entry.
///
/// Tuples are represented as two-element [`FieldValue::List`]s and keyed
/// records (images, prices, publications) as [`FieldValue::Record`]s, whose
/// keys iterate in sorted order.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    ZonedDateTime(DateTime<FixedOffset>),
    List(Vec<FieldValue>),
    Record(BTreeMap<String, FieldValue>),
}

/// A point in time extracted from a [`FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temporal {
    Date(NaiveDate),
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl Temporal {
    /// Whether the value carries a time of day.
    pub fn has_time(&self) -> bool {
        !matches!(self, Temporal::Date(_))
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Temporal::Date(date) => *date,
            Temporal::Naive(datetime) => datetime.date(),
            Temporal::Zoned(datetime) => datetime.date_naive(),
        }
    }
}

impl FieldValue {
    /// Builds a record from key/value pairs.
    ///
    /// ```
    /// use sitemap_ext::core::value::FieldValue;
    ///
    /// let image = FieldValue::record([("loc", "http://example.com/a.png"), ("title", "A")]);
    /// assert_eq!(image.get("title").and_then(FieldValue::as_str), Some("A"));
    /// ```
    pub fn record<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        FieldValue::Record(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Python-like truthiness: empty and zero values are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(value) => *value,
            FieldValue::Int(value) => *value != 0,
            FieldValue::Float(value) => *value != 0.0,
            FieldValue::Text(value) => !value.is_empty(),
            FieldValue::List(values) => !values.is_empty(),
            FieldValue::Record(values) => !values.is_empty(),
            FieldValue::Date(_) | FieldValue::DateTime(_) | FieldValue::ZonedDateTime(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(*value),
            FieldValue::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }

    /// Integer coercion; floats are truncated toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            FieldValue::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            FieldValue::Text(value) => {
                let value = value.trim();
                value.parse().ok().or_else(|| {
                    value
                        .parse::<f64>()
                        .ok()
                        .filter(|number| number.is_finite())
                        .map(|number| number.trunc() as i64)
                })
            }
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// The two halves of a tuple value.
    pub fn as_pair(&self) -> Option<(&FieldValue, &FieldValue)> {
        match self {
            FieldValue::List(values) if values.len() == 2 => Some((&values[0], &values[1])),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Record(values) => Some(values),
            _ => None,
        }
    }

    /// Looks up a record key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.as_record().and_then(|record| record.get(key))
    }

    /// Date or datetime view of the value; text is parsed as RFC 3339, an ISO
    /// naive datetime or a `YYYY-MM-DD` date.
    pub fn as_temporal(&self) -> Option<Temporal> {
        match self {
            FieldValue::Date(date) => Some(Temporal::Date(*date)),
            FieldValue::DateTime(datetime) => Some(Temporal::Naive(*datetime)),
            FieldValue::ZonedDateTime(datetime) => Some(Temporal::Zoned(*datetime)),
            FieldValue::Text(text) => {
                let text = text.trim();
                DateTime::parse_from_rfc3339(text)
                    .map(Temporal::Zoned)
                    .or_else(|_| {
                        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                            .map(Temporal::Naive)
                    })
                    .or_else(|_| {
                        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
                            .map(Temporal::Naive)
                    })
                    .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d").map(Temporal::Date))
                    .ok()
            }
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(value) => write!(f, "{}", value),
            FieldValue::Int(value) => write!(f, "{}", value),
            // Keeps the fractional part: `10.0` stays `10.0`.
            FieldValue::Float(value) => write!(f, "{:?}", value),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            FieldValue::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S%.f")),
            FieldValue::ZonedDateTime(value) => {
                write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S%.f%:z"))
            }
            FieldValue::List(values) => write_joined(f, values.iter()),
            FieldValue::Record(values) => write_joined(f, values.values()),
        }
    }
}

fn write_joined<'a, I>(f: &mut fmt::Formatter<'_>, values: I) -> fmt::Result
where
    I: Iterator<Item = &'a FieldValue>,
{
    for (index, value) in values.enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        FieldValue::ZonedDateTime(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::ZonedDateTime(value.fixed_offset())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>, const N: usize> From<[T; N]> for FieldValue {
    fn from(values: [T; N]) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<FieldValue>, B: Into<FieldValue>> From<(A, B)> for FieldValue {
    fn from((first, second): (A, B)) -> Self {
        FieldValue::List(vec![first.into(), second.into()])
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(values: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Record(values)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::from(&value)
    }
}

impl From<&serde_json::Value> for FieldValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(value) => FieldValue::Bool(*value),
            Value::Number(number) => number
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| number.as_f64().map(FieldValue::Float))
                .unwrap_or(FieldValue::Null),
            Value::String(text) => FieldValue::Text(text.clone()),
            Value::Array(values) => FieldValue::List(values.iter().map(FieldValue::from).collect()),
            Value::Object(values) => FieldValue::Record(
                values
                    .iter()
                    .map(|(key, value)| (key.clone(), FieldValue::from(value)))
                    .collect(),
            ),
        }
    }
}
