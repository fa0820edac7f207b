use std::collections::btree_map;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::Error;

/// One tagged metadata value.
///
/// `Null` is first-class: a key can be present with no value, which is
/// distinct from the key being absent. Reading an absent key fails with
/// [`Error::PropertyDoesNotExist`]; reading a present key through the wrong
/// typed getter fails with [`Error::PropertyTypeMismatch`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyValue {
    Real(f64),
    Integer(i64),
    String(String),
    Timestamp(DateTime<Utc>),
    Null,
}

impl PropertyValue {
    /// The tag name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Real(_) => "real",
            PropertyValue::Integer(_) => "integer",
            PropertyValue::String(_) => "string",
            PropertyValue::Timestamp(_) => "timestamp",
            PropertyValue::Null => "null",
        }
    }

    /// True for the `Null` variant.
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Real(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        PropertyValue::Timestamp(value)
    }
}

/// String-keyed metadata attached to points and trajectories.
///
/// # Examples
///
/// ```
/// use geotrack_types::{Error, PropertyMap, PropertyValue};
///
/// let mut properties = PropertyMap::new();
/// properties.set("altitude", 10200.0);
/// properties.set("callsign", "N123GT");
/// properties.set("squawk", PropertyValue::Null);
///
/// assert_eq!(properties.get_real("altitude"), Ok(10200.0));
/// assert!(properties.is_null("squawk"));
/// assert_eq!(
///     properties.get_real("missing"),
///     Err(Error::PropertyDoesNotExist("missing".to_owned()))
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyMap {
    values: BTreeMap<String, PropertyValue>,
}

impl PropertyMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        PropertyMap::default()
    }

    /// Inserts or replaces a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Removes a key, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.values.remove(key)
    }

    /// The raw tagged value, if the key is present.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    /// True iff `key` is present and holds the `Null` variant.
    pub fn is_null(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(PropertyValue::Null))
    }

    /// True iff `key` is present with any variant.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The real value under `key`.
    pub fn get_real(&self, key: &str) -> Result<f64, Error> {
        match self.require(key)? {
            PropertyValue::Real(value) => Ok(*value),
            other => Err(self.mismatch(key, "real", other)),
        }
    }

    /// The integer value under `key`.
    pub fn get_integer(&self, key: &str) -> Result<i64, Error> {
        match self.require(key)? {
            PropertyValue::Integer(value) => Ok(*value),
            other => Err(self.mismatch(key, "integer", other)),
        }
    }

    /// The string value under `key`.
    pub fn get_string(&self, key: &str) -> Result<&str, Error> {
        match self.require(key)? {
            PropertyValue::String(value) => Ok(value),
            other => Err(self.mismatch(key, "string", other)),
        }
    }

    /// The timestamp value under `key`.
    pub fn get_timestamp(&self, key: &str) -> Result<DateTime<Utc>, Error> {
        match self.require(key)? {
            PropertyValue::Timestamp(value) => Ok(*value),
            other => Err(self.mismatch(key, "timestamp", other)),
        }
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Key/value pairs in sorted key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, PropertyValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, key: &str) -> Result<&PropertyValue, Error> {
        self.values
            .get(key)
            .ok_or_else(|| Error::PropertyDoesNotExist(key.to_owned()))
    }

    fn mismatch(&self, key: &str, expected: &'static str, found: &PropertyValue) -> Error {
        Error::PropertyTypeMismatch {
            key: key.to_owned(),
            expected,
            found: found.type_name(),
        }
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = (&'a String, &'a PropertyValue);
    type IntoIter = btree_map::Iter<'a, String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<(String, PropertyValue)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        PropertyMap {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn typed_getters() {
        let mut map = PropertyMap::new();
        map.set("speed", 431.5);
        map.set("hops", 3_i64);
        map.set("carrier", "GT");
        map.set("seen", DateTime::from_timestamp(1_500_000_000, 0).unwrap());

        assert_eq!(map.get_real("speed"), Ok(431.5));
        assert_eq!(map.get_integer("hops"), Ok(3));
        assert_eq!(map.get_string("carrier"), Ok("GT"));
        assert_eq!(
            map.get_timestamp("seen").unwrap().timestamp(),
            1_500_000_000
        );
    }

    #[test]
    fn missing_key_is_an_error() {
        let map = PropertyMap::new();
        assert_eq!(
            map.get_real("speed"),
            Err(Error::PropertyDoesNotExist("speed".to_owned()))
        );
    }

    #[test]
    fn wrong_tag_is_an_error() {
        let mut map = PropertyMap::new();
        map.set("speed", "fast");
        assert_eq!(
            map.get_real("speed"),
            Err(Error::PropertyTypeMismatch {
                key: "speed".to_owned(),
                expected: "real",
                found: "string",
            })
        );
    }

    #[test]
    fn null_is_present_but_valueless() {
        let mut map = PropertyMap::new();
        map.set("squawk", PropertyValue::Null);

        assert!(map.is_null("squawk"));
        assert!(map.contains_key("squawk"));
        assert!(!map.is_null("absent"));
        assert_eq!(
            map.get_real("squawk"),
            Err(Error::PropertyTypeMismatch {
                key: "squawk".to_owned(),
                expected: "real",
                found: "null",
            })
        );
    }

    #[test]
    fn remove_and_keys() {
        let mut map = PropertyMap::new();
        map.set("b", 2.0);
        map.set("a", 1.0);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.remove("a"), Some(PropertyValue::Real(1.0)));
        assert!(map.get("a").is_none());
        assert_eq!(map.len(), 1);
    }
}
