use crate::pct_enc::{self, Data, DecodeError, EStr};
use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};
use core::{iter::FusedIterator, slice};

/// The query component of a URI, held as decoded key-value pairs.
///
/// A `QueryComponent` is an ordered multi-map: keys need not be unique and
/// insertion order is the rendering order. Every stored pair has a non-empty
/// key; attempts to insert an empty key are silently ignored.
///
/// # Examples
///
/// ```
/// use url_builder::QueryComponent;
///
/// let mut query = QueryComponent::new();
/// query.append("ie", "UTF-8").append("abc", "one").append("abc", "two");
/// assert_eq!(query.render(true).as_deref(), Some("ie=UTF-8&abc=one&abc=two"));
///
/// query.put("abc", "三");
/// assert_eq!(query.render(true).as_deref(), Some("ie=UTF-8&abc=%E4%B8%89"));
/// assert_eq!(query.get_all("abc").collect::<Vec<_>>(), ["三"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueryComponent {
    params: Vec<(String, String)>,
}

impl QueryComponent {
    /// Creates an empty `QueryComponent`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `QueryComponent` from a key to list-of-values mapping.
    ///
    /// The pairs are flattened in the enumeration order of `map` and of each
    /// value list. Nothing is reordered: if the producer enumerates keys or
    /// values in an unspecified order, so will the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_builder::QueryComponent;
    ///
    /// let query = QueryComponent::from_multimap([("a", vec!["1", "2"]), ("b", vec!["3"])]);
    /// assert_eq!(query.render(false).as_deref(), Some("a=1&a=2&b=3"));
    /// ```
    pub fn from_multimap<I, K, V, Vs>(map: I) -> Self
    where
        I: IntoIterator<Item = (K, Vs)>,
        Vs: IntoIterator<Item = V>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::new();
        for (key, values) in map {
            for value in values {
                query.append(key.as_ref(), value.as_ref());
            }
        }
        query
    }

    /// Parses a raw query string.
    ///
    /// Any text from the first `'#'` on is dropped, as is any text up to and
    /// including the last `'?'`, so a whole URI may be passed in. The rest is
    /// split on `'&'` and each piece on its first `'='`: the text before is the
    /// key and the text after is the value. Pieces without `'='` are dropped.
    /// Keys and values are percent-decoded and then stored as by [`append`].
    ///
    /// [`append`]: Self::append
    ///
    /// # Errors
    ///
    /// Returns `Err` if the query contains a malformed percent-encoded octet
    /// or does not decode to valid UTF-8. The error index is relative to `raw`.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_builder::QueryComponent;
    ///
    /// let query = QueryComponent::parse("/s?ie=UTF-8&flag&wd=%E6%B5%8B%E8%AF%95#top")?;
    /// assert_eq!(query.get("ie"), Some("UTF-8"));
    /// assert_eq!(query.get("wd"), Some("测试"));
    /// assert!(!query.contains_key("flag"));
    /// # Ok::<_, url_builder::pct_enc::DecodeError>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        let end = raw.find('#').unwrap_or(raw.len());
        let start = raw[..end].rfind('?').map_or(0, |i| i + 1);
        Self::parse_pairs(&raw[start..end]).map_err(|e| e.shift(start))
    }

    /// Parses `&`-separated pairs without looking for `'?'` or `'#'`.
    pub(crate) fn parse_pairs(raw: &str) -> Result<Self, DecodeError> {
        fn decode<'a>(s: &EStr, part: &'a EStr) -> Result<Cow<'a, str>, DecodeError> {
            part.decode()
                .to_string()
                .map_err(|e| e.shift(s.offset_of(part)))
        }

        let mut query = Self::new();
        let s = EStr::new(raw)?;
        for piece in s.split('&') {
            let Some((key, value)) = piece.split_once('=') else {
                continue;
            };
            query.append(&decode(s, key)?, &*decode(s, value)?);
        }
        Ok(query)
    }

    /// Appends a key-value pair, keeping any existing pairs with the same key.
    ///
    /// The key and value are trimmed, and an absent value is stored as the
    /// empty string. Nothing is appended if the trimmed key is empty.
    pub fn append<'a>(&mut self, key: &str, value: impl Into<Option<&'a str>>) -> &mut Self {
        let key = key.trim();
        if !key.is_empty() {
            let value = value.into().unwrap_or_default().trim();
            self.params.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Replaces all pairs with the given key by a single new pair.
    ///
    /// Every existing pair whose key equals the trimmed key is removed, then the
    /// new pair is appended at the end. Nothing happens if the trimmed key is empty.
    pub fn put<'a>(&mut self, key: &str, value: impl Into<Option<&'a str>>) -> &mut Self {
        let key = key.trim();
        if !key.is_empty() {
            self.remove(key);
            self.append(key, value);
        }
        self
    }

    /// Removes every pair with the given key, returning how many were removed.
    pub fn remove(&mut self, key: &str) -> usize {
        let len = self.params.len();
        self.params.retain(|(k, _)| k != key);
        len - self.params.len()
    }

    /// Returns the value of the first pair with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns an iterator over the values of all pairs with the given key.
    ///
    /// The values borrow from `self` only, so `key` may be a temporary.
    pub fn get_all<'k>(&self, key: &'k str) -> GetAll<'_, 'k> {
        GetAll {
            iter: self.params.iter(),
            key,
        }
    }

    /// Checks whether a pair with the given key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }

    /// Returns an iterator over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Checks whether there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Renders the query without the leading `'?'`.
    ///
    /// Returns `None` if there are no pairs. Otherwise the pairs are joined
    /// as `key=value` with `'&'`, each key and value percent-encoded
    /// independently if `encode` is `true`.
    #[must_use]
    pub fn render(&self, encode: bool) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut buf = String::new();
        self.render_to(&mut buf, encode);
        Some(buf)
    }

    pub(crate) fn render_to(&self, buf: &mut String, encode: bool) {
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                buf.push('&');
            }
            if encode {
                pct_enc::encode_to::<Data>(key, buf);
                buf.push('=');
                pct_enc::encode_to::<Data>(value, buf);
            } else {
                buf.push_str(key);
                buf.push('=');
                buf.push_str(value);
            }
        }
    }
}

/// An iterator over the values of all pairs with a given key.
///
/// This struct is created by [`QueryComponent::get_all`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct GetAll<'a, 'k> {
    iter: slice::Iter<'a, (String, String)>,
    key: &'k str,
}

impl<'a> Iterator for GetAll<'a, '_> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let key = self.key;
        self.iter
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl FusedIterator for GetAll<'_, '_> {}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for QueryComponent {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        query.extend(iter);
        query
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Extend<(K, V)> for QueryComponent {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.append(key.as_ref(), value.as_ref());
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QueryComponent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.render(true).unwrap_or_default())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for QueryComponent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse_pairs(&s).map_err(|e| {
            serde::de::Error::custom(format_args!("failed to parse {s:?} as query: {e}"))
        })
    }
}
