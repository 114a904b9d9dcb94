use crate::pct_enc::{self, Data, DecodeError, EStr};
use alloc::{string::String, vec::Vec};

/// The path component of a URI, held as decoded segments.
///
/// A `PathComponent` is an ordered sequence of non-empty segments plus a
/// flag telling whether the rendered path ends with a slash.
///
/// Segments are stored exactly as given after normalization: a segment
/// containing an embedded `'/'` (such as `"a/b"`) is kept as **one** segment.
/// Split the input yourself if you want multiple segments.
///
/// # Examples
///
/// ```
/// use url_builder::PathComponent;
///
/// let mut path = PathComponent::new();
/// path.append("/over/").append("there").prepend("  root ");
/// assert_eq!(path.segments(), ["root", "over", "there"]);
/// assert_eq!(path.render(false), "/root/over/there");
///
/// path.set_trailing_slash(true);
/// assert_eq!(path.render(false), "/root/over/there/");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathComponent {
    segments: Vec<String>,
    trailing_slash: bool,
}

impl PathComponent {
    /// Creates an empty `PathComponent`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `PathComponent` from segments, normalizing each as [`append`] does.
    ///
    /// [`append`]: Self::append
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments.into_iter().collect()
    }

    /// Parses a raw path string.
    ///
    /// The input is trimmed, split on `'/'` with empty pieces discarded,
    /// and each piece is percent-decoded and appended in order. The trailing
    /// slash flag is set if the trimmed input ends with `'/'`.
    ///
    /// Decoded pieces go through the same normalization as [`append`], so
    /// an encoded slash at either end of a piece is stripped once per parse:
    /// `"/%2F%2Fa%2F%2F"` gives the segment `"/a/"`, which renders as
    /// `"/%2Fa%2F"` and parses again to `"a"`.
    ///
    /// [`append`]: Self::append
    ///
    /// # Errors
    ///
    /// Returns `Err` if a piece contains a malformed percent-encoded octet
    /// or does not decode to valid UTF-8. The error index is relative to `raw`.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_builder::PathComponent;
    ///
    /// let path = PathComponent::parse("//a//b%20c/")?;
    /// assert_eq!(path.segments(), ["a", "b c"]);
    /// assert!(path.has_trailing_slash());
    /// # Ok::<_, url_builder::pct_enc::DecodeError>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        let mut path = Self::new();
        if raw.is_empty() {
            return Ok(path);
        }

        let trimmed = raw.trim();
        let offset = raw.len() - raw.trim_start().len();
        let s = EStr::new(trimmed).map_err(|e| e.shift(offset))?;

        path.trailing_slash = trimmed.ends_with('/');
        for piece in s.split('/').filter(|piece| !piece.is_empty()) {
            let segment = piece
                .decode()
                .to_string()
                .map_err(|e| e.shift(offset + s.offset_of(piece)))?;
            path.append(&segment);
        }
        Ok(path)
    }

    /// Appends a segment to the end of the path.
    ///
    /// Empty input and the literal `"/"` are ignored. Otherwise the input is
    /// trimmed and at most one leading and one trailing `'/'` are stripped.
    pub fn append(&mut self, segment: &str) -> &mut Self {
        if let Some(segment) = normalize_segment(segment) {
            self.segments.push(segment.into());
        }
        self
    }

    /// Inserts a segment at the start of the path.
    ///
    /// The input is normalized as in [`append`](Self::append).
    pub fn prepend(&mut self, segment: &str) -> &mut Self {
        if let Some(segment) = normalize_segment(segment) {
            self.segments.insert(0, segment.into());
        }
        self
    }

    /// Sets whether the rendered path ends with a slash.
    pub fn set_trailing_slash(&mut self, value: bool) -> &mut Self {
        self.trailing_slash = value;
        self
    }

    /// Returns the decoded segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Checks whether the rendered path ends with a slash.
    #[must_use]
    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Checks whether the path renders as an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && !self.trailing_slash
    }

    /// Renders the path, with a leading `'/'` unless it is empty.
    ///
    /// Each segment is percent-encoded independently if `encode` is `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_builder::PathComponent;
    ///
    /// let path = PathComponent::from_segments(["测试", "a b"]);
    /// assert_eq!(path.render(true), "/%E6%B5%8B%E8%AF%95/a%20b");
    /// assert_eq!(path.render(false), "/测试/a b");
    /// assert_eq!(PathComponent::new().render(true), "");
    /// ```
    #[must_use]
    pub fn render(&self, encode: bool) -> String {
        let mut buf = String::new();
        self.render_to(&mut buf, encode);
        buf
    }

    pub(crate) fn render_to(&self, buf: &mut String, encode: bool) {
        for segment in &self.segments {
            buf.push('/');
            if encode {
                pct_enc::encode_to::<Data>(segment, buf);
            } else {
                buf.push_str(segment);
            }
        }
        if self.trailing_slash {
            buf.push('/');
        }
    }
}

/// Trims a segment and strips one leading and one trailing slash.
///
/// Returns `None` if nothing is left to store.
fn normalize_segment(segment: &str) -> Option<&str> {
    if segment.is_empty() || segment == "/" {
        return None;
    }
    let s = segment.trim();
    let s = s.strip_prefix('/').unwrap_or(s);
    let s = s.strip_suffix('/').unwrap_or(s);
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

impl<S: AsRef<str>> FromIterator<S> for PathComponent {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut path = Self::new();
        path.extend(iter);
        path
    }
}

impl<S: AsRef<str>> Extend<S> for PathComponent {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for segment in iter {
            self.append(segment.as_ref());
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathComponent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.render(true))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathComponent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&s).map_err(|e| {
            serde::de::Error::custom(format_args!("failed to parse {s:?} as path: {e}"))
        })
    }
}
