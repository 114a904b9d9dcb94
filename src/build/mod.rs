//! Module for URI building.

mod imp;

pub(crate) use imp::{is_ip_literal, BuilderInner};

use crate::{pct_enc::DecodeError, PathComponent, QueryComponent};
use alloc::string::String;
use log::{debug, trace};

/// The scheme rendered when none is set.
pub const DEFAULT_SCHEME: &str = "http";

/// An error occurred when rendering a URI.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// The builder is in an invalid state for rendering: host is absent or empty.
    MissingHost,
}

#[cfg(feature = "impl-error")]
impl crate::Error for BuildError {}

/// A builder for URIs of the form `scheme://host[:port][/path][?query][#fragment]`.
///
/// All components are optional while building and are stored decoded.
/// Setters take the builder by value and return it, so calls can be chained;
/// rendering only borrows the builder, so the same builder can be rendered
/// any number of times and changed further in between.
///
/// # Examples
///
/// ```
/// use url_builder::UriBuilder;
///
/// let builder = UriBuilder::new()
///     .scheme("https")
///     .host("www.example.com")
///     .append_path_segment("/s")
///     .append_query("ie", "UTF-8")
///     .put_query("wd", "test")
///     .put_query("wd", "测试")
///     .fragment("#top");
///
/// assert_eq!(
///     builder.render()?,
///     "https://www.example.com/s?ie=UTF-8&wd=%E6%B5%8B%E8%AF%95#top"
/// );
///
/// let builder = builder.port(8090).query(Default::default());
/// assert_eq!(builder.render()?, "https://www.example.com:8090/s#top");
/// # Ok::<_, url_builder::BuildError>(())
/// ```
///
/// # Encoding
///
/// [`render`] percent-encodes the host (unless it is a bracketed IP literal
/// made only of `IP-literal` characters, such as `[::1]`),
/// every path segment, every query key and value, and the fragment, all with
/// the same [`Data`] encoder. The scheme and the port are written as is.
///
/// [`render`]: Self::render
/// [`Data`]: crate::pct_enc::Data
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[must_use]
pub struct UriBuilder {
    scheme: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<PathComponent>,
    query: Option<QueryComponent>,
    fragment: Option<String>,
}

impl UriBuilder {
    /// Creates an empty `UriBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `UriBuilder` from a raw path and a raw query string.
    ///
    /// `raw_path` is parsed with [`PathComponent::parse`] and `raw_query`
    /// with [`QueryComponent::parse`]. A `port` of `0` means no port.
    /// Empty path and query strings leave the respective component unset.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the path or the query fails to decode.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_builder::UriBuilder;
    ///
    /// let builder = UriBuilder::from_raw(
    ///     Some("https"),
    ///     Some("www.example.com"),
    ///     0,
    ///     "/s/",
    ///     "ie=UTF-8&wd=%E6%B5%8B%E8%AF%95",
    ///     Some("abc"),
    /// )?;
    /// assert_eq!(
    ///     builder.render().unwrap(),
    ///     "https://www.example.com/s/?ie=UTF-8&wd=%E6%B5%8B%E8%AF%95#abc"
    /// );
    /// # Ok::<_, url_builder::pct_enc::DecodeError>(())
    /// ```
    pub fn from_raw(
        scheme: Option<&str>,
        host: Option<&str>,
        port: u16,
        raw_path: &str,
        raw_query: &str,
        fragment: Option<&str>,
    ) -> Result<Self, DecodeError> {
        let path = PathComponent::parse(raw_path)?;
        let query = QueryComponent::parse(raw_query)?;

        let mut builder = Self::new().port(port);
        builder.scheme = scheme.map(String::from);
        builder.host = host.map(String::from);
        builder.path = (!path.is_empty()).then_some(path);
        builder.query = (!query.is_empty()).then_some(query);
        if let Some(fragment) = fragment {
            builder = builder.fragment(fragment);
        }
        Ok(builder)
    }

    /// Sets the scheme.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the host, which is stored decoded.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port. A port of `0` clears it.
    pub fn port(mut self, port: u16) -> Self {
        self.port = (port != 0).then_some(port);
        self
    }

    /// Replaces the whole path.
    pub fn path(mut self, path: PathComponent) -> Self {
        self.path = Some(path);
        self
    }

    /// Appends a segment to the path, creating the path if absent.
    ///
    /// See [`PathComponent::append`] for how the segment is normalized.
    pub fn append_path_segment(mut self, segment: &str) -> Self {
        self.path_mut().append(segment);
        self
    }

    /// Inserts a segment at the start of the path, creating the path if absent.
    pub fn prepend_path_segment(mut self, segment: &str) -> Self {
        self.path_mut().prepend(segment);
        self
    }

    /// Replaces the whole query.
    pub fn query(mut self, query: QueryComponent) -> Self {
        self.query = Some(query);
        self
    }

    /// Appends a query pair, creating the query if absent.
    ///
    /// See [`QueryComponent::append`].
    pub fn append_query<'a>(mut self, key: &str, value: impl Into<Option<&'a str>>) -> Self {
        self.query_mut().append(key, value);
        self
    }

    /// Replaces all query pairs with the given key, creating the query if absent.
    ///
    /// See [`QueryComponent::put`].
    pub fn put_query<'a>(mut self, key: &str, value: impl Into<Option<&'a str>>) -> Self {
        self.query_mut().put(key, value);
        self
    }

    /// Sets the fragment.
    ///
    /// One leading `'#'` is stripped. Blank input, or a lone `'#'`, clears the fragment.
    pub fn fragment(mut self, fragment: &str) -> Self {
        self.fragment = if fragment.trim().is_empty() {
            None
        } else {
            let v = fragment.strip_prefix('#').unwrap_or(fragment);
            (!v.is_empty()).then(|| v.into())
        };
        self
    }

    /// Sets a fragment taken from a parsed URI, where a leading `'#'` is data.
    pub(crate) fn fragment_decoded(mut self, fragment: &str) -> Self {
        self.fragment = (!fragment.is_empty()).then(|| fragment.into());
        self
    }

    /// Returns the scheme, if set.
    #[must_use]
    pub fn scheme_ref(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the host, if set.
    #[must_use]
    pub fn host_ref(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the port, if set.
    #[must_use]
    pub fn port_ref(&self) -> Option<u16> {
        self.port
    }

    /// Returns the path, if set.
    #[must_use]
    pub fn path_ref(&self) -> Option<&PathComponent> {
        self.path.as_ref()
    }

    /// Returns the query, if set.
    #[must_use]
    pub fn query_ref(&self) -> Option<&QueryComponent> {
        self.query.as_ref()
    }

    /// Returns the fragment without its `'#'`, if set.
    #[must_use]
    pub fn fragment_ref(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns a mutable reference to the path, creating it if absent.
    pub fn path_mut(&mut self) -> &mut PathComponent {
        self.path.get_or_insert_with(PathComponent::new)
    }

    /// Returns a mutable reference to the query, creating it if absent.
    pub fn query_mut(&mut self) -> &mut QueryComponent {
        self.query.get_or_insert_with(QueryComponent::new)
    }

    pub(crate) fn host_checked(&self) -> Result<&str, BuildError> {
        match self.host.as_deref() {
            Some(host) if !host.trim().is_empty() => Ok(host),
            _ => {
                debug!("cannot render a URI without a host: {self:?}");
                Err(BuildError::MissingHost)
            }
        }
    }

    pub(crate) fn scheme_or_default(&self) -> &str {
        self.scheme.as_deref().unwrap_or(DEFAULT_SCHEME)
    }

    /// Renders the URI in its canonical string form.
    ///
    /// The output is the scheme (or [`DEFAULT_SCHEME`]), `"://"`, the encoded host,
    /// `':'` and the port if set, the encoded path or `"/"` if it is empty,
    /// `'?'` and the encoded query if it has any pair, and `'#'` and the encoded
    /// fragment if set.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingHost`] if the host is absent or blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_builder::{BuildError, UriBuilder};
    ///
    /// assert_eq!(UriBuilder::new().host("www.example.com").render()?, "http://www.example.com/");
    /// assert_eq!(UriBuilder::new().scheme("https").render(), Err(BuildError::MissingHost));
    /// # Ok::<_, BuildError>(())
    /// ```
    pub fn render(&self) -> Result<String, BuildError> {
        let host = self.host_checked()?;

        let mut b = BuilderInner::default();
        b.push_scheme(self.scheme_or_default());
        b.start_authority();
        b.push_host(host);
        if let Some(port) = self.port {
            b.push_port(port);
        }
        b.push_path(self.path.as_ref(), true);
        b.push_query(self.query.as_ref(), true);
        b.push_fragment(self.fragment.as_deref());

        trace!("rendered {:?}", b.buf);
        Ok(b.buf)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UriBuilder {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = self.render().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UriBuilder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&s).map_err(|e| {
            serde::de::Error::custom(format_args!("failed to parse {s:?} as URI: {e}"))
        })
    }
}
