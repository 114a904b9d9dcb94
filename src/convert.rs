use crate::{
    build::{BuildError, BuilderInner},
    PathComponent, QueryComponent, UriBuilder,
};
use alloc::{string::String, vec::Vec};

/// The decoded components of a URI, for bridging to other URI types.
///
/// Every field is stored decoded and none carries a delimiter: the
/// fragment has no `'#'`, the segments have no `'/'` separators and the
/// query is a flat list of pairs. Converting a `UriBuilder` to `UriParts`
/// and back is lossless.
///
/// # Examples
///
/// ```
/// use url_builder::{UriBuilder, UriParts};
///
/// let parts = UriParts {
///     scheme: Some("https".into()),
///     host: Some("www.example.com".into()),
///     segments: vec!["s".into()],
///     query: vec![("wd".into(), "测试".into())],
///     ..Default::default()
/// };
/// let builder = UriBuilder::from(parts.clone());
/// assert_eq!(builder.render()?, "https://www.example.com/s?wd=%E6%B5%8B%E8%AF%95");
/// assert_eq!(builder.to_parts(), parts);
/// # Ok::<_, url_builder::BuildError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UriParts {
    /// The scheme.
    pub scheme: Option<String>,
    /// The host.
    pub host: Option<String>,
    /// The port, where `None` means no explicit port.
    pub port: Option<u16>,
    /// The path segments.
    pub segments: Vec<String>,
    /// Whether the path ends with a slash.
    pub trailing_slash: bool,
    /// The query pairs in order.
    pub query: Vec<(String, String)>,
    /// The fragment.
    pub fragment: Option<String>,
}

/// A URI split into strings ready for a component-wise URI constructor.
///
/// This is the hand-off format for constructors that take scheme, authority,
/// path, query and fragment separately and quote illegal characters
/// themselves. Nothing here is percent-encoded: **the consumer owns the
/// encoding** of every component. In contrast, [`UriBuilder::render`] owns
/// the encoding of everything it outputs.
///
/// Since the path is joined from unencoded segments, a segment containing
/// `'/'` cannot be told apart from two segments in this format. Use
/// [`UriParts`] when segment boundaries matter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decomposed {
    /// The scheme, defaulted as in [`UriBuilder::render`].
    pub scheme: String,
    /// The authority, `host` or `host:port`.
    pub authority: String,
    /// The path, with a leading `'/'`.
    pub path: String,
    /// The query without its `'?'`, if it has any pair.
    pub query: Option<String>,
    /// The fragment without its `'#'`.
    pub fragment: Option<String>,
}

impl UriBuilder {
    /// Creates a `UriBuilder` from decoded parts.
    ///
    /// Segments and query pairs go through [`PathComponent::append`] and
    /// [`QueryComponent::append`], and the fragment through [`fragment`].
    /// An empty path or query leaves the respective component unset.
    ///
    /// [`fragment`]: Self::fragment
    pub fn from_parts(parts: UriParts) -> Self {
        let mut path = PathComponent::from_segments(&parts.segments);
        path.set_trailing_slash(parts.trailing_slash);
        let query = QueryComponent::from_iter(parts.query);

        let mut builder = Self::new().port(parts.port.unwrap_or(0));
        if let Some(scheme) = parts.scheme {
            builder = builder.scheme(scheme);
        }
        if let Some(host) = parts.host {
            builder = builder.host(host);
        }
        if !path.is_empty() {
            builder = builder.path(path);
        }
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(fragment) = parts.fragment {
            builder = builder.fragment_decoded(&fragment);
        }
        builder
    }

    /// Extracts the decoded parts of the builder.
    #[must_use]
    pub fn to_parts(&self) -> UriParts {
        let path = self.path_ref();
        UriParts {
            scheme: self.scheme_ref().map(String::from),
            host: self.host_ref().map(String::from),
            port: self.port_ref(),
            segments: path.map(|p| p.segments().to_vec()).unwrap_or_default(),
            trailing_slash: path.is_some_and(PathComponent::has_trailing_slash),
            query: self
                .query_ref()
                .map(|q| q.pairs().to_vec())
                .unwrap_or_default(),
            fragment: self.fragment_ref().map(String::from),
        }
    }

    /// Splits the builder into unencoded strings for a component-wise URI constructor.
    ///
    /// The path and the query are rendered with `encode` set to `false`.
    /// See [`Decomposed`] for which stage owns the encoding.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingHost`] if the host is absent or blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_builder::UriBuilder;
    ///
    /// let d = UriBuilder::new()
    ///     .host("www.example.com")
    ///     .port(8090)
    ///     .append_query("wd", "测试")
    ///     .fragment("a b")
    ///     .to_decomposed()?;
    /// assert_eq!(d.scheme, "http");
    /// assert_eq!(d.authority, "www.example.com:8090");
    /// assert_eq!(d.path, "/");
    /// assert_eq!(d.query.as_deref(), Some("wd=测试"));
    /// assert_eq!(d.fragment.as_deref(), Some("a b"));
    /// # Ok::<_, url_builder::BuildError>(())
    /// ```
    pub fn to_decomposed(&self) -> Result<Decomposed, BuildError> {
        let host = self.host_checked()?;

        let mut authority = BuilderInner::default();
        authority.buf.push_str(host);
        if let Some(port) = self.port_ref() {
            authority.push_port(port);
        }

        let mut path = BuilderInner::default();
        path.push_path(self.path_ref(), false);

        Ok(Decomposed {
            scheme: self.scheme_or_default().into(),
            authority: authority.buf,
            path: path.buf,
            query: self.query_ref().and_then(|q| q.render(false)),
            fragment: self.fragment_ref().map(String::from),
        })
    }
}

impl From<UriParts> for UriBuilder {
    /// Equivalent to [`UriBuilder::from_parts`].
    fn from(parts: UriParts) -> Self {
        Self::from_parts(parts)
    }
}

impl From<&UriBuilder> for UriParts {
    /// Equivalent to [`UriBuilder::to_parts`].
    fn from(builder: &UriBuilder) -> Self {
        builder.to_parts()
    }
}
