use crate::{
    build::is_ip_literal,
    pct_enc::{self, table, DecodeError, DecodeErrorKind},
    PathComponent, QueryComponent, UriBuilder,
};
use core::str::FromStr;
use log::{debug, trace};

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// The input has no `"://"` or nothing before it.
    ///
    /// The error index is `0`.
    MissingScheme,
    /// The scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    ///
    /// The error index points to the offending character.
    InvalidScheme,
    /// The authority has no host.
    ///
    /// The error index points to the start of the authority.
    MissingHost,
    /// The port is not a decimal number in the range of `u16`.
    ///
    /// The error index points to the first byte of the port.
    InvalidPort,
    /// Invalid percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character "%" of the octet.
    InvalidOctet,
    /// A component does not decode to valid UTF-8.
    ///
    /// The error index points to the first byte of the invalid sequence.
    InvalidUtf8,
}

/// An error occurred when parsing a URI.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the index at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    fn decode(e: DecodeError, offset: usize) -> Self {
        let kind = match e.kind() {
            DecodeErrorKind::InvalidOctet => ParseErrorKind::InvalidOctet,
            DecodeErrorKind::InvalidUtf8 => ParseErrorKind::InvalidUtf8,
        };
        Self {
            index: e.index() + offset,
            kind,
        }
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for ParseError {}

type Result<T> = core::result::Result<T, ParseError>;

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {{
        let e = ParseError {
            index: $index,
            kind: ParseErrorKind::$kind,
        };
        debug!("failed to parse URI: {e}");
        return Err(e);
    }};
}

impl UriBuilder {
    /// Parses a URI string of the form `scheme://host[:port][/path][?query][#fragment]`.
    ///
    /// The input is split on the first `'#'`, then on the first `'?'`, then
    /// into scheme, authority and path. The port is taken from after the last
    /// `':'` of the authority, unless that `':'` belongs to a bracketed IP
    /// literal. Every component except the scheme and the port is percent-decoded.
    ///
    /// Userinfo is not recognized: an `'@'` in the authority is part of the host.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the scheme or the host cannot be recovered, if the port
    /// is invalid, or if any component fails to decode.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_builder::{ParseErrorKind, UriBuilder};
    ///
    /// let builder = UriBuilder::parse("https://www.example.com:8090/s?wd=%E6%B5%8B%E8%AF%95&wd=2#abc")?;
    /// assert_eq!(builder.scheme_ref(), Some("https"));
    /// assert_eq!(builder.host_ref(), Some("www.example.com"));
    /// assert_eq!(builder.port_ref(), Some(8090));
    /// assert_eq!(builder.path_ref().unwrap().segments(), ["s"]);
    /// assert_eq!(builder.query_ref().unwrap().get_all("wd").collect::<Vec<_>>(), ["测试", "2"]);
    /// assert_eq!(builder.fragment_ref(), Some("abc"));
    ///
    /// let e = UriBuilder::parse("www.example.com/s").unwrap_err();
    /// assert_eq!(e.kind(), ParseErrorKind::MissingScheme);
    /// # Ok::<_, url_builder::ParseError>(())
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let builder = parse(s)?;
        trace!("parsed {s:?} into {builder:?}");
        Ok(builder)
    }
}

impl FromStr for UriBuilder {
    type Err = ParseError;

    /// Equivalent to [`UriBuilder::parse`].
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse(s: &str) -> Result<UriBuilder> {
    let (rest, fragment) = match s.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (s, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((rest, query)) => (rest, Some(query)),
        None => (rest, None),
    };

    let Some((scheme, hier)) = rest.split_once("://") else {
        err!(0, MissingScheme);
    };
    if scheme.is_empty() {
        err!(0, MissingScheme);
    }
    if let Some(i) = invalid_scheme_index(scheme) {
        err!(i, InvalidScheme);
    }

    let auth_start = scheme.len() + 3;
    let (authority, path) = match hier.find('/') {
        Some(i) => hier.split_at(i),
        None => (hier, ""),
    };
    let (host, port) = split_port(authority);

    let mut builder = UriBuilder::new().scheme(scheme);

    if host.is_empty() {
        err!(auth_start, MissingHost);
    }
    if is_ip_literal(host) {
        builder = builder.host(host);
    } else {
        let host = pct_enc::decode(host).map_err(|e| ParseError::decode(e, auth_start))?;
        builder = builder.host(host.into_owned());
    }

    if let Some(port) = port {
        let port_start = auth_start + host.len() + 1;
        match parse_port(port) {
            Some(port) => builder = builder.port(port),
            None => err!(port_start, InvalidPort),
        }
    }

    if !path.is_empty() {
        let path_start = auth_start + authority.len();
        let path = PathComponent::parse(path).map_err(|e| ParseError::decode(e, path_start))?;
        builder = builder.path(path);
    }

    if let Some(query) = query {
        let query_start = rest.len() + 1;
        let query =
            QueryComponent::parse_pairs(query).map_err(|e| ParseError::decode(e, query_start))?;
        if !query.is_empty() {
            builder = builder.query(query);
        }
    }

    if let Some(fragment) = fragment {
        let fragment_start = s.len() - fragment.len();
        let fragment =
            pct_enc::decode(fragment).map_err(|e| ParseError::decode(e, fragment_start))?;
        builder = builder.fragment_decoded(&fragment);
    }

    Ok(builder)
}

fn invalid_scheme_index(scheme: &str) -> Option<usize> {
    let bytes = scheme.as_bytes();
    if !table::ALPHA.allows_ascii(bytes[0]) {
        return Some(0);
    }
    table::SCHEME.validate(bytes)
}

/// Splits an authority into host and port on the last `':'`.
///
/// A `':'` inside a bracketed IP literal is not a port separator, and an
/// empty port is the same as no port.
fn split_port(authority: &str) -> (&str, Option<&str>) {
    match authority.rsplit_once(':') {
        Some((_, port)) if port.contains(']') => (authority, None),
        Some((host, "")) => (host, None),
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    }
}

fn parse_port(port: &str) -> Option<u16> {
    if port.bytes().all(|x| x.is_ascii_digit()) {
        port.parse().ok()
    } else {
        None
    }
}
