use crate::{
    pct_enc::{DecodeError, DecodeErrorKind, EStr},
    BuildError, ParseError, ParseErrorKind, PathComponent, QueryComponent,
};
use core::fmt;

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            DecodeErrorKind::InvalidOctet => "invalid percent-encoded octet at index ",
            DecodeErrorKind::InvalidUtf8 => "invalid UTF-8 after decoding at index ",
        };
        write!(f, "{}{}", msg, self.index)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::MissingScheme => "scheme not present",
            ParseErrorKind::InvalidScheme => "invalid scheme character at index ",
            ParseErrorKind::MissingHost => "host not present at index ",
            ParseErrorKind::InvalidPort => "invalid port at index ",
            ParseErrorKind::InvalidOctet => "invalid percent-encoded octet at index ",
            ParseErrorKind::InvalidUtf8 => "invalid UTF-8 after decoding at index ",
        };
        if self.kind == ParseErrorKind::MissingScheme {
            f.write_str(msg)
        } else {
            write!(f, "{}{}", msg, self.index)
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::MissingHost => "cannot render a URI without a host",
        };
        f.write_str(msg)
    }
}

impl fmt::Debug for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

/// Writes the path unencoded, as [`PathComponent::render`] with `encode` set to `false`.
impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Writes the query unencoded, or nothing if it has no pair.
impl fmt::Display for QueryComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render(false).as_deref().unwrap_or_default())
    }
}
