//! Percent-encoding utilities.
//!
//! Every component rendered by this crate goes through the same routine:
//! a character is kept verbatim if the [`Encoder`]'s table allows it, and
//! each byte of its UTF-8 form is encoded as `%XX` (uppercase hexadecimal)
//! otherwise. The [`Data`] encoder only allows the `unreserved` characters
//! of RFC 3986, so the space character becomes `%20` and never `+`.
//!
//! Decoding is strict: a `'%'` not followed by two hexadecimal digits, or
//! decoded bytes that are not valid UTF-8, fail with a [`DecodeError`].
//! `U+002B` (+) is **not** decoded as a space.
//!
//! # Examples
//!
//! ```
//! use url_builder::pct_enc;
//!
//! assert_eq!(pct_enc::encode("测试 a+b"), "%E6%B5%8B%E8%AF%95%20a%2Bb");
//! assert_eq!(pct_enc::decode("%E6%B5%8B%E8%AF%95%20a+b").unwrap(), "测试 a+b");
//! assert!(pct_enc::decode("100%").is_err());
//! ```

pub mod table;

pub use table::Table;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{hash, iter::FusedIterator, str};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A trait specifying the table used for encoding.
pub trait Encoder: 'static {
    /// The table used for encoding.
    const TABLE: Table;
}

/// An encoder for data contained in any URI component.
///
/// Only `unreserved` characters are left unencoded, so the output never
/// contains a component delimiter.
#[derive(Clone, Copy, Debug)]
pub struct Data(());

impl Encoder for Data {
    const TABLE: Table = table::UNRESERVED;
}

/// Detailed cause of a [`DecodeError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeErrorKind {
    /// Invalid percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character "%" of the octet.
    InvalidOctet,
    /// The decoded bytes are not valid UTF-8.
    ///
    /// The error index points to the first byte of the input that
    /// contributed to the invalid sequence.
    InvalidUtf8,
}

/// An error occurred when percent-decoding a string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeError {
    pub(crate) index: usize,
    pub(crate) kind: DecodeErrorKind,
}

impl DecodeError {
    /// Returns the index at which the error occurred in the input string.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    pub(crate) fn shift(self, offset: usize) -> Self {
        Self {
            index: self.index + offset,
            kind: self.kind,
        }
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for DecodeError {}

/// Percent-encoded string slices.
///
/// An `EStr` slice is a string slice in which every `'%'` starts a
/// well-formed percent-encoded octet. It is obtained with [`EStr::new`]
/// and is the starting point for splitting a raw component on its
/// delimiters and decoding the pieces.
///
/// Always **split before decoding**, as otherwise the data may be
/// mistaken for component delimiters.
///
/// # Examples
///
/// ```
/// use url_builder::pct_enc::EStr;
///
/// let s = EStr::new("id=3&name=%E5%BC%A0%E4%B8%89")?;
/// let pairs: Vec<_> = s
///     .split('&')
///     .filter_map(|pair| pair.split_once('='))
///     .map(|(k, v)| (k.decode().to_string().unwrap(), v.decode().to_string().unwrap()))
///     .collect();
/// assert_eq!(pairs[1].0, "name");
/// assert_eq!(pairs[1].1, "张三");
/// # Ok::<_, url_builder::pct_enc::DecodeError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Self;

    /// Converts a string slice to an `EStr` slice.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains a `'%'` that is not followed
    /// by two hexadecimal digits.
    pub fn new(s: &str) -> Result<&Self, DecodeError> {
        let bytes = s.as_bytes();
        let mut i = 0;
        while let Some(off) = bytes[i..].iter().position(|&x| x == b'%') {
            i += off;
            match bytes.get(i + 1..i + 3) {
                Some(&[hi, lo]) if is_hexdig_pair(hi, lo) => i += 3,
                _ => {
                    return Err(DecodeError {
                        index: i,
                        kind: DecodeErrorKind::InvalidOctet,
                    })
                }
            }
        }
        Ok(Self::new_validated(s))
    }

    /// Yields the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` slice in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator used to decode the `EStr` slice.
    pub fn decode(&self) -> Decode<'_> {
        Decode::new(&self.inner)
    }

    /// Returns an iterator over subslices of the `EStr` slice separated by the given delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    pub fn split(&self, delim: char) -> Split<'_> {
        assert!(
            table::RESERVED.allows(delim),
            "splitting with non-reserved character"
        );
        Split {
            inner: self.inner.split(delim),
        }
    }

    /// Splits the `EStr` slice on the first occurrence of the given delimiter and
    /// returns prefix before delimiter and suffix after delimiter.
    ///
    /// Returns `None` if the delimiter is not found.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    #[must_use]
    pub fn split_once(&self, delim: char) -> Option<(&Self, &Self)> {
        assert!(
            table::RESERVED.allows(delim),
            "splitting with non-reserved character"
        );
        self.inner
            .split_once(delim)
            .map(|(a, b)| (Self::new_validated(a), Self::new_validated(b)))
    }

    /// Returns the byte offset of a subslice of this `EStr` slice.
    pub(crate) fn offset_of(&self, sub: &EStr) -> usize {
        let offset = sub.inner.as_ptr() as usize - self.inner.as_ptr() as usize;
        debug_assert!(offset <= self.inner.len());
        offset
    }
}

impl AsRef<str> for EStr {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for EStr {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for EStr {}

impl hash::Hash for EStr {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl PartialEq<str> for EStr {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<&str> for EStr {
    fn eq(&self, other: &&str) -> bool {
        &self.inner == *other
    }
}

/// An iterator over subslices of an [`EStr`] slice separated by a delimiter.
///
/// This struct is created by [`EStr::split`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Split<'a> {
    inner: str::Split<'a, char>,
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a EStr;

    fn next(&mut self) -> Option<&'a EStr> {
        self.inner.next().map(EStr::new_validated)
    }
}

impl FusedIterator for Split<'_> {}

pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    table::HEXDIG.allows_ascii(hi) && table::HEXDIG.allows_ascii(lo)
}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

/// An iterator used to decode an [`EStr`] slice.
///
/// This struct is created by [`EStr::decode`]. Normally you'll use
/// [`to_string`](Self::to_string) instead of iterating over a `Decode`
/// manually.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Decode<'a> {
    source: &'a str,
}

/// An item returned by the [`Decode`] iterator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodedChunk<'a> {
    /// An unencoded subslice.
    Unencoded(&'a str),
    /// A percent-encoded octet, decoded (for example, `"%20"` decoded as `0x20`).
    PctDecoded(u8),
}

impl<'a> Decode<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn next_if_unencoded(&mut self) -> Option<&'a str> {
        let i = self
            .source
            .bytes()
            .position(|x| x == b'%')
            .unwrap_or(self.source.len());

        if i == 0 {
            None
        } else {
            let s;
            (s, self.source) = self.source.split_at(i);
            Some(s)
        }
    }

    /// Decodes the slice to bytes.
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    #[must_use]
    pub fn to_bytes(self) -> Cow<'a, [u8]> {
        if !self.source.contains('%') {
            return Cow::Borrowed(self.source.as_bytes());
        }

        let mut buf = Vec::with_capacity(self.source.len());
        for chunk in self {
            match chunk {
                DecodedChunk::Unencoded(s) => buf.extend_from_slice(s.as_bytes()),
                DecodedChunk::PctDecoded(x) => buf.push(x),
            }
        }
        Cow::Owned(buf)
    }

    /// Decodes the slice to a string.
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the decoded bytes are not valid UTF-8.
    pub fn to_string(self) -> Result<Cow<'a, str>, DecodeError> {
        let source = self.source;
        match self.to_bytes() {
            Cow::Borrowed(_) => Ok(Cow::Borrowed(source)),
            Cow::Owned(bytes) => String::from_utf8(bytes).map(Cow::Owned).map_err(|e| {
                DecodeError {
                    index: source_index(source, e.utf8_error().valid_up_to()),
                    kind: DecodeErrorKind::InvalidUtf8,
                }
            }),
        }
    }
}

impl<'a> Iterator for Decode<'a> {
    type Item = DecodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.is_empty() {
            None
        } else if let Some(s) = self.next_if_unencoded() {
            Some(DecodedChunk::Unencoded(s))
        } else {
            let s;
            (s, self.source) = self.source.split_at(3);
            let x = decode_octet(s.as_bytes()[1], s.as_bytes()[2]);
            Some(DecodedChunk::PctDecoded(x))
        }
    }
}

impl FusedIterator for Decode<'_> {}

/// Maps an index into the decoded bytes back to the encoded source.
fn source_index(source: &str, decoded: usize) -> usize {
    let bytes = source.as_bytes();
    let (mut i, mut j) = (0, 0);
    while j < decoded && i < bytes.len() {
        i += if bytes[i] == b'%' { 3 } else { 1 };
        j += 1;
    }
    i
}

pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

/// An iterator used to percent-encode a string slice.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
struct Encode<'s> {
    table: Table,
    source: &'s str,
    to_enc: &'s [u8],
}

impl<'s> Encode<'s> {
    fn new(table: Table, source: &'s str) -> Self {
        Self {
            table,
            source,
            to_enc: &[],
        }
    }
}

impl<'a> Iterator for Encode<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if let [x, rem @ ..] = self.to_enc {
            self.to_enc = rem;
            return Some(encode_byte(*x));
        }

        if self.source.is_empty() {
            return None;
        }

        let mut iter = self.source.char_indices();

        let first_unallowed_i = iter
            .find_map(|(i, ch)| (!self.table.allows(ch)).then_some(i))
            .unwrap_or(self.source.len());

        let next_allowed_i = iter
            .find_map(|(i, ch)| self.table.allows(ch).then_some(i))
            .unwrap_or(self.source.len());

        if first_unallowed_i == 0 {
            let (unallowed, rem) = self.source.split_at(next_allowed_i);
            self.source = rem;

            let (x, rem) = unallowed.as_bytes().split_first()?;
            self.to_enc = rem;

            Some(encode_byte(*x))
        } else {
            let allowed = &self.source[..first_unallowed_i];
            self.to_enc = &self.source.as_bytes()[first_unallowed_i..next_allowed_i];
            self.source = &self.source[next_allowed_i..];

            Some(allowed)
        }
    }
}

impl FusedIterator for Encode<'_> {}

/// Percent-encodes a string with the given encoder and appends the result to a buffer.
pub fn encode_to<E: Encoder>(s: &str, buf: &mut String) {
    for chunk in Encode::new(E::TABLE, s) {
        buf.push_str(chunk);
    }
}

/// Percent-encodes a string with the [`Data`] encoder.
#[must_use]
pub fn encode(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    encode_to::<Data>(s, &mut buf);
    buf
}

/// Percent-decodes a string.
///
/// # Errors
///
/// Returns `Err` if the string contains a malformed percent-encoded octet
/// or if the decoded bytes are not valid UTF-8.
pub fn decode(s: &str) -> Result<Cow<'_, str>, DecodeError> {
    EStr::new(s)?.decode().to_string()
}
