use crate::{
    pct_enc::{
        self,
        table::{self, Table},
        Data,
    },
    PathComponent, QueryComponent,
};
use alloc::string::String;

/// An output buffer filled from start to end, one component at a time.
#[derive(Default)]
pub struct BuilderInner {
    pub buf: String,
}

impl BuilderInner {
    pub fn push_scheme(&mut self, v: &str) {
        self.buf.push_str(v);
        self.buf.push(':');
    }

    pub fn start_authority(&mut self) {
        self.buf.push_str("//");
    }

    pub fn push_host(&mut self, v: &str) {
        if is_ip_literal(v) {
            self.buf.push_str(v);
        } else {
            pct_enc::encode_to::<Data>(v, &mut self.buf);
        }
    }

    pub fn push_port(&mut self, port: u16) {
        let mut digits = [0u8; 5];
        let mut i = digits.len();
        let mut n = port;
        loop {
            i -= 1;
            digits[i] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }

        self.buf.push(':');
        self.buf.extend(digits[i..].iter().map(|&x| char::from(x)));
    }

    pub fn push_path(&mut self, path: Option<&PathComponent>, encode: bool) {
        match path {
            Some(path) if !path.is_empty() => path.render_to(&mut self.buf, encode),
            _ => self.buf.push('/'),
        }
    }

    pub fn push_query(&mut self, query: Option<&QueryComponent>, encode: bool) {
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            self.buf.push('?');
            query.render_to(&mut self.buf, encode);
        }
    }

    pub fn push_fragment(&mut self, v: Option<&str>) {
        if let Some(v) = v {
            self.buf.push('#');
            pct_enc::encode_to::<Data>(v, &mut self.buf);
        }
    }
}

/// `IPv6address` characters, without the brackets.
const IPV6: Table = table::HEXDIG.or(Table::new(b":."));

/// `IPvFuture` characters after the `"v" 1*HEXDIG "."` prefix.
const IPV_FUTURE: Table = table::UNRESERVED
    .or(table::SUB_DELIMS)
    .or(Table::new(b":"));

/// Checks whether a host is a bracketed IP literal such as `[::1]` or `[v7.a:b]`.
///
/// Only the characters allowed in an `IP-literal` may appear between the
/// brackets, so a literal never contains a delimiter of another component.
pub fn is_ip_literal(host: &str) -> bool {
    let Some(inner) = host.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
        return false;
    };

    if let Some(rest) = inner.strip_prefix(&['v', 'V'][..]) {
        let Some((version, addr)) = rest.split_once('.') else {
            return false;
        };
        !version.is_empty()
            && table::HEXDIG.validate(version.as_bytes()).is_none()
            && !addr.is_empty()
            && IPV_FUTURE.validate(addr.as_bytes()).is_none()
    } else {
        inner.contains(':') && IPV6.validate(inner.as_bytes()).is_none()
    }
}
