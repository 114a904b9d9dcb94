#![no_main]
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use url_builder::{pct_enc::table, UriBuilder, UriParts, DEFAULT_SCHEME};

#[derive(Arbitrary, Clone, Debug)]
struct Components {
    scheme: Option<String>,
    host: String,
    port: u16,
    segments: Vec<String>,
    trailing_slash: bool,
    query: Vec<(String, String)>,
    fragment: Option<String>,
}

fn is_valid_scheme(s: &str) -> bool {
    s.chars().next().is_some_and(|ch| table::ALPHA.allows(ch))
        && s.chars().all(|ch| table::SCHEME.allows(ch))
}

fuzz_target!(|c: Components| {
    if c.scheme.as_deref().is_some_and(|s| !is_valid_scheme(s)) {
        return;
    }
    let mut b = UriBuilder::new().host(c.host.as_str()).port(c.port);
    if let Some(scheme) = &c.scheme {
        b = b.scheme(scheme.as_str());
    }
    for segment in &c.segments {
        b = b.append_path_segment(segment);
    }
    b.path_mut().set_trailing_slash(c.trailing_slash);
    for (key, value) in &c.query {
        b = b.append_query(key, value.as_str());
    }
    if let Some(fragment) = &c.fragment {
        b = b.fragment(fragment);
    }

    let Ok(s) = b.render() else {
        assert!(c.host.trim().is_empty());
        return;
    };

    let mut expected = b.to_parts();
    // A stored segment is normalized again when parsed.
    if expected
        .segments
        .iter()
        .any(|s| s.starts_with('/') || s.ends_with('/'))
    {
        return;
    }
    if expected.scheme.is_none() {
        expected.scheme = Some(DEFAULT_SCHEME.into());
    }
    if expected.segments.is_empty() {
        expected.trailing_slash = true;
    }

    let parsed: UriParts = UriBuilder::parse(&s).unwrap().to_parts();
    assert_eq!(parsed, expected);
});
