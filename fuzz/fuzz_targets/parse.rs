#![no_main]
use libfuzzer_sys::fuzz_target;
use url_builder::UriBuilder;

fuzz_target!(|data: &str| {
    let Ok(b) = UriBuilder::parse(data) else {
        return;
    };
    let Ok(s) = b.render() else {
        return;
    };
    let b2 = UriBuilder::parse(&s).unwrap();
    assert_eq!(b.scheme_ref(), b2.scheme_ref());
    assert_eq!(b.host_ref(), b2.host_ref());
    assert_eq!(b.port_ref(), b2.port_ref());
    assert_eq!(b.query_ref(), b2.query_ref());
    assert_eq!(b.fragment_ref(), b2.fragment_ref());

    // A decoded segment keeps any slash left after stripping one from each
    // end, and that slash is stripped again on the next parse.
    if segments(&b)
        .iter()
        .any(|s| s.starts_with('/') || s.ends_with('/'))
    {
        return;
    }
    assert_eq!(segments(&b), segments(&b2));
    // An absent or empty path renders as "/", which parses with the flag set.
    if !segments(&b).is_empty() {
        assert_eq!(trailing_slash(&b), trailing_slash(&b2));
    }
});

fn segments(b: &UriBuilder) -> &[String] {
    b.path_ref().map_or(&[][..], |p| p.segments())
}

fn trailing_slash(b: &UriBuilder) -> bool {
    b.path_ref().is_some_and(|p| p.has_trailing_slash())
}
