use url_builder::{BuildError, PathComponent, QueryComponent, UriBuilder, DEFAULT_SCHEME};

#[test]
fn render_minimal() {
    let b = UriBuilder::new().host("www.example.com");
    assert_eq!(b.render().unwrap(), "http://www.example.com/");
    assert_eq!(DEFAULT_SCHEME, "http");

    let b = UriBuilder::new().scheme("https").host("www.example.com").port(8090);
    assert_eq!(b.render().unwrap(), "https://www.example.com:8090/");
}

#[test]
fn render_missing_host() {
    assert_eq!(UriBuilder::new().render(), Err(BuildError::MissingHost));
    assert_eq!(
        UriBuilder::new().scheme("https").fragment("x").render(),
        Err(BuildError::MissingHost)
    );
    assert_eq!(
        UriBuilder::new().host("").render(),
        Err(BuildError::MissingHost)
    );
    assert_eq!(
        UriBuilder::new().host("   ").render(),
        Err(BuildError::MissingHost)
    );
    assert_eq!(
        BuildError::MissingHost.to_string(),
        "cannot render a URI without a host"
    );
}

#[test]
fn render_path_and_query() {
    let b = UriBuilder::new()
        .scheme("https")
        .host("www.example.com")
        .append_path_segment("/s")
        .append_query("ie", "UTF-8")
        .append_query("ie", "GBK")
        .append_query("wd", "测试");
    assert_eq!(
        b.render().unwrap(),
        "https://www.example.com/s?ie=UTF-8&ie=GBK&wd=%E6%B5%8B%E8%AF%95"
    );
}

#[test]
fn render_put_query() {
    let b = UriBuilder::new()
        .host("www.example.com")
        .append_query("ie", "UTF-8")
        .append_query("ie", "GBK")
        .put_query("ie", "UTF-8");
    assert_eq!(b.render().unwrap(), "http://www.example.com/?ie=UTF-8");
}

#[test]
fn render_complex() {
    let mut path = PathComponent::new();
    path.append("s");

    let mut query = QueryComponent::new();
    query
        .append("ie", "UTF-8")
        .append("wd", "测试")
        .append("tfflag", "1")
        .append("abc", "one")
        .append("abc", "two");

    let b = UriBuilder::new()
        .scheme("https")
        .host("www.example.com")
        .path(path)
        .query(query)
        .fragment("bbb");
    assert_eq!(
        b.render().unwrap(),
        "https://www.example.com/s?ie=UTF-8&wd=%E6%B5%8B%E8%AF%95&tfflag=1&abc=one&abc=two#bbb"
    );
}

#[test]
fn render_empty_components() {
    let b = UriBuilder::new()
        .host("www.example.com")
        .path(PathComponent::new())
        .query(QueryComponent::new());
    assert_eq!(b.render().unwrap(), "http://www.example.com/");

    // Empty keys never make it into the query.
    let b = UriBuilder::new()
        .host("www.example.com")
        .append_query("", "x")
        .append_query("  ", "y");
    assert_eq!(b.render().unwrap(), "http://www.example.com/");
    assert!(b.query_ref().unwrap().is_empty());
}

#[test]
fn render_trailing_slash() {
    let mut path = PathComponent::new();
    path.append("a").append("b").set_trailing_slash(true);
    let b = UriBuilder::new().host("example.com").path(path);
    assert_eq!(b.render().unwrap(), "http://example.com/a/b/");

    let mut path = PathComponent::new();
    path.set_trailing_slash(true);
    let b = UriBuilder::new().host("example.com").path(path);
    assert_eq!(b.render().unwrap(), "http://example.com/");
}

#[test]
fn render_encodes_everything() {
    let b = UriBuilder::new()
        .host("例子.com")
        .append_path_segment("a b")
        .append_path_segment("x?y")
        .append_query("k&=", "v#1+2")
        .fragment("frag ment/?");
    assert_eq!(
        b.render().unwrap(),
        "http://%E4%BE%8B%E5%AD%90.com/a%20b/x%3Fy?k%26%3D=v%231%2B2#frag%20ment%2F%3F"
    );
}

#[test]
fn render_ip_literal() {
    let b = UriBuilder::new().host("[::1]").port(8080);
    assert_eq!(b.render().unwrap(), "http://[::1]:8080/");

    let b = UriBuilder::new().host("[v1.fe80::a+en1]");
    assert_eq!(b.render().unwrap(), "http://[v1.fe80::a+en1]/");

    let b = UriBuilder::new().host("127.0.0.1");
    assert_eq!(b.render().unwrap(), "http://127.0.0.1/");
}

#[test]
fn render_bracketed_non_literal() {
    let cases = [
        ("[a/b]", "http://%5Ba%2Fb%5D/s"),
        ("[x?y]", "http://%5Bx%3Fy%5D/s"),
        ("[ ]", "http://%5B%20%5D/s"),
        ("[a#b]", "http://%5Ba%23b%5D/s"),
        ("[::1%25eth0]", "http://%5B%3A%3A1%2525eth0%5D/s"),
    ];
    for (host, uri) in cases {
        let b = UriBuilder::new().host(host).append_path_segment("s");
        assert_eq!(b.render().unwrap(), uri);

        let parsed = UriBuilder::parse(uri).unwrap();
        assert_eq!(parsed.host_ref(), Some(host));
        assert_eq!(parsed.path_ref().unwrap().segments(), ["s"]);
        assert_eq!(parsed.render().unwrap(), uri);
    }
}

#[test]
fn render_is_repeatable() {
    let b = UriBuilder::new()
        .host("example.com")
        .append_path_segment("a")
        .append_query("q", "1");
    let first = b.render().unwrap();
    assert_eq!(first, b.render().unwrap());

    let b = b.append_path_segment("b");
    assert_eq!(b.render().unwrap(), "http://example.com/a/b?q=1");
}

#[test]
fn port() {
    let b = UriBuilder::new().host("example.com").port(8080);
    assert_eq!(b.port_ref(), Some(8080));

    let b = b.port(0);
    assert_eq!(b.port_ref(), None);
    assert_eq!(b.render().unwrap(), "http://example.com/");
}

#[test]
fn fragment() {
    let b = UriBuilder::new().host("example.com").fragment("#top");
    assert_eq!(b.fragment_ref(), Some("top"));
    assert_eq!(b.render().unwrap(), "http://example.com/#top");

    let b = b.fragment("top");
    assert_eq!(b.render().unwrap(), "http://example.com/#top");

    // Only one '#' is stripped.
    let b = b.fragment("##top");
    assert_eq!(b.fragment_ref(), Some("#top"));
    assert_eq!(b.render().unwrap(), "http://example.com/#%23top");

    for clear in ["", "   ", "#"] {
        let b = UriBuilder::new().host("example.com").fragment("x").fragment(clear);
        assert_eq!(b.fragment_ref(), None);
        assert_eq!(b.render().unwrap(), "http://example.com/");
    }
}

#[test]
fn path_segments() {
    let b = UriBuilder::new()
        .host("example.com")
        .append_path_segment("b")
        .prepend_path_segment("/a/")
        .append_path_segment("")
        .append_path_segment("/")
        .append_path_segment(" c ");
    assert_eq!(b.path_ref().unwrap().segments(), ["a", "b", "c"]);
    assert_eq!(b.render().unwrap(), "http://example.com/a/b/c");
}

#[test]
fn mutable_access() {
    let mut b = UriBuilder::new().host("example.com");
    assert!(b.path_ref().is_none());
    assert!(b.query_ref().is_none());

    b.path_mut().append("a").set_trailing_slash(true);
    b.query_mut().append("k", "v").append("k", "");
    assert_eq!(b.render().unwrap(), "http://example.com/a/?k=v&k=");

    assert_eq!(b.query_mut().remove("k"), 2);
    assert_eq!(b.render().unwrap(), "http://example.com/a/");
}

#[test]
fn from_raw() {
    let b = UriBuilder::from_raw(
        Some("https"),
        Some("www.example.com"),
        8090,
        "/s/",
        "?ie=UTF-8&wd=%E6%B5%8B%E8%AF%95",
        Some("#abc"),
    )
    .unwrap();
    assert_eq!(b.port_ref(), Some(8090));
    assert_eq!(b.path_ref().unwrap().segments(), ["s"]);
    assert!(b.path_ref().unwrap().has_trailing_slash());
    assert_eq!(b.query_ref().unwrap().get("wd"), Some("测试"));
    assert_eq!(b.fragment_ref(), Some("abc"));
    assert_eq!(
        b.render().unwrap(),
        "https://www.example.com:8090/s/?ie=UTF-8&wd=%E6%B5%8B%E8%AF%95#abc"
    );

    let b = UriBuilder::from_raw(None, Some("example.com"), 0, "", "", None).unwrap();
    assert_eq!(b.scheme_ref(), None);
    assert_eq!(b.port_ref(), None);
    assert!(b.path_ref().is_none());
    assert!(b.query_ref().is_none());
    assert_eq!(b.render().unwrap(), "http://example.com/");

    let e = UriBuilder::from_raw(None, Some("example.com"), 0, "/a%zz", "", None).unwrap_err();
    assert_eq!(e.index(), 2);
}
