use url_builder::{BuildError, Decomposed, UriBuilder, UriParts};

#[test]
fn parts_round_trip() {
    let b = UriBuilder::new()
        .scheme("https")
        .host("www.example.com")
        .port(8090)
        .append_path_segment("a/b")
        .append_path_segment("c")
        .append_query("wd", "测试")
        .append_query("wd", "2")
        .fragment("#top");

    let parts = b.to_parts();
    assert_eq!(
        parts,
        UriParts {
            scheme: Some("https".into()),
            host: Some("www.example.com".into()),
            port: Some(8090),
            segments: vec!["a/b".into(), "c".into()],
            trailing_slash: false,
            query: vec![("wd".into(), "测试".into()), ("wd".into(), "2".into())],
            fragment: Some("top".into()),
        }
    );
    assert_eq!(UriParts::from(&b), parts);
    assert_eq!(UriBuilder::from(parts), b);
}

#[test]
fn parts_empty() {
    let b = UriBuilder::from_parts(UriParts::default());
    assert_eq!(b, UriBuilder::new());
    assert_eq!(b.to_parts(), UriParts::default());

    let b = UriBuilder::from_parts(UriParts {
        host: Some("example.com".into()),
        port: Some(0),
        segments: vec!["".into(), "/".into()],
        query: vec![("".into(), "x".into())],
        fragment: Some("".into()),
        ..Default::default()
    });
    assert_eq!(b.port_ref(), None);
    assert!(b.path_ref().is_none());
    assert!(b.query_ref().is_none());
    assert_eq!(b.fragment_ref(), None);
    assert_eq!(b.render().unwrap(), "http://example.com/");
}

#[test]
fn parts_fragment_is_data() {
    let b = UriBuilder::from_parts(UriParts {
        host: Some("example.com".into()),
        fragment: Some("#a".into()),
        ..Default::default()
    });
    assert_eq!(b.fragment_ref(), Some("#a"));
    assert_eq!(b.render().unwrap(), "http://example.com/#%23a");
}

#[test]
fn decomposed() {
    let d = UriBuilder::new()
        .scheme("https")
        .host("www.example.com")
        .port(8090)
        .append_path_segment("测试")
        .append_path_segment("a b")
        .append_query("wd", "测 试")
        .append_query("x", "a&b")
        .fragment("top")
        .to_decomposed()
        .unwrap();
    assert_eq!(
        d,
        Decomposed {
            scheme: "https".into(),
            authority: "www.example.com:8090".into(),
            path: "/测试/a b".into(),
            query: Some("wd=测 试&x=a&b".into()),
            fragment: Some("top".into()),
        }
    );

    let d = UriBuilder::new().host("example.com").to_decomposed().unwrap();
    assert_eq!(d.scheme, "http");
    assert_eq!(d.authority, "example.com");
    assert_eq!(d.path, "/");
    assert_eq!(d.query, None);
    assert_eq!(d.fragment, None);

    let d = UriBuilder::new().host("[::1]").port(80).to_decomposed().unwrap();
    assert_eq!(d.authority, "[::1]:80");

    assert_eq!(
        UriBuilder::new().to_decomposed(),
        Err(BuildError::MissingHost)
    );
}
