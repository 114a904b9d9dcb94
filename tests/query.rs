use std::collections::BTreeMap;

use url_builder::{pct_enc::DecodeErrorKind, QueryComponent};

#[test]
fn append_and_put() {
    let mut q = QueryComponent::new();
    q.append("ie", "UTF-8").append("ie", "GBK").append("wd", "测试");
    assert_eq!(q.len(), 3);
    assert_eq!(q.get_all("ie").collect::<Vec<_>>(), ["UTF-8", "GBK"]);

    q.put("ie", "UTF-8");
    assert_eq!(q.get_all("ie").collect::<Vec<_>>(), ["UTF-8"]);
    // The replacing pair goes last.
    assert_eq!(q.render(false).as_deref(), Some("wd=测试&ie=UTF-8"));

    q.put("new", "x");
    assert_eq!(q.get("new"), Some("x"));
}

#[test]
fn lookup_with_temporary_key() {
    let q: QueryComponent = [("wd", "1"), ("ie", "2"), ("wd", "3")].into_iter().collect();

    let first = q.get(&String::from("wd"));
    assert_eq!(first, Some("1"));

    let all: Vec<&str> = q.get_all(&format!("w{}", "d")).collect();
    assert_eq!(all, ["1", "3"]);

    let mut iter = q.get_all("missing");
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn trimming_and_empty_keys() {
    let mut q = QueryComponent::new();
    q.append(" k ", " v ");
    assert_eq!(q.pairs(), [("k".to_string(), "v".to_string())]);

    q.append("", "x").append("   ", "y").put("", "z");
    assert_eq!(q.len(), 1);

    q.append("none", None::<&str>);
    assert_eq!(q.get("none"), Some(""));
    assert_eq!(q.render(true).as_deref(), Some("k=v&none="));
}

#[test]
fn lookup_and_remove() {
    let mut q: QueryComponent = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
    assert!(q.contains_key("a"));
    assert!(!q.contains_key("c"));
    assert_eq!(q.get("a"), Some("1"));
    assert_eq!(q.get("c"), None);
    assert_eq!(
        q.iter().collect::<Vec<_>>(),
        [("a", "1"), ("b", "2"), ("a", "3")]
    );

    assert_eq!(q.remove("a"), 2);
    assert_eq!(q.remove("a"), 0);
    assert_eq!(q.iter().collect::<Vec<_>>(), [("b", "2")]);

    q.extend([("c", "4")]);
    assert_eq!(q.to_string(), "b=2&c=4");
}

#[test]
fn render_empty() {
    let q = QueryComponent::new();
    assert!(q.is_empty());
    assert_eq!(q.render(true), None);
    assert_eq!(q.render(false), None);
    assert_eq!(q.to_string(), "");
}

#[test]
fn render_encoded() {
    let mut q = QueryComponent::new();
    q.append("a b", "c&d").append("e=f", "g+h").append("测", "#");
    assert_eq!(
        q.render(true).as_deref(),
        Some("a%20b=c%26d&e%3Df=g%2Bh&%E6%B5%8B=%23")
    );
    assert_eq!(q.render(false).as_deref(), Some("a b=c&d&e=f=g+h&测=#"));
}

#[test]
fn parse() {
    let q = QueryComponent::parse("ie=UTF-8&wd=%E6%B5%8B%E8%AF%95").unwrap();
    assert_eq!(q.get("ie"), Some("UTF-8"));
    assert_eq!(q.get("wd"), Some("测试"));

    // Pieces without '=' and pairs with an empty key are dropped.
    let q = QueryComponent::parse("a=1&flag&=3&&c=").unwrap();
    assert_eq!(q.iter().collect::<Vec<_>>(), [("a", "1"), ("c", "")]);

    // Only the first '=' separates the key from the value.
    let q = QueryComponent::parse("k=a=b").unwrap();
    assert_eq!(q.get("k"), Some("a=b"));

    // '+' is data, not a space.
    let q = QueryComponent::parse("k=a+b").unwrap();
    assert_eq!(q.get("k"), Some("a+b"));

    assert!(QueryComponent::parse("").unwrap().is_empty());
    assert!(QueryComponent::parse("?").unwrap().is_empty());
}

#[test]
fn parse_strips_delimiters() {
    let q = QueryComponent::parse("https://www.example.com/s?ie=UTF-8&wd=1#top").unwrap();
    assert_eq!(q.iter().collect::<Vec<_>>(), [("ie", "UTF-8"), ("wd", "1")]);

    let q = QueryComponent::parse("?a=1#b=2").unwrap();
    assert_eq!(q.iter().collect::<Vec<_>>(), [("a", "1")]);

    // Everything up to the last '?' goes.
    let q = QueryComponent::parse("/s?x=1?y=2").unwrap();
    assert_eq!(q.iter().collect::<Vec<_>>(), [("y", "2")]);

    // A '?' after the first '#' is not looked at.
    let q = QueryComponent::parse("a=1#?b=2").unwrap();
    assert_eq!(q.iter().collect::<Vec<_>>(), [("a", "1")]);
}

#[test]
fn parse_error() {
    let e = QueryComponent::parse("?a=%zz").unwrap_err();
    assert_eq!(e.kind(), DecodeErrorKind::InvalidOctet);
    assert_eq!(e.index(), 3);

    let e = QueryComponent::parse("a=1&b=%FF").unwrap_err();
    assert_eq!(e.kind(), DecodeErrorKind::InvalidUtf8);
    assert_eq!(e.index(), 6);

    let e = QueryComponent::parse("%C3=1").unwrap_err();
    assert_eq!(e.kind(), DecodeErrorKind::InvalidUtf8);
    assert_eq!(e.index(), 0);
}

#[test]
fn render_parse_round_trip() {
    let mut q = QueryComponent::new();
    q.append("ie", "UTF-8")
        .append("wd", "测试")
        .append("expr", "a+b=c&d")
        .append("frag", "#?/")
        .append("wd", "100%");
    let s = q.render(true).unwrap();
    assert_eq!(QueryComponent::parse(&s).unwrap(), q);
}

#[test]
fn from_multimap() {
    let mut map = BTreeMap::new();
    map.insert("b", vec!["1", "2"]);
    map.insert("a", vec!["3"]);
    map.insert("", vec!["4"]);
    map.insert("c", vec![]);

    let q = QueryComponent::from_multimap(&map);
    assert_eq!(q.render(false).as_deref(), Some("a=3&b=1&b=2"));
}
