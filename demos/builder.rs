use url_builder::{PathComponent, QueryComponent, UriBuilder};

fn main() {
    env_logger::init();

    let mut path = PathComponent::new();
    path.append("over").append("there").set_trailing_slash(true);

    let query: QueryComponent = [("name", "ferret"), ("name", "张三")].into_iter().collect();

    let builder = UriBuilder::new()
        .scheme("foo")
        .host("example.com")
        .port(8042)
        .path(path)
        .query(query)
        .fragment("#nose");

    match builder.render() {
        Ok(uri) => println!("{uri}"),
        Err(e) => println!("Error: {e}"),
    }
    println!("{builder:#?}");

    let builder = UriBuilder::new().fragment("fragment");
    match builder.render() {
        Ok(uri) => println!("{uri}"),
        Err(e) => println!("Error: {e}"),
    }
}
