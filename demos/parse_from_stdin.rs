use std::io;
use url_builder::UriBuilder;

fn main() {
    env_logger::init();

    for line in io::stdin().lines() {
        let line = line.expect("failed to read line");
        match UriBuilder::parse(&line) {
            Ok(builder) => {
                println!("{builder:#?}");
                match builder.render() {
                    Ok(uri) => println!("canonical: {uri}"),
                    Err(e) => println!("Error: {e}"),
                }
            }
            Err(e) => println!("Error: {e}"),
        };
    }
}
