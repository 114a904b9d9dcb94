#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! A builder and parser for URIs made of discrete, decoded components.
//!
//! A [`UriBuilder`] holds an optional scheme, host, port, [`PathComponent`],
//! [`QueryComponent`] and fragment, all decoded. [`UriBuilder::render`]
//! assembles them into one canonical string of the form
//!
//! ```text
//! scheme://host[:port]/path[?key=value&key=value][#fragment]
//! ```
//!
//! percent-encoding every piece of data with the same routine, and
//! [`UriBuilder::parse`] takes such a string apart again.
//!
//! # Examples
//!
//! ```
//! use url_builder::UriBuilder;
//!
//! let uri = UriBuilder::new()
//!     .scheme("https")
//!     .host("www.example.com")
//!     .append_path_segment("s")
//!     .append_query("ie", "UTF-8")
//!     .append_query("wd", "测试")
//!     .render()?;
//! assert_eq!(uri, "https://www.example.com/s?ie=UTF-8&wd=%E6%B5%8B%E8%AF%95");
//!
//! let builder = UriBuilder::parse(&uri)?;
//! assert_eq!(builder.query_ref().unwrap().get("wd"), Some("测试"));
//! assert_eq!(builder.render()?, uri);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Crate features
//!
//! - `std` (default): Enables `std` support. This implies `impl-error`.
//! - `impl-error`: Implements the `Error` trait for error types, also
//!   available without `std` through `core::error::Error`.
//! - `serde`: Implements `Serialize` and `Deserialize` for [`UriBuilder`],
//!   [`PathComponent`] and [`QueryComponent`] through their string forms.
//!
//! # Logging
//!
//! Events are emitted through the [`log`] facade: errors at the `debug`
//! level and successful renders and parses at the `trace` level.
//! No logger is installed by this crate.

extern crate alloc;

#[cfg(all(feature = "impl-error", not(feature = "std")))]
use core::error::Error;
#[cfg(feature = "std")]
use std::error::Error;

pub mod pct_enc;

mod build;
mod convert;
mod fmt;
mod parse;
mod path;
mod query;

pub use build::{BuildError, UriBuilder, DEFAULT_SCHEME};
pub use convert::{Decomposed, UriParts};
pub use parse::{ParseError, ParseErrorKind};
pub use path::PathComponent;
pub use query::{GetAll, QueryComponent};
