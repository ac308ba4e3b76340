//! # Router Module
//!
//! The router holds the compiled routing table and answers two questions:
//! which route does a request path belong to, and what is the path of a named
//! route.
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: when [`RouterBuilder::build`](crate::RouterBuilder::build)
//!    runs, every template is expanded by the placeholder table
//!    (`/user/:num` becomes `^/user/([0-9]+)$`) and compiled once.
//!
//! 2. **Matching**: for each request the router tests the normalized path
//!    against the routes of the request method in insertion order. The first
//!    match wins and its capture groups, minus the full match, become the
//!    handler arguments.
//!
//! ## Example
//!
//! ```rust
//! use cometroute::{Callback, RouterBuilder};
//! use http::Method;
//!
//! # fn main() -> Result<(), cometroute::RouterError> {
//! let mut builder = RouterBuilder::default();
//! builder.get("/user/:num", Callback::action("User::show")?).name("profile")?;
//! let router = builder.build()?;
//!
//! let m = router.match_route(&Method::GET, "/user/42").unwrap();
//! assert_eq!(m.captures.as_slice(), ["42"]);
//! assert!(router.match_route(&Method::GET, "/user/abc").is_none());
//!
//! assert_eq!(router.url("profile", &[(":num", "7")])?, "/user/7");
//! # Ok(())
//! # }
//! ```
//!
//! ## Performance
//!
//! Matching is a linear scan over the routes of one method, O(n) in the
//! number of routes. Patterns are compiled once at build time, never per
//! request.

mod core;
mod url;

pub use core::{CompiledRoute, RouteMatch, Router};
