//! # Registry Module
//!
//! Route registration: the [`RouterBuilder`] collects placeholders and routes
//! during configuration, [`Scope`] threads group prefixes through nested
//! `group` calls, and [`RouteRegistry`] keeps the routes per method in
//! insertion order.
//!
//! Insertion order matters. Routes are tried first to last and the first
//! structural match wins, so overlapping templates must be registered from the
//! most specific to the least specific:
//!
//! ```rust
//! use cometroute::{Callback, RouterBuilder};
//!
//! # fn main() -> Result<(), cometroute::RouterError> {
//! let mut builder = RouterBuilder::default();
//! builder.get("/item/special", Callback::inline(|_| "special".into()));
//! builder.get("/item/:any", Callback::inline(|args| format!("item {}", args[0])));
//! let router = builder.build()?;
//!
//! let m = router.match_route(&http::Method::GET, "/item/special").unwrap();
//! assert_eq!(m.route.template, "/item/special");
//! # Ok(())
//! # }
//! ```

mod builder;
mod core;
mod route;

pub use builder::RouterBuilder;
pub use core::{RouteRegistry, Scope};
pub use route::{
    Callback, Captures, InlineHandler, RouteDef, Target, CONTROLLER_SEPARATOR,
    DEFAULT_REDIRECT_STATUS, MAX_INLINE_PARAMS,
};
