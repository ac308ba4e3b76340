//! # cometroute
//!
//! **cometroute** is a small, ordered URL router for server-side web
//! applications. Routes map an HTTP method and a path template to a callback,
//! a `Controller::action` pair, or a redirect. The first registered route that
//! matches wins.
//!
//! ## Overview
//!
//! Path templates are literal paths with placeholder tokens:
//!
//! | token       | matches              |
//! |-------------|----------------------|
//! | `:num`      | `([0-9]+)`           |
//! | `:alpha`    | `([a-zA-Z]+)`        |
//! | `:alphanum` | `([0-9a-zA-Z]+)`     |
//! | `:any`      | `([0-9a-zA-Z_-]+)`   |
//!
//! `:num`, `:alphanum` and `:any` also come numbered (`:num1` ... `:num9`) so a
//! template can say which capture is which. Applications add their own tokens
//! with [`RouterBuilder::where_`].
//!
//! ## Architecture
//!
//! - **[`placeholder`]** - token table and template to regex resolution
//! - **[`registry`]** - [`RouterBuilder`]: registration, naming, groups, redirects
//! - **[`router`]** - the frozen [`Router`]: matching and reverse URL generation
//! - **[`dispatcher`]** - runs the matched target and builds a [`Response`]
//! - **[`controller`]** - controller trait and factory table
//! - **[`config`]** - [`RouterConfig`] from files and `COMET_*` variables
//! - **[`manifest`]** - declarative routing tables in TOML or YAML
//! - **[`logging`]** - `tracing-subscriber` setup for binaries
//! - **[`cli`]** - the `cometroute` inspection tool
//!
//! Registration happens on a mutable [`RouterBuilder`]. [`RouterBuilder::build`]
//! compiles every template once and returns an immutable [`Router`], so there is
//! no window in which a half-registered table can be matched against.
//!
//! ## Example
//!
//! ```
//! use cometroute::{Callback, Dispatcher, Request, RouterBuilder, RouterConfig};
//! use cometroute::controller::ControllerRegistry;
//!
//! let mut builder = RouterBuilder::new(RouterConfig::default());
//! builder.get("/hello/:alpha", Callback::inline(|args| format!("hello {}", args[0])));
//! builder.get("/post/:num", Callback::action("Blog::show")?);
//! builder.name("post")?;
//! builder.redirect("/old", "/hello/world")?;
//! let router = builder.build()?;
//!
//! assert_eq!(router.url("post", &[(":num", "7")])?, "/post/7");
//!
//! let dispatcher = Dispatcher::new(router, ControllerRegistry::default());
//! let response = dispatcher.dispatch(&Request::get("/hello/comet"));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body, "hello comet");
//! # Ok::<(), cometroute::RouterError>(())
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod placeholder;
pub mod registry;
pub mod router;

pub use config::RouterConfig;
pub use controller::{Controller, ControllerRegistry};
pub use dispatcher::{Dispatcher, Outcome, Request, Response};
pub use error::{Result, RouterError};
pub use manifest::{load_manifest, Manifest};
pub use registry::{Callback, RouterBuilder, Target};
pub use router::{CompiledRoute, RouteMatch, Router};
