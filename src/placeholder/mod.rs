//! # Placeholder Module
//!
//! Route templates carry short placeholder tokens (`:num`, `:alpha`, ...) that
//! expand into regular-expression fragments when the template is compiled.
//!
//! ## Built-in tokens
//!
//! | token       | fragment           | numbered variants |
//! |-------------|--------------------|-------------------|
//! | `:num`      | `([0-9]+)`         | `:num0`..`:num9`  |
//! | `:alpha`    | `([a-zA-Z]+)`      | no                |
//! | `:alphanum` | `([0-9a-zA-Z]+)`   | yes               |
//! | `:any`      | `([0-9a-zA-Z_-]+)` | yes               |
//!
//! Numbered variants let one template carry several captures of the same kind,
//! e.g. `/post/:num1/comment/:num2`.
//!
//! ## Ordering
//!
//! The table is an ordered association list. [`PlaceholderTable::resolve`]
//! performs one substitution pass per token, in insertion order, and
//! re-registering a token keeps its original position. A token only matches
//! where it is not followed by another word character, so `:alpha` leaves
//! `:alphanum` alone.
//!
//! ## Example
//!
//! ```rust
//! use cometroute::placeholder::PlaceholderTable;
//!
//! let mut table = PlaceholderTable::default();
//! table.where_("slug", "[a-z0-9-]+").unwrap();
//!
//! assert_eq!(table.resolve("/user/:num"), "^/user/([0-9]+)$");
//! assert_eq!(table.resolve("/blog/:slug"), "^/blog/([a-z0-9-]+)$");
//! ```

mod core;

pub use core::{Occurrence, Placeholder, PlaceholderTable};
