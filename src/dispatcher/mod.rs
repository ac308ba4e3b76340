//! # Dispatcher Module
//!
//! The dispatcher turns a [`Request`] into a [`Response`]: it normalizes the
//! request path, asks the [`Router`](crate::Router) for the first matching
//! route and runs its target.
//!
//! ## Request Flow
//!
//! 1. Normalize the path (query string, fragment and mount prefix removed)
//! 2. Walk the routes of the request method in insertion order
//! 3. On the first match:
//!    - redirect routes answer with `Location` and their 3xx status, no handler runs
//!    - inline handlers are called with the captured segments
//!    - `Controller::action` callbacks are resolved through the
//!      [`ControllerRegistry`](crate::controller::ControllerRegistry), a fresh
//!      controller is built and the action is called with the captures
//! 4. The handler output becomes the response body
//!
//! ## Error Handling
//!
//! Failures stay inside the request that caused them:
//! - no matching route answers 404
//! - an unknown controller or action answers 500 and is logged at `error`
//! - a panicking handler is caught and answers 500
//!
//! [`Dispatcher::try_dispatch`] exposes the same flow with the typed
//! [`RouterError`](crate::RouterError) instead of a response.

mod core;
mod request;
mod response;
#[cfg(test)]
mod tests;

pub use core::{Dispatcher, Outcome};
pub use request::{Request, DEFAULT_HOST, DEFAULT_SCHEME};
pub use response::{HeaderVec, Response, MAX_INLINE_HEADERS};
