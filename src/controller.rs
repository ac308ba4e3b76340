//! # Controllers
//!
//! String callbacks such as `"User::show"` name a controller and one of its
//! actions. Controllers are not looked up dynamically: each one is registered
//! with a factory in a [`ControllerRegistry`] during configuration, under its
//! qualified name (`<namespace>::<identifier>`). The dispatcher instantiates a
//! fresh controller per request and calls the action with the captured path
//! segments.
//!
//! ```rust
//! use cometroute::controller::{Controller, ControllerRegistry};
//!
//! #[derive(Default)]
//! struct User;
//!
//! impl Controller for User {
//!     fn call(&mut self, action: &str, args: &[String]) -> Option<String> {
//!         match action {
//!             "show" => Some(format!("user {}", args[0])),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut controllers = ControllerRegistry::new("App::Controllers");
//! controllers.register_default::<User>("User");
//!
//! let body = controllers.invoke("User", "show", &["7".to_string()]).unwrap();
//! assert_eq!(body, "user 7");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::DEFAULT_CONTROLLER_NAMESPACE;
use crate::error::{Result, RouterError};

/// An application controller exposing named actions.
pub trait Controller {
    /// Run `action` with the captured segments.
    ///
    /// Returns `None` when the controller has no such action.
    fn call(&mut self, action: &str, args: &[String]) -> Option<String>;
}

/// Builds a fresh controller instance for one request.
pub type ControllerFactory = Arc<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Closed table of controllers, keyed by qualified name.
#[derive(Clone)]
pub struct ControllerRegistry {
    namespace: String,
    factories: HashMap<String, ControllerFactory>,
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CONTROLLER_NAMESPACE)
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ControllerRegistry")
            .field("namespace", &self.namespace)
            .field("controllers", &names)
            .finish()
    }
}

impl ControllerRegistry {
    /// Empty registry resolving identifiers under `namespace`.
    #[must_use]
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.trim_end_matches("::").to_string(),
            factories: HashMap::new(),
        }
    }

    /// Namespace bare identifiers are resolved under.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Qualified name for a controller identifier.
    ///
    /// Identifiers that already contain `::` are taken as qualified.
    #[must_use]
    pub fn qualify(&self, identifier: &str) -> String {
        if self.namespace.is_empty() || identifier.contains("::") {
            identifier.to_string()
        } else {
            format!("{}::{identifier}", self.namespace)
        }
    }

    /// Register a controller built by `factory`.
    pub fn register<F, C>(&mut self, identifier: &str, factory: F) -> &mut Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Controller + 'static,
    {
        let qualified = self.qualify(identifier);
        info!(controller = %qualified, "Controller registered");
        self.factories.insert(
            qualified,
            Arc::new(move || Box::new(factory()) as Box<dyn Controller>),
        );
        self
    }

    /// Register a controller built with `Default`.
    pub fn register_default<C>(&mut self, identifier: &str) -> &mut Self
    where
        C: Controller + Default + 'static,
    {
        self.register(identifier, C::default)
    }

    /// Whether a controller is registered for `identifier`.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(&self.qualify(identifier))
    }

    /// Number of registered controllers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no controller is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Create a new instance of the controller named by `identifier`.
    #[must_use]
    pub fn instantiate(&self, identifier: &str) -> Option<Box<dyn Controller>> {
        self.factories
            .get(&self.qualify(identifier))
            .map(|factory| factory())
    }

    /// Instantiate `identifier` and run `action` on it.
    pub fn invoke(&self, identifier: &str, action: &str, args: &[String]) -> Result<String> {
        let unresolvable = || RouterError::UnresolvableController {
            controller: self.qualify(identifier),
            action: action.to_string(),
        };
        let mut controller = self.instantiate(identifier).ok_or_else(unresolvable)?;
        debug!(
            controller = %self.qualify(identifier),
            action = %action,
            args = ?args,
            "Invoking controller action"
        );
        controller.call(action, args).ok_or_else(unresolvable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Home {
        calls: usize,
    }

    impl Controller for Home {
        fn call(&mut self, action: &str, args: &[String]) -> Option<String> {
            self.calls += 1;
            match action {
                "index" => Some(format!("home {}", self.calls)),
                "echo" => Some(args.join(",")),
                _ => None,
            }
        }
    }

    #[test]
    fn test_qualify() {
        let registry = ControllerRegistry::new("App::Controllers::");
        assert_eq!(registry.qualify("Home"), "App::Controllers::Home");
        assert_eq!(registry.qualify("Other::Home"), "Other::Home");
        assert_eq!(ControllerRegistry::new("").qualify("Home"), "Home");
    }

    #[test]
    fn test_invoke_registered_action() {
        let mut registry = ControllerRegistry::default();
        registry.register_default::<Home>("Home");
        assert!(registry.contains("Home"));
        assert!(registry.contains("App::Controllers::Home"));

        let args = vec!["a".to_string(), "b".to_string()];
        assert_eq!(registry.invoke("Home", "echo", &args).unwrap(), "a,b");
    }

    #[test]
    fn test_fresh_instance_per_invocation() {
        let mut registry = ControllerRegistry::default();
        registry.register_default::<Home>("Home");
        assert_eq!(registry.invoke("Home", "index", &[]).unwrap(), "home 1");
        assert_eq!(registry.invoke("Home", "index", &[]).unwrap(), "home 1");
    }

    #[test]
    fn test_factory_runs_per_request() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        let mut registry = ControllerRegistry::default();
        registry.register("Home", || {
            BUILT.fetch_add(1, Ordering::SeqCst);
            Home::default()
        });
        registry.invoke("Home", "index", &[]).unwrap();
        registry.invoke("Home", "index", &[]).unwrap();
        assert_eq!(BUILT.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unknown_controller() {
        let registry = ControllerRegistry::default();
        match registry.invoke("Missing", "index", &[]).unwrap_err() {
            RouterError::UnresolvableController { controller, action } => {
                assert_eq!(controller, "App::Controllers::Missing");
                assert_eq!(action, "index");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_action() {
        let mut registry = ControllerRegistry::default();
        registry.register_default::<Home>("Home");
        let err = registry.invoke("Home", "missing", &[]).unwrap_err();
        assert!(matches!(err, RouterError::UnresolvableController { .. }));
    }
}
