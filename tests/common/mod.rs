#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Write `content` to a uniquely named temporary file with extension `ext`.
    pub fn create_temp_manifest(content: &str, ext: &str) -> PathBuf {
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "comet_test_{}_{}.{}",
            std::process::id(),
            counter,
            ext
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn create_temp_toml(content: &str) -> PathBuf {
        create_temp_manifest(content, "toml")
    }

    pub fn create_temp_yaml(content: &str) -> PathBuf {
        create_temp_manifest(content, "yaml")
    }

    pub fn cleanup_temp(path: &PathBuf) {
        let _ = std::fs::remove_file(path);
    }
}

pub mod controllers {
    use cometroute::controller::{Controller, ControllerRegistry};

    /// Echoes the action and its captures: `Blog#show(7)`.
    #[derive(Default)]
    pub struct Blog;

    impl Controller for Blog {
        fn call(&mut self, action: &str, args: &[String]) -> Option<String> {
            match action {
                "index" | "show" | "archive" | "save" => {
                    Some(format!("Blog#{action}({})", args.join(",")))
                }
                _ => None,
            }
        }
    }

    pub fn registry() -> ControllerRegistry {
        let mut controllers = ControllerRegistry::default();
        controllers.register_default::<Blog>("Blog");
        controllers
    }
}
