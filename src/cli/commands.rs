use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use http::Method;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::RouterConfig;
use crate::manifest::load_manifest;
use crate::router::Router;

/// Command-line interface for cometroute
///
/// Loads a route manifest and answers questions about the resulting table.
#[derive(Debug, Parser)]
#[command(name = "cometroute")]
#[command(about = "Inspect cometroute routing tables", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List routes in matching order
    Routes {
        /// Route manifest (TOML or YAML)
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Match a request path against the table
    Match {
        /// Route manifest (TOML or YAML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Request method
        #[arg(long, default_value = "GET", value_parser = parse_method)]
        method: Method,

        /// Request path, query string allowed
        path: String,
    },
    /// Generate the path of a named route
    Url {
        /// Route manifest (TOML or YAML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Route name
        name: String,

        /// Placeholder value by token, e.g. `num=42` (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val, conflicts_with = "values")]
        params: Vec<(String, String)>,

        /// Placeholder value by position (repeatable)
        #[arg(long = "value")]
        values: Vec<String>,
    },
}

fn parse_method(s: &str) -> Result<Method, String> {
    match s.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        other => Err(format!("unsupported method `{other}`, expected GET or POST")),
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))
}

/// Run a parsed command line, printing to stdout.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&cli.command, &mut out)
}

/// Run one command, writing its report to `out`.
pub fn run_command(command: &Commands, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Commands::Routes { manifest } => {
            let router = load_router(manifest)?;
            router.dump_routes(out)?;
            Ok(())
        }
        Commands::Match {
            manifest,
            method,
            path,
        } => {
            let router = load_router(manifest)?;
            let normalized = router.normalize_path(path);
            let matched = router
                .try_match(method, &normalized)
                .with_context(|| format!("{method} {path}"))?;
            writeln!(
                out,
                "{} {} -> {} {}",
                method, normalized, matched.route.template, matched.route.target
            )?;
            for (index, capture) in matched.captures.iter().enumerate() {
                writeln!(out, "  ${} = {capture}", index + 1)?;
            }
            Ok(())
        }
        Commands::Url {
            manifest,
            name,
            params,
            values,
        } => {
            let router = load_router(manifest)?;
            let path = if values.is_empty() {
                let params: Vec<(&str, &str)> = params
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str()))
                    .collect();
                router.url(name, &params)?
            } else {
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                router.url_positional(name, &values)?
            };
            writeln!(out, "{path}")?;
            Ok(())
        }
    }
}

fn load_router(path: &Path) -> anyhow::Result<Router> {
    let manifest = load_manifest(path)?;
    let router = manifest
        .into_builder_with(RouterConfig::with_env_overrides)
        .and_then(|builder| builder.build())
        .with_context(|| format!("failed to build routes from {}", path.display()))?;
    if router.is_empty() {
        bail!("{} declares no routes", path.display());
    }
    info!(manifest = %path.display(), routes = router.len(), "Router ready");
    Ok(router)
}
