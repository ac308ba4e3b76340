//! Unit tests for CLI commands

use crate::cli::{run_command, Cli, Commands};
use clap::Parser;
use http::Method;
use std::io::Write;
use tempfile::NamedTempFile;

const MANIFEST: &str = r#"
[[routes]]
path = "/user/:num"
controller = "User::show"
name = "profile"

[[routes]]
path = "/archive/:num1/:num2"
controller = "Archive::month"
name = "archive"

[[routes]]
group = "/admin"
routes = [
    { path = "/list", controller = "Admin::list" },
    { method = "POST", path = "/save", controller = "Admin::save" },
]

[[routes]]
from = "/old"
to = "/new"
status = 302
"#;

fn manifest_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(MANIFEST.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run_command(&cli.command, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_match_command_parses() {
    let cli = Cli::try_parse_from(["cometroute", "match", "-m", "routes.toml", "/user/1"]).unwrap();
    match cli.command {
        Commands::Match {
            manifest,
            method,
            path,
        } => {
            assert_eq!(manifest.to_string_lossy(), "routes.toml");
            assert_eq!(method, Method::GET);
            assert_eq!(path, "/user/1");
        }
        _ => panic!("Expected Match command"),
    }
}

#[test]
fn test_rejects_unsupported_method() {
    let result = Cli::try_parse_from([
        "cometroute",
        "match",
        "--manifest",
        "routes.toml",
        "--method",
        "DELETE",
        "/user/1",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_params_and_values_conflict() {
    let result = Cli::try_parse_from([
        "cometroute",
        "url",
        "--manifest",
        "routes.toml",
        "profile",
        "--param",
        "num=1",
        "--value",
        "1",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_param_requires_key_value() {
    let result = Cli::try_parse_from([
        "cometroute",
        "url",
        "--manifest",
        "routes.toml",
        "profile",
        "--param",
        "num",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_routes_lists_in_order() {
    let file = manifest_file();
    let path = file.path().to_str().unwrap();
    let output = run(&["cometroute", "routes", "--manifest", path]).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[0].starts_with("5 routes"));
    assert!(lines[1].contains("/user/:num") && lines[1].contains("[profile]"));
    assert!(lines[3].contains("/admin/list"));
    assert!(lines[4].contains("redirect 302 -> /new"));
    assert!(lines[5].starts_with("POST") && lines[5].contains("/admin/save"));
}

#[test]
fn test_match_reports_captures() {
    let file = manifest_file();
    let path = file.path().to_str().unwrap();
    let output = run(&["cometroute", "match", "-m", path, "/archive/2024/05?page=2"]).unwrap();
    assert!(output.starts_with("GET /archive/2024/05 -> /archive/:num1/:num2 Archive::month"));
    assert!(output.contains("$1 = 2024"));
    assert!(output.contains("$2 = 05"));
}

#[test]
fn test_match_miss_is_an_error() {
    let file = manifest_file();
    let path = file.path().to_str().unwrap();
    let err = run(&["cometroute", "match", "-m", path, "--method", "POST", "/user/1"]).unwrap_err();
    assert!(format!("{err:#}").contains("no route matched"));
}

#[test]
fn test_url_by_token_and_position() {
    let file = manifest_file();
    let path = file.path().to_str().unwrap();

    let output = run(&["cometroute", "url", "-m", path, "profile", "--param", "num=42"]).unwrap();
    assert_eq!(output.trim(), "/user/42");

    let output = run(&[
        "cometroute", "url", "-m", path, "archive", "--value", "2024", "--value", "05",
    ])
    .unwrap();
    assert_eq!(output.trim(), "/archive/2024/05");
}

#[test]
fn test_url_unknown_name_fails() {
    let file = manifest_file();
    let path = file.path().to_str().unwrap();
    assert!(run(&["cometroute", "url", "-m", path, "nope"]).is_err());
}
