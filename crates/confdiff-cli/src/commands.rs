use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use confdiff_split::{split_stream, write_manifests};
use tracing::info;

use crate::cli::*;
use crate::compare::{compare_dirs, compare_files, LoadOptions};
use crate::config::CliConfig;
use crate::render::{render_dirs, render_report, render_summary};

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = CliConfig::resolve(cli.config.as_deref())?;
    if cli.no_color || !config.color || cli.format == OutputFormat::Json {
        colored::control::set_override(false);
    }

    match cli.command {
        Command::Diff(args) => cmd_diff(args, &config, &cli.format),
        Command::Split(args) => cmd_split(args),
    }
}

fn cmd_diff(
    args: DiffArgs,
    config: &CliConfig,
    format: &OutputFormat,
) -> anyhow::Result<ExitCode> {
    let (out, differs) = diff_output(&args, config, format)?;
    print!("{out}");
    if should_fail(differs, &args, config) {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

/// Status 1 is reserved for "differences found" and only when asked for.
fn should_fail(differs: bool, args: &DiffArgs, config: &CliConfig) -> bool {
    differs && (args.exit_code || config.exit_code)
}

/// Compare the two inputs and render the result. Returns the output and
/// whether any difference was found.
fn diff_output(
    args: &DiffArgs,
    config: &CliConfig,
    format: &OutputFormat,
) -> anyhow::Result<(String, bool)> {
    let opts = LoadOptions {
        left_format: args.left_format,
        right_format: args.right_format,
        limits: config.limits_for(&args),
    };
    let left_name = args.left.display().to_string();
    let right_name = args.right.display().to_string();
    let mut out = String::new();

    let differs = if args.left.is_dir() && args.right.is_dir() {
        info!(left = %left_name, right = %right_name, "comparing directories");
        let result = compare_dirs(&args.left, &args.right, &opts)?;
        match format {
            OutputFormat::Json => out = serde_json::to_string_pretty(&result)? + "\n",
            OutputFormat::Text => render_dirs(&mut out, &result, &left_name, &right_name),
        }
        result.has_differences()
    } else {
        let report = compare_files(&args.left, &args.right, &opts)?;
        match format {
            OutputFormat::Json => out = serde_json::to_string_pretty(&report)? + "\n",
            OutputFormat::Text => {
                render_report(&mut out, &report, &left_name, &right_name);
                render_summary(&mut out, &report.summary());
            }
        }
        !report.is_empty()
    };
    Ok((out, differs))
}

fn cmd_split(args: SplitArgs) -> anyhow::Result<ExitCode> {
    println!("Reading input file: {}", args.file.display().to_string().bold());
    let (output, written) = split_into(&args)?;

    for path in &written {
        println!("  {} {}", "wrote:".green(), path.display());
    }
    println!(
        "{} {} manifests written to {}",
        "✓".green().bold(),
        written.len(),
        output.display().to_string().bold()
    );
    Ok(ExitCode::SUCCESS)
}

/// Split the input file and write its manifests. Returns the output
/// directory and the written paths.
fn split_into(args: &SplitArgs) -> anyhow::Result<(PathBuf, Vec<PathBuf>)> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let manifests =
        split_stream(&text).with_context(|| format!("splitting {}", args.file.display()))?;

    let output = match &args.output {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("resolving current directory")?,
    };
    let written = write_manifests(&output, &manifests, args.name.as_deref())
        .with_context(|| format!("writing to {}", output.display()))?;
    Ok((output, written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn args(left: &Path, right: &Path) -> DiffArgs {
        DiffArgs {
            left: left.to_path_buf(),
            right: right.to_path_buf(),
            left_format: None,
            right_format: None,
            max_depth: None,
            max_nodes: None,
            exit_code: false,
        }
    }

    fn pair(left: &str, right: &str) -> (tempfile::TempDir, DiffArgs) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), left).unwrap();
        std::fs::write(dir.path().join("b.yaml"), right).unwrap();
        let a = args(&dir.path().join("a.json"), &dir.path().join("b.yaml"));
        (dir, a)
    }

    #[test]
    fn exit_status_needs_differences_and_a_request() {
        let mut a = args(Path::new("l"), Path::new("r"));
        let config = CliConfig::default();
        assert!(!should_fail(true, &a, &config));
        assert!(!should_fail(false, &a, &config));

        a.exit_code = true;
        assert!(should_fail(true, &a, &config));
        assert!(!should_fail(false, &a, &config));

        a.exit_code = false;
        let from_config = CliConfig {
            exit_code: true,
            ..CliConfig::default()
        };
        assert!(should_fail(true, &a, &from_config));
        assert!(!should_fail(false, &a, &from_config));
    }

    #[test]
    fn text_output_for_differing_files() {
        colored::control::set_override(false);
        let (_dir, a) = pair(r#"{"port": 80}"#, "port: 81\n");
        let (out, differs) = diff_output(&a, &CliConfig::default(), &OutputFormat::Text).unwrap();
        assert!(differs);
        assert!(out.contains("a.json: port=80\n"));
        assert!(out.contains("b.yaml: port=81\n"));
        assert!(out.ends_with("0 additions, 0 removals, 1 change\n"));
    }

    #[test]
    fn equal_files_do_not_differ() {
        let (_dir, a) = pair(r#"{"port": 80}"#, "port: 80\n");
        let (_, differs) = diff_output(&a, &CliConfig::default(), &OutputFormat::Text).unwrap();
        assert!(!differs);
    }

    #[test]
    fn json_output_is_the_serialized_report() {
        let (_dir, a) = pair(r#"{"port": 80, "old": true}"#, "port: 81\n");
        let (out, differs) = diff_output(&a, &CliConfig::default(), &OutputFormat::Json).unwrap();
        assert!(differs);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["removals"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["changes"][0]["kind"], "change");
        assert_eq!(value["changes"][0]["left_path"], "port");
    }

    #[test]
    fn json_output_for_directories() {
        let left = tempfile::tempdir().unwrap();
        let right = tempfile::tempdir().unwrap();
        std::fs::write(left.path().join("a.json"), "[1]").unwrap();
        std::fs::write(right.path().join("a.json"), "[2]").unwrap();
        std::fs::write(right.path().join("extra.toml"), "x = 1\n").unwrap();

        let a = args(left.path(), right.path());
        let (out, differs) = diff_output(&a, &CliConfig::default(), &OutputFormat::Json).unwrap();
        assert!(differs);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["only_right"][0], "extra.toml");
        assert_eq!(value["files"][0]["path"], "a.json");
    }

    #[test]
    fn configured_limits_refuse_input() {
        let (_dir, a) = pair(r#"{"a": {"b": 1}}"#, "a: 1\n");
        let config: CliConfig = toml::from_str("[limits]\nmax_depth = 1\n").unwrap();
        assert!(diff_output(&a, &config, &OutputFormat::Text).is_err());
    }

    #[test]
    fn split_writes_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bundle.yaml");
        std::fs::write(
            &input,
            "kind: Service\nmetadata:\n  name: web\n---\n\
             kind: Deployment\nmetadata:\n  name: web\n",
        )
        .unwrap();
        let split = SplitArgs {
            file: input,
            output: Some(dir.path().join("out")),
            name: Some("shop".into()),
        };

        let (output, written) = split_into(&split).unwrap();
        assert_eq!(output, dir.path().join("out"));
        assert_eq!(
            written,
            vec![
                output.join("shop-web-service.yaml"),
                output.join("shop-web-deployment.yaml"),
            ]
        );
    }
}
