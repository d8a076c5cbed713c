use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "cluster_dns_lambda";
const LAMBDA_BINARY: &str = "cluster_dns_handler";
const TESTED_PACKAGES: [&str; 2] = ["cluster_dns_core", LAMBDA_PACKAGE];

#[derive(Parser)]
#[command(name = "xtask", about = "Task runner for the cluster DNS workspace")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Run the core and lambda test suites
    Test,
    /// Check formatting, run clippy with warnings denied, then test
    Ci,
    /// Build the handler in release mode and zip it as `bootstrap`
    Package {
        /// Lambda target triple (`aarch64-unknown-linux-gnu` for Graviton)
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Directory receiving `<binary>.zip`
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
}

fn cargo(args: &[&str]) -> Result<(), String> {
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .map_err(|error| format!("failed to start cargo: {error}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("`cargo {}` exited with {status}", args.join(" ")))
    }
}

fn test() -> Result<(), String> {
    for package in TESTED_PACKAGES {
        cargo(&["test", "-p", package])?;
    }
    Ok(())
}

fn ci() -> Result<(), String> {
    cargo(&["fmt", "--all", "--", "--check"])?;
    cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])?;
    test()
}

fn package(target: &str, out_dir: &Path) -> Result<(), String> {
    cargo(&[
        "build",
        "--release",
        "-p",
        LAMBDA_PACKAGE,
        "--bin",
        LAMBDA_BINARY,
        "--target",
        target,
    ])?;

    let binary_path = Path::new("target")
        .join(target)
        .join("release")
        .join(LAMBDA_BINARY);
    let binary = fs::read(&binary_path)
        .map_err(|error| format!("cannot read {}: {error}", binary_path.display()))?;

    fs::create_dir_all(out_dir)
        .map_err(|error| format!("cannot create {}: {error}", out_dir.display()))?;
    let zip_path = out_dir.join(format!("{LAMBDA_BINARY}.zip"));
    write_bootstrap_zip(&zip_path, &binary)
        .map_err(|error| format!("cannot write {}: {error}", zip_path.display()))?;

    eprintln!("packaged {}", zip_path.display());
    Ok(())
}

// The provided.al2023 runtime executes a file named `bootstrap` at the archive root.
fn write_bootstrap_zip(zip_path: &Path, binary: &[u8]) -> zip::result::ZipResult<()> {
    let mut archive = ZipWriter::new(fs::File::create(zip_path)?);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    archive.start_file("bootstrap", options)?;
    archive.write_all(binary)?;
    archive.finish()?;
    Ok(())
}

fn main() {
    let result = match Cli::parse().command {
        Task::Test => test(),
        Task::Ci => ci(),
        Task::Package { target, out_dir } => package(&target, &out_dir),
    };

    if let Err(message) = result {
        eprintln!("xtask: {message}");
        exit(1);
    }
}
