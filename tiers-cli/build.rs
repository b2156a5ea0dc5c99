//! Build script for tiers-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("tiers")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read, edit, and convert configuration files")
        .long_about(
            "Command-line tool for layered YAML, JSON, and INI configuration with \
             environment variable overrides",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase verbosity (-v for info, -vv for debug)")
                .global(true)
                .action(clap::ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format for printed values and written files")
                .value_name("FORMAT")
                .value_parser(["yaml", "json", "ini"])
                .global(true)
                .env("TIERS_FORMAT"),
        )
        .subcommands(vec![
            Command::new("get")
                .about("Print a value, or the whole configuration")
                .long_about("Print the value at a dotted key, falling back to --default"),
            Command::new("set")
                .about("Set a value and save the file")
                .long_about("Coerce a value, set it at a dotted key, and write the file back"),
            Command::new("create")
                .about("Create a new configuration file")
                .long_about("Write a new file from an optional template and JSON variables"),
            Command::new("validate")
                .about("Check that a file loads and has the required keys")
                .long_about("Parse a configuration file and report every missing required key"),
            Command::new("convert")
                .about("Convert a configuration file to another format")
                .long_about("Re-save a configuration file as YAML, JSON, or INI"),
            Command::new("list")
                .about("List all values, or one section")
                .long_about("Print every value, or the members of a single section"),
            Command::new("env")
                .about("Print the configuration built from environment variables")
                .long_about("Collect prefixed environment variables into a nested configuration"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("tiers.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
