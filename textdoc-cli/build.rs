use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the built-in backends registered by src/main.rs
// We need to duplicate this here since build scripts can't access the library
const AVAILABLE_BACKENDS: &[&str] = &["blocks", "html"];

fn template_arg() -> Arg {
    Arg::new("template")
        .help("Template file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("textdoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile XML document templates with JSON data")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-backends")
                .long("list-backends")
                .help("List available backends")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a textdoc.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile a template with a backend")
                .arg(template_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Backend to render with")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_BACKENDS,
                        )),
                )
                .arg(
                    Arg::new("data")
                        .long("data")
                        .short('d')
                        .help("Data file resolving the template's placeholders")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("deny-warnings")
                        .long("deny-warnings")
                        .help("Fail if compilation reports any warning")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("skeleton")
                .about("Print an empty data file for a template")
                .arg(template_arg()),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "textdoc", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "textdoc", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "textdoc", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
