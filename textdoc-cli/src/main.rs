// Command-line interface for textdoc
//
// This binary compiles document templates. A template is XML markup describing the document;
// a data file (JSON) fills in its placeholders; a backend decides what comes out.
//
// Compiling:
//
// The backend is given with --to, or auto-detected from the extension of the -o file.
// Usage:
//  textdoc <template> --to <backend> [--data <json>] [-o <file>]           - Compile (default)
//  textdoc compile <template> --to <backend> [--data <json>] [-o <file>]   - Same as above (explicit)
//  textdoc skeleton <template>                                             - Print an empty data file
//  textdoc --list-backends                                                 - List available backends
//
// Extra Parameters:
//
// Backend-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the backend.
// Example:
//  textdoc invoice.xml --data invoice.json --to html --extra-placeholders combo

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use textdoc::backend::ROOT_OPTION;
use textdoc::backends::{BlocksBackend, HtmlBackend, HtmlOptions};
use textdoc::{placeholder_ids, BackendRegistry, DataStore};
use textdoc_config::{Loader, TextdocConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["compile", "skeleton", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("textdoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile XML document templates with JSON data")
        .long_about(
            "textdoc turns a document template (XML markup) and a data file (JSON) into a\n\
            finished document.\n\n\
            Commands:\n  \
            - compile:  Render a template with a backend (default command)\n  \
            - skeleton: Print an empty data file listing the template's placeholders\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass backend-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            textdoc invoice.xml --data invoice.json --to html     # HTML to stdout\n  \
            textdoc invoice.xml --data invoice.json -o out.html   # Backend from extension\n  \
            textdoc invoice.xml --to blocks --extra-pretty        # Inspect the block stream\n  \
            textdoc skeleton invoice.xml > invoice.json           # Start a data file",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-backends")
                .long("list-backends")
                .help("List available backends")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a textdoc.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile a template with a backend (default command)")
                .long_about(
                    "Compile a document template into a backend's output.\n\n\
                    Backends:\n  \
                    - html:   A single HTML page (.html, .htm)\n  \
                    - blocks: The renderer call stream as JSON (.json)\n\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\
                    Recoverable problems (unknown data keys, bad attribute values) are\n\
                    printed to stderr as warnings.\n\n\
                    Examples:\n  \
                    textdoc compile doc.xml --to html --data doc.json\n  \
                    textdoc doc.xml -o doc.html --deny-warnings",
                )
                .arg(
                    Arg::new("template")
                        .help("Template file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Backend to render with (detected from -o if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("data")
                        .long("data")
                        .short('d')
                        .value_name("JSON")
                        .help("Data file resolving the template's placeholders")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("deny-warnings")
                        .long("deny-warnings")
                        .help("Fail without writing output if compilation reports any warning")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("skeleton")
                .about("Print an empty data file for a template")
                .long_about(
                    "Lists the id of every placeholder in the template as an empty entry of\n\
                    a JSON data file, ready to be filled in.\n\n\
                    Examples:\n  \
                    textdoc skeleton invoice.xml > invoice.json",
                )
                .arg(
                    Arg::new("template")
                        .help("Template file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TEXTDOC_LOG").unwrap_or_else(|_| "textdoc=error".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that looks like a file means "compile"
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "compile".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    if matches.get_flag("list-backends") {
        handle_list_backends_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("compile", sub_matches)) => {
            handle_compile_command(sub_matches, extra_params, &config);
        }
        Some(("skeleton", sub_matches)) => {
            let template = required_arg(sub_matches, "template");
            handle_skeleton_command(template);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing <{name}>");
            std::process::exit(2);
        }
    }
}

/// Handle the compile command
fn handle_compile_command(
    matches: &ArgMatches,
    mut extra_params: HashMap<String, String>,
    config: &TextdocConfig,
) {
    let template_path = required_arg(matches, "template");
    let output = matches.get_one::<String>("output").map(|s| s.as_str());
    let registry = build_registry(config);

    let backend = match (matches.get_one::<String>("to"), output) {
        (Some(to), _) => to.clone(),
        (None, Some(path)) => match registry.detect_backend_from_filename(path) {
            Some(detected) => detected,
            None => {
                eprintln!("Error: Could not detect backend from filename '{path}'");
                eprintln!("Please specify --to explicitly");
                std::process::exit(1);
            }
        },
        (None, None) => {
            eprintln!("Error: No backend given. Use --to <backend> or -o <file>");
            std::process::exit(1);
        }
    };

    if let Err(e) = registry.get(&backend) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let template = fs::read_to_string(template_path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{template_path}': {e}");
        std::process::exit(1);
    });

    let data = match matches.get_one::<String>("data") {
        Some(path) => load_data(path),
        None => DataStore::empty(),
    };

    extra_params
        .entry(ROOT_OPTION.to_string())
        .or_insert_with(|| config.compile.root_element.clone());

    tracing::debug!(backend = %backend, template = template_path, "Compiling template");
    let rendered = registry
        .render(&template, &data, &backend, &extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    for diagnostic in &rendered.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    if matches.get_flag("deny-warnings") && !rendered.diagnostics.is_empty() {
        eprintln!(
            "Error: {} warning(s) reported and --deny-warnings is set",
            rendered.diagnostics.len()
        );
        std::process::exit(1);
    }

    match output {
        Some(path) => {
            fs::write(path, rendered.output).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{}", rendered.output),
    }
}

/// Handle the skeleton command
fn handle_skeleton_command(template_path: &str) {
    let template = fs::read_to_string(template_path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{template_path}': {e}");
        std::process::exit(1);
    });

    let ids = placeholder_ids(&template).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let skeleton = DataStore::skeleton(ids);
    match serde_json::to_string_pretty(&skeleton) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle the list-backends command
fn handle_list_backends_command(config: &TextdocConfig) {
    let registry = build_registry(config);
    println!("Available backends:\n");
    for name in registry.list_backends() {
        if let Ok(backend) = registry.get(&name) {
            println!(
                "  {name:<8} {} (.{})",
                backend.description(),
                backend.file_extensions().join(", .")
            );
        }
    }
}

fn load_data(path: &str) -> DataStore {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });
    DataStore::from_json_str(&source).unwrap_or_else(|e| {
        eprintln!("Error: invalid data file '{path}': {e}");
        std::process::exit(1);
    })
}

fn load_cli_config(explicit_path: Option<&str>) -> TextdocConfig {
    let loader = Loader::new().with_optional_file("textdoc.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Registry whose backends start from the configured options
fn build_registry(config: &TextdocConfig) -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register(HtmlBackend::new(HtmlOptions::from(&config.html)));
    registry.register(BlocksBackend::new(config.blocks.pretty));
    registry
}
