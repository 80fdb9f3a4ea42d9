// Command-line interface for completion tables
//
// This binary drives the completion-table library against JSON files, the way a certificate host
// would drive it against its database: render a table for a user, resolve a completion date to
// its label, and run the authoring form (descriptors, validation, save).
//
// Usage:
//  ctable render <element.json> --fixture <store.json> --user <id> (--course <id> | --element <id>) [--preview] [-o <file>]
//  ctable resolve-date <element.json> [<timestamp>]
//  ctable validate <form.json> [--page <page.json>]
//  ctable save <form.json> [--page <page.json>]
//  ctable form [<element.json>]
//
// Configuration is read from ./ctable.toml when present, then from --config.
//
// Extra Parameters:
//
// Configuration values can be overridden with --extra-<parameter-name> <value>.
// Example:
//  ctable render table.json --fixture course.json --user 7 --course 3 --extra-date-format "%Y-%m-%d"

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, ValueHint};
use completion_table_cli::commands::{self, CourseTarget};
use completion_table_cli::logging;
use completion_table_config::{CtableConfig, Loader};
use std::collections::HashMap;
use std::fs;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value, negative numbers included)
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
            let has_value = args
                .get(i + 1)
                .map(|next| !next.starts_with('-') || next.parse::<i64>().is_ok())
                .unwrap_or(false);

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

fn element_arg() -> Arg {
    Arg::new("element")
        .help("Stored element configuration (JSON)")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn page_arg() -> Arg {
    Arg::new("page")
        .long("page")
        .value_name("PATH")
        .help("Page dimensions (JSON) used for the width bounds")
        .value_hint(ValueHint::FilePath)
}

fn form_arg() -> Arg {
    Arg::new("form")
        .help("Submitted form data (JSON)")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("ctable")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and author completion tables")
        .long_about(
            "ctable renders completion-table markup into HTML and runs the element's authoring form.\n\n\
            Commands:\n  \
            - render:       Render a table for a user\n  \
            - resolve-date: Resolve a timestamp to its date-range label\n  \
            - validate:     Validate a submitted form\n  \
            - save:         Turn a submitted form into the stored configuration\n  \
            - form:         Print the form descriptors (and defaults)\n\n\
            Extra Parameters:\n  \
            --extra-preview, --extra-date-format <fmt>, --extra-utc-offset <minutes>,\n  \
            --extra-max-ranges <n> override the configuration.\n\n\
            Examples:\n  \
            ctable render table.json --fixture course.json --user 7 --course 3\n  \
            ctable resolve-date table.json 1614834360\n  \
            ctable validate form.json --page page.json",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a ctable.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render a completion table for a user")
                .arg(element_arg())
                .arg(
                    Arg::new("fixture")
                        .long("fixture")
                        .value_name("PATH")
                        .help("Activities, completions and sections (JSON)")
                        .required(true)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("user")
                        .long("user")
                        .help("User the table is rendered for")
                        .required(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("course")
                        .long("course")
                        .help("Course whose sections are checked")
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("element-id")
                        .long("element")
                        .help("Element id, resolved to its course through the fixture")
                        .value_parser(clap::value_parser!(i64)),
                )
                .group(
                    ArgGroup::new("target")
                        .args(["course", "element-id"])
                        .required(true),
                )
                .arg(
                    Arg::new("preview")
                        .long("preview")
                        .help("Render the editor preview")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("resolve-date")
                .about("Resolve a timestamp to its date-range label")
                .arg(element_arg())
                .arg(
                    Arg::new("timestamp")
                        .help("Unix timestamp; omit for no completion")
                        .index(2)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i64)),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a submitted authoring form")
                .arg(form_arg())
                .arg(page_arg()),
        )
        .subcommand(
            Command::new("save")
                .about("Turn a submitted authoring form into stored configuration")
                .arg(form_arg())
                .arg(page_arg()),
        )
        .subcommand(
            Command::new("form")
                .about("Print the authoring form descriptors")
                .arg(
                    Arg::new("element")
                        .help("Stored element configuration used to prefill the form")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);
    let matches = build_cli().get_matches_from(&cleaned_args);

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    for key in extra_params.keys() {
        eprintln!("Warning: unknown parameter --extra-{key} ignored");
    }

    let level = if matches.get_flag("verbose") {
        log::LevelFilter::Debug
    } else {
        config.log.level_filter()
    };
    if let Err(err) = logging::init(level) {
        eprintln!("Failed to install logger: {err}");
    }

    match matches.subcommand() {
        Some(("render", sub_matches)) => handle_render_command(sub_matches, &config),
        Some(("resolve-date", sub_matches)) => {
            let element = read_input(required(sub_matches, "element"));
            let timestamp = sub_matches.get_one::<i64>("timestamp").copied();
            let label = commands::resolve_date(&element, timestamp, &config).unwrap_or_else(fail);
            println!("{label}");
        }
        Some(("validate", sub_matches)) => {
            let form = read_input(required(sub_matches, "form"));
            let page = sub_matches.get_one::<String>("page").map(|p| read_input(p));
            let errors = commands::validate(&form, page.as_deref()).unwrap_or_else(fail);
            print!("{}", commands::format_errors(&errors));
            if !errors.is_empty() {
                log::info!("Form has {} invalid field(s)", errors.len());
                std::process::exit(1);
            }
        }
        Some(("save", sub_matches)) => {
            let form = read_input(required(sub_matches, "form"));
            let page = sub_matches.get_one::<String>("page").map(|p| read_input(p));
            let saved = commands::save(&form, page.as_deref()).unwrap_or_else(fail);
            println!("{saved}");
        }
        Some(("form", sub_matches)) => {
            let element = sub_matches.get_one::<String>("element").map(|p| read_input(p));
            let out = commands::form(element.as_deref(), &config).unwrap_or_else(fail);
            println!("{out}");
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches, config: &CtableConfig) {
    let element = read_input(required(matches, "element"));
    let fixture = read_input(required(matches, "fixture"));
    let user = *matches.get_one::<i64>("user").expect("user is required");
    let target = match matches.get_one::<i64>("course") {
        Some(course) => CourseTarget::Course(*course),
        None => CourseTarget::Element(
            *matches
                .get_one::<i64>("element-id")
                .expect("course or element is required"),
        ),
    };
    let preview = matches.get_flag("preview") || config.render.preview;

    let html = commands::render(&element, &fixture, user, target, preview, config)
        .unwrap_or_else(fail);

    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, html).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => println!("{html}"),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .expect("argument is required")
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn fail<T>(message: String) -> T {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn load_cli_config(explicit_path: Option<&str>) -> CtableConfig {
    let loader = Loader::new().with_optional_file("ctable.toml");
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

fn apply_config_overrides(config: &mut CtableConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("preview") {
        config.render.preview = parse_bool_arg("preview", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["date-format", "format"]) {
        config.dates.format = raw;
    }
    if let Some(raw) = take_override(extra_params, &["utc-offset", "utc-offset-minutes"]) {
        config.dates.utc_offset_minutes = parse_number_arg("utc-offset", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["max-ranges", "maxranges"]) {
        config.element.max_ranges = parse_number_arg("max-ranges", &raw);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

fn parse_number_arg<T: std::str::FromStr>(flag: &str, raw: &str) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        eprintln!("Invalid number '{raw}' for --extra-{flag}");
        std::process::exit(1);
    })
}
