use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Build scripts can't access src/, so the command tree is reduced to what completions need.
const COMMANDS: &[(&str, &str)] = &[
    ("render", "Render a completion table for a user"),
    ("resolve-date", "Resolve a timestamp to its date-range label"),
    ("validate", "Validate a submitted authoring form"),
    ("save", "Turn a submitted authoring form into stored configuration"),
    ("form", "Print the authoring form descriptors"),
];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("ctable")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and author completion tables")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        );

    for (name, about) in COMMANDS {
        cmd = cmd.subcommand(
            Command::new(*name).about(*about).arg(
                Arg::new("input")
                    .index(1)
                    .value_hint(ValueHint::FilePath),
            ),
        );
    }

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "ctable", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "ctable", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "ctable", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
