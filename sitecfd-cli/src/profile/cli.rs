use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const PROFILE_CMD: &str = "profile";

pub fn create_profile_cli() -> Command {
    Command::new(PROFILE_CMD)
        .about("Profile read density around reference sites and combine the normalized curves of every read file.")
        .arg(
            arg!(--sites <SITES>)
                .required(true)
                .help("Reference-site file: chromosome, name, position, strand (F/R)"),
        )
        .arg(
            Arg::new("reads")
                .long("reads")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append)
                .help("One or more read-density (.sgr, optionally .gz) files"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Combined output table (default: stdout)"),
        )
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .help("TOML config file; command-line flags override it"),
        )
        .arg(
            arg!(--threads <THREADS>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Read files processed in parallel"),
        )
        .arg(
            arg!(--delimiter <DELIMITER>)
                .required(false)
                .value_parser(["tab", "comma"])
                .help("Output delimiter"),
        )
        .arg(
            Arg::new("per-site-dir")
                .long("per-site-dir")
                .required(false)
                .help("Write each file's strand-aligned per-site table into this directory"),
        )
        .arg(
            arg!(--summary <SUMMARY>)
                .required(false)
                .help("Write per-file counts and normalization factors as JSON"),
        )
        .arg(
            Arg::new("keep-going")
                .long("keep-going")
                .action(ArgAction::SetTrue)
                .help("Combine the files that succeed instead of failing the run"),
        )
        .arg(
            Arg::new("zero-on-empty")
                .long("zero-on-empty")
                .action(ArgAction::SetTrue)
                .help("Emit zeros for a file whose aggregated read total is zero"),
        )
}
