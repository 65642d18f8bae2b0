use clap::{Arg, ArgAction, Command, arg};

pub const VALIDATE_CMD: &str = "validate";

pub fn create_validate_cli() -> Command {
    Command::new(VALIDATE_CMD)
        .about("Check that the site file and read-density files parse, without profiling.")
        .arg(
            arg!(--sites <SITES>)
                .required(true)
                .help("Reference-site file to check (4 columns)"),
        )
        .arg(
            Arg::new("reads")
                .long("reads")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Read-density files to check (3 columns)"),
        )
}
