use clap::Parser;
use data_validator::cli::{
    args::Args,
    commands::{self, RunReport},
};
use std::process;

fn main() {
    let args = Args::parse();
    let input = args.input.clone();

    match commands::run(args) {
        Ok(report) => process::exit(report.exit_code()),
        Err(error) => {
            let code = RunReport::error_exit_code(&error);
            let context = match input {
                Some(path) => format!("Validation of '{}' failed", path.display()),
                None => "Validation failed".to_string(),
            };
            eprintln!("Error: {:#}", anyhow::Error::new(error).context(context));
            process::exit(code);
        }
    }
}
