use clap::Parser;

use tsgrid::{CliArgs, Config, TsGridError};

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("tsgrid-insert: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), TsGridError> {
    let config = Config::from_args(args)?;
    let head = tsgrid::run(&config)?;
    eprintln!("{}", head);
    Ok(())
}
