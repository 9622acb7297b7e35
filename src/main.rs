use std::env;
use std::io;
use std::process;

use restlauncher::{Cli, Error, ErrorKind};

fn launch() -> restlauncher::Result {
    let cli = match Cli::try_parse_args(env::args_os())? {
        Some(cli) => cli,
        None => return Ok(()),
    };

    let stdout = io::stdout();
    restlauncher::run(cli.command, stdout.lock())
}

fn report(err: &Error) {
    match err.kind() {
        // clap renders its own message along with the usage
        ErrorKind::MissingArgument(err) => {
            let _ = err.print();
        }
        _ => eprintln!("{}", err),
    }
}

fn main() {
    env_logger::init();

    let code = match launch() {
        Ok(()) => 0,
        Err(err) => {
            report(&err);
            1
        }
    };
    process::exit(code);
}
