use clap::Parser;
use log::{error, LevelFilter};
use snafu::ErrorCompat;

mod args;
mod rollcall;

fn main() {
    let args = args::Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = rollcall::run_session(&args) {
        error!("run_session failed: {:?}", e);
        eprintln!("發生錯誤: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("{}", bt);
        }
        std::process::exit(1);
    }
}
