mod config;
mod models;
mod password;
mod run;
mod store;
mod ui;

use anyhow::Result;
use env_logger::Env;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    run::as_cli(&args)
}
