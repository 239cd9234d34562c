mod banner;
mod catalog;
mod cli;
mod config;
mod error;
mod installer;
mod provision;
mod select;

use anyhow::Result;

fn main() -> Result<()> {
    cli::run()
}
