//! Small CLI wrapper around [`treelower::lower`], for manually inspecting
//! what a given bound tree lowers to.
//!
//! Not part of the lowering contract (`spec.md` §6.4) — grounded in the
//! workspace's other `[[bin]]` targets (`cairo-m-runner`, `cairo-m-prover`)
//! and their `clap::Parser` + `anyhow` + `env_logger` pairing.

use anyhow::Result;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use treelower::PrettyPrint;

#[derive(Parser)]
#[command(about = "Lower a bound tree (s-expression surface syntax) and print the result")]
struct Args {
    /// File to read the bound tree from. Defaults to stdin.
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let src = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let statement = treelower::sexpr::parse_statement(&src)?;
    let block = treelower::lower(&statement);
    print!("{}", block.pretty_print(0));
    Ok(())
}
