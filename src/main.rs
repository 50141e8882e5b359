use anyhow::Result;
use gmx_compiler::cli;

fn main() -> Result<()> {
    cli::run()
}
