use anyhow::Result;
use arden::{cli::Cli, logging, run};
use clap::error::ErrorKind;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage errors share the exit code of every other validation failure.
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };
    logging::init_logging(std::env::var("LOG_LEVEL").ok().as_deref());
    run(cli).await?;
    Ok(())
}
