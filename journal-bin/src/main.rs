use clap::Parser;
use journal_cli::{Cli, parse_error_headline, parse_exit_code};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if parse_exit_code(&e) == 0 => e.exit(),
        Err(e) => {
            eprintln!("Error: {}", parse_error_headline(&e));
            std::process::exit(1);
        }
    };

    if let Err(e) = cli.run().await {
        eprintln!("Error: {}", e.headline());
        std::process::exit(1);
    }
}
