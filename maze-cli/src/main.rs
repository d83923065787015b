use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::Command;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    args.command.run()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_agent_names_parse() {
        let args = Args::try_parse_from([
            "maze-cli",
            "run",
            "fixtures/arena.json",
            "--agent",
            "expectimax",
            "--enemy-kind",
            "random",
        ])
        .unwrap();

        assert!(matches!(args.command, Command::Run(_)));
        assert!(
            Args::try_parse_from(["maze-cli", "solve", "x.json", "--agent", "dijkstra"]).is_err()
        );
    }
}
