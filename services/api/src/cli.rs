use crate::demo::{run_catalog_check, run_demo, CatalogCheckArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use psychorisk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Psychosocial Risk Service",
    about = "Score, review, and compare psychosocial risk evaluations from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the dimension catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Run an in-memory evaluation through submit, edit, resubmit, and compare
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Load and validate a catalog, then list its dimensions
    Check(CatalogCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog {
            command: CatalogCommand::Check(args),
        } => run_catalog_check(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_defaults_to_serve() {
        let cli = Cli::try_parse_from(["psychorisk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn demo_accepts_period_and_answer() {
        let cli = Cli::try_parse_from(["psychorisk-api", "demo", "--period", "2024", "--answer", "2"])
            .expect("parses");
        match cli.command {
            Some(Command::Demo(args)) => {
                assert_eq!(args.period, Some(2024));
                assert_eq!(args.answer, 2);
            }
            other => panic!("expected demo command, got {other:?}"),
        }
    }

    #[test]
    fn demo_rejects_answers_outside_the_scale() {
        assert!(Cli::try_parse_from(["psychorisk-api", "demo", "--answer", "5"]).is_err());
    }

    #[test]
    fn catalog_check_takes_an_optional_path() {
        let cli = Cli::try_parse_from(["psychorisk-api", "catalog", "check", "--path", "dims.csv"])
            .expect("parses");
        match cli.command {
            Some(Command::Catalog {
                command: CatalogCommand::Check(args),
            }) => assert_eq!(args.path.as_deref(), Some(std::path::Path::new("dims.csv"))),
            other => panic!("expected catalog check, got {other:?}"),
        }
    }
}
