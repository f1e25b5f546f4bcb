use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn from_requires_sql_or_file() {
    assert!(Cli::try_parse_from(["obda", "from"]).is_err());
    assert!(Cli::try_parse_from(["obda", "from", "--sql", "SELECT 1", "--file", "q.sql"]).is_err());

    let cli = Cli::try_parse_from(["obda", "-v", "from", "-s", "SELECT * FROM emp", "-o", "json"])
        .unwrap();
    assert!(cli.global.verbose);
    match cli.command {
        Commands::From(args) => {
            assert_eq!(args.sql.as_deref(), Some("SELECT * FROM emp"));
            assert_eq!(args.output, OutputFormat::Json);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn global_args_after_subcommand() {
    let cli = Cli::try_parse_from(["obda", "catalog", "--project-dir", "proj"]).unwrap();
    assert_eq!(cli.global.project_dir, "proj");
    assert!(matches!(
        cli.command,
        Commands::Catalog(CatalogArgs {
            output: OutputFormat::Pretty
        })
    ));
}
