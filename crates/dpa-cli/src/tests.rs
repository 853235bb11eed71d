use super::*;

#[test]
fn parses_analyze_with_defaults() {
    let cli = Cli::try_parse_from(["dpa-cli", "analyze", "example.com"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Analyze {
            ref url,
            instagram: None,
            no_search: false,
            json: false,
        } if url == "example.com"
    ));
}

#[test]
fn parses_analyze_with_all_flags() {
    let cli = Cli::try_parse_from([
        "dpa-cli",
        "analyze",
        "https://pousada.example.com",
        "--instagram",
        "@pousada",
        "--no-search",
        "--json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Analyze {
            instagram: Some(ref handle),
            no_search: true,
            json: true,
            ..
        } if handle == "@pousada"
    ));
}

#[test]
fn analyze_requires_url() {
    assert!(Cli::try_parse_from(["dpa-cli", "analyze"]).is_err());
}

#[test]
fn parses_score_command() {
    let cli = Cli::try_parse_from(["dpa-cli", "score", "record.json"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Score { ref record } if record == &PathBuf::from("record.json")
    ));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["dpa-cli"]).is_err());
}

#[test]
fn unknown_flag_is_rejected() {
    assert!(Cli::try_parse_from(["dpa-cli", "analyze", "example.com", "--verbose"]).is_err());
}
