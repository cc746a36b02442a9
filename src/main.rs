use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use phish_score::config::{self, Config};
use phish_score::input::{self, InputError};
use phish_score::{OutputFormat, PhishingAnalyzer, Report};
use std::io;
use std::path::PathBuf;
use std::process;

fn main() {
    let matches = Command::new("phish-score")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic phishing risk scoring for email text")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Email text file to analyse (prompted for when omitted)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Rule table and threshold configuration (TOML or YAML)"),
        )
        .arg(
            Arg::new("threshold")
                .short('t')
                .long("threshold")
                .value_name("SCORE")
                .help("Score at or above which an email is reported as phishing")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format (text, json)")
                .default_value("text"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log every rule as it fires")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Err(e) = run(&matches) {
        // A missing email file gets the friendly message on its own
        match e.downcast_ref::<InputError>() {
            Some(not_found @ InputError::NotFound { .. }) => println!("{}", not_found),
            _ => eprintln!("Error: {:#}", e),
        }
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text")
        .parse()
        .map_err(anyhow::Error::msg)?;

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            let config = config::load_config(path)?;
            log::info!("Loaded configuration from: {}", path);
            config
        }
        None => Config::default(),
    };

    if let Some(threshold) = matches.get_one::<f64>("threshold") {
        config.classification.threshold = *threshold;
    }

    let path = match matches.get_one::<String>("file") {
        Some(file) => PathBuf::from(file),
        None => input::prompt_for_path(io::stdin().lock(), io::stdout())
            .context("Failed to read the email file name")?,
    };

    let email_text = input::read_email(&path)?;

    let analyzer = PhishingAnalyzer::with_rules(config.rules);
    let result = analyzer.analyse(&email_text);
    log::debug!(
        "{}: score {} ({} reason(s))",
        path.display(),
        result.score(),
        result.reasons().len()
    );

    let report = Report::new(&result, config.classification.threshold);
    print!("{}", report.render(format)?);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}
