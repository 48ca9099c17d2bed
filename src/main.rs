//! # patient-api
//!
//! A command line front end for the patient database service. It does the
//! two things the service's web page does: insert a fixed batch of sample
//! patients, and run an `INSERT` or `SELECT` query.
//!
//! ## Usage
//!
//! ```text,no_run
//! $ patient-api insert
//! Inserted 4 rows
//!
//! $ patient-api query "SELECT * FROM patients"
//! Response: [{"birthdate":"1901-01-01","name":"Sara Brown","patientid":1}]
//!
//! $ patient-api query "DELETE FROM patients"
//! Error: Only INSERT or SELECT queries are allowed.
//! ```
//!
//! Every request failure is printed the same way, as `Error: <description>`.
//! Set `RUST_LOG=debug` to see each request as it is sent.
//!
//! ### Output format
//!
//! `--output-format` controls how each result is printed. `%S` is replaced
//! by the name of the response slot (`insert-response` or `query-response`),
//! `%M` by the message and `%%` by a literal percent sign.
//!
//! ```text,no_run
//! $ patient-api -s "%S: %M\n" insert
//! insert-response: Inserted 4 rows
//! ```

use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, SubCommand};
use patient_api::output::{parse_format, print::FormattedOutputter};
use patient_api::{parse_timeout, ApiClient, ClientConfig, PatientApp};
use std::io::stdout;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BASE_URL: &str = "https://hammerhead-app-2-audps.ondigitalocean.app";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = App::new("patient-api")
        .version(VERSION)
        .about("Inserts and queries patients on a patient database service")
        .author("Brian Payne")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("BASE_URL")
                .short("b")
                .long("base-url")
                .help("The address every endpoint is appended to")
                .default_value(DEFAULT_BASE_URL),
        )
        .arg(
            Arg::with_name("TIMEOUT")
                .short("t")
                .long("timeout")
                .takes_value(true)
                .validator(is_valid_timeout)
                .help("Give up on a request after this many seconds"),
        )
        .arg(
            Arg::with_name("ACCEPT_INVALID_CERT")
                .short("k")
                .long("danger-accept-invalid-certs")
                .help("Controls the use of certificate validation."),
        )
        .arg(
            Arg::with_name("OUTPUT_FORMAT")
                .long("output-format")
                .short("s")
                .default_value("%M\n")
                .hide_default_value(true)
                .help("Define the format for printing results, possible options %S response slot, %M message \n[default: %M\\n]"),
        )
        .subcommand(SubCommand::with_name("insert").about("Inserts the sample patients"))
        .subcommand(
            SubCommand::with_name("query")
                .about("Submits an INSERT or SELECT query")
                .arg(Arg::with_name("SQL").required(true).index(1)),
        )
        .get_matches();

    let base_url = matches.value_of("BASE_URL").unwrap();
    let ssl_check = !matches.is_present("ACCEPT_INVALID_CERT");
    let timeout = matches.value_of("TIMEOUT").map(parse_timeout).transpose()?;
    let output_format = matches.value_of("OUTPUT_FORMAT").unwrap();

    let api = ApiClient::new(base_url, ClientConfig::new(ssl_check, timeout))?;

    let mut stdout = stdout();
    let mut outputter = FormattedOutputter::new(
        &mut stdout,
        parse_format(output_format).context("Invalid output format")?,
    );
    let mut app = PatientApp::new(api, &mut outputter);

    match matches.subcommand() {
        ("insert", _) => {
            let _ = app.insert_patients().await?;
        }
        ("query", Some(query)) => {
            let _ = app.submit_query(query.value_of("SQL").unwrap()).await?;
        }
        _ => unreachable!("a subcommand is required"),
    }

    Ok(())
}

fn is_valid_timeout(val: String) -> Result<(), String> {
    parse_timeout(&val).map(|_| ()).map_err(|e| format!("{:#}", e))
}
