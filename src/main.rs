mod cli;
mod error;
mod fmt;
mod models;
mod reports;
mod settings;
mod store;

use clap::Parser;

use cli::{Cli, Commands, ExportCommands, ReportCommands};
use settings::{load_settings, resolve_data_file, Settings};
use store::RecordStore;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = load_settings();

    let store = RecordStore::new(resolve_data_file(cli.file, &settings));
    let result = dispatch(cli.command, &store, &settings);

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn dispatch(command: Commands, store: &RecordStore, settings: &Settings) -> error::Result<()> {
    match command {
        Commands::Init { data_file } => cli::init::run(store, data_file),
        Commands::Add(fields) => cli::transactions::add(store, fields.into()),
        Commands::List(filter) => cli::transactions::list(store, &filter.into()),
        Commands::Update { id, fields } => cli::transactions::update(store, id, fields.into()),
        Commands::Delete { id } => cli::transactions::delete(store, id),
        Commands::Reports { filter, top } => {
            cli::report::run_reports(store, &filter.into(), top.unwrap_or(settings.top_n))
        }
        Commands::Report { command } => match command {
            ReportCommands::Summary { filter } => cli::report::summary(store, &filter.into()),
            ReportCommands::Monthly { filter } => cli::report::monthly(store, &filter.into()),
            ReportCommands::Categories { filter, kind } => {
                cli::report::categories(store, &filter.into(), kind.as_deref())
            }
            ReportCommands::Expenses { filter } => cli::report::expenses(store, &filter.into()),
            ReportCommands::Top { filter, top } => {
                cli::report::top(store, &filter.into(), top.unwrap_or(settings.top_n))
            }
            ReportCommands::Balance { filter } => cli::report::balance(store, &filter.into()),
            ReportCommands::Matrix { filter } => cli::report::matrix(store, &filter.into()),
        },
        Commands::Export { command } => match command {
            ExportCommands::Monthly { filter, output } => {
                cli::export::monthly(store, &filter.into(), output).map(|_| ())
            }
            ExportCommands::Categories { filter, kind, output } => {
                cli::export::categories(store, &filter.into(), kind.as_deref(), output).map(|_| ())
            }
        },
        Commands::Status => cli::status::run(store),
    }
}
