pub mod export;
pub mod init;
pub mod report;
pub mod status;
pub mod transactions;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::TransactionInput;
use crate::store::TransactionFilter;

#[derive(Parser)]
#[command(name = "tally", version, about = "Track personal income and expenses in a CSV file.")]
pub struct Cli {
    /// Transactions file to use instead of the configured one
    #[arg(long, global = true, env = "TALLY_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose the transactions file and create it if needed.
    Init {
        /// Path of the transactions CSV (default: ~/Documents/tally/transactions.csv)
        #[arg(long = "data-file")]
        data_file: Option<String>,
    },
    /// Record a new income or expense.
    Add(TransactionArgs),
    /// List transactions, optionally filtered.
    List(FilterArgs),
    /// Replace every field of an existing transaction.
    Update {
        /// Transaction ID (shown in `tally list`)
        id: u64,
        #[command(flatten)]
        fields: TransactionArgs,
    },
    /// Delete a transaction by ID.
    Delete {
        /// Transaction ID (shown in `tally list`)
        id: u64,
    },
    /// Print totals, the monthly summary and the top expenses as plain text.
    Reports {
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of top expenses to show (default from settings)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Show a single report as a table.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Export a summary to a Key,Value CSV file.
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Show the transactions file and record counts.
    Status,
}

#[derive(Args, Clone)]
pub struct TransactionArgs {
    /// Label, e.g. 'Groceries'
    pub name: String,
    /// Category, e.g. Food or Salary
    #[arg(long)]
    pub category: String,
    /// Date: YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// income or expense
    #[arg(long)]
    pub kind: String,
    /// Non-negative amount
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
    /// yes or no
    #[arg(long, default_value = "no")]
    pub essential: String,
}

impl From<TransactionArgs> for TransactionInput {
    fn from(args: TransactionArgs) -> Self {
        TransactionInput {
            name: args.name,
            category: args.category,
            date: args.date,
            kind: args.kind,
            amount: args.amount,
            essential: args.essential,
        }
    }
}

#[derive(Args, Clone, Default)]
pub struct FilterArgs {
    /// Start date: YYYY-MM-DD (inclusive)
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// End date: YYYY-MM-DD (inclusive)
    #[arg(long = "to")]
    pub to_date: Option<String>,
    /// Category (case-insensitive)
    #[arg(long)]
    pub category: Option<String>,
}

impl From<FilterArgs> for TransactionFilter {
    fn from(args: FilterArgs) -> Self {
        TransactionFilter {
            start_date: args.from_date,
            end_date: args.to_date,
            category: args.category,
        }
    }
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses and balance.
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Income and expenses per month.
    Monthly {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Totals per category.
    Categories {
        #[command(flatten)]
        filter: FilterArgs,
        /// Only count this kind (income or expense)
        #[arg(long)]
        kind: Option<String>,
    },
    /// Expense breakdown by category.
    Expenses {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Largest expenses.
    Top {
        #[command(flatten)]
        filter: FilterArgs,
        /// How many to show (default from settings)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Running balance by date.
    Balance {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Expenses per month and category.
    Matrix {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export the monthly summary.
    Monthly {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Export the category summary.
    Categories {
        #[command(flatten)]
        filter: FilterArgs,
        /// Only count this kind (income or expense)
        #[arg(long)]
        kind: Option<String>,
        /// Output file path
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
