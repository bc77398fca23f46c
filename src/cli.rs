use crate::domain::TxKind;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "moneta")]
#[command(about = "Local-first personal finance tracker", long_about = None)]
pub struct Cli {
    /// Override Moneta home directory (config/data subdirs will be created inside it).
    #[arg(long, env = "MONETA_HOME")]
    pub home: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Account(AccountArgs),
    Category(CategoryArgs),
    Tx(TxArgs),

    Balance(BalanceArgs),
    Budget(BudgetArgs),
    Goal(GoalArgs),

    Profile(ProfileArgs),
    Session(SessionArgs),
    Config(ConfigArgs),

    Watch(WatchArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TxKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Income => TxKind::Income,
            KindArg::Expense => TxKind::Expense,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum AccountCmd {
    Add {
        name: String,
        #[arg(long)]
        icon: Option<String>,
        /// Starting balance; later transactions move it.
        #[arg(long, default_value = "0")]
        opening_balance: String,
    },
    List,
    Remove {
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub cmd: AccountCmd,
}

#[derive(Debug, Subcommand)]
pub enum CategoryCmd {
    Add {
        name: String,
        kind: KindArg,
        #[arg(long)]
        icon: Option<String>,
    },
    List,
    Remove {
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    pub cmd: CategoryCmd,
}

#[derive(Debug, Subcommand)]
pub enum TxCmd {
    /// Record a transaction against an account.
    Add {
        description: String,
        amount: String,
        kind: KindArg,

        #[arg(long)]
        account: String,

        #[arg(long)]
        category: Option<String>,

        /// Savings goal funded by this expense.
        #[arg(long)]
        goal: Option<String>,

        /// Financial time (RFC3339). Defaults to now.
        #[arg(long)]
        date: Option<String>,

        /// Line item as <name>:<quantity>:<price>. Repeatable.
        #[arg(long = "item")]
        items: Vec<String>,
    },
    List {
        #[arg(long)]
        month: Option<String>,

        #[arg(long)]
        account: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        kind: Option<KindArg>,
    },
    Show {
        id: String,
    },
    /// Edit a stored transaction; its prior balance effect is reversed first.
    Edit {
        id: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        amount: Option<String>,

        #[arg(long)]
        kind: Option<KindArg>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        account: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, conflicts_with = "category")]
        clear_category: bool,

        #[arg(long)]
        goal: Option<String>,

        #[arg(long, conflicts_with = "goal")]
        clear_goal: bool,

        /// Replace all line items. Repeatable.
        #[arg(long = "item")]
        items: Vec<String>,

        #[arg(long, conflicts_with = "items")]
        clear_items: bool,
    },
    Remove {
        id: String,
    },
    /// Move money between two accounts as a linked pair of transactions.
    Transfer {
        amount: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long, short = 'm', alias = "note")]
        description: Option<String>,

        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct TxArgs {
    #[command(subcommand)]
    pub cmd: TxCmd,
}

#[derive(Debug, Args)]
pub struct BalanceArgs {
    /// Restrict to one account.
    pub account: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum BudgetCmd {
    /// Create or overwrite the ceiling for a category and month.
    Set {
        category: String,
        amount: String,
        #[arg(long)]
        month: String,
    },
    List,
    Report {
        #[arg(long)]
        month: Option<String>,
    },
    Remove {
        category: String,
        #[arg(long)]
        month: String,
    },
}

#[derive(Debug, Args)]
pub struct BudgetArgs {
    #[command(subcommand)]
    pub cmd: BudgetCmd,
}

#[derive(Debug, Subcommand)]
pub enum GoalCmd {
    Create {
        name: String,
        target: String,
        /// Target date as YYYY-MM-DD.
        #[arg(long)]
        target_date: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    List,
    Status {
        name: String,
    },
    Remove {
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct GoalArgs {
    #[command(subcommand)]
    pub cmd: GoalCmd,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCmd {
    Check,
    Add { name: String },
    Checkout { name: String },
    List,
    Remove { name: String },
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub cmd: ProfileCmd,
}

#[derive(Debug, Subcommand)]
pub enum SessionCmd {
    /// Store the session identifier issued by the identity provider.
    Set { token: String },
    Clear,
    Show,
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub cmd: SessionCmd,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCmd {
    Show,
    Set {
        #[arg(long)]
        theme: Option<String>,

        #[arg(long)]
        locale: Option<String>,

        #[arg(long)]
        currency: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub cmd: ConfigCmd,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval for the store's change counter.
    #[arg(long, default_value_t = 500)]
    pub interval_ms: u64,

    /// Exit after the first detected change.
    #[arg(long)]
    pub once: bool,
}
