use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use supstack_convert::convert_all;
use supstack_convert::load_source;
use supstack_convert::merge_catalog;
use supstack_convert::write_items;
use supstack_core::actions::RuntimeAction;
use supstack_core::actions::SessionAction;
use supstack_core::actions::UserAction;
use supstack_core::catalog::Catalog;
use supstack_core::config::Config;
use supstack_core::persistence::StackStore;
use supstack_core::reducer::reduce;
use supstack_core::reducer::StackEffect;
use supstack_core::state::Category;
use supstack_core::state::CategoryFilter;
use supstack_core::state::SessionState;
use supstack_core::state::SortKey;
use supstack_core::state::Tab;
use supstack_core::state::ViewMode;
use supstack_core::state::MAX_MULTIPLIER;
use supstack_core::state::MIN_MULTIPLIER;

mod ui;

const APP_DIR: &str = "supstack";

#[derive(Parser)]
#[command(name = "supstack")]
#[command(about = "Browse anti-inflammatory supplements and build a daily stack", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to <config dir>/supstack/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog document (.json, .yaml or .yml) replacing the bundled dataset
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Where the stack is persisted
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log only errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    List {
        /// Category label, e.g. "Herbs" or "Omega-3"; "all" disables the filter
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive match on name and description
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t = SortArg::AntiInflammatory)]
        sort: SortArg,
        #[arg(long, value_enum, default_value_t = ViewArg::Grid)]
        view: ViewArg,
    },
    /// Show everything known about one supplement
    Show { id: String },
    /// Add a supplement to the stack
    Add { id: String },
    /// Remove a supplement from the stack
    Remove { id: String },
    /// Add the supplement if absent, remove it otherwise
    Toggle { id: String },
    /// Scale the daily amount of a stacked supplement (0.5 to 5.0)
    Multiplier {
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Remove every supplement from the stack
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List the predefined stack templates
    Templates,
    /// Replace the stack with a template's supplements
    ApplyTemplate {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show the stack with interactions and daily totals
    Stack,
    /// Write a plain-text report of the stack
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Convert research records into catalog supplements
    Convert {
        /// JSON file holding one record or an array of records
        input: PathBuf,
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
        /// Catalog document whose supplements take precedence over converted ones
        #[arg(long)]
        merge_into: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    AntiInflammatory,
    Name,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::AntiInflammatory => SortKey::AntiInflammatory,
            SortArg::Name => SortKey::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Grid,
    List,
}

impl From<ViewArg> for ViewMode {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Grid => ViewMode::Grid,
            ViewArg::List => ViewMode::List,
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    let config = load_config(cli.config.as_deref())?;

    let Cli {
        command,
        catalog,
        state,
        ..
    } = cli;
    match command {
        Commands::Convert {
            input,
            output,
            merge_into,
        } => convert(&input, output.as_deref(), merge_into.as_deref()),
        command => {
            let session = Session::open(catalog.as_deref(), state, &config)?;
            run_session(session, command)
        }
    }
}

fn run_session(mut session: Session, command: Commands) -> Result<()> {
    match command {
        Commands::List {
            category,
            search,
            sort,
            view,
        } => {
            let category = match category {
                Some(label) => parse_category_filter(&label)?,
                None => CategoryFilter::All,
            };
            session.dispatch(UserAction::SelectTab(Tab::Browse))?;
            session.dispatch(UserAction::SelectCategory(category))?;
            session.dispatch(UserAction::SetSearchQuery(search.unwrap_or_default()))?;
            session.dispatch(UserAction::SetSortBy(sort.into()))?;
            session.dispatch(UserAction::SetView(view.into()))?;
            println!("{}", ui::render_browse(&session.state, &session.catalog));
        }
        Commands::Show { id } => {
            session.dispatch(UserAction::ShowDetails { item_id: id.clone() })?;
            let Some(item) = session
                .state
                .expanded_item
                .as_deref()
                .and_then(|id| session.catalog.item(id))
            else {
                bail!("unknown supplement '{id}'");
            };
            println!("{}", ui::render_details(item, &session.state.stack));
        }
        Commands::Add { id } => {
            let name = session.item_name(&id)?;
            if session.dispatch(UserAction::AddToStack { item_id: id })? {
                println!("{name} is already in your stack");
            }
        }
        Commands::Remove { id } => {
            let name = session.item_name(&id)?;
            if session.dispatch(UserAction::RemoveFromStack { item_id: id })? {
                println!("{name} is not in your stack");
            }
        }
        Commands::Toggle { id } => {
            session.item_name(&id)?;
            session.dispatch(UserAction::ToggleStackItem { item_id: id })?;
        }
        Commands::Multiplier { id, value } => {
            let name = session.item_name(&id)?;
            if !session.state.is_in_stack(&id) {
                bail!("{name} is not in your stack");
            }
            if session.dispatch(UserAction::SetMultiplier { item_id: id, value })? {
                bail!("multiplier must be between {MIN_MULTIPLIER} and {MAX_MULTIPLIER}, got {value}");
            }
            println!("{name} multiplier set to x{value}");
        }
        Commands::Clear { yes } => {
            if !yes
                && !session.state.stack.is_empty()
                && !confirm("Clear every supplement from your stack?")?
            {
                println!("Cancelled.");
                return Ok(());
            }
            session.dispatch(UserAction::ClearStack)?;
        }
        Commands::Templates => {
            session.dispatch(UserAction::SelectTab(Tab::Templates))?;
            println!("{}", ui::render_templates(&session.catalog));
        }
        Commands::ApplyTemplate { id, yes } => {
            let Some(template) = session.catalog.template(&id) else {
                bail!("unknown template '{id}'");
            };
            if !yes
                && !session.state.stack.is_empty()
                && !confirm(&format!(
                    "Replace your current stack with the \"{}\" template?",
                    template.name
                ))?
            {
                println!("Cancelled.");
                return Ok(());
            }
            session.dispatch(UserAction::ApplyTemplate { template_id: id })?;
            println!();
            println!(
                "{}",
                ui::render_stack(&session.state.stack, &session.catalog)
            );
        }
        Commands::Stack => {
            session.dispatch(UserAction::SelectTab(Tab::MyStack))?;
            println!(
                "{}",
                ui::render_stack(&session.state.stack, &session.catalog)
            );
        }
        Commands::Export { output } => {
            if let Some(output) = output {
                session.report_path = output;
            }
            session.dispatch(UserAction::ExportStack)?;
        }
        // Runs without a session; see `run`.
        Commands::Convert { .. } => {}
    }
    Ok(())
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match dirs::config_dir() {
            Some(dir) => {
                let path = dir.join(APP_DIR).join("config.toml");
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
            None => return Ok(Config::default()),
        },
    };
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&raw)
        .with_context(|| format!("invalid config {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn parse_category_filter(label: &str) -> Result<CategoryFilter> {
    if label.eq_ignore_ascii_case("all") {
        return Ok(CategoryFilter::All);
    }
    match Category::from_label(label) {
        Some(category) => Ok(CategoryFilter::Only(category)),
        None => {
            let known: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
            bail!(
                "unknown category '{label}' (expected all, {})",
                known.join(", ")
            )
        }
    }
}

/// Host side of the reducer: owns the catalog, the session state and the
/// store, and carries out the effects each action returns.
struct Session {
    catalog: Catalog,
    state: SessionState,
    store: StackStore,
    report_path: PathBuf,
}

impl Session {
    fn open(catalog: Option<&Path>, state: Option<PathBuf>, config: &Config) -> Result<Self> {
        let catalog = match catalog.or(config.catalog.path.as_deref()) {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?,
            None => Catalog::builtin().context("bundled catalog is invalid")?,
        };

        let state_path = match state.or_else(|| config.storage.state_path.clone()) {
            Some(path) => path,
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR).join("stack.json"))
                .context("could not determine a data directory; pass --state")?,
        };
        let store = StackStore::open(&state_path)
            .with_context(|| format!("failed to open stack storage {}", state_path.display()))?;
        let persisted = store
            .load()
            .with_context(|| format!("failed to load stack from {}", state_path.display()))?;

        let mut session = Self {
            catalog,
            state: SessionState::new(),
            store,
            report_path: PathBuf::from(&config.export.file_name),
        };
        reduce(
            &mut session.state,
            &session.catalog,
            SessionAction::Runtime(RuntimeAction::RestoreStack(persisted)),
        );
        Ok(session)
    }

    fn item_name(&self, id: &str) -> Result<String> {
        match self.catalog.item(id) {
            Some(item) => Ok(item.name.clone()),
            None => bail!("unknown supplement '{id}'"),
        }
    }

    /// Runs one action through the reducer and executes its effects.
    /// Returns true when the action was a no-op.
    fn dispatch(&mut self, action: UserAction) -> Result<bool> {
        let effects = reduce(&mut self.state, &self.catalog, SessionAction::User(action));
        let noop = effects.is_empty();
        for effect in effects {
            self.execute(effect)?;
        }
        Ok(noop)
    }

    fn execute(&mut self, effect: StackEffect) -> Result<()> {
        match effect {
            // One-shot commands render after dispatch.
            StackEffect::RequestFrame => {}
            StackEffect::PersistStack => {
                self.store
                    .save(&self.state.stack.to_persisted())
                    .with_context(|| {
                        format!("failed to save stack to {}", self.store.path().display())
                    })?;
            }
            StackEffect::Notify(message) => println!("{message}"),
            StackEffect::Alert(message) => bail!(message),
            StackEffect::DownloadReport { contents } => {
                fs::write(&self.report_path, contents).with_context(|| {
                    format!("failed to write report {}", self.report_path.display())
                })?;
                log::debug!("wrote report to {}", self.report_path.display());
            }
        }
        Ok(())
    }
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "YES"))
}

fn convert(input: &Path, output: Option<&Path>, merge_into: Option<&Path>) -> Result<()> {
    let records = load_source(input)?;
    let converted = convert_all(&records);
    log::info!("converted {} records from {}", converted.len(), input.display());

    let encoded = match merge_into {
        Some(path) => {
            let mut document = Catalog::from_path(path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?
                .to_document();
            let before = document.supplements.len();
            document.supplements = merge_catalog(document.supplements, converted);
            eprintln!(
                "Merged {} new supplements into {} existing",
                document.supplements.len() - before,
                before
            );
            serde_json::to_string_pretty(&document)?
        }
        None => {
            if let Some(output) = output {
                write_items(output, &converted)?;
                eprintln!("Wrote {} supplements to {}", converted.len(), output.display());
                return Ok(());
            }
            serde_json::to_string_pretty(&converted)?
        }
    };

    match output {
        Some(output) => {
            fs::write(output, format!("{encoded}\n"))
                .with_context(|| format!("failed to write {}", output.display()))?;
            eprintln!("Wrote {}", output.display());
        }
        None => println!("{encoded}"),
    }
    Ok(())
}
