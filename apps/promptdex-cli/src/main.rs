//! Promptdex CLI - browse and render a static prompt catalog.
//!
//! Command-line interface over the promptdex core: list and filter the
//! catalog, inspect a single prompt, and render its text with variable
//! substitution.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use promptdex_core::{Catalog, CatalogError, LibraryConfig, PromptRecord, Query, SortKey, execute, home_mix};
use promptdex_tpl::{VariableMap, extract_variables, render};
use std::path::PathBuf;
use tracing::{error, info};

/// Promptdex - prompt catalog browser
///
/// Filter, search, and sort a bundled prompt dataset, and render prompt
/// text with `{{variable}}` substitution.
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to the dataset JSON file (overrides promptdex.toml)
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available promptdex commands
#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    ///
    /// With no filters, search text, or sort key, shows the curated home
    /// mix. Any filter switches to the full pipeline: category and model
    /// filters OR within themselves, then search, then sort.
    Browse {
        /// Filter by category (repeatable; matches any)
        #[arg(short, long)]
        category: Vec<String>,

        /// Filter by compatible model (repeatable; matches any)
        #[arg(short, long)]
        model: Vec<String>,

        /// Free-text search over title, description, categories, and prompt text
        #[arg(short, long)]
        search: Option<String>,

        /// Sort key: newest, popular, rating, or alphabetical
        #[arg(long)]
        sort: Option<String>,
    },

    /// Search the catalog by free text
    Search {
        /// Text to search for (case-insensitive substring)
        query: String,
    },

    /// List all categories with record counts
    Categories,

    /// List all compatible models with record counts
    Models,

    /// Show one prompt in full
    Show {
        /// Prompt identifier
        id: String,
    },

    /// List the variables a prompt's text exposes
    Vars {
        /// Prompt identifier
        id: String,
    },

    /// Render a prompt's text with variables substituted
    ///
    /// Unfilled variables are left in place as `{{name}}`. The rendered
    /// text goes to stdout, ready to pipe into a clipboard tool.
    Render {
        /// Prompt identifier
        id: String,

        /// Variable binding as name=value (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
    },
}

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing subscriber
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = run_command(&cli) {
        // Log with tracing
        error!("Command failed: {:#}", e);
        // Also print to stderr for CLI users
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber for structured logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("promptdex=debug,promptdex_core=debug,promptdex_tpl=debug")
    } else {
        EnvFilter::new("promptdex=info,promptdex_core=info,promptdex_tpl=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();
}

/// Execute the specified command
fn run_command(cli: &Cli) -> Result<()> {
    let (catalog, config) = load_catalog(cli.dataset.clone())?;

    match &cli.command {
        Commands::Browse {
            category,
            model,
            search,
            sort,
        } => run_browse(&catalog, &config, category, model, search.as_deref(), sort.as_deref()),
        Commands::Search { query } => run_search(&catalog, query),
        Commands::Categories => run_categories(&catalog),
        Commands::Models => run_models(&catalog),
        Commands::Show { id } => run_show(&catalog, id),
        Commands::Vars { id } => run_vars(&catalog, id),
        Commands::Render { id, vars } => run_render(&catalog, id, vars),
    }
}

/// Load configuration and the dataset it points at
fn load_catalog(dataset: Option<PathBuf>) -> Result<(Catalog, LibraryConfig)> {
    let root = std::env::current_dir().context("Failed to get current directory")?;

    let config = LibraryConfig::load(&root).context("Failed to load promptdex configuration")?;

    let path = dataset.unwrap_or_else(|| config.dataset.clone());
    let catalog = Catalog::from_path(&path)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))?;

    info!(records = catalog.len(), "Catalog loaded");

    Ok((catalog, config))
}

/// Run the browse command
fn run_browse(
    catalog: &Catalog,
    config: &LibraryConfig,
    categories: &[String],
    models: &[String],
    search: Option<&str>,
    sort: Option<&str>,
) -> Result<()> {
    let query = Query::new()
        .with_categories(categories.to_vec())
        .with_models(models.to_vec())
        .with_search(search.unwrap_or_default())
        .with_sort(sort.map(SortKey::parse).unwrap_or_default());

    // An untouched browse shows the curated mix instead of the firehose.
    let results = if query.is_unfiltered() && sort.is_none() {
        info!("No filters active, showing curated mix");
        home_mix(catalog.records(), &config.home.mix_policy())
    } else {
        execute(catalog.records(), &query)
    };

    print_listing(&results);
    Ok(())
}

/// Run the search command
fn run_search(catalog: &Catalog, query: &str) -> Result<()> {
    let results = execute(catalog.records(), &Query::new().with_search(query));
    print_listing(&results);
    Ok(())
}

/// Run the categories command
fn run_categories(catalog: &Catalog) -> Result<()> {
    for category in catalog.categories() {
        println!("{}  ({})", category, catalog.by_category(&category).len());
    }
    Ok(())
}

/// Run the models command
fn run_models(catalog: &Catalog) -> Result<()> {
    for model in catalog.models() {
        let count = catalog
            .records()
            .iter()
            .filter(|r| r.compatible_models().contains(&model))
            .count();
        println!("{}  ({})", model, count);
    }
    Ok(())
}

/// Run the show command
fn run_show(catalog: &Catalog, id: &str) -> Result<()> {
    let record = find_prompt(catalog, id)?;

    println!("{}", record.title);
    println!("id:         {}", record.id);
    if !record.description.is_empty() {
        println!("about:      {}", record.description);
    }
    if !record.categories.is_empty() {
        println!("categories: {}", record.categories.join(", "));
    }
    if !record.compatible_models().is_empty() {
        println!("models:     {}", record.compatible_models().join(", "));
    }
    println!("rating:     {:.1}", record.rating);
    println!("copies:     {}", record.copy_count);
    println!("created:    {}", record.created_at.to_rfc3339());
    if record.is_featured {
        println!("featured:   yes");
    }
    println!("\n{}", record.prompt_text);

    Ok(())
}

/// Run the vars command
fn run_vars(catalog: &Catalog, id: &str) -> Result<()> {
    let record = find_prompt(catalog, id)?;
    let names = extract_variables(&record.prompt_text);

    if names.is_empty() {
        println!("(no variables)");
    } else {
        for name in names {
            println!("{name}");
        }
    }

    Ok(())
}

/// Run the render command
fn run_render(catalog: &Catalog, id: &str, raw_vars: &[String]) -> Result<()> {
    let record = find_prompt(catalog, id)?;

    let mut vars = VariableMap::new();
    for raw in raw_vars {
        let Some((name, value)) = raw.split_once('=') else {
            bail!("invalid --var binding '{raw}' (expected NAME=VALUE)");
        };
        vars.insert(name, value);
    }

    println!("{}", render(&record.prompt_text, &vars));
    Ok(())
}

/// Look up a prompt, turning a routine miss into a CLI failure
fn find_prompt<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a PromptRecord> {
    catalog
        .by_id(id)
        .ok_or_else(|| CatalogError::PromptNotFound(id.to_string()).into())
}

/// Print a one-line-per-record listing with a count footer
fn print_listing(records: &[&PromptRecord]) {
    for record in records {
        let categories = record.categories.join(", ");
        if categories.is_empty() {
            println!("{}  {}", record.id, record.title);
        } else {
            println!("{}  {}  [{}]", record.id, record.title, categories);
        }
    }
    println!("\n{} prompt(s)", records.len());
}
