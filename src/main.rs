use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tutorial_site::page::{PageAssembler, PageOutcome};
use tutorial_site::routes::{self, RouteKey};
use tutorial_site::scan::Manifest;
use tutorial_site::sidebar::SidebarGrouper;
use tutorial_site::store::ContentStore;
use tutorial_site::{config, generate, output, scan};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "tutorial-site")]
#[command(about = "Static site compiler for categorised tutorials")]
#[command(long_about = "\
Static site compiler for categorised tutorials

Directories become categories, markdown files become tutorials, and every
(category, slug) pair becomes a page at /tutorials/{category}/{slug}.
Anything else is served the generic 404 page.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Static assets → copied to output root
  ├── 010-gcp/                     # Category `gcp` (number fixes order)
  │   ├── info.txt                 # Category description
  │   ├── 010-cloud-run-basics.md  # Tutorial, slug `cloud-run-basics`
  │   └── 020-iam-deep-dive.md
  └── 020-aws/
      └── 010-lambda-intro.md      # `slug = \"lambda\"` in front matter overrides

Tutorial front matter (TOML between +++ fences):
  id, title, description, author, read_time,
  difficulty (Beginner | Intermediate | Advanced),
  published_at (\"YYYY-MM-DD\"), slug (optional)

Set RUST_LOG=debug for diagnostic logging.
Run 'tutorial-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".tutorial-site-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content and routes without writing output
    Check,
    /// Print every route that will be pre-rendered
    Routes,
    /// Resolve a request path and print its page model
    Resolve {
        /// Request path, e.g. /tutorials/gcp/cloud-run-basics
        path: String,
        /// Print a readable outline instead of JSON
        #[arg(long)]
        outline: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: Manifest = serde_json::from_str(&manifest_content)?;
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate_site(manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            let (_, routes) = load_routes(manifest)?;
            println!("==> Content is valid ({} routes)", routes.len());
        }
        Command::Routes => {
            let manifest = scan::scan(&cli.source)?;
            let (_, routes) = load_routes(manifest)?;
            output::print_routes(&routes);
        }
        Command::Resolve { path, outline } => {
            let manifest = scan::scan(&cli.source)?;
            let match_category = manifest.config.routing.match_category;
            let grouper = SidebarGrouper::new(manifest.config.sidebar.order);
            let (store, _) = load_routes(manifest)?;
            let assembler = PageAssembler::new(&store, match_category, grouper);

            let outcome = match RouteKey::parse_path(&path) {
                Some(key) => assembler.assemble_route(&key),
                None => PageOutcome::NotFound,
            };
            match outcome {
                PageOutcome::Found(model) if outline => output::print_page_outline(&model),
                PageOutcome::Found(model) => println!("{}", serde_json::to_string_pretty(&model)?),
                PageOutcome::NotFound => {
                    println!("not found: {}", path);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn write_manifest(manifest: &Manifest, temp_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}

/// Load the store and enumerate routes, failing on empty categories.
fn load_routes(manifest: Manifest) -> Result<(ContentStore, Vec<RouteKey>), Box<dyn std::error::Error>> {
    let store = ContentStore::load(manifest.tutorials)?;
    let routes = routes::enumerate_routes(&store, &manifest.categories)?;
    Ok((store, routes))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
