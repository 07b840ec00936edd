use clap::{Parser, Subcommand};
use codepage::viewer::{
    CodeBlockViewer, FixedPreference, MemoryClipboard, Osc52Clipboard, RecordingSurface, Theme,
};
use codepage::{config, generate, markdown, output, scan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that render pages.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the render cache and re-render every page
    #[arg(long)]
    no_cache: bool,
}

#[derive(clap::Args, Clone)]
struct CopyArgs {
    /// Article slug, as printed by `scan`
    slug: String,

    /// Which code block to copy, counting from 1
    #[arg(long, default_value_t = 1)]
    block: usize,

    /// Color scheme to copy for (defaults to `code.default_theme`)
    #[arg(long)]
    theme: Option<Theme>,

    /// Print the text instead of sending it to the terminal clipboard
    #[arg(long)]
    stdout: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("CODEPAGE_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("CODEPAGE_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "codepage")]
#[command(about = "Static site generator for code-heavy articles")]
#[command(long_about = "\
Static site generator for code-heavy articles

Markdown files become pages. Every code block becomes a viewer that collapses
when tall, shows the variant for the reader's color scheme, and has a copy
button.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Static assets (favicon, fonts) → copied to output root
  ├── 010-what-are-rscs.md         # Article (numbered = shown in nav)
  ├── 020-data-fetching/           # Section (groups articles in nav)
  │   ├── 010-async-components.md
  │   └── 020-streaming.md
  ├── 030-github.md                # Link (URL-only .md → external nav link)
  └── drafts.md                    # No number prefix = hidden from nav

Code fences may restrict which color schemes a block exists for:

  ```bash theme=dark
  ```js themes=dark,light

Run 'codepage gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".codepage-temp", global = true)]
    temp_dir: PathBuf,

    /// More diagnostics on stderr (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from the scanned manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build(CacheArgs),
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Copy one code block of an article to the clipboard
    Copy(CopyArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let scanned: scan::Manifest = serde_json::from_str(&manifest_content)?;
            init_thread_pool(&scanned.config.processing);
            let (manifest, result) =
                generate::generate(&manifest_path, &cli.source, &cli.output, true)?;
            output::print_generate_output(&manifest, &result);
        }
        Command::Build(cache_args) => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let result =
                generate::generate_site(&manifest, &cli.source, &cli.output, !cache_args.no_cache)?;
            output::print_generate_output(&manifest, &result);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Copy(args) => copy_block(&cli.source, &args)?,
    }

    Ok(())
}

/// Mount a headless viewer on one code block and copy what it shows.
fn copy_block(source: &std::path::Path, args: &CopyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = scan::scan(source)?;
    let code = &manifest.config.code;
    let article = manifest
        .find_article(&args.slug)
        .ok_or_else(|| format!("no article with slug '{}'", args.slug))?;
    let blocks = markdown::code_blocks(&article.body, code);
    let block = args
        .block
        .checked_sub(1)
        .and_then(|i| blocks.get(i))
        .ok_or_else(|| {
            format!(
                "'{}' has {} code block(s); --block {} is out of range",
                args.slug,
                blocks.len(),
                args.block
            )
        })?;

    let theme = args.theme.unwrap_or(code.default_theme);
    let mut viewer = CodeBlockViewer::mount(
        block.clone(),
        RecordingSurface::detached(),
        &FixedPreference(theme),
        code.detector(),
    );
    let result = if args.stdout {
        let mut sink = MemoryClipboard::new();
        let result = viewer.copy(&mut sink);
        print!("{}", result.text());
        result
    } else {
        let mut sink = Osc52Clipboard::new(std::io::stdout());
        viewer.copy(&mut sink)
    };
    viewer.unmount();

    eprintln!(
        "{}",
        output::format_copy_result(&args.slug, args.block, theme, &result)
    );
    if !result.is_copied() {
        return Err("clipboard write failed".into());
    }
    Ok(())
}

/// Install the stderr diagnostics subscriber.
///
/// `-v` / `-vv` win over `RUST_LOG`; without either only warnings show.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("codepage=debug"),
        _ => EnvFilter::new("codepage=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
