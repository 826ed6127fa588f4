use chrono::Datelike;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use redrocks_site::generate::{self, BuildContext, GenerateError, Generated};
use redrocks_site::{config, output};
use simple_logger::SimpleLogger;
use std::path::PathBuf;

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
#[command(name = "redrocks")]
#[command(about = "Page generators for the RedRocks personal site")]
#[command(long_about = "\
Page generators for the RedRocks personal site

Markdown articles, photo folders and calligraphy scans become static HTML
pages that share the site navigation. Generated files are written next to
their sources and overwritten on every run.

Site structure:

  <root>/
  ├── site.toml                    # Optional config (run 'redrocks gen-config')
  ├── articles/
  │   ├── travel/
  │   │   ├── kyoto.md             # → articles/travel/kyoto.html
  │   │   └── cover.jpg            # Optional category cover
  │   └── travel.html              # ← category index
  ├── articles.html                # ← article overview
  ├── images/<series>/*.jpg        # → gallery-<series>.html, gallery.html
  ├── sutra_images/*.jpg           # → sutras.html
  └── banner/*.jpg                 # → banner_list.js

Article titles come from the first '# ' heading, falling back to the file
name. Articles are listed newest first by modification time; photos by
file name.")]
#[command(version = version_string())]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: <root>/site.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every file written
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate article detail pages, category indices and the overview
    Articles,
    /// Generate photo series pages and the gallery overview
    Gallery,
    /// Generate the sutra calligraphy page
    Sutras,
    /// Write the banner image list script
    Banner,
    /// Run every generator
    Build,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let run: fn(&BuildContext<'_>) -> Result<Generated, GenerateError> = match cli.command {
        Command::Articles => generate::generate_articles,
        Command::Gallery => generate::generate_gallery,
        Command::Sutras => generate::generate_sutras,
        Command::Banner => generate::generate_banner,
        Command::Build => generate::generate_all,
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
    };

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    let site_config = config::load_config(&cli.root, cli.config.as_deref())?;
    let ctx = BuildContext::new(&cli.root, &site_config, chrono::Local::now().year());

    let generated = run(&ctx)?;

    let written = generated.output.write_all()?;
    output::print_summary(&generated.reports, &cli.root, written);
    Ok(())
}
