//! rom-scout CLI
//!
//! Command-line interface for resolving game titles to download links
//! and maintaining the local catalog indexes.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_scout_core::PlatformTables;
use rom_scout_index::{CatalogIndex, HttpLister, IndexCrawler, TitleIndex};
use rom_scout_sources::{
    Aggregator, DownloadLink, EmulatorJsSource, GogGamesSource, MyrientSource, RomsPureSource,
    SourceAdapter,
};

mod settings;

use settings::Settings;

#[derive(Parser)]
#[command(name = "rom-scout")]
#[command(about = "Resolve game titles to download links across catalogs", long_about = None)]
struct Cli {
    /// Directory holding the index files (defaults to the settings value)
    #[arg(long, global = true)]
    index_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a game title to ranked download links
    Resolve {
        /// Free-text game title (e.g. "Chrono Trigger")
        title: String,

        /// Platform name or alias (e.g. snes, ps1, PlayStation)
        #[arg(short, long)]
        platform: String,
    },

    /// Crawl the Myrient mirror and rebuild the flat file index
    UpdateIndex {
        /// Continue an interrupted crawl from its checkpoint
        #[arg(long)]
        resume: bool,
    },

    /// Rebuild the EmulatorJS title index from per-system config files
    UpdateTitles {
        /// Directory of *.json system configs (filename stem = system code)
        config_dir: PathBuf,
    },

    /// Show entry counts for the local indexes
    IndexStats,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load();
    if let Some(dir) = cli.index_dir {
        settings.index_dir = dir;
    }

    match cli.command {
        Commands::Resolve { title, platform } => run_resolve(&settings, &title, &platform),
        Commands::UpdateIndex { resume } => run_update_index(&settings, resume),
        Commands::UpdateTitles { config_dir } => run_update_titles(&settings, &config_dir),
        Commands::IndexStats => run_index_stats(&settings),
    }
}

/// Build the full adapter set from settings.
fn build_aggregator(settings: &Settings) -> Result<Aggregator, rom_scout_sources::SourceError> {
    let tables = PlatformTables::builtin();

    let console: Vec<Box<dyn SourceAdapter>> = vec![
        Box::new(RomsPureSource::new(tables, &settings.romspure_base_url)?),
        Box::new(MyrientSource::new(
            tables,
            &settings.myrient_base_url,
            settings.myrient_index_path(),
        )),
        Box::new(EmulatorJsSource::new(
            tables,
            settings.emulatorjs_base_url.as_deref(),
            settings.emulatorjs_index_path(),
        )),
    ];
    let pc: Vec<Box<dyn SourceAdapter>> =
        vec![Box::new(GogGamesSource::new(&settings.gog_games_base_url)?)];

    Ok(Aggregator::new(tables, console, pc))
}

/// Run the resolve command.
fn run_resolve(settings: &Settings, title: &str, platform: &str) {
    let aggregator = match build_aggregator(settings) {
        Ok(a) => a,
        Err(e) => {
            eprintln!(
                "{} Failed to set up sources: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            return;
        }
    };

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let links = rt.block_on(aggregator.resolve(title, platform));

    if links.is_empty() {
        println!(
            "{}",
            format!("No links found for \"{title}\" ({platform})")
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        println!();
        println!("Tip: run 'rom-scout update-index' to build the Myrient index,");
        println!("     or check the platform name with a common alias (snes, ps1, pc).");
        return;
    }

    println!(
        "{} for \"{}\" ({}):",
        format!("{} link(s)", links.len()).if_supports_color(Stdout, |t| t.bold()),
        title,
        platform,
    );
    println!();

    let mut current_source = "";
    for link in &links {
        if link.source_label != current_source {
            current_source = link.source_label;
            println!(
                "{}:",
                current_source.if_supports_color(Stdout, |t| t.bold()),
            );
        }
        print_link(link);
    }
}

fn print_link(link: &DownloadLink) {
    match link.disc_number {
        Some(n) => println!(
            "  {} {}",
            format!("[Disc {n}]").if_supports_color(Stdout, |t| t.cyan()),
            link.url,
        ),
        None => println!("  {}", link.url),
    }
}

/// Run the update-index command.
fn run_update_index(settings: &Settings, resume: bool) {
    let lister = match HttpLister::new(&settings.myrient_base_url) {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "{} Bad mirror base URL: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            return;
        }
    };
    let crawler = IndexCrawler::new(
        lister,
        settings.myrient_index_path(),
        settings.myrient_checkpoint_path(),
    );
    log::info!(
        "index: {}, checkpoint: {}",
        settings.myrient_index_path().display(),
        settings.myrient_checkpoint_path().display(),
    );

    println!(
        "Crawling {} into {}",
        settings
            .myrient_base_url
            .if_supports_color(Stdout, |t| t.cyan()),
        settings.myrient_index_path().display(),
    );
    if resume {
        println!(
            "{}",
            "Resuming from checkpoint if one exists".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    match rt.block_on(crawler.crawl(resume)) {
        Ok(summary) => {
            println!(
                "{} {} files indexed across {} directories{}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                summary.files_written,
                summary.directories_visited,
                if summary.resumed { " (resumed)" } else { "" },
            );
        }
        Err(e) => {
            eprintln!(
                "{} Crawl failed: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            eprintln!("The index file is valid up to its last flush; rerun with --resume.");
        }
    }
}

/// Run the update-titles command.
fn run_update_titles(settings: &Settings, config_dir: &std::path::Path) {
    let output = settings.emulatorjs_index_path();
    match TitleIndex::build_from_configs(config_dir, &output) {
        Ok(index) => {
            let codes = index.codes();
            let total: usize = codes.iter().map(|c| index.titles_for(c).len()).sum();
            println!(
                "{} {} titles across {} systems written to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                total,
                codes.len(),
                output.display(),
            );
            if codes.is_empty() {
                println!(
                    "{}",
                    format!("No system configs found in {}", config_dir.display())
                        .if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
        Err(e) => {
            eprintln!(
                "{} Could not build title index: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
        }
    }
}

/// Run the index-stats command.
fn run_index_stats(settings: &Settings) {
    println!(
        "Index directory: {}",
        settings
            .index_dir
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    println!();

    let catalog = CatalogIndex::load(&settings.myrient_index_path(), "myrient");
    if catalog.is_empty() {
        println!(
            "  Myrient: {}",
            "empty (run 'rom-scout update-index')".if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        log::debug!("[{}] index read for stats", catalog.source_id());
        println!(
            "  Myrient: {} entries (read {})",
            catalog.len(),
            catalog.loaded_at().format("%Y-%m-%d %H:%M:%S"),
        );
    }

    let titles = TitleIndex::load(&settings.emulatorjs_index_path());
    let codes = titles.codes();
    if codes.is_empty() {
        println!(
            "  EmulatorJS: {}",
            "no title index".if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        let total: usize = codes.iter().map(|c| titles.titles_for(c).len()).sum();
        println!("  EmulatorJS: {} titles across {} systems", total, codes.len());
    }
}
