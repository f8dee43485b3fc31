use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::{Local, NaiveDate};

use match_catalog_lib::config::CatalogConfig;
use match_catalog_lib::logging::init_logging;
use match_catalog_lib::{build_catalogs, sources, CatalogError};

#[derive(clap::Parser, Debug)]
#[command(version, about = "Build match catalogs from an event playlist", long_about = None)]
struct Args {
    /// Config file (JSON). Defaults to the platform config dir if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Playlist URL or local path
    #[arg(short, long)]
    playlist: Option<String>,

    /// Logo directory laid out as <league>/<team>.png
    #[arg(long)]
    logos_dir: Option<PathBuf>,

    /// Channel map JSON (stream id -> channel name)
    #[arg(long)]
    channels: Option<PathBuf>,

    /// Directory for matches.json / matches_other.json
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Date stamped on records (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Load config and lookup tables, report counts and exit
    #[arg(long)]
    check: bool,

    /// Write the effective config to the platform config file and exit
    #[arg(long)]
    init_config: bool,
}

impl Args {
    fn apply(&self, config: &mut CatalogConfig) {
        if let Some(playlist) = &self.playlist {
            config.playlist_source = playlist.clone();
        }
        if let Some(dir) = &self.logos_dir {
            config.logos_dir = dir.clone();
        }
        if let Some(path) = &self.channels {
            config.channel_map_path = path.clone();
        }
        if let Some(dir) = &self.out_dir {
            config.output_dir = dir.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args).await {
        match err.downcast_ref::<CatalogError>() {
            Some(catalog_err) => eprintln!("{}", catalog_err.diagnostics()),
            None => eprintln!("{:?}", err),
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: Args) -> Result<(), anyhow::Error> {
    let mut config = CatalogConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    if args.init_config {
        config.save()?;
        if let Some(path) = CatalogConfig::default_path() {
            println!("Config written to {}", path.display());
        }
        return Ok(());
    }

    let logo_files = sources::scan_logo_dir(&config.logos_dir, &config.logos_base_url)?;
    let channel_names = sources::load_channel_map(&config.channel_map_path);

    // -- CHECK MODE --
    if args.check {
        let lookups = config.lookups(&logo_files, channel_names);
        println!("Playlist source: {}", config.playlist_source);
        println!("Logos indexed:   {}", lookups.logos.index().len());
        println!("Aliases:         {}", lookups.logos.aliases().len());
        println!("Channel names:   {}", lookups.channels.len());
        println!("Outputs:         {}", config.primary_output().display());
        println!("                 {}", config.secondary_output().display());
        return Ok(());
    }

    let playlist = sources::fetch_playlist(
        &config.playlist_source,
        Duration::from_secs(config.request_timeout_secs),
    )
    .await?;

    let lookups = config.lookups(&logo_files, channel_names);
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let run = build_catalogs(&playlist, &lookups, date);

    sources::write_catalog(&config.primary_output(), &run.catalogs.primary)
        .context("writing primary catalog")?;
    sources::write_catalog(&config.secondary_output(), &run.catalogs.secondary)
        .context("writing secondary catalog")?;

    println!(
        "{}: {} matches, {}: {} matches",
        config.primary_file,
        run.stats.primary_matches,
        config.secondary_file,
        run.stats.secondary_matches
    );
    println!(
        "Real logos: {}/{} team slots",
        run.stats.logos_from_index,
        run.stats.logos_from_index + run.stats.logos_fallback
    );
    for m in run.catalogs.primary.iter().take(3) {
        println!("  {} {} vs {} ({})", m.time, m.home_team, m.away_team, m.competition);
    }

    Ok(())
}
