use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use mvprank::{export, season, DedupeMode};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Season year to rank
    #[arg(short = 's', long = "season", default_value_t = season::DEFAULT_SEASON)]
    season: u16,

    /// Output CSV path (defaults to nba_mvp_<season>.csv)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Rank traded players per team-stint, or once per player
    #[arg(long, default_value_t = DedupeMode::Stints)]
    dedupe: DedupeMode,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let config = ConfigBuilder::new().add_filter_allow_str("mvprank").build();
    TermLogger::init(
        default_level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();

    log::trace!("Args {:#?}", args);
    log::info!("Collecting {} NBA season data...", args.season);

    let mut df = season::get_season_data(args.season, args.dedupe)?;

    // Show every column in the preview, not polars' truncated default.
    std::env::set_var("POLARS_FMT_MAX_COLS", "-1");
    println!("\nTop 10 MVP candidates for the {} season:", args.season);
    println!("{}", df.head(Some(10)));

    let path = args
        .output
        .unwrap_or_else(|| export::default_export_path(args.season).into());
    export::write_csv(&mut df, &path)?;
    log::info!("Data saved to '{}'", path.display());

    Ok(())
}
