use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ladder_stats::charts::{
    default_settings, ranking_history_table, LeagueDistributionGraph, LeagueDistributionTable,
    PopulationGraph, PopulationTable, RaceDistributionGraph, RaceDistributionTable, TableSource,
    TableView, LEAGUE, REGION, VERSION, X_AXIS, Y_AXIS,
};
use ladder_stats::config::AppConfig;
use ladder_stats::fetch::{Fetcher, HttpSource};
use ladder_stats::graph::{Chart, Container, Graph, Settings, SvgCanvas, Tooltip};
use ladder_stats::models::{EnumsInfo, Seasons, StatId};
use ladder_stats::StatsContext;

#[derive(Parser)]
#[command(name = "ladder-stats")]
#[command(about = "Ladder statistics tables and charts")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Directory holding enums.json and seasons.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print league, race and population tables for the latest snapshot
    Tables {
        /// Mode id
        #[arg(long)]
        mode: StatId,

        /// Version id, defaults to the configured version
        #[arg(long)]
        version: Option<StatId>,

        /// Region id for the race table (-2 for all)
        #[arg(long)]
        region: Option<StatId>,
    },

    /// Print a team's ranking history
    History {
        /// Team id
        #[arg(long)]
        team: i64,
    },

    /// Render a chart to an SVG file
    Render {
        #[arg(value_enum)]
        chart: ChartKind,

        /// Mode id
        #[arg(long)]
        mode: StatId,

        /// Output file
        #[arg(long)]
        out: PathBuf,

        /// Canvas width in pixels
        #[arg(long, default_value = "1200")]
        width: f64,

        #[arg(long)]
        version: Option<StatId>,

        #[arg(long)]
        region: Option<StatId>,

        #[arg(long)]
        league: Option<StatId>,

        /// "a" for every snapshot, "sl" for the last snapshot of each season
        #[arg(long, default_value = "a")]
        x_axis: String,

        /// Population y axis: "c" team count, "g" games per day
        #[arg(long, default_value = "c")]
        y_axis: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartKind {
    Race,
    League,
    Population,
}

/// Fixed-width page with nowhere to show a tooltip.
struct Headless {
    width: f64,
}

impl Container for Headless {
    fn width(&self) -> f64 {
        self.width
    }

    fn set_waiting(&mut self, waiting: bool) {
        tracing::debug!(waiting, "Graph waiting state");
    }

    fn show_tooltip(&mut self, _tooltip: &Tooltip, _left: f64, _top: f64) {}

    fn hide_tooltip(&mut self) {}
}

fn load_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::from_file(path).with_context(|| format!("Loading {}", path.display()))
    } else {
        Ok(AppConfig::default())
    }
}

fn read_json(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))
}

fn apply(settings: &mut Settings, name: &str, value: Option<StatId>) {
    if let Some(value) = value {
        settings.set(name, &value.to_string());
    }
}

fn render<K: Chart>(chart: K, config: &AppConfig, settings: Settings, width: f64) -> Result<String> {
    let mut graph = Graph::new(Headless { width }, SvgCanvas::new(), &config.graph, settings);
    graph.init(chart)?;
    Ok(graph.canvas().to_svg())
}

fn print_table<T: TableSource>(settings: &Settings, source: T) -> Result<()> {
    let mut view = TableView::new(settings.clone());
    println!("{}", view.init(source)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let log_level = cli.log_level.unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting ladder-stats v{}", env!("CARGO_PKG_VERSION"));

    let enums = EnumsInfo::from_json(&read_json(&config.enums_path())?)
        .context("Parsing enums")?;
    let seasons = Seasons::from_json(&read_json(&config.seasons_path())?)
        .context("Parsing seasons")?;

    let fetcher = Fetcher::new(config.fetch.fetcher_config())?;
    let source = HttpSource::new(fetcher, config.site.dynamic_url()?);
    let context = StatsContext::new(Arc::new(source), enums, seasons);
    let default_version = config.site.default_version;

    match cli.command {
        Commands::Tables {
            mode,
            version,
            region,
        } => {
            let stats = context.mode(mode).await?;
            let enums = context.enums().clone();

            let mut settings = default_settings(default_version);
            apply(&mut settings, VERSION, version);
            apply(&mut settings, REGION, region);

            print_table(
                &settings,
                LeagueDistributionTable::new(stats.clone(), enums.clone(), default_version),
            )?;
            print_table(
                &settings,
                RaceDistributionTable::new(stats.clone(), enums.clone(), default_version),
            )?;
            print_table(&settings, PopulationTable::new(stats, enums, default_version))?;
        }

        Commands::History { team } => {
            let history = context.ranking_history(team).await?;
            println!("{}", ranking_history_table(&history));
        }

        Commands::Render {
            chart,
            mode,
            out,
            width,
            version,
            region,
            league,
            x_axis,
            y_axis,
        } => {
            let stats = context.mode(mode).await?;
            let enums = context.enums().clone();
            let seasons = context.seasons().clone();

            let mut settings = default_settings(default_version);
            apply(&mut settings, VERSION, version);
            apply(&mut settings, REGION, region);
            apply(&mut settings, LEAGUE, league);
            settings.set(X_AXIS, &x_axis);
            settings.set(Y_AXIS, &y_axis);

            let svg = match chart {
                ChartKind::Race => render(
                    RaceDistributionGraph::new(stats, enums, seasons, default_version)
                        .with_race_images(&config.site.static_url),
                    &config,
                    settings,
                    width,
                )?,
                ChartKind::League => render(
                    LeagueDistributionGraph::new(stats, enums, seasons, default_version),
                    &config,
                    settings,
                    width,
                )?,
                ChartKind::Population => render(
                    PopulationGraph::new(stats, seasons, default_version),
                    &config,
                    settings,
                    width,
                )?,
            };

            std::fs::write(&out, svg).with_context(|| format!("Writing {}", out.display()))?;
            tracing::info!(path = %out.display(), "Chart written");
        }
    }

    Ok(())
}
