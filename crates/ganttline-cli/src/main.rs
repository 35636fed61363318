//! ganttline CLI - Gantt chart layout engine
//!
//! Command-line interface for checking, laying out, and rendering charts.

mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ganttline_core::{Chart, LayoutOptions, Renderer};
use ganttline_render::{ChartLayout, HtmlGanttRenderer, JsonRenderer, SvgRenderer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ganttline")]
#[command(author, version, about = "Gantt chart layout engine", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a chart file
    Check {
        /// Input file path (.json or .toml)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print layout records as JSON
    Layout {
        #[command(flatten)]
        chart: ChartArgs,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render a chart
    Render {
        #[command(flatten)]
        chart: ChartArgs,

        /// Output format; inferred from the output extension, else svg
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Use the dark theme
        #[arg(long)]
        dark: bool,

        /// Fill bars with their group color instead of progress colors
        #[arg(long)]
        color_by_group: bool,

        /// HTML without scripts (no tooltips, scroll sync, or today button)
        #[arg(long = "static")]
        static_chart: bool,
    },
}

/// Arguments shared by commands that compute a layout
#[derive(Args)]
struct ChartArgs {
    /// Input file path (.json or .toml)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Date drawn as today (defaults to the local date)
    #[arg(long, env = "GANTTLINE_TODAY", value_parser = config::parse_today)]
    today: Option<NaiveDate>,

    /// Draw no today marker
    #[arg(long)]
    no_today: bool,

    /// TOML file with layout options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ChartArgs {
    fn today(&self) -> Option<NaiveDate> {
        config::resolve_today(self.today, self.no_today)
    }

    fn options(&self) -> Result<LayoutOptions> {
        config::load_options(self.config.as_deref())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Html,
    Json,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "html" | "htm" => Some(Self::Html),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Some(Commands::Check { file }) => cmd_check(&file),
        Some(Commands::Layout { chart, compact }) => cmd_layout(&chart, compact),
        Some(Commands::Render {
            chart,
            format,
            dark,
            color_by_group,
            static_chart,
        }) => {
            let format = format
                .or_else(|| chart.output.as_deref().and_then(OutputFormat::from_path))
                .unwrap_or(OutputFormat::Svg);
            cmd_render(&chart, format, dark, color_by_group, static_chart)
        }
        None => {
            println!("ganttline - Gantt chart layout engine");
            println!("Run with --help for usage information");
            Ok(())
        }
    }
}

fn load_chart(path: &Path) -> Result<Chart> {
    let chart = ganttline_parser::parse_file(path)
        .with_context(|| format!("Failed to load chart: {}", path.display()))?;
    tracing::info!(
        file = %path.display(),
        groups = chart.groups.len(),
        tasks = chart.task_count(),
        "loaded chart"
    );
    Ok(chart)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            println!("Wrote: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn cmd_check(file: &Path) -> Result<()> {
    let chart = load_chart(file)?;
    let layout = ChartLayout::compute(&chart, &LayoutOptions::default(), None)
        .with_context(|| format!("Invalid chart: {}", file.display()))?;

    println!(
        "OK: {} ({} groups, {} tasks, {} to {}, {} days)",
        chart.title.as_deref().unwrap_or("untitled"),
        chart.groups.len(),
        chart.task_count(),
        layout.range.first(),
        layout.range.last(),
        layout.range.len()
    );
    Ok(())
}

fn cmd_layout(args: &ChartArgs, compact: bool) -> Result<()> {
    let chart = load_chart(&args.file)?;

    let mut renderer = JsonRenderer::new().options(args.options()?);
    if let Some(today) = args.today() {
        renderer = renderer.today(today);
    }
    if !compact {
        renderer = renderer.pretty();
    }

    let json = renderer
        .render(&chart)
        .with_context(|| format!("Failed to lay out {}", args.file.display()))?;
    write_output(args.output.as_deref(), &json)
}

fn cmd_render(
    args: &ChartArgs,
    format: OutputFormat,
    dark: bool,
    color_by_group: bool,
    static_chart: bool,
) -> Result<()> {
    let chart = load_chart(&args.file)?;
    let options = args.options()?;
    let today = args.today();
    tracing::debug!(?format, ?today, "rendering");

    let rendered = match format {
        OutputFormat::Svg => {
            let mut renderer = SvgRenderer::new().options(options);
            if let Some(today) = today {
                renderer = renderer.today(today);
            }
            if dark {
                renderer = renderer.dark_theme();
            }
            if color_by_group {
                renderer = renderer.color_by_group();
            }
            renderer.render(&chart)
        }
        OutputFormat::Html => {
            let mut renderer = HtmlGanttRenderer::new().options(options);
            if let Some(today) = today {
                renderer = renderer.today(today);
            }
            if dark {
                renderer = renderer.dark_theme();
            }
            if color_by_group {
                renderer = renderer.color_by_group();
            }
            if static_chart {
                renderer = renderer.static_chart();
            }
            renderer.render(&chart)
        }
        OutputFormat::Json => {
            let mut renderer = JsonRenderer::new().options(options).pretty();
            if let Some(today) = today {
                renderer = renderer.today(today);
            }
            renderer.render(&chart)
        }
    }
    .with_context(|| format!("Failed to render {}", args.file.display()))?;

    write_output(args.output.as_deref(), &rendered)
}
