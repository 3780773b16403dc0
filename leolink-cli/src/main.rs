//! Command line tool to filter LEO satellite link telemetry,
//! elect the best links and chart every metric.
//! Refer to README for command line arguments.

mod cli; // command line interface
mod fops; // output products
mod plot; // charts

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use leolink::prelude::{
    best_link_charts, metric_charts, select_best_links, ConnectivityFilter, TelemetryTable,
};

use cli::{Cli, Workspace};
use plot::ChartConfig;

use env_logger::{Builder, Target};

#[macro_use]
extern crate log;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    StdioError(#[from] std::io::Error),
    #[error("telemetry error: {0}")]
    LeolinkError(#[from] leolink::Error),
    #[error("invalid configuration: {0}")]
    ConfigError(#[from] serde_json::Error),
    #[error("failed to create workspace \"{0}\": {1}")]
    Workspace(PathBuf, std::io::Error),
    #[error("no telemetry log to process")]
    MissingInput,
}

/*
 * True if this file looks like a telemetry log
 */
fn is_telemetry_log(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    name.ends_with(".csv") || name.ends_with(".csv.gz")
}

/*
 * Lists all files passed by User
 */
fn user_data_files(cli: &Cli) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let max_depth = cli.recursive_depth();
    // recursive dir loader
    for dir in cli.input_directories().iter() {
        let walkdir = WalkDir::new(dir).max_depth(max_depth);
        for entry in walkdir.into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if is_telemetry_log(path) {
                files.push(path.to_path_buf());
            } else {
                warn!("non supported file format \"{}\"", path.display());
            }
        }
    }
    // individual files
    for fp in cli.input_files().iter() {
        files.push(PathBuf::from(fp));
    }
    files
}

/*
 * Processes one telemetry log
 */
fn process(
    cli: &Cli,
    cfg: &ChartConfig,
    workspace: &Workspace,
    path: &Path,
    tag: &str,
) -> Result<(), Error> {
    let stem = fops::input_stem(path);

    let mut table = TelemetryTable::from_path(path)?;
    info!(
        "loaded \"{}\": {} time steps, {} columns",
        path.display(),
        table.nb_rows(),
        table.nb_columns()
    );

    let report = ConnectivityFilter::default().apply(&mut table);
    if report.qualified.is_empty() {
        warn!("\"{}\": no satellite reached both stations", path.display());
    } else {
        info!(
            "{} satellites reached both stations, {} columns remaining",
            report.qualified.len(),
            table.nb_columns()
        );
    }

    let session = workspace.create_subdir(tag)?;

    // selection operates on raw units
    let best = select_best_links(&table, &report.qualified);
    fops::best_link_csv(&session, tag, &stem, &best)?;
    fops::best_link_report(&best);

    table.convert_units();
    if cli.filtered_csv() {
        fops::filtered_csv(&session, tag, &stem, &table)?;
    }

    let best = best.to_table()?;

    if !cli.no_stats() {
        fops::statistics(&session, &table, &best, cli.fill_missing())?;
        fops::rssi_report(&table)?;
    }

    if !cli.no_graph() {
        let charts = metric_charts(
            &table,
            &report.qualified,
            tag,
            cli.constellation(),
            &workspace.root,
        );
        let rendered = plot::render_all(&charts, &table, cfg);
        info!("{}/{} satellite charts rendered", rendered, charts.len());

        let charts = best_link_charts(tag, cli.constellation(), &workspace.root);
        let rendered = plot::render_all(&charts, &best, cfg);
        info!("{}/{} best link charts rendered", rendered, charts.len());
    }
    Ok(())
}

pub fn main() -> Result<(), Error> {
    let cli = Cli::new();

    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false);
    if cli.quiet() {
        builder.filter_level(log::LevelFilter::Error);
    }
    builder.init();

    let cfg = cli.chart_config()?;
    let workspace = Workspace::new(&cli)?;

    let files = user_data_files(&cli);
    if files.is_empty() {
        return Err(Error::MissingInput);
    }

    let tags = fops::session_tags(cli.tag().map(|tag| tag.as_str()), &files);
    for (path, tag) in files.iter().zip(tags.iter()) {
        if let Err(e) = process(&cli, &cfg, &workspace, path, tag) {
            error!("failed to process \"{}\": {}", path.display(), e);
        }
    }
    Ok(())
}
