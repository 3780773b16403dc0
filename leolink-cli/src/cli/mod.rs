use std::{fs::read_to_string, path::PathBuf};

use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};

mod workspace;
pub use workspace::Workspace;

use crate::{plot::ChartConfig, Error};

/// Default constellation name, used in chart titles
const DEFAULT_CONSTELLATION: &str = "Starlink";

pub struct Cli {
    /// Arguments passed by user
    pub matches: ArgMatches,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }
    /// Command line definition
    pub fn command() -> Command {
        Command::new("leolink-cli")
            .version(env!("CARGO_PKG_VERSION"))
            .about("LEO satellite link telemetry post processing")
            .long_about("leolink filters satellite link simulation logs (CSV),
identifies the satellites that reached both ground stations,
elects the best link at each time step and charts every metric.")
            .arg_required_else_help(true)
            .color(ColorChoice::Always)
            .next_help_heading("Context (input data)")
            .arg(Arg::new("filepath")
                .long("fp")
                .short('f')
                .value_name("FILE")
                .action(ArgAction::Append)
                .required_unless_present("directory")
                .help("Load a single telemetry log (CSV, may be gzip compressed). See --help for more information.")
                .long_help("Use --fp,-f for as many individual files you may need.
Each file is processed independently.

Example:
leolink-cli -f test_resources/two_satellites.csv"))
            .arg(Arg::new("directory")
                .short('d')
                .long("dir")
                .value_name("DIRECTORY")
                .action(ArgAction::Append)
                .required_unless_present("filepath")
                .help("Load all telemetry logs (.csv, .csv.gz) contained in given directory.")
                .long_help("Use --dir,-d as many times as you need.
The default recursive depth we search for is 5.
Use --depth to increase this value."))
            .arg(Arg::new("depth")
                .long("depth")
                .action(ArgAction::Set)
                .required(false)
                .help("Custom --dir,-d maximal recursive depth")
                .value_parser(value_parser!(u8)))
            .next_help_heading("Session (custom preferences)")
            .arg(Arg::new("tag")
                .short('t')
                .long("tag")
                .value_name("TAG")
                .help("Tag used to name output folders and files. Defaults to the input file name."))
            .arg(Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only report errors."))
            .arg(Arg::new("workspace")
                .short('w')
                .long("workspace")
                .value_name("FOLDER")
                .value_parser(value_parser!(PathBuf))
                .help("Define custom workspace location. See --help for more information.")
                .long_help("Workspace is where output products are generated.
The $LEOLINK_WORKSPACE variable is automatically picked up by this application and always prefered.
Use --workspace,-w to define it at runtime if you prefer.
When no workspace is defined, we create a local graphs/ folder."))
            .arg(Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Chart configuration (JSON). Every field is optional."))
            .arg(Arg::new("constellation")
                .long("constellation")
                .value_name("NAME")
                .help("Constellation name, used in chart titles (default: Starlink)."))
            .next_help_heading("Output products")
            .arg(Arg::new("no-graph")
                .long("no-graph")
                .action(ArgAction::SetTrue)
                .help("Do not render any chart."))
            .arg(Arg::new("no-stats")
                .long("no-stats")
                .action(ArgAction::SetTrue)
                .help("Do not generate statistics."))
            .arg(Arg::new("filtered-csv")
                .long("filtered-csv")
                .action(ArgAction::SetTrue)
                .help("Export the filtered telemetry (Mbps, ms) as CSV."))
            .arg(Arg::new("fill-zero")
                .long("fill-zero")
                .action(ArgAction::SetTrue)
                .help("Missing samples count as zero in statistics."))
    }

    /// Recursive browser depth
    pub fn recursive_depth(&self) -> usize {
        if let Some(depth) = self.matches.get_one::<u8>("depth") {
            *depth as usize
        } else {
            5
        }
    }

    /// Returns input directories (-d)
    pub fn input_directories(&self) -> Vec<&String> {
        if let Some(dirs) = self.matches.get_many::<String>("directory") {
            dirs.collect()
        } else {
            Vec::new()
        }
    }

    /// Returns input files (-f)
    pub fn input_files(&self) -> Vec<&String> {
        if let Some(fp) = self.matches.get_many::<String>("filepath") {
            fp.collect()
        } else {
            Vec::new()
        }
    }

    /// Custom session tag
    pub fn tag(&self) -> Option<&String> {
        self.matches.get_one::<String>("tag")
    }

    /// True when -q (quiet) option is active
    pub fn quiet(&self) -> bool {
        self.matches.get_flag("quiet")
    }

    /// Constellation name
    pub fn constellation(&self) -> &str {
        self.matches
            .get_one::<String>("constellation")
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_CONSTELLATION)
    }

    pub fn no_graph(&self) -> bool {
        self.matches.get_flag("no-graph")
    }

    pub fn no_stats(&self) -> bool {
        self.matches.get_flag("no-stats")
    }

    pub fn filtered_csv(&self) -> bool {
        self.matches.get_flag("filtered-csv")
    }

    /// Value that replaces missing samples in statistics
    pub fn fill_missing(&self) -> Option<f64> {
        if self.matches.get_flag("fill-zero") {
            Some(0.0)
        } else {
            None
        }
    }

    /// Custom workspace location (-w)
    pub fn workspace(&self) -> Option<&PathBuf> {
        self.matches.get_one::<PathBuf>("workspace")
    }

    /// Returns [ChartConfig], either parsed from JSON (-c), or default
    pub fn chart_config(&self) -> Result<ChartConfig, Error> {
        match self.matches.get_one::<PathBuf>("config") {
            Some(path) => {
                let content = read_to_string(path)?;
                let cfg: ChartConfig = serde_json::from_str(&content)?;
                info!("using custom chart configuration: {:?}", cfg);
                Ok(cfg)
            },
            None => Ok(ChartConfig::default()),
        }
    }
}
