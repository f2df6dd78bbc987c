use super::render::ImageFormat;
use super::VERSION;
use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_FILE: &str = "flight_data_elevator.xlsx";
pub const DEFAULT_SHEET: &str = "Sheet1";
pub const DEFAULT_TIME_COLUMN: &str = "cur_time";
pub const DEFAULT_OUTPUT_DIR: &str = "plots";

/// Settings for one plotting run
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub input: PathBuf,
    pub sheet: String,
    pub time_column: String,
    pub output_dir: PathBuf,
    pub format: ImageFormat,
    pub save: bool,
    pub show: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            input: PathBuf::from(DEFAULT_FILE),
            sheet: DEFAULT_SHEET.to_string(),
            time_column: DEFAULT_TIME_COLUMN.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: ImageFormat::Png,
            save: true,
            show: true,
        }
    }
}

/// Takes the CLI arguments that control the plotting of the flight log,
/// exits with the usage message on invalid arguments.
pub fn parse_cli() -> PlotConfig {
    match parse_cli_from(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => e.exit(),
    }
}

pub fn parse_cli_from<I, T>(args: I) -> Result<PlotConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_file = Arg::with_name("input_file")
        .help("spreadsheet (xlsx, xlsm, xlsb, xls, ods) or csv file with the flight log")
        .short("f")
        .long("file")
        .takes_value(true)
        .default_value(DEFAULT_FILE);
    let arg_sheet = Arg::with_name("sheet")
        .help("name of the sheet to read, ignored for csv files")
        .short("s")
        .long("sheet")
        .takes_value(true)
        .default_value(DEFAULT_SHEET);
    let arg_time = Arg::with_name("time_column")
        .help("name of the time column, used as x axis")
        .short("t")
        .long("time")
        .takes_value(true)
        .default_value(DEFAULT_TIME_COLUMN);
    let arg_outdir = Arg::with_name("output_dir")
        .help("directory for the chart images")
        .short("o")
        .long("outdir")
        .takes_value(true)
        .default_value(DEFAULT_OUTPUT_DIR);
    let arg_format = Arg::with_name("format")
        .help("image format of the charts")
        .long("format")
        .takes_value(true)
        .possible_values(&["png", "svg"])
        .default_value("png");
    let arg_no_save = Arg::with_name("no_save")
        .help("do not save the charts")
        .long("no-save");
    let arg_no_show = Arg::with_name("no_show")
        .help("do not open the charts in the image viewer")
        .long("no-show");
    let cli_args = App::new("flightlog_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot every column of a flight log against time")
        .arg(arg_file)
        .arg(arg_sheet)
        .arg(arg_time)
        .arg(arg_outdir)
        .arg(arg_format)
        .arg(arg_no_save)
        .arg(arg_no_show)
        .get_matches_from_safe(args)?;

    let format = match cli_args.value_of("format") {
        Some("svg") => ImageFormat::Svg,
        _ => ImageFormat::Png,
    };
    Ok(PlotConfig {
        input: PathBuf::from(cli_args.value_of("input_file").unwrap_or(DEFAULT_FILE)),
        sheet: cli_args.value_of("sheet").unwrap_or(DEFAULT_SHEET).to_string(),
        time_column: cli_args
            .value_of("time_column")
            .unwrap_or(DEFAULT_TIME_COLUMN)
            .to_string(),
        output_dir: PathBuf::from(cli_args.value_of("output_dir").unwrap_or(DEFAULT_OUTPUT_DIR)),
        format,
        save: !cli_args.is_present("no_save"),
        show: !cli_args.is_present("no_show"),
    })
}
