use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub mod error;
pub mod load;
pub mod plot;
pub mod render;
pub mod viewer;

pub use error::PlotError;
use plot::PlotConfig;
use render::{Chart, ChartWriter, Series};
use viewer::Viewer;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const TIME_DESC: &str = "Time (s)";
pub const OVERVIEW_TITLE: &str = "All Parameters (Normalized) vs Time";
pub const OVERVIEW_DESC: &str = "Normalized Value";
pub const OVERVIEW_STEM: &str = "all_parameters_normalized";

/// pixel size of the per-column charts, 12x6 in at 150 dpi
pub const COLUMN_CHART_SIZE: (u32, u32) = (1800, 900);
/// pixel size of the overview chart, 14x8 in at 150 dpi
pub const OVERVIEW_CHART_SIZE: (u32, u32) = (2100, 1200);

/// One named column of the flight log, NAN marks a missing value
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new<S: Into<String>>(name: S, values: Vec<f64>) -> Column {
        Column {
            name: name.into(),
            values,
        }
    }
}

/// The main struct for the flight log, columns in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightTable {
    pub columns: Vec<Column>,
}

impl FlightTable {
    pub fn new(columns: Vec<Column>) -> FlightTable {
        FlightTable { columns }
    }

    /// Init a FlightTable from a spreadsheet (the sheet is ignored for csv files)
    pub fn from_file(fin: &Path, sheet: &str) -> Result<FlightTable, PlotError> {
        load::load_file(fin, sheet)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// returns the time column,
    /// or an error listing the available columns when it is absent
    pub fn validated_time(&self, time: &str) -> Result<&Column, PlotError> {
        self.column(time)
            .ok_or_else(|| PlotError::MissingTimeColumn {
                column: time.to_string(),
                available: self.column_names(),
            })
    }

    /// all the columns except the time column, in file order
    pub fn signal_columns<'a>(&'a self, time: &'a str) -> impl Iterator<Item = &'a Column> + 'a {
        self.columns.iter().filter(move |c| c.name != time)
    }

    /// line chart of a single column against time
    pub fn column_chart(&self, time: &str, column: &Column) -> Result<Chart, PlotError> {
        let t = self.validated_time(time)?;
        Ok(column_chart(t, column))
    }

    /// all the signal columns on one chart, each min-max normalized to [0, 1]
    pub fn overview_chart(&self, time: &str) -> Result<Chart, PlotError> {
        let t = self.validated_time(time)?;
        Ok(overview_chart(t, self.signal_columns(time)))
    }
}

fn column_chart(time: &Column, column: &Column) -> Chart {
    Chart {
        title: format!("{} vs Time", column.name),
        x_desc: TIME_DESC.to_string(),
        y_desc: column.name.clone(),
        stem: sanitize_filename(&column.name),
        size: COLUMN_CHART_SIZE,
        series: vec![Series {
            label: column.name.clone(),
            points: time_points(time, &column.values),
        }],
    }
}

fn overview_chart<'a, I: Iterator<Item = &'a Column>>(time: &Column, columns: I) -> Chart {
    let series = columns
        .map(|c| {
            if let Some((min, max)) = min_and_max(&c.values) {
                if min == max {
                    warn!("column {} is constant ({}), normalized to 0", c.name, min);
                }
            }
            Series {
                label: c.name.clone(),
                points: time_points(time, &normalize(&c.values)),
            }
        })
        .collect();
    Chart {
        title: OVERVIEW_TITLE.to_string(),
        x_desc: TIME_DESC.to_string(),
        y_desc: OVERVIEW_DESC.to_string(),
        stem: OVERVIEW_STEM.to_string(),
        size: OVERVIEW_CHART_SIZE,
        series,
    }
}

/// pairs the values with the time, dropping the rows without a time
fn time_points(time: &Column, values: &[f64]) -> Vec<(f64, f64)> {
    time.values
        .iter()
        .zip(values.iter())
        .filter(|(t, _)| !t.is_nan())
        .map(|(&t, &v)| (t, v))
        .collect()
}

/// Draws one chart per signal column and the normalized overview.
///
/// The time column is checked before anything is drawn.
/// When saving, the charts go to the output directory (created if needed)
/// and their paths are returned, columns first and the overview last.
/// When only showing, the charts are drawn to scratch files for the viewer.
pub fn plot_all(
    table: &FlightTable,
    config: &PlotConfig,
    writer: &dyn ChartWriter,
    viewer: &dyn Viewer,
) -> Result<Vec<PathBuf>, PlotError> {
    let time = table.validated_time(&config.time_column)?;
    let mut written: Vec<PathBuf> = Vec::new();
    if !config.save && !config.show {
        info!("saving and showing are both disabled, nothing to plot");
        return Ok(written);
    }
    if config.save {
        fs::create_dir_all(&config.output_dir)?;
    }

    // file stems already taken, the overview's is reserved up front
    let mut used: HashSet<String> = HashSet::new();
    used.insert(OVERVIEW_STEM.to_lowercase());
    let charts = table
        .signal_columns(&config.time_column)
        .map(|c| {
            let mut chart = column_chart(time, c);
            chart.stem = claim_stem(&chart.stem, &mut used);
            chart
        })
        .chain(std::iter::once_with(|| {
            overview_chart(time, table.signal_columns(&config.time_column))
        }));

    for chart in charts {
        let file_name = chart.file_name(config.format);
        let path = if config.save {
            config.output_dir.join(&file_name)
        } else {
            viewer::scratch_path(&file_name)
        };
        writer.write(&chart, &path, config.format)?;
        if config.save {
            info!(" -> saved chart: {}", path.display());
            written.push(path.clone());
        }
        if config.show {
            viewer.show(&path)?;
        }
    }
    Ok(written)
}

/// returns the stem, or the stem with the first free "_1", "_2", ... suffix
/// when another chart already uses it (compared ignoring case)
fn claim_stem(stem: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = stem.to_string();
    let mut k = 1;
    while used.contains(&candidate.to_lowercase()) {
        candidate = format!("{}_{}", stem, k);
        k += 1;
    }
    if candidate != stem {
        warn!("file name {} already in use, saving as {}", stem, candidate);
    }
    used.insert(candidate.to_lowercase());
    candidate
}

/// maps a column name to a file name,
/// replacing everything but alphanumerics, '.', '_' and '-' with '_'
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// min and max of the finite values, None if there are none
pub fn min_and_max(s: &[f64]) -> Option<(f64, f64)> {
    let mut self_iter = s.iter().filter(|v| v.is_finite());
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// min-max normalization to [0, 1];
/// a constant series maps to 0, NAN stays NAN
pub fn normalize(v: &[f64]) -> Vec<f64> {
    match min_and_max(v) {
        None => vec![f64::NAN; v.len()],
        Some((min, max)) if min == max => v
            .iter()
            .map(|x| if x.is_finite() { 0. } else { f64::NAN })
            .collect(),
        Some((min, max)) => {
            let span = max - min;
            v.iter()
                .map(|x| if x.is_finite() { (x - min) / span } else { f64::NAN })
                .collect()
        }
    }
}
