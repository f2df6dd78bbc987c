use super::{min_and_max, PlotError};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// Output image format, picked by the --format option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Png
    }
}

/// a labelled line, NAN values break the line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw one chart, independent of the backend
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// file name without extension
    pub stem: String,
    pub size: (u32, u32),
    pub series: Vec<Series>,
}

impl Chart {
    pub fn file_name(&self, format: ImageFormat) -> String {
        format!("{}.{}", self.stem, format.extension())
    }
}

/// Persists a chart as an image file
pub trait ChartWriter {
    fn write(&self, chart: &Chart, path: &Path, format: ImageFormat) -> Result<(), PlotError>;
}

/// Draws the charts with plotters, bitmap backend for png and svg backend for svg
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersWriter;

impl ChartWriter for PlottersWriter {
    fn write(&self, chart: &Chart, path: &Path, format: ImageFormat) -> Result<(), PlotError> {
        let drawn = match format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(path, chart.size).into_drawing_area();
                draw_chart(&root, chart)
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, chart.size).into_drawing_area();
                draw_chart(&root, chart)
            }
        };
        drawn.map_err(|e| PlotError::Draw {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Chart,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let xs: Vec<f64> = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .collect();
    let ys: Vec<f64> = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .collect();
    let (xmin, xmax) = padded_range(&xs);
    let (ymin, ymax) = padded_range(&ys);

    root.fill(&WHITE)?;
    let mut cc = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
    cc.configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(RGBColor(150, 150, 150).mix(0.7).stroke_width(1))
        .set_all_tick_mark_size(2)
        .label_style(("sans-serif", 20))
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .x_labels(14)
        .draw()?;

    let mut labelled = 0;
    for (i, s) in chart.series.iter().enumerate() {
        let style = Palette99::pick(i).stroke_width(2);
        let mut first = true;
        // one line per run of values between NAN gaps
        for chunk in s.points.split(|p| p.1.is_nan()).filter(|c| !c.is_empty()) {
            let anno = cc.draw_series(LineSeries::new(chunk.iter().copied(), style))?;
            if first {
                anno.label(s.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
                first = false;
                labelled += 1;
            }
        }
    }
    if labelled > 0 {
        cc.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 18))
            .draw()?;
    }
    root.present()?;
    Ok(())
}

/// axis range over the finite values with a 5% margin,
/// widened by 0.5 on each side when all the values are equal
pub fn padded_range(v: &[f64]) -> (f64, f64) {
    match min_and_max(v) {
        None => (0., 1.),
        Some((min, max)) if min == max => (min - 0.5, max + 0.5),
        Some((min, max)) => {
            let margin = (max - min) / 20.;
            (min - margin, max + margin)
        }
    }
}
