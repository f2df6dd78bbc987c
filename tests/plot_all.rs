use flightlog_plot::plot::PlotConfig;
use flightlog_plot::render::{Chart, ChartWriter, ImageFormat};
use flightlog_plot::viewer::Viewer;
use flightlog_plot::{plot_all, Column, FlightTable, PlotError};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[derive(Default)]
struct RecordingWriter {
    charts: RefCell<Vec<(Chart, PathBuf)>>,
}

impl ChartWriter for RecordingWriter {
    fn write(&self, chart: &Chart, path: &Path, _format: ImageFormat) -> Result<(), PlotError> {
        self.charts
            .borrow_mut()
            .push((chart.clone(), path.to_path_buf()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingViewer {
    shown: RefCell<Vec<PathBuf>>,
}

impl Viewer for RecordingViewer {
    fn show(&self, path: &Path) -> Result<(), PlotError> {
        self.shown.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

fn flight_table() -> FlightTable {
    FlightTable::new(vec![
        Column::new("elevator", vec![0.1, 0.2, 0.3]),
        Column::new("cur_time", vec![0., 0.1, 0.2]),
        Column::new("pitch (deg)", vec![1., 3., 2.]),
        Column::new("vs/fps", vec![-5., 0., 5.]),
    ])
}

#[test]
fn one_image_per_column_plus_overview() {
    let tmp = tempdir().expect("tempdir must be created");
    let dir = tmp.path().join("plots");
    let config = PlotConfig {
        output_dir: dir.clone(),
        show: false,
        ..PlotConfig::default()
    };
    let writer = RecordingWriter::default();
    let viewer = RecordingViewer::default();
    let written = plot_all(&flight_table(), &config, &writer, &viewer).unwrap();

    assert_eq!(
        written,
        vec![
            dir.join("elevator.png"),
            dir.join("pitch__deg_.png"),
            dir.join("vs_fps.png"),
            dir.join("all_parameters_normalized.png"),
        ]
    );
    assert!(dir.is_dir());
    let charts = writer.charts.borrow();
    assert_eq!(charts.len(), 4);
    assert_eq!(charts[1].0.title, "pitch (deg) vs Time");
    assert_eq!(charts[3].0.series.len(), 3);
    assert!(viewer.shown.borrow().is_empty());
}

#[test]
fn missing_time_column_plots_nothing() {
    let tmp = tempdir().expect("tempdir must be created");
    let config = PlotConfig {
        time_column: "time".to_string(),
        output_dir: tmp.path().join("plots"),
        ..PlotConfig::default()
    };
    let writer = RecordingWriter::default();
    let viewer = RecordingViewer::default();
    let err = plot_all(&flight_table(), &config, &writer, &viewer).unwrap_err();

    match err {
        PlotError::MissingTimeColumn { column, available } => {
            assert_eq!(column, "time");
            assert_eq!(available, vec!["elevator", "cur_time", "pitch (deg)", "vs/fps"]);
        }
        other => panic!("unexpected error {}", other),
    }
    assert!(writer.charts.borrow().is_empty());
    assert!(viewer.shown.borrow().is_empty());
    assert!(!config.output_dir.exists());
}

#[test]
fn show_without_save_uses_scratch_files() {
    let tmp = tempdir().expect("tempdir must be created");
    let config = PlotConfig {
        output_dir: tmp.path().join("plots"),
        format: ImageFormat::Svg,
        save: false,
        ..PlotConfig::default()
    };
    let writer = RecordingWriter::default();
    let viewer = RecordingViewer::default();
    let written = plot_all(&flight_table(), &config, &writer, &viewer).unwrap();

    assert!(written.is_empty());
    assert!(!config.output_dir.exists());
    let shown = viewer.shown.borrow();
    assert_eq!(shown.len(), 4);
    assert!(shown.iter().all(|p| p.starts_with(std::env::temp_dir())));
    assert!(shown[3]
        .to_str()
        .unwrap()
        .ends_with("all_parameters_normalized.svg"));
}

#[test]
fn save_and_show_shows_saved_files() {
    let tmp = tempdir().expect("tempdir must be created");
    let dir = tmp.path().join("plots");
    let config = PlotConfig {
        output_dir: dir.clone(),
        ..PlotConfig::default()
    };
    let writer = RecordingWriter::default();
    let viewer = RecordingViewer::default();
    let written = plot_all(&flight_table(), &config, &writer, &viewer).unwrap();
    assert_eq!(*viewer.shown.borrow(), written);
}

#[test]
fn nothing_to_do_without_save_or_show() {
    let tmp = tempdir().expect("tempdir must be created");
    let config = PlotConfig {
        output_dir: tmp.path().join("plots"),
        save: false,
        show: false,
        ..PlotConfig::default()
    };
    let writer = RecordingWriter::default();
    let viewer = RecordingViewer::default();
    let written = plot_all(&flight_table(), &config, &writer, &viewer).unwrap();
    assert!(written.is_empty());
    assert!(writer.charts.borrow().is_empty());
}

#[test]
fn clashing_file_names_get_suffixes() {
    let table = FlightTable::new(vec![
        Column::new("cur_time", vec![0., 1.]),
        Column::new("a b", vec![1., 2.]),
        Column::new("a/b", vec![3., 4.]),
        Column::new("all_parameters_normalized", vec![5., 6.]),
    ]);
    let tmp = tempdir().expect("tempdir must be created");
    let dir = tmp.path().to_path_buf();
    let config = PlotConfig {
        output_dir: dir.clone(),
        show: false,
        ..PlotConfig::default()
    };
    let writer = RecordingWriter::default();
    let viewer = RecordingViewer::default();
    let written = plot_all(&table, &config, &writer, &viewer).unwrap();

    assert_eq!(
        written,
        vec![
            dir.join("a_b.png"),
            dir.join("a_b_1.png"),
            dir.join("all_parameters_normalized_1.png"),
            dir.join("all_parameters_normalized.png"),
        ]
    );
    let charts = writer.charts.borrow();
    assert_eq!(charts[1].0.title, "a/b vs Time");
    assert_eq!(charts[3].0.title, "All Parameters (Normalized) vs Time");
}
