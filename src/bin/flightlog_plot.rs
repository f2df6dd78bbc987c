use anyhow::Context;
use flightlog_plot::plot::{parse_cli, PlotConfig};
use flightlog_plot::render::PlottersWriter;
use flightlog_plot::viewer::SystemViewer;
use flightlog_plot::{plot_all, FlightTable};
use log::{error, info};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = parse_cli();
    if let Err(e) = run(&config) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &PlotConfig) -> anyhow::Result<()> {
    info!(
        "loading data from {}, sheet {}",
        config.input.display(),
        config.sheet
    );
    let table = FlightTable::from_file(&config.input, &config.sheet)
        .with_context(|| format!("could not load {}", config.input.display()))?;
    info!("plotting against {} ...", config.time_column);
    let written = plot_all(&table, config, &PlottersWriter, &SystemViewer)?;
    info!("done, {} chart(s) saved", written.len());
    Ok(())
}
