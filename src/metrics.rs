use std::path::Path;

use anyhow::{Context, Result, bail};
use plotters::prelude::*;
use tracing::info;

use crate::numeric::{Decimal, NumericContext};
use crate::relativity::{dilated_time, gamma_factor};
use crate::units::{SECONDS_PER_YEAR, SpeedOfLightUnit};

/// Fractional digits written to the CSV columns.
pub const CSV_FRACTION_DIGITS: u64 = 30;

#[derive(Debug, Clone)]
pub struct DataPoint {
    pub velocity_percent: Decimal,
    pub gamma: Decimal,
    pub earth_seconds: Decimal,
    pub traveler_seconds: Decimal,
}

impl DataPoint {
    pub fn traveler_years(&self, ctx: &NumericContext) -> Result<Decimal> {
        Ok(self.traveler_seconds.checked_div(&ctx.int(SECONDS_PER_YEAR))?)
    }
}

/// Evenly spaced velocities strictly inside (0, 100): `100 * i / steps` for
/// `i` in `1..steps`.
pub fn sweep(
    ctx: &NumericContext,
    earth_years: &Decimal,
    steps: u32,
    c_unit: SpeedOfLightUnit,
) -> Result<Vec<DataPoint>> {
    if steps < 2 {
        bail!("sweep needs at least 2 steps, got {steps}");
    }
    if !earth_years.is_positive() {
        bail!("Time must be positive");
    }

    let c = c_unit.speed_of_light(ctx);
    let earth_seconds = earth_years * &ctx.int(SECONDS_PER_YEAR);
    let step_count = ctx.int(i64::from(steps));

    (1..steps)
        .map(|i| -> Result<DataPoint> {
            let velocity_percent =
                (&ctx.int(i64::from(i)) * &ctx.int(100)).checked_div(&step_count)?;
            let gamma = gamma_factor(ctx, &velocity_percent, &c)?;
            let traveler_seconds = dilated_time(ctx, &earth_seconds, &velocity_percent, &c)?;
            Ok(DataPoint {
                velocity_percent,
                gamma,
                earth_seconds: earth_seconds.clone(),
                traveler_seconds,
            })
        })
        .collect()
}

pub fn export_csv(ctx: &NumericContext, path: &Path, log: &[DataPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "velocity_percent",
        "gamma",
        "earth_seconds",
        "traveler_seconds",
        "traveler_years",
    ])?;

    for dp in log {
        let traveler_years = dp.traveler_years(ctx)?;
        writer.write_record([
            dp.velocity_percent.to_string(),
            dp.gamma.to_fixed(CSV_FRACTION_DIGITS),
            dp.earth_seconds.to_string(),
            dp.traveler_seconds.to_fixed(CSV_FRACTION_DIGITS),
            traveler_years.to_fixed(CSV_FRACTION_DIGITS),
        ])?;
    }
    writer.flush()?;

    info!(rows = log.len(), path = %path.display(), "sweep written to csv");
    Ok(())
}

/// Plots traveler time (years) and the Lorentz factor against velocity as SVG.
pub fn plot_results(ctx: &NumericContext, path: &Path, log: &[DataPoint]) -> Result<()> {
    let mut traveler = Vec::with_capacity(log.len());
    let mut gamma = Vec::with_capacity(log.len());
    for dp in log {
        let x = dp.velocity_percent.to_f64().unwrap_or(f64::NAN);
        let years = dp.traveler_years(ctx)?.to_f64().unwrap_or(f64::NAN);
        traveler.push((x, years));
        gamma.push((x, dp.gamma.to_f64().unwrap_or(f64::NAN)));
    }

    let y_max = traveler
        .iter()
        .chain(gamma.iter())
        .map(|&(_, y)| y)
        .filter(|y| y.is_finite())
        .fold(1.0, f64::max)
        .ceil();

    let root = SVGBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Time Dilation vs Velocity", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..100f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Velocity (% of c)")
        .y_desc("Traveler time (years) / Lorentz factor")
        .draw()?;

    chart
        .draw_series(LineSeries::new(traveler, &BLUE))?
        .label("Traveler time")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], BLUE));

    chart
        .draw_series(LineSeries::new(gamma, &GREEN))?
        .label("Lorentz factor γ")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], GREEN));

    chart.configure_series_labels().border_style(BLACK).draw()?;
    root.present()?;

    info!(path = %path.display(), "sweep plot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> NumericContext {
        NumericContext::default()
    }

    #[test]
    fn sweep_stays_inside_open_interval() {
        let log = sweep(&ctx(), &ctx().int(10), 4, SpeedOfLightUnit::default()).unwrap();
        let velocities: Vec<String> = log.iter().map(|dp| dp.velocity_percent.to_string()).collect();
        assert_eq!(velocities, ["25", "50", "75"]);
        assert!(log.windows(2).all(|w| w[1].traveler_seconds < w[0].traveler_seconds));
        assert!(log.iter().all(|dp| dp.gamma > ctx().one()));
    }

    #[test]
    fn sweep_rejects_degenerate_input() {
        assert!(sweep(&ctx(), &ctx().int(1), 1, SpeedOfLightUnit::default()).is_err());
        assert!(sweep(&ctx(), &ctx().zero(), 10, SpeedOfLightUnit::default()).is_err());
    }

    #[test]
    fn csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.csv");
        let log = sweep(&ctx(), &ctx().one(), 2, SpeedOfLightUnit::default()).unwrap();
        export_csv(&ctx(), &path, &log).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("velocity_percent"));
        assert_eq!(headers.len(), 5);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "50");
        assert_eq!(&rows[0][1], "1.154700538379251529018297561004");
        assert_eq!(&rows[0][2], "31557600");
        assert_eq!(&rows[0][4], "0.866025403784438646763723170753");
    }

    #[test]
    fn plot_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let log = sweep(&ctx(), &ctx().int(10), 20, SpeedOfLightUnit::default()).unwrap();
        plot_results(&ctx(), &path, &log).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Time Dilation vs Velocity"));
    }
}
