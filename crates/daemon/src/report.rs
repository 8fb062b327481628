//! Plain-text forecast report rendering and persistence

use std::fmt::Write;
use std::fs;

use anyhow::Error;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::domains::{DayReport, ForecastOutcome, SiteForecast, Slab};
use crate::sites::Thresholds;

const UNAVAILABLE_MESSAGE: &str = "No primary forecast data available from OpenWeatherMap, \
     Open-Meteo, or Tomorrow.io. Please check API keys and network connectivity.";

/// Render the per-site forecasts into the report body written to disk
pub fn render_report(
    forecasts: &[SiteForecast],
    thresholds: &Thresholds,
    generated_at: OffsetDateTime,
) -> Result<String, Error> {
    let generated_format =
        format_description!("[day] [month repr:long] [year], [hour repr:12]:[minute] [period]");
    let day_format = format_description!("[day] [month repr:long], [year]");
    let separator = "-".repeat(60);

    let mut out = String::new();
    writeln!(out, "Daily Weather Forecast Report")?;
    writeln!(out, "Generated: {} IST", generated_at.format(generated_format)?)?;
    writeln!(out, "{separator}")?;

    for forecast in forecasts {
        writeln!(out)?;
        writeln!(
            out,
            "{} (Lat: {}, Lon: {})",
            forecast.site_name, forecast.latitude, forecast.longitude
        )?;

        match &forecast.outcome {
            ForecastOutcome::Unavailable => {
                writeln!(out)?;
                writeln!(out, "{UNAVAILABLE_MESSAGE}")?;
            }
            ForecastOutcome::Days(days) => {
                for day in days {
                    writeln!(out)?;
                    writeln!(
                        out,
                        "Forecast for {}, {}",
                        day.kind,
                        day.date.format(day_format)?
                    )?;
                    match &day.report {
                        Some(report) => render_day(&mut out, report, thresholds)?,
                        None => writeln!(out, "  No forecast data available for this day.")?,
                    }
                }
            }
        }
        writeln!(out, "{separator}")?;
    }

    Ok(out)
}

fn render_day(out: &mut String, report: &DayReport, thresholds: &Thresholds) -> Result<(), Error> {
    let summary = &report.summary;
    writeln!(out, "  Weather: {}", summary.weather)?;
    match summary.max_temp_c {
        Some(temp) => writeln!(out, "  Max Temp: {temp:.1}°C")?,
        None => writeln!(out, "  Max Temp: N/A")?,
    }
    match summary.min_temp_c {
        Some(temp) => writeln!(out, "  Min Temp: {temp:.1}°C")?,
        None => writeln!(out, "  Min Temp: N/A")?,
    }
    writeln!(
        out,
        "  Total Expected Rainfall: {:.1} mm",
        summary.total_rain_mm
    )?;
    writeln!(out, "  Rainfall probability: {}%", summary.max_pop_pct)?;
    writeln!(out)?;

    if summary.slabs.is_empty() {
        writeln!(out, "  No meaningful precipitation slabs predicted.")?;
    } else {
        writeln!(out, "  Precipitation Info:")?;
        for slab in &summary.slabs {
            writeln!(
                out,
                "  {} - {}%, {:.1} mm ({})",
                slab.time_range,
                slab.pop_pct.round() as i64,
                slab.rain_mm,
                slab.rain_category(),
            )?;
            let alerts = slab_alerts(slab, thresholds);
            if !alerts.is_empty() {
                writeln!(out, "    {}", alerts.join(" | "))?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "  Rain Impact: {}", report.verdict.level)?;
    writeln!(out, "  Production Status: {}", report.verdict.status)?;
    Ok(())
}

fn slab_alerts(slab: &Slab, thresholds: &Thresholds) -> Vec<String> {
    let mut alerts = Vec::new();
    if slab.lightning {
        alerts.push(String::from("Lightning expected"));
    }
    if slab.wind_kmh >= thresholds.wind_alert_kmh {
        alerts.push(format!("High Wind ({:.1} km/h)", slab.wind_kmh));
    }
    if slab.visibility_km <= thresholds.visibility_alert_km {
        alerts.push(format!("Low Visibility ({:.1} km)", slab.visibility_km));
    }
    alerts
}

/// Write the rendered report into `folder_path` and return the full path
pub fn save_report(report: &str, folder_path: &str, file_name: &str) -> Result<String, Error> {
    let file_path = format!("{folder_path}/{file_name}");
    fs::write(&file_path, report)?;
    Ok(file_path)
}
