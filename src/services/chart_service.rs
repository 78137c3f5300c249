use plotters::prelude::*;
use tracing::info;

use crate::models::MonthlyPoint;

/// Render the monthly-average series to a PNG file and return its path
///
/// Snapshots land in the working directory, named after the asset and the
/// moment of capture.
pub fn save_snapshot(
    asset_id: &str,
    asset_name: &str,
    points: &[MonthlyPoint],
    width: u32,
    height: u32,
) -> Result<String, String> {
    if points.len() < 2 {
        return Err("Not enough chart data to save a snapshot (minimum 2 months required)".to_string());
    }

    let path = format!(
        "{}_12mo_{}.png",
        asset_id,
        chrono::Utc::now().timestamp_millis()
    );

    {
        let backend = BitMapBackend::new(&path, (width, height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| format!("Failed to fill canvas: {}", e))?;

        // Find price range
        let min_price = points
            .iter()
            .map(|p| p.avg_price)
            .fold(f64::INFINITY, f64::min);
        let max_price = points
            .iter()
            .map(|p| p.avg_price)
            .fold(f64::NEG_INFINITY, f64::max);

        // Add some padding to the price range
        let price_range = (max_price - min_price).max(1e-8);
        let padding = price_range * 0.1;
        let y_min = (min_price - padding).max(0.0);
        let y_max = max_price + padding;

        let x_max = (points.len() - 1) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                &format!("{} Price History (Last 12 Months)", asset_name),
                ("sans-serif", 40.0).into_font(),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..x_max, y_min..y_max)
            .map_err(|e| format!("Failed to build chart: {}", e))?;

        chart
            .configure_mesh()
            .x_labels(points.len())
            .x_label_formatter(&|x| {
                let idx = x.round() as usize;
                points
                    .get(idx)
                    .map(|p| p.label.clone())
                    .unwrap_or_default()
            })
            .y_desc("USD")
            .draw()
            .map_err(|e| format!("Failed to draw mesh: {}", e))?;

        // Draw monthly averages as circles connected by a line
        chart
            .draw_series(std::iter::once(PathElement::new(
                points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (i as f64, p.avg_price))
                    .collect::<Vec<_>>(),
                &BLUE,
            )))
            .map_err(|e| format!("Failed to draw line: {}", e))?;
        chart
            .draw_series(
                points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| Circle::new((i as f64, p.avg_price), 3, BLUE.filled())),
            )
            .map_err(|e| format!("Failed to draw points: {}", e))?;

        root.present()
            .map_err(|e| format!("Failed to render chart: {}", e))?;
    }

    info!("Saved chart snapshot for {} to {}", asset_id, path);
    Ok(path)
}
