//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - forecast curve: `-` line
//! - price peak (first occurrence): `*`

use chrono::NaiveDate;

use crate::domain::ForecastSeries;
use crate::predict::find_peak;

/// Render a forecast series as a price-over-time chart.
pub fn render_forecast_plot(series: &ForecastSeries, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
        return "Plot: (empty forecast)\n".to_string();
    };

    let span_days = ((last - first).num_days() as f64).max(1.0);
    let curve: Vec<(f64, f64)> = series
        .iter()
        .map(|p| (day_offset(first, p.date), p.predicted_price))
        .collect();

    let (y_min, y_max) = series
        .price_range()
        .filter(|(lo, hi)| hi > lo)
        .unwrap_or_else(|| {
            let p = series.points[0].predicted_price;
            (p - 1.0, p + 1.0)
        });
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    draw_curve(&mut grid, &curve, span_days, y_min, y_max);

    let peak = find_peak(series);
    if let Some(peak) = peak {
        let x = map_x(day_offset(first, peak.date), span_days, width);
        let y = map_y(peak.predicted_price, y_min, y_max, height);
        grid[y][x] = '*';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {first} .. {last} ({} days) | price=[{y_min:.2}, {y_max:.2}]\n",
        series.len()
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    if let Some(peak) = peak {
        out.push_str(&format!("* peak {:.2} on {}\n", peak.predicted_price, peak.date));
    }

    out
}

fn day_offset(first: NaiveDate, date: NaiveDate) -> f64 {
    (date - first).num_days() as f64
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(day: f64, span_days: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = (day / span_days).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], span_days: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(day, y) in curve {
        let x = map_x(day, span_days, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, '-');
        } else {
            grid[yy][x] = '-';
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastPoint;

    fn series(prices: &[f64]) -> ForecastSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ForecastSeries::new(
            start
                .iter_days()
                .zip(prices)
                .map(|(date, &predicted_price)| ForecastPoint {
                    date,
                    predicted_price,
                })
                .collect(),
        )
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let txt = render_forecast_plot(&series(&[1.0, 3.0, 2.0]), 10, 5);
        let expected = concat!(
            "Plot: 2024-01-01 .. 2024-01-03 (3 days) | price=[0.90, 3.10]\n",
            "     *    \n",
            "    - --  \n",
            "  --    --\n",
            " -        \n",
            "-         \n",
            "* peak 3.00 on 2024-01-02\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn flat_and_single_point_series_render() {
        let flat = render_forecast_plot(&series(&[5.0, 5.0, 5.0]), 20, 6);
        assert!(flat.contains("* peak 5.00 on 2024-01-01"));

        let single = render_forecast_plot(&series(&[7.0]), 20, 6);
        assert_eq!(single.lines().count(), 1 + 6 + 1);
    }

    #[test]
    fn empty_series() {
        assert_eq!(render_forecast_plot(&ForecastSeries::default(), 20, 6), "Plot: (empty forecast)\n");
    }
}
