//! Chart Geometry
//!
//! Renderer-independent layout for the three dashboard charts. Coordinates
//! are normalized to `0.0..=1.0` so the canvas charts in the UI and the
//! terminal bars in the CLI scale them to whatever surface they draw on.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::format;
use crate::models::{DashboardStats, MonthlySales, ProductSales, RegionSales};

/// Slice colours for the top-products pie
pub const PALETTE: [&str; 5] = ["#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f"];

/// Fill for bars and the trend line
pub const SERIES_COLOR: &str = "#8884d8";

/// Number of horizontal grid lines on bar and line charts
pub const GRID_LINES: usize = 5;

/// One labelled value
#[derive(Debug, Clone, PartialEq)]
pub struct Datum {
    pub label: String,
    pub value: f64,
}

impl From<&RegionSales> for Datum {
    fn from(row: &RegionSales) -> Self {
        Self {
            label: row.region.clone(),
            value: row.total_sales,
        }
    }
}

impl From<&ProductSales> for Datum {
    fn from(row: &ProductSales) -> Self {
        Self {
            label: row.product_name.clone(),
            value: row.total_sales,
        }
    }
}

impl From<&MonthlySales> for Datum {
    fn from(row: &MonthlySales) -> Self {
        Self {
            label: format::month_label(&row.month),
            value: row.total_sales,
        }
    }
}

/// The three series the dashboard draws
pub fn dashboard_series(stats: &DashboardStats) -> (Vec<Datum>, Vec<Datum>, Vec<Datum>) {
    (
        stats.sales_by_region.iter().map(Datum::from).collect(),
        stats.top_products.iter().map(Datum::from).collect(),
        stats.sales_trend.iter().map(Datum::from).collect(),
    )
}

/// Smallest 1/2/5 x 10^k step-aligned value at or above `max`
pub fn axis_max(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }

    let magnitude = 10f64.powf(max.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= max)
        .unwrap_or(10.0 * magnitude)
}

/// Value labels for the grid lines, top to bottom
pub fn grid_ticks(axis_max: f64) -> Vec<f64> {
    (0..=GRID_LINES)
        .map(|i| axis_max * (GRID_LINES - i) as f64 / GRID_LINES as f64)
        .collect()
}

/// A bar scaled against the axis maximum
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Height as a fraction of the plot area
    pub ratio: f64,
}

/// Axis maximum and scaled bars. Negative values clamp to zero height.
pub fn bars(data: &[Datum]) -> (f64, Vec<Bar>) {
    let max = axis_max(data.iter().map(|d| d.value).fold(0.0, f64::max));
    let bars = data
        .iter()
        .map(|d| Bar {
            label: d.label.clone(),
            value: d.value,
            ratio: (d.value / max).clamp(0.0, 1.0),
        })
        .collect();
    (max, bars)
}

/// A pie wedge; angles in radians, clockwise from twelve o'clock
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fraction: f64,
    pub color: &'static str,
}

impl Slice {
    /// `Name: $1,234.00 (42%)` with long names shortened
    pub fn caption(&self) -> String {
        format!(
            "{}: {} ({:.0}%)",
            format::truncate_label(&self.label),
            format::currency(self.value),
            self.fraction * 100.0
        )
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Wedges for each datum. Empty when nothing has a positive value.
pub fn pie_slices(data: &[Datum]) -> Vec<Slice> {
    let total: f64 = data.iter().map(|d| d.value.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = -FRAC_PI_2;
    data.iter()
        .enumerate()
        .map(|(idx, d)| {
            let fraction = d.value.max(0.0) / total;
            let start_angle = angle;
            angle += fraction * 2.0 * PI;
            Slice {
                label: d.label.clone(),
                value: d.value,
                start_angle,
                end_angle: angle,
                fraction,
                color: PALETTE[idx % PALETTE.len()],
            }
        })
        .collect()
}

/// A vertex of the trend line
#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub label: String,
    pub value: f64,
    /// Horizontal position, first point at 0.0 and last at 1.0
    pub x: f64,
    /// Height above the baseline as a fraction of the plot area
    pub y: f64,
}

/// Axis maximum and evenly spaced points. A single point sits in the middle.
pub fn line_points(data: &[Datum]) -> (f64, Vec<LinePoint>) {
    let max = axis_max(data.iter().map(|d| d.value).fold(0.0, f64::max));
    let last = data.len().saturating_sub(1);
    let points = data
        .iter()
        .enumerate()
        .map(|(idx, d)| LinePoint {
            label: d.label.clone(),
            value: d.value,
            x: if last == 0 { 0.5 } else { idx as f64 / last as f64 },
            y: (d.value / max).clamp(0.0, 1.0),
        })
        .collect();
    (max, points)
}
