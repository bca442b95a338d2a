//! Chart Components
//!
//! Bar, pie and line charts drawn on HTML5 Canvas. Layout comes from
//! `contexq::charts`; this module only maps it onto pixels.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use contexq::charts::{self, Datum, SERIES_COLOR};
use contexq::format;

const AXIS_COLOR: &str = "#e5e7eb";
const LABEL_COLOR: &str = "#6b7280";

/// Plot area inside the canvas margins
struct Plot {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Plot {
    fn new(canvas: &HtmlCanvasElement) -> Self {
        let margin_left = 70.0;
        let margin_right = 20.0;
        let margin_top = 20.0;
        let margin_bottom = 40.0;
        Self {
            left: margin_left,
            top: margin_top,
            width: canvas.width() as f64 - margin_left - margin_right,
            height: canvas.height() as f64 - margin_top - margin_bottom,
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

fn context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

fn clear(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement) {
    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
}

fn no_data(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement) {
    ctx.set_fill_style(&LABEL_COLOR.into());
    ctx.set_font("16px sans-serif");
    let _ = ctx.fill_text(
        "No data",
        canvas.width() as f64 / 2.0 - 30.0,
        canvas.height() as f64 / 2.0,
    );
}

/// Horizontal grid with dollar labels
fn draw_grid(ctx: &CanvasRenderingContext2d, plot: &Plot, axis_max: f64) {
    ctx.set_stroke_style(&AXIS_COLOR.into());
    ctx.set_line_width(1.0);
    ctx.set_fill_style(&LABEL_COLOR.into());
    ctx.set_font("12px sans-serif");

    let ticks = charts::grid_ticks(axis_max);
    let steps = (ticks.len().max(2) - 1) as f64;
    for (i, value) in ticks.iter().enumerate() {
        let y = plot.top + (i as f64 / steps) * plot.height;
        ctx.begin_path();
        ctx.move_to(plot.left, y);
        ctx.line_to(plot.left + plot.width, y);
        ctx.stroke();

        let _ = ctx.fill_text(&format!("${}", format::grouped(*value, 0)), 5.0, y + 4.0);
    }
}

/// Redraw `canvas_ref` whenever `data` changes
fn canvas_effect(
    canvas_ref: NodeRef<html::Canvas>,
    data: Signal<Vec<Datum>>,
    draw: fn(&HtmlCanvasElement, &CanvasRenderingContext2d, &[Datum]),
) {
    create_effect(move |_| {
        let data = data.get();
        if let Some(canvas) = canvas_ref.get() {
            if let Some(ctx) = context(&canvas) {
                clear(&ctx, &canvas);
                if data.is_empty() {
                    no_data(&ctx, &canvas);
                } else {
                    draw(&canvas, &ctx, &data);
                }
            }
        }
    });
}

/// Vertical bar chart
#[component]
pub fn BarChart(
    #[prop(into)]
    data: Signal<Vec<Datum>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    canvas_effect(canvas_ref, data, draw_bars);

    view! {
        <canvas node_ref=canvas_ref width="600" height="300" class="w-full h-64" />
    }
}

fn draw_bars(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, data: &[Datum]) {
    let plot = Plot::new(canvas);
    let (axis_max, bars) = charts::bars(data);
    draw_grid(ctx, &plot, axis_max);

    let slot = plot.width / bars.len() as f64;
    let bar_width = slot * 0.6;

    for (i, bar) in bars.iter().enumerate() {
        let x = plot.left + slot * i as f64 + (slot - bar_width) / 2.0;
        let height = bar.ratio * plot.height;

        ctx.set_fill_style(&SERIES_COLOR.into());
        ctx.fill_rect(x, plot.bottom() - height, bar_width, height);

        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&bar.label, x, plot.bottom() + 18.0);
    }
}

/// Pie chart with captions beside each wedge
#[component]
pub fn PieChart(
    #[prop(into)]
    data: Signal<Vec<Datum>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    canvas_effect(canvas_ref, data, draw_pie);

    view! {
        <canvas node_ref=canvas_ref width="600" height="300" class="w-full h-64" />
    }
}

fn draw_pie(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, data: &[Datum]) {
    let slices = charts::pie_slices(data);
    if slices.is_empty() {
        no_data(ctx, canvas);
        return;
    }

    let cx = canvas.width() as f64 / 2.0;
    let cy = canvas.height() as f64 / 2.0;
    let radius = cy * 0.6;

    for slice in &slices {
        ctx.set_fill_style(&slice.color.into());
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, radius, slice.start_angle, slice.end_angle);
        ctx.close_path();
        ctx.fill();
    }

    ctx.set_fill_style(&LABEL_COLOR.into());
    ctx.set_font("12px sans-serif");
    for slice in &slices {
        let angle = slice.mid_angle();
        let x = cx + angle.cos() * (radius + 12.0);
        let y = cy + angle.sin() * (radius + 12.0);
        ctx.set_text_align(if angle.cos() >= 0.0 { "left" } else { "right" });
        let _ = ctx.fill_text(&slice.caption(), x, y);
    }
    ctx.set_text_align("left");
}

/// Line chart with a dot per point
#[component]
pub fn LineChart(
    #[prop(into)]
    data: Signal<Vec<Datum>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    canvas_effect(canvas_ref, data, draw_line);

    view! {
        <canvas node_ref=canvas_ref width="800" height="300" class="w-full h-64" />
    }
}

fn draw_line(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, data: &[Datum]) {
    let plot = Plot::new(canvas);
    let (axis_max, points) = charts::line_points(data);
    draw_grid(ctx, &plot, axis_max);

    let position = |x: f64, y: f64| (plot.left + x * plot.width, plot.bottom() - y * plot.height);

    ctx.set_stroke_style(&SERIES_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in points.iter().enumerate() {
        let (x, y) = position(point.x, point.y);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    // Draw points and month labels
    ctx.set_font("12px sans-serif");
    for point in &points {
        let (x, y) = position(point.x, point.y);
        ctx.set_fill_style(&SERIES_COLOR.into());
        ctx.begin_path();
        let _ = ctx.arc(x, y, 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();

        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&point.label, x - 20.0, plot.bottom() + 18.0);
    }
}
