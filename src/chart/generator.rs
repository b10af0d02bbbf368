//! Stacked chart rendering using plotters' SVG backend.
//!
//! Timestamps form a categorical x axis (one slot per entry in the
//! timestamp sequence). Categories are stacked bottom-up in first-seen
//! order, each with its own legend entry.

use crate::aggregator::Aggregation;
use crate::utils::config::{DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH, DEFAULT_Y_LABEL};
use crate::utils::error::RenderError;
use clap::ValueEnum;
use log::{debug, info, warn};
use plotters::prelude::*;

/// How the stacked layers are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChartStyle {
    /// Filled bands between consecutive cumulative totals
    #[default]
    Area,
    /// One stacked column per timestamp
    Bar,
}

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

// Default category cycle (tab10)
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Color of the `index`-th category
pub fn layer_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// One stacked layer: `(lower, upper)` bound per timestamp slot
///
/// Bounds are `i128` so stacking any number of `i64` weights cannot overflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub category: String,
    pub bounds: Vec<(i128, i128)>,
}

/// Stack the category series on top of each other
///
/// Ragged series are padded with zeros (or cut) to the timestamp count
/// first, so every layer has exactly one bound pair per slot.
pub fn stack_layers(aggregation: &Aggregation) -> Vec<Layer> {
    let slots = aggregation.timestamps().len();
    let mut baseline = vec![0i128; slots];

    aggregation
        .iter()
        .map(|(category, values)| {
            if values.len() != slots {
                debug!(
                    "Series {:?} has {} entries for {} timestamps, padding",
                    category,
                    values.len(),
                    slots
                );
            }
            let padded = Aggregation::padded_series(values, slots);
            let bounds = baseline
                .iter_mut()
                .zip(padded)
                .map(|(base, value)| {
                    let lower = *base;
                    *base += i128::from(value);
                    (lower, *base)
                })
                .collect();
            Layer {
                category: category.to_string(),
                bounds,
            }
        })
        .collect()
}

/// Generate an SVG stacked chart from an aggregation
///
/// **Public** - main entry point for rendering
///
/// # Errors
/// * `RenderError::EmptySeries` - nothing was aggregated
/// * `RenderError::Drawing` - the plotting backend failed
pub fn render_chart(
    aggregation: &Aggregation,
    config: Option<&ChartConfig>,
) -> Result<String, RenderError> {
    if aggregation.is_empty() {
        return Err(RenderError::EmptySeries);
    }

    let config = config.cloned().unwrap_or_default();
    let labels = aggregation.timestamps();
    let layers = stack_layers(aggregation);
    info!(
        "Rendering {:?} chart: {} timestamps, {} layers",
        config.style,
        labels.len(),
        layers.len()
    );

    let (y_min, y_max) = value_range(&layers);
    let slots = labels.len() as f64;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(config.title.as_str(), ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..slots - 0.5, y_min..y_max)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len().max(2))
            .x_label_formatter(&|x| axis_label(labels, *x))
            .y_desc(config.y_label.as_str())
            .draw()
            .map_err(drawing_error)?;

        for (index, layer) in layers.iter().enumerate() {
            let color = layer_color(index);
            let fill = color.mix(0.85).filled();

            let series = match config.style {
                ChartStyle::Area => chart.draw_series(std::iter::once(Polygon::new(
                    band_outline(&layer.bounds),
                    fill,
                ))),
                ChartStyle::Bar => chart.draw_series(bar_segments(&layer.bounds, fill)),
            }
            .map_err(drawing_error)?;

            series
                .label(layer.category.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
    }

    info!("Chart generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Y range covering every bound, always including zero and never empty
fn value_range(layers: &[Layer]) -> (f64, f64) {
    let (low, high) = layers
        .iter()
        .flat_map(|layer| layer.bounds.iter())
        .fold((0i128, 0i128), |(low, high), &(lower, upper)| {
            (low.min(lower).min(upper), high.max(lower).max(upper))
        });

    if low == high {
        warn!("All weights are zero, using a unit y axis");
        return (0.0, 1.0);
    }

    let (low, high) = (low as f64, high as f64);
    let pad = (high - low) * 0.05;
    let bottom = if low < 0.0 { low - pad } else { 0.0 };
    (bottom, high + pad)
}

/// Polygon outline of one area band: upper edge forward, lower edge back
fn band_outline(bounds: &[(i128, i128)]) -> Vec<(f64, f64)> {
    let upper = bounds
        .iter()
        .enumerate()
        .map(|(slot, &(_, upper))| (slot as f64, upper as f64));
    let lower = bounds
        .iter()
        .enumerate()
        .rev()
        .map(|(slot, &(lower, _))| (slot as f64, lower as f64));
    upper.chain(lower).collect()
}

/// One rectangle per timestamp slot
fn bar_segments(
    bounds: &[(i128, i128)],
    style: ShapeStyle,
) -> impl Iterator<Item = Rectangle<(f64, f64)>> + '_ {
    const HALF_WIDTH: f64 = 0.35;
    bounds.iter().enumerate().map(move |(slot, &(lower, upper))| {
        let x = slot as f64;
        Rectangle::new(
            [(x - HALF_WIDTH, lower as f64), (x + HALF_WIDTH, upper as f64)],
            style,
        )
    })
}

/// Tick label for an x coordinate: the timestamp when it sits on a slot
fn axis_label(labels: &[String], x: f64) -> String {
    let slot = x.round();
    if (x - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    labels.get(slot as usize).cloned().unwrap_or_default()
}

fn drawing_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Drawing(err.to_string())
}
