//! Trend and comparison charts

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::font;
use crate::theme;
use image::Rgb;
use std::sync::Arc;
use wellpulse_core::{AppConfig, MonthlySeriesPoint, Region, RegionSeries};

const MARGIN_LEFT: u32 = 56;
const MARGIN_RIGHT: u32 = 24;
const MARGIN_TOP: u32 = 48;
const MARGIN_BOTTOM: u32 = 52;
const MIN_PLOT: u32 = 80;
/// Keeps the first and last month markers off the plot border
const X_PADDING: f64 = 16.0;

const Y_GRID: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];
const CONCERN_LINE: f64 = 35.0;
const NEUTRAL_LINE: f64 = 50.0;
const POSITIVE_LINE: f64 = 65.0;
const BAND_ALPHA: f64 = 0.12;
const BAR_FILL: f64 = 0.55;

const MONTH_LABELS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    /// One line per region across the months
    #[default]
    Trend,
    /// One bar per region at its yearly average
    Comparison,
}

impl ChartKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trend" => Some(ChartKind::Trend),
            "comparison" => Some(ChartKind::Comparison),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Trend => "trend",
            ChartKind::Comparison => "comparison",
        }
    }
}

/// Plot area in canvas pixels
#[derive(Debug, Clone, Copy)]
struct Plot {
    left: i64,
    top: i64,
    width: i64,
    height: i64,
}

impl Plot {
    fn fit(width: u32, height: u32) -> Result<Self, RenderError> {
        if width < MARGIN_LEFT + MARGIN_RIGHT + MIN_PLOT
            || height < MARGIN_TOP + MARGIN_BOTTOM + MIN_PLOT
        {
            return Err(RenderError::CanvasTooSmall { width, height });
        }
        Ok(Self {
            left: MARGIN_LEFT as i64,
            top: MARGIN_TOP as i64,
            width: (width - MARGIN_LEFT - MARGIN_RIGHT) as i64,
            height: (height - MARGIN_TOP - MARGIN_BOTTOM) as i64,
        })
    }

    fn right(&self) -> i64 {
        self.left + self.width
    }

    fn bottom(&self) -> i64 {
        self.top + self.height
    }

    /// Canvas row for a sentiment value on the fixed 0-100 axis
    fn y_for(&self, value: f64) -> i64 {
        let frac = value.clamp(0.0, 100.0) / 100.0;
        self.bottom() - (frac * self.height as f64).round() as i64
    }

    fn x_for_month(&self, month: u32) -> i64 {
        let span = self.width as f64 - 2.0 * X_PADDING;
        let step = (month.clamp(1, 12) - 1) as f64 / 11.0;
        self.left + (X_PADDING + step * span).round() as i64
    }
}

/// Renders PNG charts. Holds no drawing state between calls.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    config: Arc<AppConfig>,
}

impl ChartRenderer {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn render(
        &self,
        kind: ChartKind,
        year: i32,
        series: &[RegionSeries],
    ) -> Result<Vec<u8>, RenderError> {
        match kind {
            ChartKind::Trend => self.render_trend(year, series),
            ChartKind::Comparison => self.render_comparison(year, series),
        }
    }

    pub fn render_trend(&self, year: i32, series: &[RegionSeries]) -> Result<Vec<u8>, RenderError> {
        let bytes = self.trend_canvas(year, series)?.encode_png()?;
        tracing::debug!(year, regions = series.len(), bytes = bytes.len(), "rendered trend chart");
        Ok(bytes)
    }

    pub fn render_comparison(
        &self,
        year: i32,
        series: &[RegionSeries],
    ) -> Result<Vec<u8>, RenderError> {
        let bytes = self.comparison_canvas(year, series)?.encode_png()?;
        tracing::debug!(year, regions = series.len(), bytes = bytes.len(), "rendered comparison chart");
        Ok(bytes)
    }

    /// Palette slot follows the region's place in the region set, so a
    /// region keeps its color across renders
    fn color_for(&self, region: &Region, fallback: usize) -> Rgb<u8> {
        let position = self.config.regions.position(region).unwrap_or(fallback);
        theme::region_color(position)
    }

    fn trend_canvas(&self, year: i32, series: &[RegionSeries]) -> Result<Canvas, RenderError> {
        let drawable: Vec<(usize, &RegionSeries)> = series
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_empty())
            .collect();
        if drawable.is_empty() {
            return Err(RenderError::EmptySeries(format!(
                "no monthly points for {}",
                year
            )));
        }

        let (width, height) = (self.config.chart.trend_width, self.config.chart.trend_height);
        let plot = Plot::fit(width, height)?;
        let mut canvas = Canvas::new(width, height, theme::CARD);

        let names: Vec<&str> = drawable.iter().map(|(_, s)| s.region.as_str()).collect();
        draw_frame(&mut canvas, &plot, &trend_title(year, &names));
        draw_reference_lines(&mut canvas, &plot);

        for (month, label) in (1..=12).zip(MONTH_LABELS) {
            let x = plot.x_for_month(month);
            canvas.vline(x, plot.bottom(), plot.bottom() + 3, theme::GRID);
            canvas.text_centered(x, plot.bottom() + 8, label, theme::TEXT_MUTED, 1);
        }
        canvas.text_centered(
            plot.left + plot.width / 2,
            plot.bottom() + 24,
            "Month",
            theme::TEXT_PRIMARY,
            1,
        );

        for (index, s) in &drawable {
            let color = self.color_for(&s.region, *index);
            draw_band(&mut canvas, &plot, &s.points, color);
        }
        for (index, s) in &drawable {
            let color = self.color_for(&s.region, *index);
            draw_series(&mut canvas, &plot, &s.points, color);
        }

        let entries: Vec<(&str, Rgb<u8>)> = drawable
            .iter()
            .map(|(index, s)| (s.region.as_str(), self.color_for(&s.region, *index)))
            .collect();
        draw_legend(&mut canvas, &plot, &entries);
        draw_watermark(&mut canvas);

        Ok(canvas)
    }

    fn comparison_canvas(&self, year: i32, series: &[RegionSeries]) -> Result<Canvas, RenderError> {
        let bars: Vec<(&Region, f64)> = series
            .iter()
            .filter_map(|s| s.avg_sentiment.map(|avg| (&s.region, avg)))
            .collect();
        if bars.is_empty() {
            return Err(RenderError::EmptySeries(format!(
                "no regional averages for {}",
                year
            )));
        }

        let (width, height) = (
            self.config.chart.comparison_width,
            self.config.chart.comparison_height,
        );
        let plot = Plot::fit(width, height)?;
        let mut canvas = Canvas::new(width, height, theme::CARD);

        draw_frame(
            &mut canvas,
            &plot,
            &format!("Regional Sentiment Comparison {}", year),
        );

        let slot = plot.width as f64 / bars.len() as f64;
        let bar_width = (slot * BAR_FILL).max(2.0) as u32;
        let max_label_chars = (((slot - 4.0) / font::ADVANCE as f64).floor().max(1.0)) as usize;

        for (i, (region, avg)) in bars.iter().enumerate() {
            let cx = plot.left + (slot * (i as f64 + 0.5)).round() as i64;
            let top = plot.y_for(*avg);
            canvas.fill_rect(
                cx - bar_width as i64 / 2,
                top,
                bar_width,
                (plot.bottom() - top).max(0) as u32,
                theme::bar_color(*avg),
            );
            canvas.text_centered(cx, top - 11, &format!("{:.1}", avg), theme::TEXT_PRIMARY, 1);

            let label: String = region.as_str().chars().take(max_label_chars).collect();
            canvas.text_centered(cx, plot.bottom() + 8, &label, theme::TEXT_MUTED, 1);
        }

        let neutral = plot.y_for(NEUTRAL_LINE);
        canvas.dashed_hline(neutral, plot.left, plot.right(), theme::TEXT_MUTED, 6, 4);
        canvas.text_centered(
            plot.left + plot.width / 2,
            plot.bottom() + 24,
            "Region",
            theme::TEXT_PRIMARY,
            1,
        );
        draw_watermark(&mut canvas);

        Ok(canvas)
    }
}

fn trend_title(year: i32, names: &[&str]) -> String {
    let label = if names.len() <= 3 {
        names.join(", ")
    } else {
        format!("{} Regions", names.len())
    };
    format!("Sentiment Trend - {} ({})", label, year)
}

/// Plot background, y grid with labels, and the title
fn draw_frame(canvas: &mut Canvas, plot: &Plot, title: &str) {
    canvas.fill_rect(
        plot.left,
        plot.top,
        plot.width as u32,
        plot.height as u32,
        theme::BACKGROUND,
    );
    for value in Y_GRID {
        let y = plot.y_for(value);
        canvas.hline(y, plot.left, plot.right(), theme::GRID);
        let label = format!("{}", value as u32);
        canvas.text_right(plot.left - 8, y - 3, &label, theme::TEXT_MUTED, 1);
    }
    canvas.stroke_rect(
        plot.left,
        plot.top,
        plot.width as u32 + 1,
        plot.height as u32 + 1,
        theme::GRID,
    );

    let center = canvas.width() as i64 / 2;
    canvas.text_centered(center, 14, title, theme::TEXT_PRIMARY, 2);
    canvas.text(
        plot.left,
        plot.top - 12,
        "Sentiment (0-100)",
        theme::TEXT_MUTED,
        1,
    );
}

fn draw_reference_lines(canvas: &mut Canvas, plot: &Plot) {
    let lines = [
        (CONCERN_LINE, theme::NEGATIVE),
        (NEUTRAL_LINE, theme::TEXT_MUTED),
        (POSITIVE_LINE, theme::POSITIVE),
    ];
    for (value, color) in lines {
        let y = plot.y_for(value);
        canvas.dashed_hline(y, plot.left + 1, plot.right() - 1, color, 6, 4);
    }
}

/// Shaded +/- one standard deviation around the line
fn draw_band(canvas: &mut Canvas, plot: &Plot, points: &[MonthlySeriesPoint], color: Rgb<u8>) {
    let bounds = |p: &MonthlySeriesPoint| {
        (
            (p.avg_sentiment - p.std_dev).max(0.0),
            (p.avg_sentiment + p.std_dev).min(100.0),
        )
    };

    if let [only] = points {
        let (lower, upper) = bounds(only);
        let x = plot.x_for_month(only.month);
        for dx in -3..=3 {
            canvas.blend_vspan(x + dx, plot.y_for(upper), plot.y_for(lower), color, BAND_ALPHA);
        }
        return;
    }

    for pair in points.windows(2) {
        let (x0, x1) = (plot.x_for_month(pair[0].month), plot.x_for_month(pair[1].month));
        let (lo0, hi0) = bounds(&pair[0]);
        let (lo1, hi1) = bounds(&pair[1]);
        let span = (x1 - x0).max(1) as f64;
        for x in x0..x1 {
            let t = (x - x0) as f64 / span;
            let lower = lo0 + (lo1 - lo0) * t;
            let upper = hi0 + (hi1 - hi0) * t;
            canvas.blend_vspan(x, plot.y_for(upper), plot.y_for(lower), color, BAND_ALPHA);
        }
    }
    if let Some(last) = points.last() {
        let (lower, upper) = bounds(last);
        let x = plot.x_for_month(last.month);
        canvas.blend_vspan(x, plot.y_for(upper), plot.y_for(lower), color, BAND_ALPHA);
    }
}

fn draw_series(canvas: &mut Canvas, plot: &Plot, points: &[MonthlySeriesPoint], color: Rgb<u8>) {
    let coords: Vec<(i64, i64)> = points
        .iter()
        .map(|p| (plot.x_for_month(p.month), plot.y_for(p.avg_sentiment)))
        .collect();

    for pair in coords.windows(2) {
        canvas.line(pair[0], pair[1], color, 2);
    }
    for (x, y) in coords {
        canvas.fill_circle(x, y, 5, theme::CARD);
        canvas.fill_circle(x, y, 3, color);
    }
}

fn draw_legend(canvas: &mut Canvas, plot: &Plot, entries: &[(&str, Rgb<u8>)]) {
    const ROW: u32 = 14;
    const SWATCH: u32 = 8;

    let text_width = entries
        .iter()
        .map(|(name, _)| font::text_width(name, 1))
        .max()
        .unwrap_or(0);
    let box_width = text_width + SWATCH + 18;
    let box_height = ROW * entries.len() as u32 + 8;
    let x = plot.right() - box_width as i64 - 8;
    let y = plot.top + 8;

    canvas.fill_rect(x, y, box_width, box_height, theme::CARD);
    canvas.stroke_rect(x, y, box_width, box_height, theme::GRID);
    for (row, (name, color)) in entries.iter().enumerate() {
        let row_y = y + 5 + (row as u32 * ROW) as i64;
        canvas.fill_rect(x + 6, row_y, SWATCH, SWATCH, *color);
        canvas.text(x + 6 + SWATCH as i64 + 6, row_y, name, theme::TEXT_PRIMARY, 1);
    }
}

fn draw_watermark(canvas: &mut Canvas) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let y = height - Canvas::text_height(1) as i64 - 4;
    canvas.text_right(width - 6, y, "WellPulse", theme::TEXT_MUTED, 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellpulse_core::{round2, ChartConfig};

    fn series(name: &str, values: &[f64]) -> RegionSeries {
        let points: Vec<MonthlySeriesPoint> = values
            .iter()
            .enumerate()
            .map(|(i, v)| MonthlySeriesPoint {
                region: Region::new(name),
                year: 2024,
                month: i as u32 + 1,
                month_label: MONTH_LABELS[i].to_string(),
                avg_sentiment: *v,
                std_dev: 4.0,
                sample_count: 30,
                min_score: v - 8.0,
                max_score: v + 8.0,
            })
            .collect();
        let avg = if values.is_empty() {
            None
        } else {
            Some(round2(values.iter().sum::<f64>() / values.len() as f64))
        };
        RegionSeries {
            region: Region::new(name),
            year: 2024,
            avg_sentiment: avg,
            total_samples: points.len() * 30,
            points,
        }
    }

    fn renderer() -> ChartRenderer {
        ChartRenderer::new(Arc::new(AppConfig::new()))
    }

    #[test]
    fn test_flat_line_renders() {
        let flat = series("Northeast", &[55.0; 12]);
        let bytes = renderer().render_trend(2024, &[flat]).unwrap();
        assert!(bytes.len() > 8);
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(
            renderer().render_trend(2024, &[]),
            Err(RenderError::EmptySeries(_))
        ));
        let empty = series("Northeast", &[]);
        assert!(renderer().render_trend(2024, &[empty.clone()]).is_err());
        assert!(renderer().render_comparison(2024, &[empty]).is_err());
    }

    #[test]
    fn test_deterministic_output() {
        let input = vec![
            series("Northeast", &[40.0, 45.0, 50.0, 52.0, 58.0, 61.0]),
            series("Midwest", &[70.0, 66.0, 61.0, 55.0, 50.0, 44.0]),
        ];
        let first = renderer().render_trend(2024, &input).unwrap();
        let second = renderer().render_trend(2024, &input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_region_keeps_palette_slot() {
        let canvas = renderer()
            .trend_canvas(2024, &[series("Southeast", &[50.0; 12])])
            .unwrap();
        let plot = Plot::fit(900, 420).unwrap();
        let x = plot.x_for_month(1) as u32;
        let y = plot.y_for(50.0) as u32;
        assert_eq!(*canvas.image().get_pixel(x, y), theme::region_color(1));
    }

    #[test]
    fn test_comparison_bar_colors() {
        let input = vec![series("Northeast", &[80.0]), series("Southeast", &[30.0])];
        let canvas = renderer().comparison_canvas(2024, &input).unwrap();
        assert_eq!(canvas.width(), 800);

        let plot = Plot::fit(800, 380).unwrap();
        let slot = plot.width / 2;
        let positive_x = (plot.left + slot / 2) as u32;
        let negative_x = (plot.left + slot + slot / 2) as u32;
        let y = (plot.bottom() - 10) as u32;
        assert_eq!(*canvas.image().get_pixel(positive_x, y), theme::POSITIVE);
        assert_eq!(*canvas.image().get_pixel(negative_x, y), theme::NEGATIVE);
    }

    #[test]
    fn test_canvas_too_small() {
        let mut config = AppConfig::new();
        config.chart = ChartConfig {
            trend_width: 100,
            ..ChartConfig::default()
        };
        let renderer = ChartRenderer::new(Arc::new(config));
        let result = renderer.render_trend(2024, &[series("Northeast", &[50.0])]);
        assert!(matches!(result, Err(RenderError::CanvasTooSmall { .. })));
    }

    #[test]
    fn test_trend_title() {
        assert_eq!(
            trend_title(2024, &["Northeast", "Midwest"]),
            "Sentiment Trend - Northeast, Midwest (2024)"
        );
        assert_eq!(
            trend_title(2024, &["A", "B", "C", "D"]),
            "Sentiment Trend - 4 Regions (2024)"
        );
    }

    #[test]
    fn test_chart_kind_parse() {
        assert_eq!(ChartKind::parse(" Trend "), Some(ChartKind::Trend));
        assert_eq!(ChartKind::parse("comparison"), Some(ChartKind::Comparison));
        assert_eq!(ChartKind::parse("pie"), None);
    }
}
