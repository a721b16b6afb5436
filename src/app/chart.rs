use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, RichText, Sense, Stroke, Ui, pos2, vec2,
};

use music_analisa::analysis::{
    Bar, BoxStats, Chart, ChartBody, HistogramBin, Orientation, ScatterPoint, Series,
};
use music_analisa::util::{format_value, short_label};

use super::render_utils::{blend_color, ramp_color, series_color};

const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
const AXIS: Color32 = Color32::from_rgb(120, 128, 140);
const GRID: Color32 = Color32::from_rgba_premultiplied(40, 46, 54, 120);
const TEXT: Color32 = Color32::from_gray(220);
const TICKS: usize = 5;
const CATEGORY_LABEL_WIDTH: f32 = 72.0;

#[derive(Clone, Copy, Debug)]
struct Scale {
    min: f64,
    max: f64,
    start: f32,
    end: f32,
}

impl Scale {
    fn new((min, max): (f64, f64), start: f32, end: f32) -> Self {
        let (min, max) = if (max - min).abs() < f64::EPSILON {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        Self {
            min,
            max,
            start,
            end,
        }
    }

    fn map(&self, value: f64) -> f32 {
        let t = ((value - self.min) / (self.max - self.min)) as f32;
        self.start + t * (self.end - self.start)
    }

    fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=TICKS).map(move |index| self.min + (self.max - self.min) * index as f64 / TICKS as f64)
    }
}

fn value_range(values: impl IntoIterator<Item = f64>, include_zero: bool) -> (f64, f64) {
    let (mut min, mut max) = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    (min, max)
}

fn band(start: f32, end: f32, count: usize, index: usize) -> (f32, f32) {
    let width = (end - start) / count.max(1) as f32;
    (start + width * (index as f32 + 0.5), width)
}

fn band_at(start: f32, end: f32, count: usize, position: f32) -> Option<usize> {
    if count == 0 || position < start.min(end) || position > start.max(end) {
        return None;
    }
    let width = (end - start) / count as f32;
    let index = ((position - start) / width).floor() as usize;
    Some(index.min(count - 1))
}

pub(super) fn draw_chart(ui: &mut Ui, chart: &Chart) {
    ui.label(RichText::new(chart.title.as_str()).strong());
    draw_legend(ui, &chart.body);

    let size = ui.available_size().max(vec2(240.0, 180.0));
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, BACKGROUND);

    let left_margin = match &chart.body {
        ChartBody::Bars {
            orientation: Orientation::Horizontal,
            ..
        }
        | ChartBody::Heatmap { .. } => 180.0,
        _ => 64.0,
    };
    let plot = Rect::from_min_max(
        pos2(rect.left() + left_margin, rect.top() + 18.0),
        pos2(rect.right() - 18.0, rect.bottom() - 46.0),
    );
    let pointer = response.hover_pos().filter(|pointer| plot.contains(*pointer));

    let tooltip = match &chart.body {
        ChartBody::Bars { orientation, bars } => match orientation {
            Orientation::Vertical => draw_vertical_bars(&painter, plot, bars, pointer),
            Orientation::Horizontal => draw_horizontal_bars(&painter, plot, bars, pointer),
        },
        ChartBody::Stacked { categories, series } => {
            draw_stacked(&painter, plot, categories, series, pointer)
        }
        ChartBody::Grouped { categories, series } => {
            draw_grouped(&painter, plot, categories, series, pointer)
        }
        ChartBody::Line { categories, series } => {
            draw_lines(&painter, plot, categories, series, pointer)
        }
        ChartBody::Scatter { points } => draw_scatter(&painter, plot, points, pointer),
        ChartBody::Histogram { bins } => draw_histogram(&painter, plot, bins, pointer),
        ChartBody::Boxes { boxes } => draw_boxes(&painter, plot, boxes, pointer),
        ChartBody::Heatmap {
            rows,
            columns,
            cells,
        } => draw_heatmap(&painter, plot, rows, columns, cells, pointer),
        ChartBody::Network { .. } => None,
    };

    painter.text(
        pos2(plot.center().x, rect.bottom() - 6.0),
        Align2::CENTER_BOTTOM,
        chart.x_label.as_str(),
        FontId::proportional(13.0),
        TEXT,
    );
    painter.text(
        rect.left_top() + vec2(6.0, 2.0),
        Align2::LEFT_TOP,
        chart.y_label.as_str(),
        FontId::proportional(13.0),
        TEXT,
    );

    if let (Some(pointer), Some(text)) = (pointer, tooltip) {
        draw_tooltip(&painter, rect, pointer, text);
    }
}

fn draw_legend(ui: &mut Ui, body: &ChartBody) {
    let names = match body {
        ChartBody::Stacked { series, .. }
        | ChartBody::Grouped { series, .. }
        | ChartBody::Line { series, .. }
            if series.len() > 1 =>
        {
            series.iter().map(|series| series.name.as_str()).collect::<Vec<_>>()
        }
        _ => return,
    };

    ui.horizontal_wrapped(|ui| {
        for (index, name) in names.into_iter().enumerate() {
            ui.colored_label(series_color(index), format!("■ {name}"));
        }
    });
}

fn draw_tooltip(painter: &Painter, bounds: Rect, pointer: Pos2, text: String) {
    let galley = painter.layout_no_wrap(text, FontId::proportional(13.0), TEXT);
    let mut origin = pointer + vec2(14.0, -galley.size().y - 10.0);
    origin.x = origin.x.min(bounds.right() - galley.size().x - 8.0);
    origin.y = origin.y.max(bounds.top() + 4.0);

    let frame = Rect::from_min_size(origin, galley.size()).expand(5.0);
    painter.rect_filled(frame, 4.0, Color32::from_rgba_unmultiplied(10, 12, 16, 235));
    painter.galley(origin, galley, TEXT);
}

fn draw_value_axis_vertical(painter: &Painter, plot: Rect, scale: &Scale) {
    for tick in scale.ticks() {
        let y = scale.map(tick);
        painter.line_segment(
            [pos2(plot.left(), y), pos2(plot.right(), y)],
            Stroke::new(1.0, GRID),
        );
        painter.text(
            pos2(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            format_value(tick),
            FontId::proportional(11.0),
            TEXT,
        );
    }
    painter.line_segment(
        [plot.left_bottom(), plot.left_top()],
        Stroke::new(1.0, AXIS),
    );
    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        Stroke::new(1.0, AXIS),
    );
}

fn draw_value_axis_horizontal(painter: &Painter, plot: Rect, scale: &Scale) {
    for tick in scale.ticks() {
        let x = scale.map(tick);
        painter.line_segment(
            [pos2(x, plot.top()), pos2(x, plot.bottom())],
            Stroke::new(1.0, GRID),
        );
        painter.text(
            pos2(x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            format_value(tick),
            FontId::proportional(11.0),
            TEXT,
        );
    }
    painter.line_segment(
        [plot.left_bottom(), plot.left_top()],
        Stroke::new(1.0, AXIS),
    );
    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        Stroke::new(1.0, AXIS),
    );
}

fn draw_category_labels<'a>(
    painter: &Painter,
    plot: Rect,
    labels: impl ExactSizeIterator<Item = &'a str>,
) {
    let count = labels.len();
    let per_label = plot.width() / count.max(1) as f32;
    let stride = (CATEGORY_LABEL_WIDTH / per_label).ceil().max(1.0) as usize;
    let max_chars = ((per_label * stride as f32) / 7.0).clamp(4.0, 18.0) as usize;

    for (index, label) in labels.enumerate() {
        if index % stride != 0 {
            continue;
        }
        let (center, _) = band(plot.left(), plot.right(), count, index);
        painter.text(
            pos2(center, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            short_label(label, max_chars),
            FontId::proportional(11.0),
            TEXT,
        );
    }
}

fn draw_row_labels<'a>(painter: &Painter, plot: Rect, labels: impl ExactSizeIterator<Item = &'a str>) {
    let count = labels.len();
    let per_row = plot.height() / count.max(1) as f32;
    let stride = (14.0 / per_row).ceil().max(1.0) as usize;

    for (index, label) in labels.enumerate() {
        if index % stride != 0 {
            continue;
        }
        let (center, _) = band(plot.top(), plot.bottom(), count, index);
        painter.text(
            pos2(plot.left() - 6.0, center),
            Align2::RIGHT_CENTER,
            short_label(label, 26),
            FontId::proportional(11.0),
            TEXT,
        );
    }
}

fn bar_tooltip(bar: &Bar) -> String {
    match &bar.detail {
        Some(detail) => format!("{}\n{}\n{}", bar.label, format_value(bar.value), detail),
        None => format!("{}\n{}", bar.label, format_value(bar.value)),
    }
}

fn draw_vertical_bars(
    painter: &Painter,
    plot: Rect,
    bars: &[Bar],
    pointer: Option<Pos2>,
) -> Option<String> {
    let scale = Scale::new(
        value_range(bars.iter().map(|bar| bar.value), true),
        plot.bottom(),
        plot.top(),
    );
    draw_value_axis_vertical(painter, plot, &scale);
    draw_category_labels(painter, plot, bars.iter().map(|bar| bar.label.as_str()));

    let hovered = pointer.and_then(|pointer| band_at(plot.left(), plot.right(), bars.len(), pointer.x));
    let zero = scale.map(0.0);
    for (index, bar) in bars.iter().enumerate() {
        let (center, width) = band(plot.left(), plot.right(), bars.len(), index);
        let half = width * 0.36;
        let color = if hovered == Some(index) {
            blend_color(series_color(0), Color32::WHITE, 0.3)
        } else {
            series_color(0)
        };
        painter.rect_filled(
            Rect::from_two_pos(pos2(center - half, zero), pos2(center + half, scale.map(bar.value))),
            0.0,
            color,
        );
    }

    hovered.map(|index| bar_tooltip(&bars[index]))
}

fn draw_horizontal_bars(
    painter: &Painter,
    plot: Rect,
    bars: &[Bar],
    pointer: Option<Pos2>,
) -> Option<String> {
    let scale = Scale::new(
        value_range(bars.iter().map(|bar| bar.value), true),
        plot.left(),
        plot.right(),
    );
    draw_value_axis_horizontal(painter, plot, &scale);
    draw_row_labels(painter, plot, bars.iter().map(|bar| bar.label.as_str()));

    let hovered = pointer.and_then(|pointer| band_at(plot.top(), plot.bottom(), bars.len(), pointer.y));
    let zero = scale.map(0.0);
    for (index, bar) in bars.iter().enumerate() {
        let (center, height) = band(plot.top(), plot.bottom(), bars.len(), index);
        let half = height * 0.36;
        let color = if hovered == Some(index) {
            blend_color(series_color(0), Color32::WHITE, 0.3)
        } else {
            series_color(0)
        };
        painter.rect_filled(
            Rect::from_two_pos(pos2(zero, center - half), pos2(scale.map(bar.value), center + half)),
            0.0,
            color,
        );
    }

    hovered.map(|index| bar_tooltip(&bars[index]))
}

fn series_tooltip(category: &str, series: &[Series], index: usize) -> String {
    let mut lines = vec![category.to_owned()];
    for entry in series {
        if let Some(value) = entry.values.get(index).filter(|value| value.is_finite()) {
            lines.push(format!("{}: {}", entry.name, format_value(*value)));
        }
    }
    lines.join("\n")
}

fn draw_stacked(
    painter: &Painter,
    plot: Rect,
    categories: &[String],
    series: &[Series],
    pointer: Option<Pos2>,
) -> Option<String> {
    let totals = (0..categories.len()).map(|index| {
        series
            .iter()
            .filter_map(|entry| entry.values.get(index).copied())
            .filter(|value| value.is_finite() && *value > 0.0)
            .sum::<f64>()
    });
    let scale = Scale::new(value_range(totals, true), plot.bottom(), plot.top());
    draw_value_axis_vertical(painter, plot, &scale);
    draw_category_labels(painter, plot, categories.iter().map(String::as_str));

    for index in 0..categories.len() {
        let (center, width) = band(plot.left(), plot.right(), categories.len(), index);
        let half = width * 0.36;
        let mut base = 0.0;
        for (series_index, entry) in series.iter().enumerate() {
            let Some(value) = entry.values.get(index).copied().filter(|value| value.is_finite() && *value > 0.0) else {
                continue;
            };
            painter.rect_filled(
                Rect::from_two_pos(
                    pos2(center - half, scale.map(base)),
                    pos2(center + half, scale.map(base + value)),
                ),
                0.0,
                series_color(series_index),
            );
            base += value;
        }
    }

    let hovered = pointer.and_then(|pointer| band_at(plot.left(), plot.right(), categories.len(), pointer.x))?;
    Some(series_tooltip(&categories[hovered], series, hovered))
}

fn draw_grouped(
    painter: &Painter,
    plot: Rect,
    categories: &[String],
    series: &[Series],
    pointer: Option<Pos2>,
) -> Option<String> {
    let scale = Scale::new(
        value_range(series.iter().flat_map(|entry| entry.values.iter().copied()), true),
        plot.bottom(),
        plot.top(),
    );
    draw_value_axis_vertical(painter, plot, &scale);
    draw_category_labels(painter, plot, categories.iter().map(String::as_str));

    let zero = scale.map(0.0);
    for index in 0..categories.len() {
        let (center, width) = band(plot.left(), plot.right(), categories.len(), index);
        let group_start = center - width * 0.4;
        let group_end = center + width * 0.4;
        for (series_index, entry) in series.iter().enumerate() {
            let Some(value) = entry.values.get(index).copied().filter(|value| value.is_finite()) else {
                continue;
            };
            let (bar_center, bar_width) = band(group_start, group_end, series.len(), series_index);
            painter.rect_filled(
                Rect::from_two_pos(
                    pos2(bar_center - bar_width * 0.45, zero),
                    pos2(bar_center + bar_width * 0.45, scale.map(value)),
                ),
                0.0,
                series_color(series_index),
            );
        }
    }

    let hovered = pointer.and_then(|pointer| band_at(plot.left(), plot.right(), categories.len(), pointer.x))?;
    Some(series_tooltip(&categories[hovered], series, hovered))
}

fn draw_lines(
    painter: &Painter,
    plot: Rect,
    categories: &[String],
    series: &[Series],
    pointer: Option<Pos2>,
) -> Option<String> {
    let scale = Scale::new(
        value_range(series.iter().flat_map(|entry| entry.values.iter().copied()), false),
        plot.bottom(),
        plot.top(),
    );
    draw_value_axis_vertical(painter, plot, &scale);
    draw_category_labels(painter, plot, categories.iter().map(String::as_str));

    let hovered = pointer.and_then(|pointer| band_at(plot.left(), plot.right(), categories.len(), pointer.x));
    if let Some(index) = hovered {
        let (x, _) = band(plot.left(), plot.right(), categories.len(), index);
        painter.line_segment(
            [pos2(x, plot.top()), pos2(x, plot.bottom())],
            Stroke::new(1.0, AXIS),
        );
    }

    for (series_index, entry) in series.iter().enumerate() {
        let color = series_color(series_index);
        let mut run: Vec<Pos2> = Vec::new();
        for (index, value) in entry.values.iter().enumerate().take(categories.len()) {
            if !value.is_finite() {
                if run.len() > 1 {
                    painter.line(std::mem::take(&mut run), Stroke::new(2.0, color));
                }
                run.clear();
                continue;
            }
            let (x, _) = band(plot.left(), plot.right(), categories.len(), index);
            let point = pos2(x, scale.map(*value));
            painter.circle_filled(point, 3.0, color);
            run.push(point);
        }
        if run.len() > 1 {
            painter.line(run, Stroke::new(2.0, color));
        }
    }

    hovered.map(|index| series_tooltip(&categories[index], series, index))
}

fn draw_scatter(
    painter: &Painter,
    plot: Rect,
    points: &[ScatterPoint],
    pointer: Option<Pos2>,
) -> Option<String> {
    let x_scale = Scale::new(
        value_range(points.iter().map(|point| point.x), false),
        plot.left(),
        plot.right(),
    );
    let y_scale = Scale::new(
        value_range(points.iter().map(|point| point.y), false),
        plot.bottom(),
        plot.top(),
    );
    draw_value_axis_vertical(painter, plot, &y_scale);
    for tick in x_scale.ticks() {
        painter.text(
            pos2(x_scale.map(tick), plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            format_value(tick),
            FontId::proportional(11.0),
            TEXT,
        );
    }

    let radius = if points.len() > 500 { 2.0 } else { 4.0 };
    let color = Color32::from_rgba_unmultiplied(99, 155, 255, 170);
    let mut nearest: Option<(usize, f32)> = None;
    for (index, point) in points.iter().enumerate() {
        let position = pos2(x_scale.map(point.x), y_scale.map(point.y));
        painter.circle_filled(position, radius, color);
        if let Some(pointer) = pointer {
            let distance = position.distance(pointer);
            if distance <= 8.0 && nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }
    }

    let (index, _) = nearest?;
    let point = &points[index];
    painter.circle_stroke(
        pos2(x_scale.map(point.x), y_scale.map(point.y)),
        radius + 3.0,
        Stroke::new(1.5, Color32::WHITE),
    );
    Some(format!(
        "{}\n{}, {}",
        point.label,
        format_value(point.x),
        format_value(point.y)
    ))
}

fn draw_histogram(
    painter: &Painter,
    plot: Rect,
    bins: &[HistogramBin],
    pointer: Option<Pos2>,
) -> Option<String> {
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return None;
    };
    let x_scale = Scale::new((first.start, last.end), plot.left(), plot.right());
    let y_scale = Scale::new(
        value_range(bins.iter().map(|bin| bin.count as f64), true),
        plot.bottom(),
        plot.top(),
    );
    draw_value_axis_vertical(painter, plot, &y_scale);
    for tick in x_scale.ticks() {
        painter.text(
            pos2(x_scale.map(tick), plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            format_value(tick),
            FontId::proportional(11.0),
            TEXT,
        );
    }

    let mut hovered = None;
    for (index, bin) in bins.iter().enumerate() {
        let left = x_scale.map(bin.start);
        let right = x_scale.map(bin.end);
        let is_hovered = pointer.is_some_and(|pointer| pointer.x >= left && pointer.x < right);
        if is_hovered {
            hovered = Some(index);
        }
        let color = if is_hovered {
            blend_color(series_color(1), Color32::WHITE, 0.3)
        } else {
            series_color(1)
        };
        painter.rect_filled(
            Rect::from_two_pos(
                pos2(left + 0.5, y_scale.map(0.0)),
                pos2(right - 0.5, y_scale.map(bin.count as f64)),
            ),
            0.0,
            color,
        );
    }

    let bin = &bins[hovered?];
    Some(format!(
        "{} to {}\n{} songs",
        format_value(bin.start),
        format_value(bin.end),
        bin.count
    ))
}

fn draw_boxes(
    painter: &Painter,
    plot: Rect,
    boxes: &[BoxStats],
    pointer: Option<Pos2>,
) -> Option<String> {
    let scale = Scale::new(
        value_range(boxes.iter().flat_map(|stats| [stats.min, stats.max]), false),
        plot.bottom(),
        plot.top(),
    );
    draw_value_axis_vertical(painter, plot, &scale);
    draw_category_labels(painter, plot, boxes.iter().map(|stats| stats.label.as_str()));

    for (index, stats) in boxes.iter().enumerate() {
        let (center, width) = band(plot.left(), plot.right(), boxes.len(), index);
        let half = (width * 0.3).min(40.0);
        let color = series_color(index);
        let stroke = Stroke::new(1.5, color);

        painter.line_segment(
            [pos2(center, scale.map(stats.min)), pos2(center, scale.map(stats.max))],
            stroke,
        );
        for whisker in [stats.min, stats.max] {
            let y = scale.map(whisker);
            painter.line_segment([pos2(center - half * 0.5, y), pos2(center + half * 0.5, y)], stroke);
        }
        painter.rect_filled(
            Rect::from_two_pos(
                pos2(center - half, scale.map(stats.q1)),
                pos2(center + half, scale.map(stats.q3)),
            ),
            2.0,
            blend_color(BACKGROUND, color, 0.55),
        );
        let median = scale.map(stats.median);
        painter.line_segment(
            [pos2(center - half, median), pos2(center + half, median)],
            Stroke::new(2.0, Color32::WHITE),
        );
    }

    let index = pointer.and_then(|pointer| band_at(plot.left(), plot.right(), boxes.len(), pointer.x))?;
    let stats = &boxes[index];
    Some(format!(
        "{} ({} songs)\nmax {}\nq3 {}\nmedian {}\nq1 {}\nmin {}",
        stats.label,
        stats.count,
        format_value(stats.max),
        format_value(stats.q3),
        format_value(stats.median),
        format_value(stats.q1),
        format_value(stats.min)
    ))
}

fn draw_heatmap(
    painter: &Painter,
    plot: Rect,
    rows: &[String],
    columns: &[String],
    cells: &[Vec<f64>],
    pointer: Option<Pos2>,
) -> Option<String> {
    let max = cells
        .iter()
        .flatten()
        .copied()
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);

    draw_row_labels(painter, plot, rows.iter().map(String::as_str));
    draw_category_labels(painter, plot, columns.iter().map(String::as_str));

    for (row_index, row) in cells.iter().enumerate().take(rows.len()) {
        let (row_center, row_height) = band(plot.top(), plot.bottom(), rows.len(), row_index);
        for (column_index, value) in row.iter().enumerate().take(columns.len()) {
            let (column_center, column_width) =
                band(plot.left(), plot.right(), columns.len(), column_index);
            let t = if max > 0.0 { (*value / max) as f32 } else { 0.0 };
            let color = if *value > 0.0 {
                ramp_color(t)
            } else {
                Color32::from_rgb(30, 35, 44)
            };
            let cell = Rect::from_center_size(
                pos2(column_center, row_center),
                vec2(column_width, row_height),
            )
            .shrink(0.5);
            painter.rect_filled(cell, 0.0, color);
            if cell.width() > 26.0 && cell.height() > 14.0 && *value > 0.0 {
                painter.text(
                    cell.center(),
                    Align2::CENTER_CENTER,
                    format_value(*value),
                    FontId::proportional(10.0),
                    Color32::from_gray(15),
                );
            }
        }
    }

    let pointer = pointer?;
    let row = band_at(plot.top(), plot.bottom(), rows.len(), pointer.y)?;
    let column = band_at(plot.left(), plot.right(), columns.len(), pointer.x)?;
    let value = cells.get(row).and_then(|row| row.get(column)).copied()?;
    Some(format!(
        "{} × {}\n{}",
        rows[row],
        columns[column],
        format_value(value)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_maps_range_onto_span() {
        let scale = Scale::new((0.0, 10.0), 100.0, 0.0);
        assert_eq!(scale.map(0.0), 100.0);
        assert_eq!(scale.map(10.0), 0.0);
        assert_eq!(scale.map(5.0), 50.0);
        assert_eq!(scale.ticks().count(), TICKS + 1);
    }

    #[test]
    fn flat_ranges_are_widened() {
        let scale = Scale::new((3.0, 3.0), 0.0, 100.0);
        assert_eq!(scale.map(3.0), 50.0);
    }

    #[test]
    fn value_range_ignores_gaps_and_can_include_zero() {
        assert_eq!(value_range([2.0, f64::NAN, 5.0], false), (2.0, 5.0));
        assert_eq!(value_range([2.0, 5.0], true), (0.0, 5.0));
        assert_eq!(value_range([-4.0, -1.0], true), (-4.0, 0.0));
        assert_eq!(value_range(Vec::new(), false), (0.0, 1.0));
    }

    #[test]
    fn bands_split_the_span_evenly() {
        assert_eq!(band(0.0, 100.0, 4, 0), (12.5, 25.0));
        assert_eq!(band_at(0.0, 100.0, 4, 60.0), Some(2));
        assert_eq!(band_at(0.0, 100.0, 4, 100.0), Some(3));
        assert_eq!(band_at(0.0, 100.0, 4, 120.0), None);
        assert_eq!(band_at(0.0, 100.0, 0, 50.0), None);
    }
}
