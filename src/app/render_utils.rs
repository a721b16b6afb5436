use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

const PALETTE: [Color32; 8] = [
    Color32::from_rgb(99, 155, 255),
    Color32::from_rgb(246, 146, 94),
    Color32::from_rgb(122, 201, 126),
    Color32::from_rgb(232, 112, 160),
    Color32::from_rgb(246, 206, 104),
    Color32::from_rgb(160, 130, 235),
    Color32::from_rgb(95, 205, 210),
    Color32::from_rgb(200, 200, 200),
];

pub(super) fn series_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn ramp_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let r = (55.0 + (190.0 * t)) as u8;
    let g = (150.0 - (70.0 * t)) as u8;
    let b = (215.0 - (155.0 * t)) as u8;
    Color32::from_rgb(r, g, b)
}

pub(super) fn degree_color(degree: usize, max_degree: usize) -> Color32 {
    if max_degree <= 1 {
        return ramp_color(0.0);
    }
    ramp_color(((degree.max(1) as f32).ln() / (max_degree as f32).ln()).clamp(0.0, 1.0))
}

pub(super) fn node_radius(degree: usize, scale: f32) -> f32 {
    ((4.0 + (degree as f32).sqrt() * 2.2) * scale.powf(0.35)).clamp(2.5, 30.0)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn fit_scale(rect: Rect) -> f32 {
    (rect.width().min(rect.height()) * 0.44).max(1.0)
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, scale: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * scale
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, scale: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / scale
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn screen_mapping_round_trips() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 200.0));
        let pan = vec2(12.0, -8.0);
        let world = vec2(0.5, -0.25);

        let screen = world_to_screen(rect, pan, 88.0, world);
        let back = screen_to_world(rect, pan, 88.0, screen);
        assert!((back - world).length() < 1e-4);
    }

    #[test]
    fn unit_square_fits_inside_rect() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 200.0));
        let scale = fit_scale(rect);
        assert!(rect.contains(world_to_screen(rect, Vec2::ZERO, scale, vec2(1.0, 1.0))));
        assert!(rect.contains(world_to_screen(rect, Vec2::ZERO, scale, vec2(-1.0, -1.0))));
    }

    #[test]
    fn degree_colors_span_the_ramp() {
        assert_eq!(degree_color(1, 10), ramp_color(0.0));
        assert_eq!(degree_color(10, 10), ramp_color(1.0));
        assert_eq!(degree_color(3, 1), ramp_color(0.0));
    }
}
