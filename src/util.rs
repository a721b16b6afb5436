pub fn format_duration_ms(duration_ms: f64) -> String {
    if !duration_ms.is_finite() || duration_ms <= 0.0 {
        return "0:00".to_owned();
    }

    let total_seconds = (duration_ms / 1000.0).round() as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_owned();
    }

    let magnitude = value.abs();
    if magnitude >= 10_000.0 {
        format!("{value:.0}")
    } else if magnitude >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

pub fn short_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let mut label = text
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    label.push('…');
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_render_as_minutes_and_seconds() {
        assert_eq!(format_duration_ms(215_000.0), "3:35");
        assert_eq!(format_duration_ms(59_499.0), "0:59");
        assert_eq!(format_duration_ms(f64::NAN), "0:00");
    }

    #[test]
    fn short_label_keeps_short_text_and_ellipsizes_long_text() {
        assert_eq!(short_label("Abba", 8), "Abba");
        assert_eq!(short_label("Bohemian Rhapsody", 8), "Bohemia…");
    }

    #[test]
    fn values_round_by_magnitude() {
        assert_eq!(format_value(0.1234), "0.12");
        assert_eq!(format_value(123.46), "123.5");
        assert_eq!(format_value(215_000.4), "215000");
    }
}
