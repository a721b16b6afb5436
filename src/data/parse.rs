use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub const UNKNOWN_GENRE: &str = "Unknown";

pub(super) fn coerce_number(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

pub(super) fn coerce_popularity(raw: Option<&str>) -> f64 {
    coerce_number(raw).unwrap_or(0.0)
}

pub(super) fn coerce_bool(raw: Option<&str>) -> Option<bool> {
    let value = raw?.trim();
    if ["true", "1", "yes"]
        .iter()
        .any(|candidate| value.eq_ignore_ascii_case(candidate))
    {
        Some(true)
    } else if ["false", "0", "no"]
        .iter()
        .any(|candidate| value.eq_ignore_ascii_case(candidate))
    {
        Some(false)
    } else {
        None
    }
}

pub(super) fn coerce_text(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

pub(super) fn release_year(raw: Option<&str>) -> Option<i32> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.year());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(timestamp.year());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date.year());
        }
    }

    if let Some((year, month)) = value.split_once('-')
        && year.len() == 4
        && NaiveDate::parse_from_str(&format!("{year}-{month}-01"), "%Y-%m-%d").is_ok()
    {
        return year.parse().ok();
    }

    if value.len() == 4 && value.bytes().all(|byte| byte.is_ascii_digit()) {
        return value.parse().ok();
    }

    None
}

pub(super) fn split_genres(raw: Option<&str>) -> Vec<String> {
    let genres = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(str::to_owned)
        .collect::<Vec<_>>();

    if genres.is_empty() {
        vec![UNKNOWN_GENRE.to_owned()]
    } else {
        genres
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popularity_falls_back_to_zero() {
        assert_eq!(coerce_popularity(Some(" 71 ")), 71.0);
        assert_eq!(coerce_popularity(Some("n/a")), 0.0);
        assert_eq!(coerce_popularity(Some("NaN")), 0.0);
        assert_eq!(coerce_popularity(None), 0.0);
    }

    #[test]
    fn release_year_reads_common_date_shapes() {
        assert_eq!(release_year(Some("1992-08-03")), Some(1992));
        assert_eq!(release_year(Some("1975")), Some(1975));
        assert_eq!(release_year(Some("1985-06")), Some(1985));
        assert_eq!(release_year(Some("2019-05-31T00:00:00Z")), Some(2019));
        assert_eq!(release_year(Some("2001-02-03 10:11:12")), Some(2001));
        assert_eq!(release_year(Some("07/14/2004")), Some(2004));
    }

    #[test]
    fn release_year_rejects_garbage() {
        assert_eq!(release_year(None), None);
        assert_eq!(release_year(Some("  ")), None);
        assert_eq!(release_year(Some("soon")), None);
        assert_eq!(release_year(Some("1985-13")), None);
        assert_eq!(release_year(Some("19851")), None);
    }

    #[test]
    fn explicit_flags_accept_several_spellings() {
        assert_eq!(coerce_bool(Some("True")), Some(true));
        assert_eq!(coerce_bool(Some("0")), Some(false));
        assert_eq!(coerce_bool(Some("maybe")), None);
    }

    #[test]
    fn genres_default_to_unknown() {
        assert_eq!(split_genres(None), vec!["Unknown"]);
        assert_eq!(split_genres(Some(" , ")), vec!["Unknown"]);
        assert_eq!(
            split_genres(Some("dance pop, pop ,")),
            vec!["dance pop", "pop"]
        );
    }
}
