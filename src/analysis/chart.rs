use serde::Serialize;

use crate::collab::RenderBundle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub detail: Option<String>,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoxStats {
    pub label: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartBody {
    Bars {
        orientation: Orientation,
        bars: Vec<Bar>,
    },
    Stacked {
        categories: Vec<String>,
        series: Vec<Series>,
    },
    Grouped {
        categories: Vec<String>,
        series: Vec<Series>,
    },
    Line {
        categories: Vec<String>,
        series: Vec<Series>,
    },
    Scatter {
        points: Vec<ScatterPoint>,
    },
    Histogram {
        bins: Vec<HistogramBin>,
    },
    Boxes {
        boxes: Vec<BoxStats>,
    },
    Heatmap {
        rows: Vec<String>,
        columns: Vec<String>,
        cells: Vec<Vec<f64>>,
    },
    Network {
        bundle: RenderBundle,
    },
}

impl ChartBody {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bars { bars, .. } => bars.is_empty(),
            Self::Stacked { categories, .. }
            | Self::Grouped { categories, .. }
            | Self::Line { categories, .. } => categories.is_empty(),
            Self::Scatter { points } => points.is_empty(),
            Self::Histogram { bins } => bins.is_empty(),
            Self::Boxes { boxes } => boxes.is_empty(),
            Self::Heatmap { rows, columns, .. } => rows.is_empty() || columns.is_empty(),
            Self::Network { bundle } => bundle.is_empty(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub body: ChartBody,
}

impl Chart {
    pub fn new(title: impl Into<String>, body: ChartBody) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            body,
        }
    }

    pub fn axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
