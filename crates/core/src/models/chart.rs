use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single data point of the PNL chart.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlFrame {
    /// Millisecond epoch (API epoch seconds × 1000)
    pub timestamp_ms: i64,

    /// PNL value in USD
    pub usd: f64,
}

impl PnlFrame {
    /// The point's timestamp as a UTC date-time, `None` if out of chrono's range.
    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

/// One labelled line of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<PnlFrame>,
}

// ── Axes ────────────────────────────────────────────────────────────

/// Which field of a `PnlFrame` an axis reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisAccessor {
    Date,
    Usd,
}

/// A value extracted from a frame by an axis accessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisDatum {
    Time(DateTime<Utc>),
    Number(f64),
}

impl AxisAccessor {
    #[must_use]
    pub fn extract(&self, frame: &PnlFrame) -> Option<AxisDatum> {
        match self {
            AxisAccessor::Date => frame.date().map(AxisDatum::Time),
            AxisAccessor::Usd => Some(AxisDatum::Number(frame.usd)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Time,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Line,
    Area,
    Bar,
}

/// Axis descriptor handed to the chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub accessor: AxisAccessor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<ScaleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_type: Option<ElementType>,
    pub show_datum_elements: bool,
}

impl AxisOptions {
    /// Primary axis: point → date on a time scale.
    pub fn date_axis() -> Self {
        Self {
            accessor: AxisAccessor::Date,
            scale_type: Some(ScaleType::Time),
            element_type: None,
            show_datum_elements: false,
        }
    }

    /// Secondary axis: point → USD value drawn as a filled area.
    pub fn usd_area_axis() -> Self {
        Self {
            accessor: AxisAccessor::Usd,
            scale_type: None,
            element_type: Some(ElementType::Area),
            show_datum_elements: true,
        }
    }
}

/// Everything the rendering sink needs to draw the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub data: Vec<Series>,
    pub primary_axis: AxisOptions,
    pub secondary_axes: Vec<AxisOptions>,
}

impl ChartOptions {
    pub fn for_series(data: Vec<Series>) -> Self {
        Self {
            data,
            primary_axis: AxisOptions::date_axis(),
            secondary_axes: vec![AxisOptions::usd_area_axis()],
        }
    }
}
