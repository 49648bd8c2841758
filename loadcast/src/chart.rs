use chrono::{DateTime, Utc};
use serde::Serialize;

use loadcast_core::{AlignedSeries, DisplayWindow, EmptyWindow, SeriesRole};
use loadcast_types::LoadcastError;

/// Chart title.
pub const TITLE: &str = "Demanda energética total en Austria [MW]";
/// Y-axis title.
pub const Y_AXIS_TITLE: &str = "Demanda total [MW]";

/// Figure-wide presentation: legend placement, hover, colours, grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutStyle {
    /// `"h"` lays legend entries out in a row.
    pub legend_orientation: &'static str,
    /// Legend anchor point in paper coordinates.
    pub legend_x: f64,
    /// Legend anchor point in paper coordinates; above 1 sits over the plot.
    pub legend_y: f64,
    /// Which side of the legend box `legend_x` refers to.
    pub legend_x_anchor: &'static str,
    /// Which side of the legend box `legend_y` refers to.
    pub legend_y_anchor: &'static str,
    /// `"x"` shows every trace's value at the hovered timestamp.
    pub hover_mode: &'static str,
    /// Background outside the plot area.
    pub paper_background: &'static str,
    /// Background inside the plot area.
    pub plot_background: &'static str,
    /// Colour of titles, ticks and legend text.
    pub font_color: &'static str,
    /// Grid line colour on both axes.
    pub grid_color: &'static str,
    /// Grid line width in pixels on both axes.
    pub grid_width: f64,
}

/// Layout shared by every figure.
pub const LAYOUT: LayoutStyle = LayoutStyle {
    legend_orientation: "h",
    legend_x: 1.0,
    legend_y: 1.02,
    legend_x_anchor: "right",
    legend_y_anchor: "bottom",
    hover_mode: "x",
    paper_background: "rgba(0,0,0,0)",
    plot_background: "rgba(0,0,0,0)",
    font_color: "#2cfec1",
    grid_color: "#7C7C7C",
    grid_width: 0.25,
};

/// Presentation of one line in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceStyle {
    /// Column this trace draws.
    pub role: SeriesRole,
    /// Legend label.
    pub name: &'static str,
    /// Line colour; `None` leaves it to the renderer.
    pub color: Option<&'static str>,
    /// Line width in pixels; `Some(0)` hides the line itself.
    pub line_width: Option<u8>,
    /// Fill colour between this trace and the previous one.
    pub fill_to_previous: Option<&'static str>,
    /// Whether the trace appears in the legend.
    pub show_legend: bool,
}

/// Traces in draw order. The lower bound fills up to the upper bound, which
/// must therefore be drawn right before it.
pub const TRACES: [TraceStyle; 4] = [
    TraceStyle {
        role: SeriesRole::Actual,
        name: "Demanda energética",
        color: Some("#188463"),
        line_width: None,
        fill_to_previous: None,
        show_legend: true,
    },
    TraceStyle {
        role: SeriesRole::Forecast,
        name: "Proyección",
        color: Some("#bbffeb"),
        line_width: None,
        fill_to_previous: None,
        show_legend: true,
    },
    TraceStyle {
        role: SeriesRole::UpperBound,
        name: "Upper Bound",
        color: None,
        line_width: Some(0),
        fill_to_previous: None,
        show_legend: false,
    },
    TraceStyle {
        role: SeriesRole::LowerBound,
        name: "Lower Bound",
        color: None,
        line_width: Some(0),
        fill_to_previous: Some("rgba(242, 255, 251, 0.3)"),
        show_legend: false,
    },
];

/// Style for `role`.
#[must_use]
pub const fn trace_style(role: SeriesRole) -> TraceStyle {
    match role {
        SeriesRole::Actual => TRACES[0],
        SeriesRole::Forecast => TRACES[1],
        SeriesRole::UpperBound => TRACES[2],
        SeriesRole::LowerBound => TRACES[3],
    }
}

/// Renderer-agnostic chart: aligned data plus static presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    title: &'static str,
    y_axis_title: &'static str,
    layout: LayoutStyle,
    traces: [TraceStyle; 4],
    window: DisplayWindow,
    data: AlignedSeries,
}

impl Figure {
    /// Wrap the aligned columns for `window`.
    #[must_use]
    pub const fn new(window: DisplayWindow, data: AlignedSeries) -> Self {
        Self {
            title: TITLE,
            y_axis_title: Y_AXIS_TITLE,
            layout: LAYOUT,
            traces: TRACES,
            window,
            data,
        }
    }

    /// Chart title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Y-axis title.
    #[must_use]
    pub const fn y_axis_title(&self) -> &'static str {
        self.y_axis_title
    }

    /// Legend, hover, colour and grid settings.
    #[must_use]
    pub const fn layout(&self) -> &LayoutStyle {
        &self.layout
    }

    /// Traces in draw order.
    #[must_use]
    pub const fn traces(&self) -> &[TraceStyle; 4] {
        &self.traces
    }

    /// Index range the figure covers.
    #[must_use]
    pub const fn window(&self) -> DisplayWindow {
        self.window
    }

    /// Shared x axis.
    #[must_use]
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.data.timestamps
    }

    /// Y values of the trace for `role`.
    #[must_use]
    pub fn values(&self, role: SeriesRole) -> &[Option<f64>] {
        self.data.values(role)
    }

    /// Underlying aligned columns.
    #[must_use]
    pub const fn data(&self) -> &AlignedSeries {
        &self.data
    }

    /// Number of points per trace.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a figure built from a `DisplayWindow`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Figure data as a polars `DataFrame`.
    ///
    /// # Errors
    /// Returns `Other` if polars rejects the columns.
    #[cfg(feature = "dataframe")]
    pub fn to_dataframe(&self) -> Result<polars::prelude::DataFrame, LoadcastError> {
        self.data.to_dataframe()
    }
}

/// What the chart should show after a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ChartState {
    /// A populated chart.
    Chart(Figure),
    /// A well-formed request with nothing to draw.
    Empty(EmptyWindow),
    /// The request could not be served.
    Error(LoadcastError),
}

impl ChartState {
    /// The figure, if this is a populated chart.
    #[must_use]
    pub const fn figure(&self) -> Option<&Figure> {
        match self {
            Self::Chart(f) => Some(f),
            _ => None,
        }
    }

    /// The error, if this is an error state.
    #[must_use]
    pub const fn error(&self) -> Option<&LoadcastError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Result of feeding one set of control values through the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Update {
    /// At least one control is unset; keep the current display.
    Unchanged,
    /// The values were rejected; keep the current display.
    Rejected(LoadcastError),
    /// Replace the display.
    Render(ChartState),
}

impl Update {
    /// True if the display should be left as is.
    #[must_use]
    pub const fn keeps_display(&self) -> bool {
        !matches!(self, Self::Render(_))
    }
}
