use plotly::common::{DashType, MarkerSymbol};
use serde::{Deserialize, Serialize};

use super::{LineStyle, MarkerKind};

fn default_width() -> usize {
    800
}

fn default_height() -> usize {
    600
}

fn default_colors() -> Vec<String> {
    ["red", "black", "green", "magenta", "yellow", "black"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_markers() -> Vec<MarkerKind> {
    vec![
        MarkerKind::Circle,
        MarkerKind::Square,
        MarkerKind::Diamond,
        MarkerKind::TriangleUp,
        MarkerKind::TriangleDown,
        MarkerKind::Pentagon,
        MarkerKind::Star,
        MarkerKind::X,
    ]
}

fn default_line_styles() -> Vec<LineStyle> {
    vec![
        LineStyle::Solid,
        LineStyle::Dash,
        LineStyle::DashDot,
        LineStyle::Dot,
    ]
}

/// [ChartConfig] customizes chart rendition.
/// Traces cycle through colors, markers and line styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart width, in pixels
    #[serde(default = "default_width")]
    pub width: usize,
    /// Chart height, in pixels
    #[serde(default = "default_height")]
    pub height: usize,
    /// Charts are not titled, unless this is set
    #[serde(default)]
    pub title_required: bool,
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
    #[serde(default = "default_markers")]
    pub markers: Vec<MarkerKind>,
    #[serde(default = "default_line_styles")]
    pub line_styles: Vec<LineStyle>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title_required: false,
            colors: default_colors(),
            markers: default_markers(),
            line_styles: default_line_styles(),
        }
    }
}

impl ChartConfig {
    /// Color of the nth trace
    pub fn color(&self, nth: usize) -> String {
        if self.colors.is_empty() {
            "black".to_string()
        } else {
            self.colors[nth % self.colors.len()].clone()
        }
    }
    /// Marker of the nth trace
    pub fn marker(&self, nth: usize) -> MarkerSymbol {
        if self.markers.is_empty() {
            MarkerSymbol::Circle
        } else {
            self.markers[nth % self.markers.len()].into()
        }
    }
    /// Line style of the nth trace
    pub fn line_style(&self, nth: usize) -> DashType {
        if self.line_styles.is_empty() {
            DashType::Solid
        } else {
            self.line_styles[nth % self.line_styles.len()].into()
        }
    }
}
