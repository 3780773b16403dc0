//! Chart rendition
use std::{
    fs::{create_dir_all, write},
    path::PathBuf,
};

use plotly::{
    common::{DashType, Line, Marker, MarkerSymbol, Mode, Title},
    layout::Axis,
    Layout, Plot, Scatter,
};
use serde::{Deserialize, Serialize};

use leolink::prelude::{ChartRequest, TelemetryTable};

use crate::Error;

mod config;
pub use config::ChartConfig;

/// Renders one [ChartRequest] as an HTML chart, `<folder>/<filename>.html`.
/// Samples are plotted against the row index, missing and infinite
/// samples are not plotted.
pub fn render(
    request: &ChartRequest,
    table: &TelemetryTable,
    cfg: &ChartConfig,
) -> Result<PathBuf, Error> {
    let title = if cfg.title_required {
        request.title.as_str()
    } else {
        ""
    };
    let layout = Layout::new()
        .title(Title::from(title))
        .x_axis(
            Axis::new()
                .title(Title::from(request.x_label.as_str()))
                .show_grid(true),
        )
        .y_axis(
            Axis::new()
                .title(Title::from(request.y_label.as_str()))
                .show_grid(true),
        )
        .show_legend(true)
        .width(cfg.width)
        .height(cfg.height);

    let mut plot = Plot::new();
    plot.set_layout(layout);

    for (nth, (name, label)) in request.columns.iter().zip(request.labels.iter()).enumerate() {
        let column = table
            .column(name)
            .ok_or_else(|| leolink::Error::UnknownColumn(name.to_string()))?;
        let (x, y): (Vec<usize>, Vec<f64>) = column
            .cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| {
                let value = cell.as_f64()?;
                if value.is_finite() {
                    Some((index, value))
                } else {
                    None
                }
            })
            .unzip();
        let trace = Scatter::new(x, y)
            .mode(Mode::LinesMarkers)
            .name(label.as_str())
            .marker(Marker::new().symbol(cfg.marker(nth)).color(cfg.color(nth)))
            .line(Line::new().dash(cfg.line_style(nth)));
        plot.add_trace(trace);
    }

    create_dir_all(&request.folder)?;
    let path = request.path("html");
    write(&path, plot.to_html())?;
    Ok(path)
}

/// Renders all charts, a failure is reported but does not abort
/// the following charts. Returns the number of rendered charts.
pub fn render_all(requests: &[ChartRequest], table: &TelemetryTable, cfg: &ChartConfig) -> usize {
    let mut rendered = 0;
    for request in requests {
        match render(request, table, cfg) {
            Ok(path) => {
                debug!("{} has been generated", path.display());
                rendered += 1;
            },
            Err(e) => {
                warn!("failed to render \"{}\": {}", request.filename, e);
            },
        }
    }
    rendered
}

/// Marker symbol, as described in [ChartConfig]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    Circle,
    Square,
    Diamond,
    Cross,
    X,
    TriangleUp,
    TriangleDown,
    Pentagon,
    Hexagon,
    Star,
}

impl From<MarkerKind> for MarkerSymbol {
    fn from(kind: MarkerKind) -> Self {
        match kind {
            MarkerKind::Circle => MarkerSymbol::Circle,
            MarkerKind::Square => MarkerSymbol::Square,
            MarkerKind::Diamond => MarkerSymbol::Diamond,
            MarkerKind::Cross => MarkerSymbol::Cross,
            MarkerKind::X => MarkerSymbol::X,
            MarkerKind::TriangleUp => MarkerSymbol::TriangleUp,
            MarkerKind::TriangleDown => MarkerSymbol::TriangleDown,
            MarkerKind::Pentagon => MarkerSymbol::Pentagon,
            MarkerKind::Hexagon => MarkerSymbol::Hexagon,
            MarkerKind::Star => MarkerSymbol::Star,
        }
    }
}

/// Line style, as described in [ChartConfig]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dash,
    DashDot,
    Dot,
}

impl From<LineStyle> for DashType {
    fn from(style: LineStyle) -> Self {
        match style {
            LineStyle::Solid => DashType::Solid,
            LineStyle::Dash => DashType::Dash,
            LineStyle::DashDot => DashType::DashDot,
            LineStyle::Dot => DashType::Dot,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use leolink::prelude::Column;
    #[test]
    fn html_rendition() {
        let table = TelemetryTable::from_columns(vec![
            Column::from_values("Time", &[0.0, 1.0, 2.0]),
            Column::from_values("Sydney_BEST_SNR", &[10.0, f64::NEG_INFINITY, 12.0]),
            Column::from_values("Melbourne_BEST_SNR", &[f64::NAN, 4.0, 5.0]),
        ])
        .unwrap();
        let folder = std::env::temp_dir().join("leolink-plot-test");
        let request = ChartRequest {
            columns: vec!["Sydney_BEST_SNR".to_string(), "Melbourne_BEST_SNR".to_string()],
            labels: vec!["Sydney".to_string(), "Melbourne".to_string()],
            x_label: "Time (m)".to_string(),
            y_label: "SNR (dBm)".to_string(),
            title: "SNR for Starlink Satellites".to_string(),
            folder: folder.clone(),
            filename: "test_best_SNR".to_string(),
        };
        let path = render(&request, &table, &ChartConfig::default()).unwrap();
        assert_eq!(path, folder.join("test_best_SNR.html"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Melbourne"));

        let missing = ChartRequest {
            columns: vec!["LEO0_Sydney_SNR_dB".to_string()],
            labels: vec!["LEO0_Sydney_SNR_dB".to_string()],
            filename: "missing".to_string(),
            ..request.clone()
        };
        assert!(render(&missing, &table, &ChartConfig::default()).is_err());
        assert_eq!(
            render_all(&[request, missing], &table, &ChartConfig::default()),
            1
        );
        assert!(!folder.join("missing.html").exists());
    }
}
