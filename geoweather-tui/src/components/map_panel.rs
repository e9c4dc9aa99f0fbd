//! Map panel: world outline cropped to the zoom viewport, with a marker
//!
//! Tiles are not fetched; the panel labels the slippy tile URL that covers
//! the center so it can be opened elsewhere.

use geoweather_core::{Action, Coordinates};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders, Paragraph,
    },
    Frame,
};

use super::Component;
use crate::theme::Theme;

pub const MARKER: &str = "✚";

/// Tiles shown across the viewport at any zoom
const VIEWPORT_TILES: f64 = 3.0;

/// Slippy map tile index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileCoord {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

/// Tile containing `coords` at `zoom` (Web Mercator)
pub fn tile_for(coords: Coordinates, zoom: u8) -> TileCoord {
    let n = f64::from(1u32 << u32::from(zoom.min(31)));
    let lat = coords.latitude.to_radians();
    let x = ((coords.longitude + 180.0) / 360.0 * n).floor();
    let y = ((1.0 - lat.tan().asinh() / std::f64::consts::PI) / 2.0 * n).floor();
    let max = n - 1.0;
    TileCoord {
        zoom,
        x: x.clamp(0.0, max) as u32,
        y: y.clamp(0.0, max) as u32,
    }
}

/// Fill a `{z}/{x}/{y}` template
pub fn tile_url(template: &str, tile: TileCoord) -> String {
    template
        .replace("{z}", &tile.zoom.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
}

/// Longitude/latitude window around `center` for `zoom`
pub fn viewport(center: Coordinates, zoom: u8) -> ([f64; 2], [f64; 2]) {
    let lon_span = (VIEWPORT_TILES * 360.0 / 2f64.powi(i32::from(zoom))).min(360.0);
    let lat_span = (lon_span / 2.0).min(180.0);
    (
        [
            center.longitude - lon_span / 2.0,
            center.longitude + lon_span / 2.0,
        ],
        [
            center.latitude - lat_span / 2.0,
            center.latitude + lat_span / 2.0,
        ],
    )
}

pub struct MapPanel;

pub struct MapPanelProps<'a> {
    pub center: Coordinates,
    pub zoom: u8,
    pub tile_url_template: &'a str,
    pub theme: Theme,
}

impl MapPanel {
    pub const MIN_HEIGHT: u16 = 8;
}

impl Component<Action> for MapPanel {
    type Props<'a> = MapPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(props.theme.border))
            .title(format!(" Map · zoom {} ", props.zoom))
            .title_style(Style::default().fg(props.theme.accent).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let (x_bounds, y_bounds) = viewport(props.center, props.zoom);
        let center = props.center;
        let canvas = Canvas::default()
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                ctx.print(
                    center.longitude,
                    center.latitude,
                    Span::styled(MARKER, Style::default().fg(Color::Red).bold()),
                );
            });
        frame.render_widget(canvas, chunks[0]);

        let url = tile_url(props.tile_url_template, tile_for(props.center, props.zoom));
        let label = Line::from(vec![
            Span::styled("Tile ", Style::default().fg(Color::DarkGray)),
            Span::styled(url, Style::default().fg(props.theme.text)),
        ]);
        frame.render_widget(Paragraph::new(label), chunks[1]);
    }
}
