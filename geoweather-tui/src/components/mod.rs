pub mod app_view;
pub mod help_bar;
pub mod map_panel;
pub mod result_card;
pub mod status_lines;
pub mod title_bar;

pub use crate::component::Component;

pub use app_view::{AppView, AppViewProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use map_panel::{tile_for, tile_url, viewport, MapPanel, MapPanelProps, TileCoord, MARKER};
pub use result_card::{ResultCard, ResultCardProps};
pub use status_lines::{StatusLines, StatusLinesProps, ERROR_ICON};
pub use title_bar::{TitleBar, TitleBarProps, SPINNERS};
