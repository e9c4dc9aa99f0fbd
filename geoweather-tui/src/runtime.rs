//! Event/action/render loop
//!
//! One `select!` loop owns the pipeline: terminal events become actions
//! through the root view, results come back from spawned tasks, and a tick
//! drives the spinner. State only changes inside this loop.

use std::io;
use std::time::Duration;

use geoweather_core::{Action, Pipeline};
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::component::Component;
use crate::components::{AppView, AppViewProps};
use crate::event::{spawn_event_poller, EventKind, PollerConfig};

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub struct Runtime {
    pipeline: Pipeline,
    view: AppView,
    poller_config: PollerConfig,
    tick_interval: Duration,
    should_render: bool,
}

impl Runtime {
    pub fn new(pipeline: Pipeline, view: AppView) -> Self {
        Self {
            pipeline,
            view,
            poller_config: PollerConfig::default(),
            tick_interval: TICK_INTERVAL,
            should_render: true,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Route one terminal event through the root view
    pub fn handle_event(&mut self, event: &EventKind) {
        if let EventKind::Resize(..) = event {
            self.should_render = true;
        }
        let props = AppViewProps {
            state: self.pipeline.state(),
        };
        for action in self.view.handle_event(event, props) {
            self.pipeline.enqueue(action);
        }
    }

    /// Dispatch one action; returns false when the loop should stop
    pub fn handle_action(&mut self, action: Action) -> bool {
        if matches!(action, Action::Quit) {
            return false;
        }
        if !matches!(action, Action::Tick) {
            tracing::debug!(action = %action.summary(), "action received");
        }
        if self.pipeline.dispatch(action) {
            self.should_render = true;
        }
        true
    }

    /// Run until a quit action arrives or drawing fails.
    ///
    /// The event poller and every outstanding task are stopped on both paths.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<EventKind>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, self.poller_config, cancel_token.clone());

        let result = self.drive(terminal, event_rx).await;

        cancel_token.cancel();
        let aborted = self.pipeline.shutdown();
        match &result {
            Ok(()) => tracing::info!(aborted, "runtime stopped"),
            Err(err) => tracing::error!(error = %err, aborted, "runtime stopped on draw error"),
        }
        result
    }

    async fn drive<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut event_rx: mpsc::UnboundedReceiver<EventKind>,
    ) -> io::Result<()> {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            if self.should_render {
                let state = self.pipeline.state();
                let view = &mut self.view;
                terminal.draw(|frame| {
                    view.render(frame, frame.area(), AppViewProps { state });
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    self.handle_event(&event);
                }

                Some(action) = self.pipeline.next_action() => {
                    if !self.handle_action(action) {
                        break;
                    }
                }

                _ = ticker.tick() => {
                    self.handle_action(Action::Tick);
                }

                else => {
                    break;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::key;
    use geoweather_core::{
        AppState, Config, EffectHandler, Geolocator, IpPosition, PositionOptions,
        ReverseGeocodeClient, WeatherClient,
    };
    use ratatui::backend::{TestBackend, WindowSize};
    use ratatui::buffer::Cell;
    use ratatui::layout::{Position, Size};
    use std::sync::Arc;

    fn runtime_with(geolocator: Geolocator) -> Runtime {
        let config = Config::default();
        let supported = geolocator.is_supported();
        let handler = EffectHandler::new(
            geolocator,
            WeatherClient::new(&config.weather, None).unwrap(),
            ReverseGeocodeClient::new(&config.geocode, None).unwrap(),
        );
        let pipeline =
            Pipeline::from_parts(handler, AppState::new(supported, Default::default(), 13));
        Runtime::new(pipeline, AppView::new("", ""))
    }

    fn runtime() -> Runtime {
        runtime_with(Geolocator::unsupported())
    }

    /// Accepts every call except drawing
    struct BrokenDisplay(TestBackend);

    impl Backend for BrokenDisplay {
        fn draw<'a, I>(&mut self, _content: I) -> io::Result<()>
        where
            I: Iterator<Item = (u16, u16, &'a Cell)>,
        {
            Err(io::Error::other("display gone"))
        }

        fn hide_cursor(&mut self) -> io::Result<()> {
            self.0.hide_cursor()
        }

        fn show_cursor(&mut self) -> io::Result<()> {
            self.0.show_cursor()
        }

        fn get_cursor_position(&mut self) -> io::Result<Position> {
            self.0.get_cursor_position()
        }

        fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
            self.0.set_cursor_position(position)
        }

        fn clear(&mut self) -> io::Result<()> {
            self.0.clear()
        }

        fn size(&self) -> io::Result<Size> {
            self.0.size()
        }

        fn window_size(&mut self) -> io::Result<WindowSize> {
            self.0.window_size()
        }

        fn flush(&mut self) -> io::Result<()> {
            self.0.flush()
        }
    }

    #[tokio::test]
    async fn test_draw_failure_still_stops_outstanding_tasks() {
        // accepts connections into the backlog and never answers
        let silent = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = silent.local_addr().unwrap();
        let source = IpPosition::new(format!("http://{addr}")).unwrap();
        let mut rt = runtime_with(Geolocator::new(
            Some(Arc::new(source)),
            PositionOptions::default(),
        ));

        assert!(rt.pipeline.dispatch(Action::LocationRequest));
        tokio::task::yield_now().await;

        let mut terminal = Terminal::new(BrokenDisplay(TestBackend::new(40, 10))).unwrap();
        let err = rt.run(&mut terminal).await.unwrap_err();
        assert_eq!(err.to_string(), "display gone");

        assert_eq!(rt.pipeline.shutdown(), 0, "geolocation task left running");
    }

    #[tokio::test]
    async fn test_key_becomes_queued_action() {
        let mut rt = runtime();
        rt.handle_event(&EventKind::Key(key("l")));
        let action = rt.pipeline.next_action().await;
        assert_eq!(action, Some(Action::LocationRequest));
    }

    #[tokio::test]
    async fn test_quit_stops_and_tick_only_renders_when_busy() {
        let mut rt = runtime();
        rt.should_render = false;

        assert!(!rt.handle_action(Action::Quit));
        assert!(rt.handle_action(Action::Tick));
        assert!(!rt.should_render);

        assert!(rt.handle_action(Action::MapZoomIn));
        assert!(rt.should_render);
        assert_eq!(rt.pipeline().state().map_zoom, 14);
    }
}
