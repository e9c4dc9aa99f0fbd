//! Effect handling and a headless driver
//!
//! [`EffectHandler`] turns reducer effects into spawned tasks. The terminal
//! runtime and [`Pipeline`] (used by `--once` and tests) share it.

use tokio::sync::mpsc;

use crate::action::Action;
use crate::api::{ReverseGeocodeClient, WeatherClient};
use crate::config::Config;
use crate::effect::Effect;
use crate::error::SetupError;
use crate::geolocation::Geolocator;
use crate::reducer::reducer;
use crate::state::AppState;
use crate::store::{EffectStore, TracingMiddleware};
use crate::tasks::{TaskKey, TaskManager};

#[derive(Clone, Debug)]
pub struct EffectHandler {
    geolocator: Geolocator,
    weather: WeatherClient,
    geocode: ReverseGeocodeClient,
}

impl EffectHandler {
    pub fn new(
        geolocator: Geolocator,
        weather: WeatherClient,
        geocode: ReverseGeocodeClient,
    ) -> Self {
        Self {
            geolocator,
            weather,
            geocode,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, SetupError> {
        Ok(Self::new(
            Geolocator::from_config(&config.geolocation)?,
            WeatherClient::new(&config.weather, config.http_timeout)?,
            ReverseGeocodeClient::new(&config.geocode, config.http_timeout)?,
        ))
    }

    pub fn is_geolocation_supported(&self) -> bool {
        self.geolocator.is_supported()
    }

    /// Spawn the work an effect describes.
    ///
    /// Fetch tasks are keyed per generation, so a newer acquisition never
    /// aborts an older pair still in flight.
    pub fn handle(&self, effect: Effect, tasks: &mut TaskManager<Action>) {
        match effect {
            Effect::AcquireLocation => match self.geolocator.acquire() {
                Err(err) => {
                    tracing::warn!(error = %err, "geolocation unavailable");
                    tasks.emit(Action::LocationDidFail(err.kind()));
                }
                Ok(acquisition) => {
                    tasks.spawn("geolocation", async move {
                        match acquisition.await {
                            Ok(coords) => Action::LocationDidAcquire(coords),
                            Err(err) => {
                                tracing::warn!(error = %err, "position acquisition failed");
                                Action::LocationDidFail(err.kind())
                            }
                        }
                    });
                }
            },

            Effect::FetchWeather(tag) => {
                let client = self.weather.clone();
                tasks.spawn(TaskKey::scoped("weather", tag.generation), async move {
                    match client.fetch_weather(tag.coordinates).await {
                        Ok(weather) => Action::WeatherDidLoad { tag, weather },
                        Err(err) => Action::WeatherDidError {
                            tag,
                            message: err.to_string(),
                        },
                    }
                });
            }

            Effect::FetchAddress(tag) => {
                let client = self.geocode.clone();
                tasks.spawn(TaskKey::scoped("address", tag.generation), async move {
                    match client.fetch_address(tag.coordinates).await {
                        Ok(address) => Action::AddressDidLoad { tag, address },
                        Err(err) => Action::AddressDidError {
                            tag,
                            message: err.to_string(),
                        },
                    }
                });
            }
        }
    }
}

/// Store, effect handler and task manager wired together without a terminal
pub struct Pipeline {
    store: EffectStore<AppState, Action, Effect, TracingMiddleware>,
    handler: EffectHandler,
    tasks: TaskManager<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl Pipeline {
    pub fn new(config: &Config) -> Result<Self, SetupError> {
        config.validate()?;
        let handler = EffectHandler::from_config(config)?;
        let state = AppState::from_config(config, handler.is_geolocation_supported());
        Ok(Self::from_parts(handler, state))
    }

    pub fn from_parts(handler: EffectHandler, state: AppState) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: EffectStore::with_middleware(state, reducer, TracingMiddleware),
            handler,
            tasks: TaskManager::new(action_tx),
            action_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Dispatch an action and start any effects it produced
    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.handler.handle(effect, &mut self.tasks);
        }
        result.changed
    }

    /// Queue an action behind any results already waiting
    pub fn enqueue(&self, action: Action) {
        self.tasks.emit(action);
    }

    /// Wait for the next queued action without dispatching it
    pub async fn next_action(&mut self) -> Option<Action> {
        self.action_rx.recv().await
    }

    /// Abort every outstanding task; returns how many were still running
    pub fn shutdown(&mut self) -> usize {
        let running = self.tasks.running_count();
        self.tasks.cancel_all();
        if running > 0 {
            tracing::debug!(running, "aborted outstanding tasks");
        }
        running
    }

    /// Apply results that have already arrived, without waiting
    pub fn drain_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Feed task results back into the store until nothing is outstanding
    pub async fn run_until_idle(&mut self) {
        loop {
            match self.action_rx.try_recv() {
                Ok(action) => {
                    self.dispatch(action);
                    continue;
                }
                Err(mpsc::error::TryRecvError::Disconnected) => break,
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !self.store.state().is_busy() {
                break;
            }
            match self.action_rx.recv().await {
                Some(action) => {
                    self.dispatch(action);
                }
                None => break,
            }
        }
    }
}
