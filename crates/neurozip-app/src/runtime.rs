//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: session state machine
//! - [`Transport`]: service calls, each on its own task
//! - [`Driver`]: platform-specific input and rendering
//!
//! The App is only ever touched from the loop itself. Service calls report
//! back through a channel as [`AppEvent::Completed`], so rendering continues
//! while a call is outstanding.

use neurozip_client::{Request, Transport};
use tokio::{sync::mpsc, time::Instant};

use crate::{App, AppAction, AppEvent, Driver, RequestToken, ServiceStatus};

/// Generic runtime that orchestrates App, Transport, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `T`: Transport to the compression service
pub struct Runtime<D, T>
where
    D: Driver,
    T: Transport,
{
    driver: D,
    transport: T,
    app: App,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl<D, T> Runtime<D, T>
where
    D: Driver,
    T: Transport,
{
    /// Create a new runtime with the given driver and transport.
    pub fn new(driver: D, transport: T, server_addr: String) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self { driver, transport, app: App::new(server_addr), events_tx, events_rx }
    }

    /// Run the main event loop.
    ///
    /// 1. Probes the service and renders the initial screen
    /// 2. Feeds driver input and request completions to the App
    /// 3. Executes the resulting actions
    ///
    /// Returns when the App asks to quit, or once input is exhausted and the
    /// run in flight (if any) has been applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        let actions = self.app.probe_service();
        let mut quit = self.process_actions(actions)?;

        while !quit {
            quit = tokio::select! {
                event = self.driver.poll_event() => match event? {
                    Some(event) => self.dispatch_event(event)?,
                    None => {
                        self.drain().await?;
                        true
                    },
                },
                Some(event) = self.events_rx.recv() => self.dispatch_event(event)?,
            };
        }

        self.driver.stop();
        Ok(())
    }

    /// Feed one event to the App and execute its actions.
    ///
    /// Returns `true` if should quit.
    fn dispatch_event(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let actions = self.app.handle(event);
        self.process_actions(actions)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                AppAction::Dispatch { token, request } => self.spawn_request(token, request),
                AppAction::ProbeService => self.spawn_probe(),
            }
        }
        Ok(false)
    }

    /// Input is gone: wait for the run in flight so its result is not lost.
    async fn drain(&mut self) -> Result<(), D::Error> {
        while self.app.is_busy() {
            let Some(event) = self.events_rx.recv().await else {
                break;
            };
            if self.dispatch_event(event)? {
                break;
            }
        }
        Ok(())
    }

    /// Execute a request on its own task and report the completion.
    fn spawn_request(&self, token: RequestToken, request: Request) {
        tracing::debug!(
            %token,
            mode = %request.mode(),
            chars = request.input().chars().count(),
            "dispatching"
        );

        let transport = self.transport.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let result = transport.execute(&request).await;
            let elapsed = started.elapsed();

            match &result {
                Ok(payload) => {
                    tracing::debug!(%token, ?elapsed, chars = payload.chars().count(), "completed");
                },
                Err(e) => tracing::warn!(%token, ?elapsed, error = %e, "request failed"),
            }

            let result = result.map_err(|e| e.to_string());
            let _ = events.send(AppEvent::Completed { token, result, elapsed });
        });
    }

    /// Probe service health on its own task.
    fn spawn_probe(&self) {
        let transport = self.transport.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let status = match transport.health().await {
                Ok(health) if health.is_ok() => ServiceStatus::Online,
                Ok(health) => ServiceStatus::Offline {
                    reason: health.message.unwrap_or(health.status),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "service probe failed");
                    ServiceStatus::Offline { reason: e.to_string() }
                },
            };
            let _ = events.send(AppEvent::Service(status));
        });
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
