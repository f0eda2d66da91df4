//! Environment service.
//!
//! Owns the currently open environment. Other components never reach into
//! it; they ask with [`FetchOpenedEnvironment`] and listen for
//! [`EnvironmentChanged`] and [`EnvironmentReset`].

use sdmm_core::event_bus::events::model::Environment;
use sdmm_core::event_bus::events::reaction::environment::{EnvironmentChanged, EnvironmentReset};
use sdmm_core::event_bus::events::trigger::environment::FetchOpenedEnvironment;
use sdmm_core::{thread_safe_none, DispatchError, EventBus, Subscriptions, ThreadSafeOption};

/// Serves the open environment over the bus
pub struct EnvironmentService {
    bus: EventBus,
    current: ThreadSafeOption<Environment>,
    _subscriptions: Subscriptions,
}

impl EnvironmentService {
    pub fn new(bus: &EventBus) -> Self {
        let current = thread_safe_none::<Environment>();
        let mut subscriptions = Subscriptions::new(bus);

        let opened = current.clone();
        subscriptions.sign::<FetchOpenedEnvironment, _>(move |event| {
            // Nothing open means no reply. The lock is released before
            // replying since a continuation may ask again.
            let environment = opened.lock().clone();
            if let Some(environment) = environment {
                event.reply(environment);
            }
        });

        Self {
            bus: bus.clone(),
            current,
            _subscriptions: subscriptions,
        }
    }

    /// Make `environment` current and announce it
    pub fn open(&self, environment: Environment) -> Result<(), DispatchError> {
        tracing::info!(
            "Opening environment {} ({} types)",
            environment.name,
            environment.items.len()
        );
        *self.current.lock() = Some(environment.clone());
        self.bus.post(EnvironmentChanged(environment))?;
        Ok(())
    }

    /// Close the current environment, if any
    pub fn close(&self) -> Result<(), DispatchError> {
        if self.current.lock().take().is_none() {
            return Ok(());
        }
        tracing::info!("Closing environment");
        self.bus.post(EnvironmentReset)?;
        Ok(())
    }

    /// Name of the open environment
    pub fn current_name(&self) -> Option<String> {
        self.current.lock().as_ref().map(|env| env.name.clone())
    }
}
