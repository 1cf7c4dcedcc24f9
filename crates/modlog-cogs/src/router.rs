//! Event routing table from event kind to subscribed cogs.

use crate::cog::Cog;
use crate::dispatcher::LogDispatcher;
use crate::event::{BotEvent, EventKind};
use dashmap::DashSet;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

/// Errors from loading and unloading cogs.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RouterError {
    /// No cog has that name.
    #[error("No cog named '{0}'")]
    UnknownCog(String),

    /// The cog is already receiving events.
    #[error("Cog '{0}' is already loaded")]
    AlreadyLoaded(String),

    /// The cog is not receiving events.
    #[error("Cog '{0}' is not loaded")]
    NotLoaded(String),
}

/// Routes events to the cogs subscribed to their kind.
///
/// The table is built once; loading and unloading only toggles whether a
/// registered cog receives events.
pub struct EventRouter {
    cogs: Vec<Arc<dyn Cog>>,
    table: HashMap<EventKind, Vec<Arc<dyn Cog>>>,
    loaded: DashSet<&'static str>,
}

impl EventRouter {
    /// Builds the routing table. Every cog starts loaded.
    pub fn new(cogs: Vec<Arc<dyn Cog>>) -> Self {
        let mut registered: Vec<Arc<dyn Cog>> = Vec::with_capacity(cogs.len());
        let mut table: HashMap<EventKind, Vec<Arc<dyn Cog>>> = HashMap::new();
        let loaded = DashSet::new();

        for cog in cogs {
            if registered.iter().any(|existing| existing.name() == cog.name()) {
                warn!("Ignoring duplicate cog '{}'", cog.name());
                continue;
            }

            for kind in cog.subscriptions() {
                table.entry(*kind).or_default().push(Arc::clone(&cog));
            }
            loaded.insert(cog.name());
            debug!(
                "Registered cog '{}' for {:?}",
                cog.name(),
                cog.subscriptions()
            );
            registered.push(cog);
        }

        info!("Event router ready with {} cogs", registered.len());
        Self {
            cogs: registered,
            table,
            loaded,
        }
    }

    /// Names of all registered cogs, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.cogs.iter().map(|cog| cog.name()).collect()
    }

    /// Whether the cog is currently receiving events.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains(name)
    }

    /// Number of registered cogs subscribed to `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.table.get(&kind).map_or(0, Vec::len)
    }

    fn find(&self, name: &str) -> Result<&'static str, RouterError> {
        self.cogs
            .iter()
            .map(|cog| cog.name())
            .find(|registered| *registered == name)
            .ok_or_else(|| RouterError::UnknownCog(name.to_string()))
    }

    /// Starts routing events to the cog.
    pub fn load(&self, name: &str) -> Result<(), RouterError> {
        let name = self.find(name)?;
        if !self.loaded.insert(name) {
            return Err(RouterError::AlreadyLoaded(name.to_string()));
        }
        info!("Loaded cog '{name}'");
        Ok(())
    }

    /// Stops routing events to the cog.
    pub fn unload(&self, name: &str) -> Result<(), RouterError> {
        let name = self.find(name)?;
        if self.loaded.remove(name).is_none() {
            return Err(RouterError::NotLoaded(name.to_string()));
        }
        info!("Unloaded cog '{name}'");
        Ok(())
    }

    /// Unloads and loads the cog again.
    pub fn reload(&self, name: &str) -> Result<(), RouterError> {
        self.unload(name)?;
        self.load(name)
    }

    /// Runs every loaded subscriber of the event's kind concurrently.
    ///
    /// Handler errors are logged and do not affect other subscribers.
    pub async fn dispatch(&self, event: &BotEvent, dispatcher: &dyn LogDispatcher) {
        let kind = event.kind();
        let Some(subscribers) = self.table.get(&kind) else {
            trace!(?kind, "No cog subscribed");
            return;
        };

        let handlers = subscribers
            .iter()
            .filter(|cog| self.is_loaded(cog.name()))
            .map(|cog| async move {
                if let Err(e) = cog.handle(event, dispatcher).await {
                    error!(cog = cog.name(), ?kind, guild = %event.guild_id(), "Cog failed to handle event: {e}");
                }
            });

        join_all(handlers).await;
    }
}
