use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::bus::{Command, CommandBus, CommandBusError, CommandHandler};

// ============================================================================
// In-Memory Command Bus
// ============================================================================
//
// Routes each command type to exactly one registered handler. The registry
// is built once at wiring time and never mutated afterwards, so dispatch
// needs no locking.
//
// Handlers are stored type-erased and recovered through a downcast keyed by
// the command's TypeId.
//
// ============================================================================

pub struct InMemoryCommandBus {
    handlers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl InMemoryCommandBus {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register the handler for a command type, replacing any previous one
    pub fn register<C, H>(mut self, handler: Arc<H>) -> Self
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let handler: Arc<dyn CommandHandler<C>> = handler;
        let previous = self.handlers.insert(TypeId::of::<C>(), Box::new(handler));

        if previous.is_some() {
            tracing::warn!(
                command = std::any::type_name::<C>(),
                "Replacing handler already registered for command type"
            );
        }

        self
    }

    fn handler_for<C: Command>(&self) -> Option<&Arc<dyn CommandHandler<C>>> {
        self.handlers
            .get(&TypeId::of::<C>())
            .and_then(|entry| entry.downcast_ref::<Arc<dyn CommandHandler<C>>>())
    }
}

impl Default for InMemoryCommandBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn handle<C: Command>(&self, command: C) -> Result<C::Output, CommandBusError> {
        let handler = self
            .handler_for::<C>()
            .ok_or_else(|| CommandBusError::NoHandler(std::any::type_name::<C>()))?;

        let dispatch_id = Uuid::new_v4();
        tracing::debug!(
            dispatch_id = %dispatch_id,
            command = std::any::type_name::<C>(),
            "Dispatching command"
        );

        let output = handler.handle(command).await?;

        tracing::debug!(dispatch_id = %dispatch_id, "Command handled");

        Ok(output)
    }
}

// ============================================================================
// Tests
// ============================================================================
