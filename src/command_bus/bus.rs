use async_trait::async_trait;

// ============================================================================
// Command Bus Contracts
// ============================================================================
//
// The dispatch seam between callers that assemble commands and the handlers
// that execute them. Each command type declares the output its handler
// produces, so dispatch stays fully typed end to end.
//
// ============================================================================

/// Marker for dispatchable commands, tying each command type to the output
/// its handler returns
pub trait Command: Send + 'static {
    type Output: Send + 'static;
}

/// Executes a single command type
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> anyhow::Result<C::Output>;
}

/// Routes commands to their registered handlers
#[async_trait]
pub trait CommandBus: Send + Sync {
    async fn handle<C: Command>(&self, command: C) -> Result<C::Output, CommandBusError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CommandBusError {
    #[error("No handler registered for command {0}")]
    NoHandler(&'static str),

    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}
