//! The contract between update routers and the code that reacts to updates.
//!
//! This crate ships no router. A dispatcher owns a list of [`Handler`]s,
//! asks each whether it wants an update with [`Handler::check_update`] and
//! hands it to [`Handler::handle_update`]; how many handlers run per update
//! and how errors are reported is the dispatcher's choice.

use async_trait::async_trait;

use crate::Bot;
use crate::update::Update;

/// Error type handlers return; the dispatcher decides how to report it.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Whatever drives handlers. Gives them access to the [`Bot`].
pub trait Dispatcher: Send + Sync {
    fn bot(&self) -> &Bot;
}

/// Reacts to a subset of updates.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Whether this handler wants `update`. Must not have side effects.
    fn check_update(&self, update: &Update) -> Result<bool, HandlerError>;

    /// Process `update`. Handlers may write to `update.data` for later
    /// handlers of the same update.
    async fn handle_update(&self, update: &mut Update, dispatcher: &dyn Dispatcher) -> Result<(), HandlerError>;
}
