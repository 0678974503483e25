//! Session state machine for the fridge photo → recipe flow.
//!
//! - `orchestrator`: the [`Session`] that owns state and drives uploads
//! - `state`: [`SessionState`], the single mutable record of a session
//! - `view`: [`select_view`], the pure state → screen mapping
//! - `config`: limits, filters and service endpoints
//!
//! ```ignore
//! let client = KitchenClient::new(config.client.clone())?;
//! let mut session = Session::new(client.clone(), client, config.session);
//! session.start();
//! session.upload(ImageFile::new("fridge.jpg", bytes)).await?;
//! render(session.view(), session.state().error());
//! ```

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod state;
pub mod view;

pub use config::{AppConfig, ConfigError, SessionConfig};
pub use error::SessionError;
pub use orchestrator::{Session, UploadOutcome};
pub use state::SessionState;
pub use view::{View, select_view};
