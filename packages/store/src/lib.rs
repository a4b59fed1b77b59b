pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod page;
pub mod session;
pub mod tool;
pub mod users;

mod memory;
pub use memory::{BackendCall, MemoryBackend, MemoryStore, RecordingNavigator};

pub use backend::{
    connect_tool, follow_redirect, run_ai_action, sync_channels, AiResponse, Backend, Navigator,
    OAuthStart,
};
pub use config::{AppConfig, BackendConfig};
pub use error::StoreError;
pub use models::{Channel, Settings, UserId, UserRecord};
pub use page::{AiPane, ChannelSync, PageState, SaveStatus};
pub use session::Session;
pub use tool::{OAuthRoutes, Tool};
pub use users::{login, save_settings, LoginOutcome, UserStore};
