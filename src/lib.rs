//! # Accounts TUI
//!
//! A terminal client for the `account` table of a Dataverse environment.
//!
//! ## Features
//! - Session handshake (WhoAmI) before any data access
//! - Account list with name, number, email and phone
//! - Create and edit through a form dialog
//! - Delete with confirmation
//! - Persisted color theme
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod error;
pub mod config;
pub mod models;
pub mod theme;
pub mod storage;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Account, AccountFields, MutationKind};
pub use error::{GatewayError, SettingsError, ValidationError};
pub use config::{AppConfig, CliArgs};
pub use theme::ThemeName;
pub use storage::SettingsStore;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{AccountGateway, DataverseClient, NetworkActor, SessionInitializer};
