//! Network layer - gateway ports and their HTTP implementation
//!
//! The Network actor receives gateway commands and sends back responses.

pub mod actor;
pub mod client;
pub mod gateway;

pub use actor::NetworkActor;
pub use client::DataverseClient;
pub use gateway::{AccountGateway, SessionInitializer};
