// Estate Client - REST collaborator for the CRM forms
// Auth, properties and leads over HTTP, plus config and stored credentials

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod session;

pub use client::ApiClient;
pub use config::{ApiConfig, Config, StorageConfig, UploadsConfig};
pub use credentials::{CredentialStore, FileStore, MemoryStore, TOKEN_KEY, USER_KEY};
pub use error::ApiError;
pub use models::{ApiResponse, AuthData, Property, PropertyImage, User};
pub use session::AuthSession;
