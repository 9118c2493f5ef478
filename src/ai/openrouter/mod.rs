pub mod chat;
pub mod client;
pub mod models;
pub mod types;

pub use chat::OpenRouterChatClient;
pub use client::OpenRouterHttpClient;
pub use models::OpenRouterModelsClient;
