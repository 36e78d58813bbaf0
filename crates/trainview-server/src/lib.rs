pub mod constants;
pub mod routes;
pub mod webhook;

pub use routes::{router, AppState};
pub use webhook::WebhookClient;
