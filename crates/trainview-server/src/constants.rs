/// Centralized constants for the server layer.

pub mod webhook {
    /// The extraction/training service is expected on a fixed local port.
    pub const HOST: &str = "localhost";
    pub const PORT: u16 = 5002;

    pub const EXTRACT_PATH: &str = "/extract_webhook";
    pub const TRAIN_PATH: &str = "/train_webhook";

    pub const TIMEOUT_SECS: u64 = 30;
}

pub mod server {
    pub const BIND_HOST: &str = "127.0.0.1";
}
