//! HTTP client for the relay API, used by the terminal chat.

pub mod relay;

pub use relay::HttpRelayClient;
