use reqwest::{Client, ClientBuilder};
use once_cell::sync::Lazy;

// Shared by every outbound call so connections are reused
pub static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});
