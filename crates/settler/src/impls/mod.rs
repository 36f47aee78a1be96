mod provider;
pub use provider::ProviderClient;
