mod api;
mod provider;

pub use api::AzureApi;
pub use provider::AzureProvider;
