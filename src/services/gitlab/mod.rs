pub(crate) mod api;
mod provider;

pub use api::GitlabApi;
pub use provider::GitlabProvider;
