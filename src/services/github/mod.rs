mod api;
mod provider;

pub use api::GithubApi;
pub use provider::GithubProvider;
