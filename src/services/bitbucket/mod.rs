mod api;
mod provider;

pub use api::{BitbucketApi, PipelineVariable};
pub use provider::BitbucketProvider;
