mod credentials;
mod query_params;

pub use credentials::PresentedCredentials;
pub use query_params::QueryParams;
