/// Network adapters for external API calls
mod backend_client;
mod nvd_client;

pub use backend_client::BackendClient;
pub use nvd_client::NvdClient;
