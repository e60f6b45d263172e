pub mod backend;
pub mod host;

pub use backend::Backend;
pub use host::ApplicationHost;
