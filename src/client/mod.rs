//! Client half of the tool protocol: transport, session, catalog view, and
//! the generic adapter handed to an agent loop.

pub mod adapter;
pub mod catalog;
pub mod session;
pub mod transport;

pub use adapter::{bind_catalog, BoundTool};
pub use catalog::{merge_catalogs, Catalog};
pub use session::Session;
pub use transport::HttpTransport;
