//! Network side: transport seam, paged fetcher and level resolver.

pub mod pager;
pub mod resolver;
pub mod transport;

pub use pager::{Pager, fetch_all};
pub use resolver::resolve_node;
pub use transport::{HttpTransport, Transport, fetch_json};
