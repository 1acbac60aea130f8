pub mod graph_service;
pub mod postprocess;
pub mod query_service;

pub use graph_service::GraphService;
pub use query_service::QueryService;
