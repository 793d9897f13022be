//! Typed TraceView resources, one module per API area.

pub mod annotations;
pub mod apps;
pub mod discovery;
pub mod errors;
pub mod hosts;
pub mod latency;
pub mod organization;
pub mod total_requests;

pub use annotations::{AnnotationOptions, Annotations};
pub use apps::{Apps, AssignOptions};
pub use discovery::{Layers, Listing};
pub use errors::Errors;
pub use hosts::Hosts;
pub use latency::{ClientLatency, DataType, Latency, ServerLatency};
pub use organization::Organization;
pub use total_requests::TotalRequests;
