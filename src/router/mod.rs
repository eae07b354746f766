// Router module
// Public interface for routing decisions

mod decision;

pub use decision::{decide, estimated_response, estimated_response_for_code, RouteDecision};
