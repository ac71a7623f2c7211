mod middleware;
mod public;

pub use middleware::{EdgeDecision, EdgePolicy, RequestContext};
pub use public::{HttpState, build_router};
