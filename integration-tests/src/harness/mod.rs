pub mod backend;
pub mod tracing;
pub mod upstream;

pub use backend::{backend_config, dispatcher};
pub use self::tracing::{CapturedEvent, captured_events, init_test_tracing};
pub use upstream::{HangingUpstream, RecordedRequest, StubUpstream};
