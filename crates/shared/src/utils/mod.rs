mod logs;
mod metrics;
mod order_id;
mod otel;
mod shutdown;

pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status};
pub use self::order_id::generate_order_id;
pub use self::otel::{OperationTracer, Telemetry, TracingContext};
pub use self::shutdown::shutdown_signal;
