//! 服务层

mod batch_runner;

pub use batch_runner::{run_batch, BatchRunner, DEFAULT_MAX_CONCURRENCY};
