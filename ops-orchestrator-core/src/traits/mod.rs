//! 核心抽象 Trait

mod batch_operation;

pub use batch_operation::BatchOperation;
