//! Private-storage copy adapters

mod tokio_copier;

pub use tokio_copier::TokioCopier;
