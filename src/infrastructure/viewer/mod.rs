//! File viewer adapters

mod system_viewer;
mod unsupported;

pub use system_viewer::SystemViewer;
pub use unsupported::UnsupportedViewer;
