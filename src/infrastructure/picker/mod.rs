//! File picker adapters

mod path_picker;
mod rfd_picker;

pub use path_picker::PathPicker;
pub use rfd_picker::RfdPicker;
