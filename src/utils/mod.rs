pub mod error;
pub mod filesystem;
pub mod logging;
pub mod progress;

pub use error::{Error, Result};
pub use filesystem::{expand_inputs, is_media_file, truncate_path_display};
pub use logging::setup_logging;
pub use progress::ProbeSpinner;
