//! Container and stream metadata extraction.
//!
//! The scoring engine only ever sees [`ProbeOutput`] records; where they come
//! from is behind the [`MetadataExtractor`] trait so the run driver can be
//! exercised without a real ffprobe binary.

pub mod ffprobe;
pub mod types;

pub use ffprobe::FfprobeExtractor;
pub use types::{Disposition, FormatRecord, ProbeOutput, SideData, StreamRecord};

use crate::utils::Result;
use std::path::Path;

#[allow(async_fn_in_trait)]
pub trait MetadataExtractor {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Reads the stream and format records of `path`.
    ///
    /// Any failure, including malformed tool output, is reported as
    /// [`crate::utils::Error::Extraction`].
    async fn extract(&self, path: &Path) -> Result<ProbeOutput>;
}
