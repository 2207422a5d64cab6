pub mod batch;
pub mod palette_file;

pub use batch::{discover_images, BatchFailure, BatchJob, BatchRunner, BatchSummary, ImageProcessor};
pub use palette_file::{format_palette, load_palette, parse_palette, write_sample_palette, SAMPLE_PALETTE};
