pub mod batch;
pub mod endpoint;
pub mod error;
pub mod extractor;
pub mod merger;
pub mod pipeline;
pub mod resampler;
pub mod source;
