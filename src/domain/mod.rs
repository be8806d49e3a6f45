pub mod converter;
pub mod eml_file;
pub mod input_source;
pub mod message;
pub mod models;
pub mod msg_file;
pub mod output_path;

// --- public re-exports ---
pub use converter::Converter;
pub use message::{Attachment, Mailbox, StructuredMessage};
pub use models::{ConversionRequest, ConversionResult, FileJob, Outcome};
