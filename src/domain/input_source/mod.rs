pub mod directory_path;
#[allow(clippy::module_inception)]
pub mod input_source;
pub mod msg_file_path;
pub mod path_error;
