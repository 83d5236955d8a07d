mod directory_walker;
mod path_validator;

pub use directory_walker::{DirectoryListing, list_directories};
pub use path_validator::validate_directory_exists;
