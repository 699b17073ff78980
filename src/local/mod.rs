pub mod monitor;
pub mod process_file;
