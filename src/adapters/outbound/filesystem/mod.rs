/// Filesystem adapters for file I/O operations
mod pin_file_storage;
mod report_writer;
mod scan_file_reader;

pub use pin_file_storage::PinFileStorage;
pub use report_writer::{FileSystemWriter, StdoutPresenter};
pub use scan_file_reader::FileSystemScanReader;
