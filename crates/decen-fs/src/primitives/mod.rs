pub mod atomic_write;
pub mod dir;

pub use atomic_write::{AtomicWriteOptions, atomic_read, atomic_write};
pub use dir::{ensure_dir, file_size};
