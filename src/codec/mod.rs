//! Fixed-width element codec
//!
//! Elements are little-endian; byte strings are zero padded to their width.

mod read;
mod write;

pub use read::read_element;
pub use write::encode_element;
