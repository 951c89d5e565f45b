//! Read from and write to [FlatGeobuf](https://flatgeobuf.org/) files.

pub use reader::read_flatgeobuf;
pub use writer::write_flatgeobuf;

mod reader;
mod writer;
