// Adapters layer: concrete item sources (directory listing, stdin, fixed lists).

pub mod source;

pub use source::{read_lines, DirectorySource, ListSource, StdinSource};
