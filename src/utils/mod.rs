pub mod text;

pub use text::{decoded_char_count, strip_slashes};
