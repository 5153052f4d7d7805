mod raw_box;

pub use self::raw_box::{try_box, try_copy_str};
