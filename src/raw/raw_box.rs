use crate::error::{AllocError, Resource};

use std::alloc::Layout;

/// Moves `value` into a fresh heap allocation.
///
/// Unlike `Box::new`, a null return from the allocator is reported as an
/// error instead of aborting. `value` is dropped when the allocation fails.
pub fn try_box<T>(value: T, resource: Resource) -> Result<Box<T>, AllocError> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(Box::new(value));
    }

    unsafe {
        let ptr = std::alloc::alloc(layout) as *mut T;
        if ptr.is_null() {
            return Err(AllocError {
                resource,
                size: layout.size(),
            });
        }
        ptr.write(value);
        Ok(Box::from_raw(ptr))
    }
}

/// Copies `s` into an independently owned `String` of exactly `s.len()` bytes.
pub fn try_copy_str(s: &str) -> Result<String, AllocError> {
    let mut copy = String::new();
    copy.try_reserve_exact(s.len()).map_err(|_| AllocError {
        resource: Resource::String,
        size: s.len(),
    })?;
    copy.push_str(s);
    Ok(copy)
}
