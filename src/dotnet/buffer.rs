use std::{ops::Deref, ptr, slice};

/// A sized, Rust-owned array for receiving heap buffers from the `dotnet`
/// side of the bridge. Behaves as a read-only `&[T]` through `Deref`.
///
/// # Safety
/// The pointer must have been produced by [`allocate_buffer`] so that the
/// memory belongs to Rust's allocator. The memory is freed on drop.
#[repr(C)]
pub struct RawVec<T> {
    data: *mut T,
    len: usize,
    capacity: usize,
}

impl<T> RawVec<T> {
    /// Release the owned memory, leaving the struct empty. Called on `drop`
    /// and safe to call repeatedly.
    pub fn free(&mut self) {
        if !self.data.is_null() {
            drop(unsafe { Vec::from_raw_parts(self.data, self.len, self.capacity) });
            self.data = ptr::null_mut();
            self.len = 0;
            self.capacity = 0;
        }
    }
}

impl<T> Deref for RawVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        if self.data.is_null() {
            &[]
        } else {
            unsafe { slice::from_raw_parts(self.data, self.len) }
        }
    }
}

impl<T> Drop for RawVec<T> {
    fn drop(&mut self) {
        self.free()
    }
}

/// The allocation callback handed to the `dotnet` runtime so the managed
/// bridge can fill buffers that Rust's allocator owns. The runtime writes
/// into the [`RawVec`] at `out`.
pub(crate) extern "system" fn allocate_buffer(size: usize, out: *mut RawVec<u8>) {
    let mut buf = vec![0u8; size];
    let data = buf.as_mut_ptr();
    let len = buf.len();
    let capacity = buf.capacity();
    std::mem::forget(buf);
    // `out` points at uninitialized memory, so write without dropping
    unsafe {
        out.write(RawVec {
            data,
            len,
            capacity,
        })
    };
}
