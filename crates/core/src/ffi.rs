//! C FFI bindings for native callers

use core::slice;

use sha1::Sha1;
use sha2::Sha256;

use crate::{compute_difficulty, decimal_length, is_slow_phase, its_constant_counter_length};

/// Borrow the identity bytes, treating (null, 0) as empty
fn identity_slice<'a>(identity: *const u8, identity_len: usize) -> Option<&'a [u8]> {
    if identity.is_null() {
        return (identity_len == 0).then_some(&[][..]);
    }
    // SAFETY: caller guarantees `identity` points to `identity_len` readable bytes
    Some(unsafe { slice::from_raw_parts(identity, identity_len) })
}

/// SHA-1 difficulty of identity || decimal(counter)
/// Returns 0 for a null identity with non-zero length
#[unsafe(no_mangle)]
pub extern "C" fn tsdiff_difficulty_sha1(
    identity: *const u8,
    identity_len: usize,
    counter: u64,
) -> u32 {
    identity_slice(identity, identity_len)
        .map_or(0, |identity| compute_difficulty::<Sha1>(identity, counter))
}

/// SHA-256 difficulty of identity || decimal(counter)
/// Returns 0 for a null identity with non-zero length
#[unsafe(no_mangle)]
pub extern "C" fn tsdiff_difficulty_sha256(
    identity: *const u8,
    identity_len: usize,
    counter: u64,
) -> u32 {
    identity_slice(identity, identity_len)
        .map_or(0, |identity| compute_difficulty::<Sha256>(identity, counter))
}

/// Number of decimal digits of `counter`
#[unsafe(no_mangle)]
pub extern "C" fn tsdiff_decimal_length(counter: u64) -> u8 {
    decimal_length(counter)
}

#[unsafe(no_mangle)]
pub extern "C" fn tsdiff_is_slow_phase(identity_len: usize, counter: u64) -> bool {
    is_slow_phase(identity_len, counter)
}

/// Write the remaining fast-phase iterations to `out`
/// Returns false (leaving `out` untouched) if the identity is too long or `out` is null
#[unsafe(no_mangle)]
pub extern "C" fn tsdiff_its_until_slow_phase(
    identity_len: usize,
    counter: u64,
    out: *mut u64,
) -> bool {
    if out.is_null() {
        return false;
    }

    match crate::its_until_slow_phase(identity_len, counter) {
        Ok(remaining) => {
            // SAFETY: checked non-null; caller guarantees it is writable
            unsafe { out.write(remaining) };
            true
        }
        Err(_) => false,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn tsdiff_its_constant_counter_length(counter: u64) -> u64 {
    its_constant_counter_length(counter)
}
