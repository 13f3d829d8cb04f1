//! Canonical decimal rendering of identity counters
//!
//! Counters enter the hashed message as base-10 ASCII with no leading
//! zeros ("0" for zero). Rendering happens into a fixed stack buffer so the
//! engine never allocates per counter.

use crate::params::MAX_DECIMAL_LENGTH;

const BUF_LEN: usize = MAX_DECIMAL_LENGTH as usize;

/// Canonical decimal digits of a counter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecimalCounter {
    buf: [u8; BUF_LEN],
    start: usize,
}

impl DecimalCounter {
    /// ASCII digits, most significant first
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    /// Number of digits (always equal to `decimal_length` of the counter)
    #[inline]
    pub fn len(&self) -> usize {
        BUF_LEN - self.start
    }

    /// Never true: zero renders as "0"
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl AsRef<[u8]> for DecimalCounter {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Render `counter` as canonical decimal ASCII
pub fn encode_counter(counter: u64) -> DecimalCounter {
    let mut buf = [b'0'; BUF_LEN];
    let mut start = BUF_LEN;
    let mut n = counter;

    loop {
        start -= 1;
        buf[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }

    DecimalCounter { buf, start }
}

/// Number of base-10 digits of `n` (1 for zero, 20 for `u64::MAX`)
#[inline]
pub fn decimal_length(n: u64) -> u8 {
    n.checked_ilog10().map_or(1, |log| log as u8 + 1)
}

/// Further counter values that keep the current decimal length
///
/// `10^decimal_length(counter) - counter`, or `u64::MAX` once the counter
/// already has 20 digits (the width can no longer grow).
pub fn its_constant_counter_length(counter: u64) -> u64 {
    10u64
        .checked_pow(u32::from(decimal_length(counter)))
        .map_or(u64::MAX, |next_width| next_width - counter)
}
