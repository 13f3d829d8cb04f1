//! Fast/slow phase arithmetic
//!
//! An identity and its counter share a fixed byte budget with reserved
//! protocol overhead:
//!
//! ```text
//! identity_len + decimal_length(counter) + 1 + 8 > 128   =>   slow phase
//! ```
//!
//! While the inequality does not hold the counter is in the fast phase.
//! [`is_slow_phase`] is the only authority on which phase applies;
//! [`its_until_slow_phase`] counts how many increments remain before the
//! counter's decimal width pushes it over the budget.

use crate::counter::decimal_length;
use crate::error::PhaseError;
use crate::params::{MAX_IDENTITY_LENGTH, RESERVED_OVERHEAD, TOTAL_LENGTH_BUDGET};

/// Whether `(identity_len, counter)` exceeds the total length budget
#[inline]
pub fn is_slow_phase(identity_len: usize, counter: u64) -> bool {
    identity_len
        .saturating_add(usize::from(decimal_length(counter)))
        .saturating_add(RESERVED_OVERHEAD)
        > TOTAL_LENGTH_BUDGET
}

/// Counter increments left before the slow phase
///
/// Returns `Ok(0)` when already in the slow phase. Otherwise returns
/// `10^(119 - identity_len) - counter`, the distance to the first counter
/// whose digit count crosses the budget. When that power of ten does not
/// fit in a `u64`, no counter can ever cross and `u64::MAX` is returned.
///
/// Identities longer than [`MAX_IDENTITY_LENGTH`] are rejected.
pub fn its_until_slow_phase(identity_len: usize, counter: u64) -> Result<u64, PhaseError> {
    if identity_len > MAX_IDENTITY_LENGTH {
        return Err(PhaseError::IdentityTooLong {
            length: identity_len,
            max: MAX_IDENTITY_LENGTH,
        });
    }

    if is_slow_phase(identity_len, counter) {
        return Ok(0);
    }

    // Widest counter still in the fast phase; the first slow counter has one more digit.
    let allowed_digits = (MAX_IDENTITY_LENGTH - identity_len) as u32;

    // Fast phase implies counter < 10^allowed_digits, so the subtraction cannot wrap.
    Ok(10u64
        .checked_pow(allowed_digits)
        .map_or(u64::MAX, |first_slow| first_slow - counter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_at_full_budget() {
        // 118 + 1 + 9 = 128, fits
        assert!(!is_slow_phase(118, 0));
        assert!(!is_slow_phase(118, 9));
        // 118 + 2 + 9 = 129
        assert!(is_slow_phase(118, 10));
        // 119 + 1 + 9 = 129
        assert!(is_slow_phase(119, 0));
    }

    #[test]
    fn short_identities_never_slow() {
        // 0 + 19 + 9 = 28
        assert!(!is_slow_phase(0, 10u64.pow(18)));
        // 99 + 20 + 9 = 128
        assert!(!is_slow_phase(99, u64::MAX));
        // 100 + 20 + 9 = 129
        assert!(is_slow_phase(100, u64::MAX));
    }

    #[test]
    fn huge_identity_length_does_not_overflow() {
        assert!(is_slow_phase(usize::MAX, 0));
    }

    #[test]
    fn remaining_iterations_in_fast_phase() {
        assert_eq!(its_until_slow_phase(118, 0), Ok(10));
        assert_eq!(its_until_slow_phase(118, 9), Ok(1));
        assert_eq!(its_until_slow_phase(117, 10), Ok(90));
        assert_eq!(its_until_slow_phase(100, 0), Ok(10u64.pow(19)));
        assert_eq!(
            its_until_slow_phase(100, 10u64.pow(19) - 1),
            Ok(1)
        );
    }

    #[test]
    fn slow_phase_has_no_remaining_iterations() {
        assert_eq!(its_until_slow_phase(118, 10), Ok(0));
        assert_eq!(its_until_slow_phase(119, 0), Ok(0));
        assert_eq!(its_until_slow_phase(100, 10u64.pow(19)), Ok(0));
    }

    #[test]
    fn unreachable_slow_phase_saturates() {
        // 10^(119 - 0) is far beyond u64
        assert_eq!(its_until_slow_phase(0, 10u64.pow(18)), Ok(u64::MAX));
        assert_eq!(its_until_slow_phase(99, u64::MAX), Ok(u64::MAX));
    }

    #[test]
    fn rejects_identity_over_limit() {
        assert_eq!(
            its_until_slow_phase(120, 0),
            Err(PhaseError::IdentityTooLong {
                length: 120,
                max: MAX_IDENTITY_LENGTH
            })
        );
    }
}
