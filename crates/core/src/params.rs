//! Length-budget parameters of the identity counter encoding
//!
//! These values belong to the enclosing message format and are shared by
//! every deployed counter. They must not be tuned.

/// Total byte budget for identity, counter digits and reserved overhead
pub const TOTAL_LENGTH_BUDGET: usize = 128;

/// Reserved separator byte
pub const RESERVED_SEPARATOR_LENGTH: usize = 1;

/// Reserved fixed-width field (8 bytes)
pub const RESERVED_FIXED_FIELD_LENGTH: usize = 8;

/// Total reserved overhead inside the budget
pub const RESERVED_OVERHEAD: usize = RESERVED_SEPARATOR_LENGTH + RESERVED_FIXED_FIELD_LENGTH;

/// Longest identity for which the remaining-iterations arithmetic is defined (119)
pub const MAX_IDENTITY_LENGTH: usize = TOTAL_LENGTH_BUDGET - RESERVED_OVERHEAD;

/// Decimal digits of `u64::MAX`
pub const MAX_DECIMAL_LENGTH: u8 = 20;

/// SHA-1 output size
pub const SHA1_SIZE: usize = 20;

/// SHA-256 output size
pub const SHA256_SIZE: usize = 32;

/// BLAKE3 output size
pub const BLAKE3_SIZE: usize = 32;
