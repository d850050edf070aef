//! Equal allocation of an amount across recipients.
//!
//! The sum of allocations always equals the original total exactly:
//! 1. Every recipient gets `floor(total / count)` minor units
//! 2. The `total mod count` leftover units go one each to the first
//!    recipients in insertion order

use tripsplit_shared::types::Money;

/// Allocation utility for distributing amounts.
pub struct AllocationUtil;

impl AllocationUtil {
    /// Allocate `total` equally across `count` recipients.
    ///
    /// # Example
    ///
    /// ```
    /// use tripsplit_core::split::AllocationUtil;
    /// use tripsplit_shared::types::Money;
    ///
    /// // 100.00 / 3 = [33.34, 33.33, 33.33]
    /// let result = AllocationUtil::allocate_equal(Money::from_major(100), 3);
    /// assert_eq!(result[0], Money::from_minor(3_334));
    /// assert_eq!(result.iter().sum::<Money>(), Money::from_major(100));
    /// ```
    #[must_use]
    pub fn allocate_equal(total: Money, count: usize) -> Vec<Money> {
        let Ok(divisor) = i64::try_from(count) else {
            return vec![];
        };
        if divisor == 0 {
            return vec![];
        }

        let base = total.minor().div_euclid(divisor);
        let extra_count = usize::try_from(total.minor().rem_euclid(divisor)).unwrap_or(0);

        (0..count)
            .map(|i| {
                if i < extra_count {
                    Money::from_minor(base + 1)
                } else {
                    Money::from_minor(base)
                }
            })
            .collect()
    }
}
