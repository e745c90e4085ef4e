//! Equal-split allocation.

use billsplit_core::Money;

/// Split `amount` into `n` shares at cent precision.
///
/// The common share is `amount / n` rounded once. Shares are emitted while the
/// remainder is at least one currency unit; the last emitted share then
/// absorbs whatever is left, so any rounding drift lands on the final
/// participant.
///
/// The loop assumes drift over `n` steps stays below one unit. When it does
/// not (large `n`, or a share close to one unit) the result can hold more or
/// fewer than `n` entries; callers must check the length. A share that rounds
/// to zero yields a single entry holding the whole amount.
pub fn allocate_equal(amount: Money, n: usize) -> Vec<Money> {
    let Some(share) = amount.round_div(n) else {
        return Vec::new();
    };
    // A zero share never shrinks the remainder; the whole amount lands on one entry.
    if share.is_zero() {
        return if amount.is_zero() { Vec::new() } else { vec![amount] };
    }

    let mut shares = Vec::with_capacity(n);
    let mut remaining = amount;
    while !remaining.is_zero() {
        if remaining < Money::UNIT {
            shares.pop();
            shares.push(share + remaining);
            break;
        }
        shares.push(share);
        remaining -= share;
    }

    tracing::debug!(%amount, n, allocated = shares.len(), "equal split allocated");
    shares
}
