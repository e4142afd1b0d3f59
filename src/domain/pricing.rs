//! Exact SOL <-> lamport conversion

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use crate::shared::errors::PriceError;

/// Convert a decimal SOL price into lamports without going through floats.
///
/// Prices finer than one lamport are rejected rather than rounded, so a
/// catalog entry always maps to exactly one on-chain amount.
pub fn sol_to_lamports(price: Decimal) -> Result<u64, PriceError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(PriceError::Negative(price.to_string()));
    }

    let scaled = price
        .checked_mul(Decimal::from(LAMPORTS_PER_SOL))
        .ok_or_else(|| PriceError::Overflow(price.to_string()))?;

    if !scaled.fract().is_zero() {
        return Err(PriceError::SubLamportPrecision(price.to_string()));
    }

    scaled
        .trunc()
        .to_u64()
        .ok_or_else(|| PriceError::Overflow(price.to_string()))
}

/// Lamports back to a normalized SOL decimal, for display
pub fn lamports_to_sol(lamports: u64) -> Decimal {
    (Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_SOL)).normalize()
}

/// Format SOL amount with unit
pub fn format_sol(amount: Decimal) -> String {
    format!("{} SOL", amount)
}
