// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversions between raw on-chain integers and decimal amounts.

use std::str::FromStr;

use alloy::primitives::U256;
use rust_decimal::Decimal;

/// Decimals of the native currency (1 ether = 10^18 wei).
pub const WEI_DECIMALS: u8 = 18;

/// Decimals between wei and gwei (1 gwei = 10^9 wei).
pub const GWEI_DECIMALS: u32 = 9;

/// Format wei (or token units) to an exact human-readable amount.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, trimmed)
        }
    }
}

/// Normalise a raw amount to `amount / 10^decimals`.
///
/// Exact while the result fits in a `Decimal`; digits past the 28th
/// significant one are rounded. Returns `None` when the integer part alone
/// does not fit.
pub fn normalize(amount: U256, decimals: u8) -> Option<Decimal> {
    Decimal::from_str(&format_amount(amount, decimals)).ok()
}

/// Convert a wei gas price into gwei.
pub fn wei_to_gwei(wei: u128) -> Option<Decimal> {
    let wei = i128::try_from(wei).ok()?;
    Decimal::try_from_i128_with_scale(wei, GWEI_DECIMALS)
        .ok()
        .map(|gwei| gwei.normalize())
}
