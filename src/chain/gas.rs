// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fee estimation for a plain native-currency transfer.

use alloy::primitives::U256;
use rust_decimal::Decimal;

use super::client::ChainReader;
use super::units::wei_to_gwei;
use crate::error::ServiceError;

/// Gas consumed by a plain value transfer.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Gas estimation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasEstimate {
    /// Current gas price in wei
    pub gas_price_wei: u128,
    /// Current gas price in gwei
    pub gas_price_gwei: Decimal,
    /// `gas_price_wei * TRANSFER_GAS_LIMIT`
    pub estimated_fee_wei: U256,
    /// Transaction count of the requested address, if one was given
    pub nonce: Option<u64>,
}

/// Estimate the fee of a transfer on the given chain.
///
/// When `address` is given its nonce is read as well; a failed nonce lookup
/// fails the whole estimate.
pub async fn estimate(
    reader: &dyn ChainReader,
    address: Option<&str>,
) -> Result<GasEstimate, ServiceError> {
    let owner = address.map(ServiceError::parse_address).transpose()?;

    let (gas_price_wei, nonce) = match owner {
        Some(owner) => {
            let (price, nonce) =
                tokio::try_join!(reader.gas_price(), reader.transaction_count(owner))
                    .map_err(|e| ServiceError::GasQueryFailure(e.to_string()))?;
            (price, Some(nonce))
        }
        None => {
            let price = reader
                .gas_price()
                .await
                .map_err(|e| ServiceError::GasQueryFailure(e.to_string()))?;
            (price, None)
        }
    };

    build_estimate(gas_price_wei, nonce)
}

fn build_estimate(gas_price_wei: u128, nonce: Option<u64>) -> Result<GasEstimate, ServiceError> {
    let gas_price_gwei = wei_to_gwei(gas_price_wei).ok_or_else(|| {
        ServiceError::GasQueryFailure(format!("gas price {gas_price_wei} out of range"))
    })?;

    Ok(GasEstimate {
        gas_price_wei,
        gas_price_gwei,
        estimated_fee_wei: U256::from(gas_price_wei) * U256::from(TRANSFER_GAS_LIMIT),
        nonce,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeChain;
    use alloy::primitives::{address, Address};

    const OWNER: Address = address!("0x2222222222222222222222222222222222222222");

    #[tokio::test]
    async fn twenty_gwei_transfer_fee() {
        let chain = FakeChain::default().with_gas_price(20_000_000_000);

        let estimate = estimate(&chain, None).await.unwrap();
        assert_eq!(estimate.gas_price_wei, 20_000_000_000);
        assert_eq!(estimate.gas_price_gwei.to_string(), "20");
        assert_eq!(
            estimate.estimated_fee_wei,
            U256::from(420_000_000_000_000u64)
        );
        assert_eq!(estimate.nonce, None);
    }

    #[test]
    fn fee_is_price_times_transfer_limit() {
        for price in [0u128, 1, 7, 1_500_000_000, 123_456_789_012_345] {
            let estimate = build_estimate(price, None).unwrap();
            assert_eq!(
                estimate.estimated_fee_wei,
                U256::from(price) * U256::from(21_000u64)
            );
        }
    }

    #[tokio::test]
    async fn includes_nonce_when_address_given() {
        let chain = FakeChain::default()
            .with_gas_price(1_000_000_000)
            .with_nonce(OWNER, 7);

        let estimate = estimate(&chain, Some(&OWNER.to_string())).await.unwrap();
        assert_eq!(estimate.nonce, Some(7));
        assert_eq!(estimate.gas_price_gwei, Decimal::ONE);
    }

    #[tokio::test]
    async fn nonce_failure_fails_estimate() {
        let chain = FakeChain::default().with_gas_price(1_000_000_000);

        let err = estimate(&chain, Some(&OWNER.to_string())).await.unwrap_err();
        assert!(matches!(err, ServiceError::GasQueryFailure(_)));
    }

    #[tokio::test]
    async fn gas_price_failure_fails_estimate() {
        let chain = FakeChain::default();
        let err = estimate(&chain, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::GasQueryFailure(_)));
    }

    #[tokio::test]
    async fn invalid_address_is_rejected_before_rpc() {
        let chain = FakeChain::default().with_gas_price(1);
        let err = estimate(&chain, Some("0x1234")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidAddress(_)));
    }
}
