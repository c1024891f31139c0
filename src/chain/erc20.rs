// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ERC-20 token contract interactions.

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    sol,
};

use super::client::{ChainError, ChainReader};
use super::tokens::{TokenAbi, TokenDescriptor};
use crate::error::ServiceError;

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
    }
}

/// ERC-20 contract wrapper.
pub struct Erc20Contract<P> {
    contract: IERC20::IERC20Instance<P>,
}

impl<P: Provider + Clone> Erc20Contract<P> {
    pub fn new(provider: &P, contract_address: Address) -> Self {
        Self {
            contract: IERC20::new(contract_address, provider.clone()),
        }
    }

    /// Get the token decimals.
    pub async fn decimals(&self) -> Result<u8, ChainError> {
        self.contract
            .decimals()
            .call()
            .await
            .map_err(|e| ChainError::ContractError(format!("decimals() failed: {e}")))
    }

    /// Get the raw balance of an address.
    pub async fn balance_of(&self, owner: Address) -> Result<U256, ChainError> {
        self.contract
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| ChainError::ContractError(format!("balanceOf() failed: {e}")))
    }

    /// Fetch `balanceOf` and `decimals` as one unit; both must succeed.
    pub async fn balance_with_decimals(&self, owner: Address) -> Result<(U256, u8), ChainError> {
        tokio::try_join!(self.balance_of(owner), self.decimals())
    }
}

/// Raw token balance as read from the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTokenBalance {
    pub raw: U256,
    /// Decimals read live from the contract, never the catalog hint.
    pub decimals: u8,
}

/// Read a token balance for `owner`, failing with `ContractCallFailure` if
/// either contract call errors.
pub async fn read_balance(
    reader: &dyn ChainReader,
    token: &TokenDescriptor,
    owner: Address,
) -> Result<RawTokenBalance, ServiceError> {
    let result = match token.abi {
        TokenAbi::Erc20 => reader.erc20_balance(token.contract_address, owner).await,
    };

    let (raw, decimals) = result.map_err(|e| ServiceError::ContractCallFailure {
        symbol: token.symbol.clone(),
        reason: e.to_string(),
    })?;

    if let Some(hint) = token.decimals_hint {
        if hint != decimals {
            tracing::debug!(
                symbol = %token.symbol,
                hint,
                decimals,
                "Token decimals differ from catalog hint"
            );
        }
    }

    Ok(RawTokenBalance { raw, decimals })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeChain;
    use alloy::primitives::address;

    const OWNER: Address = address!("0x1111111111111111111111111111111111111111");

    fn usdc_with_hint(hint: Option<u8>) -> TokenDescriptor {
        TokenDescriptor::erc20(
            "USDC",
            address!("0x94a9D9AC8a22534E3FaCa9F4e7F2E2cf85d5E4C8"),
            hint,
        )
    }

    #[tokio::test]
    async fn read_balance_uses_live_decimals() {
        let token = usdc_with_hint(Some(18));
        let chain = FakeChain::default().with_token(
            token.contract_address,
            OWNER,
            U256::from(1_000_000u64),
            6,
        );

        let balance = read_balance(&chain, &token, OWNER).await.unwrap();
        assert_eq!(balance.raw, U256::from(1_000_000u64));
        assert_eq!(balance.decimals, 6);
    }

    #[tokio::test]
    async fn read_balance_maps_contract_errors() {
        let token = usdc_with_hint(None);
        let chain = FakeChain::default();

        let err = read_balance(&chain, &token, OWNER).await.unwrap_err();
        match err {
            ServiceError::ContractCallFailure { symbol, reason } => {
                assert_eq!(symbol, "USDC");
                assert!(reason.contains("reverted"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
