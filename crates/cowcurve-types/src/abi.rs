//! Canonical 32-byte word encoding.
//!
//! Every value is encoded as one big-endian 32-byte word, left-padded with
//! zeros, exactly like a static Solidity ABI tuple. Decoding is strict: any
//! non-zero padding is rejected so that one value has exactly one encoding.

use alloy_primitives::{Address, B256, U256};

use crate::{CowCurveError, Result};

/// One encoded word.
pub type Word = [u8; 32];

#[must_use]
pub fn address_word(value: Address) -> Word {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(value.as_slice());
    word
}

#[must_use]
pub fn u256_word(value: U256) -> Word {
    value.to_be_bytes::<32>()
}

#[must_use]
pub fn u128_word(value: u128) -> Word {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

#[must_use]
pub fn u32_word(value: u32) -> Word {
    let mut word = [0u8; 32];
    word[28..].copy_from_slice(&value.to_be_bytes());
    word
}

#[must_use]
pub fn bool_word(value: bool) -> Word {
    let mut word = [0u8; 32];
    word[31] = u8::from(value);
    word
}

#[must_use]
pub fn b256_word(value: B256) -> Word {
    value.0
}

/// Sequential reader over a buffer of whole words.
pub struct WordReader<'a> {
    bytes: &'a [u8],
    index: usize,
}

impl<'a> WordReader<'a> {
    /// Create a reader that expects exactly `words` words.
    ///
    /// # Errors
    /// Returns [`CowCurveError::Serialization`] if the buffer has any other length.
    pub fn new(bytes: &'a [u8], words: usize) -> Result<Self> {
        if bytes.len() != words * 32 {
            return Err(CowCurveError::Serialization(format!(
                "expected {} bytes, got {}",
                words * 32,
                bytes.len()
            )));
        }
        Ok(Self { bytes, index: 0 })
    }

    fn next_word(&mut self) -> Result<&'a [u8]> {
        let start = self.index * 32;
        let word = self
            .bytes
            .get(start..start + 32)
            .ok_or_else(|| CowCurveError::Serialization("read past end of payload".into()))?;
        self.index += 1;
        Ok(word)
    }

    fn padded(&mut self, value_len: usize, what: &str) -> Result<&'a [u8]> {
        let index = self.index;
        let word = self.next_word()?;
        let (padding, value) = word.split_at(32 - value_len);
        if padding.iter().any(|b| *b != 0) {
            return Err(CowCurveError::Serialization(format!(
                "word {index}: dirty padding in {what}"
            )));
        }
        Ok(value)
    }

    pub fn address(&mut self) -> Result<Address> {
        Ok(Address::from_slice(self.padded(20, "address")?))
    }

    pub fn u256(&mut self) -> Result<U256> {
        Ok(U256::from_be_slice(self.next_word()?))
    }

    /// A `uint160`, the width of a sqrt price.
    pub fn u160(&mut self) -> Result<U256> {
        Ok(U256::from_be_slice(self.padded(20, "uint160")?))
    }

    pub fn u128(&mut self) -> Result<u128> {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(self.padded(16, "uint128")?);
        Ok(u128::from_be_bytes(buf))
    }

    pub fn u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.padded(4, "uint32")?);
        Ok(u32::from_be_bytes(buf))
    }

    pub fn bool(&mut self) -> Result<bool> {
        let index = self.index;
        match self.padded(1, "bool")?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CowCurveError::Serialization(format!(
                "word {index}: invalid bool {other}"
            ))),
        }
    }

    pub fn b256(&mut self) -> Result<B256> {
        Ok(B256::from_slice(self.next_word()?))
    }
}
