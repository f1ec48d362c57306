//! Core type definitions for the GHO bridge widget
//!
//! Addresses, hashes and 256-bit integers come from `ethers`; this module
//! adds the token-amount handling the card needs on top of them.

use ethers::utils::{format_units, parse_units, to_checksum};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::errors::AmountError;

pub use ethers::types::{Address, Bytes, TxHash, U256};

/// EVM chain id
pub type ChainId = u64;

/// Largest number of decimal digits that always fits in a U256
const MAX_U256_DIGITS: usize = 77;

/// EIP-55 checksummed form, as wallets and the points API expect it
pub fn checksummed(address: &Address) -> String {
    to_checksum(address, None)
}

/// Shortened form for buttons and labels, e.g. `0x742d...bD08`
pub fn short_address(address: &Address) -> String {
    let full = checksummed(address);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Token amount in base units (the smallest integer denomination).
///
/// Serialized as a decimal string, since 18-decimal values exceed the
/// precision of JSON numbers. Deserializes from decimal strings, `0x` hex
/// strings, or unsigned JSON integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(U256);

impl TokenAmount {
    pub const ZERO: Self = Self(U256([0; 4]));

    pub fn from_base_units(units: impl Into<U256>) -> Self {
        Self(units.into())
    }

    pub fn base_units(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse a human-readable decimal string (e.g. `"10.5"`) into base units.
    ///
    /// Accepts surrounding whitespace, an optional single `.`, and at most
    /// `decimals` fractional digits. Signs, exponents and separators are rejected.
    pub fn parse_decimal(input: &str, decimals: u32) -> Result<Self, AmountError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        // parse_units tolerates '_' and '-' and truncates extra decimals,
        // so the shape is checked here first.
        let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(AmountError::NotNumeric {
                input: input.to_string(),
            });
        }

        if frac_part.len() > decimals as usize {
            return Err(AmountError::TooManyDecimals { max: decimals });
        }

        let significant = int_part.trim_start_matches('0').len();
        if significant + decimals as usize > MAX_U256_DIGITS {
            return Err(AmountError::Overflow);
        }

        let units: U256 = parse_units(s, decimals)
            .map_err(|_| AmountError::Overflow)?
            .into();
        Ok(Self(units))
    }

    /// Parse a raw base-unit string as returned by APIs (decimal or `0x` hex).
    pub fn parse_base_units(input: &str) -> Result<Self, AmountError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => (hex, 16),
            None => (s, 10),
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(AmountError::NotNumeric {
                input: input.to_string(),
            });
        }

        U256::from_str_radix(digits, radix)
            .map(Self)
            .map_err(|_| AmountError::Overflow)
    }

    /// Format with exactly `places` fractional digits, rounding half up.
    pub fn to_fixed(&self, decimals: u32, places: u32) -> String {
        if places >= decimals {
            let mut out = units_string(self.0, decimals);
            if decimals == 0 && places > 0 {
                out.push('.');
            }
            out.extend(std::iter::repeat('0').take((places - decimals) as usize));
            return out;
        }

        let divisor = U256::exp10((decimals - places) as usize);
        let (quotient, remainder) = self.0.div_mod(divisor);
        let rounded = if remainder >= divisor - remainder {
            quotient.saturating_add(U256::one())
        } else {
            quotient
        };
        units_string(rounded, places)
    }

    /// Full-precision decimal string with trailing zeros trimmed (e.g. `"12.5"`).
    pub fn to_decimal_string(&self, decimals: u32) -> String {
        trim_fraction(units_string(self.0, decimals))
    }

    /// Display form: rounded to at most `max_places` fractional digits,
    /// trailing zeros trimmed, thousands grouped with commas.
    pub fn to_display(&self, decimals: u32, max_places: u32) -> String {
        let fixed = trim_fraction(self.to_fixed(decimals, max_places.min(decimals)));
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
        let grouped = group_thousands(int_part);
        if frac_part.is_empty() {
            grouped
        } else {
            format!("{}.{}", grouped, frac_part)
        }
    }
}

impl From<U256> for TokenAmount {
    fn from(units: U256) -> Self {
        Self(units)
    }
}

impl From<TokenAmount> for U256 {
    fn from(amount: TokenAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = TokenAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a base-unit amount as a decimal string, hex string, or integer")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(TokenAmount(U256::from(v)))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
                Ok(TokenAmount(U256::from(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                TokenAmount::parse_base_units(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Render `units` as `int.frac` with exactly `places` fractional digits.
fn units_string(units: U256, places: u32) -> String {
    if places == 0 {
        return units.to_string();
    }
    // Only fails for 78+ places, which no token uses.
    format_units(units, places).unwrap_or_else(|_| units.to_string())
}

fn trim_fraction(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Constants
pub mod constants {
    use super::ChainId;
    use ethers::types::{Address, H160};

    /// GHO uses 18 decimals on every chain
    pub const GHO_DECIMALS: u32 = 18;

    /// Display symbol
    pub const GHO_SYMBOL: &str = "GHO";

    /// Ethereum mainnet
    pub const ETHEREUM_CHAIN_ID: ChainId = 1;

    /// Lens chain
    pub const LENS_CHAIN_ID: ChainId = 232;

    /// GHO token on Ethereum mainnet (bridged asset, balance source)
    /// `0x40D16FC0246aD3160Ccc09B8D0D3A2cD28aE6C2f`
    pub const GHO_MAINNET: Address = H160([
        0x40, 0xd1, 0x6f, 0xc0, 0x24, 0x6a, 0xd3, 0x16, 0x0c, 0xcc, 0x09, 0xb8, 0xd0, 0xd3,
        0xa2, 0xcd, 0x28, 0xae, 0x6c, 0x2f,
    ]);

    /// Input token used for fee suggestions and deposit limits
    /// `0x1ff1dC3cB9eeDbC6Eb2d99C03b30A05cA625fB5a`
    pub const GHO_ROUTE_INPUT: Address = H160([
        0x1f, 0xf1, 0xdc, 0x3c, 0xb9, 0xee, 0xdb, 0xc6, 0xeb, 0x2d, 0x99, 0xc0, 0x3b, 0x30,
        0xa0, 0x5c, 0xa6, 0x25, 0xfb, 0x5a,
    ]);

    /// Output token on Lens used for fee suggestions and deposit limits
    /// `0x6bDc36E20D267Ff0dd6097799f82e78907105e2F`
    pub const GHO_LENS_OUTPUT: Address = H160([
        0x6b, 0xdc, 0x36, 0xe2, 0x0d, 0x26, 0x7f, 0xf0, 0xdd, 0x60, 0x97, 0x79, 0x9f, 0x82,
        0xe7, 0x89, 0x07, 0x10, 0x5e, 0x2f,
    ]);

    /// Native-asset sentinel used as the swap output token
    pub const ZERO_ADDRESS: Address = H160([0; 20]);
}
