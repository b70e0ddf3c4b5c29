use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing an IPPAN address string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressError {
    #[error("address must start with 'i'")]
    InvalidPrefix,
    #[error("address must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("address payload is not valid hexadecimal")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("address payload must be exactly 32 bytes")]
    InvalidPayloadLength,
}

/// Number of raw bytes contained in an address.
pub const ADDRESS_BYTES: usize = 32;
/// Expected string length of an encoded address (prefix + 64 hex chars).
pub const ADDRESS_STRING_LENGTH: usize = 1 + ADDRESS_BYTES * 2;

/// Domain separator for module account derivation.
const MODULE_ACCOUNT_DOMAIN: &[u8] = b"module:";

/// Encode a 32-byte account identifier into the human readable IPPAN format.
///
/// The encoded address always begins with the character `i` followed by the
/// hexadecimal representation of the raw bytes.
pub fn encode_address(bytes: &[u8; ADDRESS_BYTES]) -> String {
    let mut encoded = String::with_capacity(ADDRESS_STRING_LENGTH);
    encoded.push('i');
    encoded.push_str(&hex::encode(bytes));
    encoded
}

/// Attempt to decode a human readable IPPAN address string into the raw bytes.
pub fn decode_address(address: &str) -> Result<[u8; ADDRESS_BYTES], AddressError> {
    if !address.starts_with('i') {
        return Err(AddressError::InvalidPrefix);
    }

    if address.len() != ADDRESS_STRING_LENGTH {
        return Err(AddressError::InvalidLength {
            expected: ADDRESS_STRING_LENGTH,
            actual: address.len(),
        });
    }

    let decoded = hex::decode(&address[1..])?;
    decoded
        .try_into()
        .map_err(|_| AddressError::InvalidPayloadLength)
}

/// Check whether the provided string is a valid IPPAN address.
pub fn is_valid_address(address: &str) -> bool {
    decode_address(address).is_ok()
}

/// Account identifier. Serialized as its encoded string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; ADDRESS_BYTES]);

impl Address {
    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }

    /// Deterministic account address owned by a module (fee collector,
    /// mint, governance, ...). Every node derives the same bytes.
    pub fn for_module(module_name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(MODULE_ACCOUNT_DOMAIN);
        hasher.update(module_name.as_bytes());
        Address(*hasher.finalize().as_bytes())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_address(&self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_address(s).map(Address)
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    fn from(value: [u8; ADDRESS_BYTES]) -> Self {
        Address(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        encode_address(&value.0)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Converts between the string form of an address and its raw bytes.
///
/// Hosts that use a different human readable format plug their own codec in;
/// [`HexAddressCodec`] is the native `i` + hex format.
pub trait AddressCodec: Send + Sync {
    fn decode(&self, address: &str) -> Result<Address, AddressError>;

    fn encode(&self, address: &Address) -> String;
}

/// Native `i`-prefixed hex codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexAddressCodec;

impl AddressCodec for HexAddressCodec {
    fn decode(&self, address: &str) -> Result<Address, AddressError> {
        address.parse()
    }

    fn encode(&self, address: &Address) -> String {
        address.to_string()
    }
}
