use std::borrow::{Borrow, Cow};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::utils::constants::MAX_KEY_BYTES;

/// Fixed-capacity station name.
///
/// The bytes past `len` are always zero and never take part in equality or
/// hashing, so a short name can never pick up leftovers from a longer one.
#[derive(Clone, Copy)]
pub struct StationKey {
    bytes: [u8; MAX_KEY_BYTES],
    len: u8,
}

impl StationKey {
    /// Copy `name` into a fresh key. Returns `None` when the name does not
    /// fit in [`MAX_KEY_BYTES`].
    pub fn new(name: &[u8]) -> Option<Self> {
        if name.len() > MAX_KEY_BYTES {
            return None;
        }

        let mut bytes = [0u8; MAX_KEY_BYTES];
        bytes[..name.len()].copy_from_slice(name);

        Some(Self {
            bytes,
            len: name.len() as u8,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decoded name, with invalid UTF-8 replaced.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl PartialEq for StationKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for StationKey {}

// Must hash exactly like `[u8]` so lookups through `Borrow<[u8]>` agree.
impl Hash for StationKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state)
    }
}

impl Borrow<[u8]> for StationKey {
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StationKey").field(&self.to_str_lossy()).finish()
    }
}

impl fmt::Display for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str_lossy())
    }
}
