//! Bounded digit buffer for credential entry.

use std::fmt;
use zeroize::Zeroize;

use natioid_types::{Credential, Digit};

/// The in-progress entry for the active stage of a flow.
///
/// Holds at most the fixed credential length. The only mutations are
/// appending one digit, removing the most recent digit, and clearing;
/// discarded digits are zeroized before release. `Debug` output carries
/// only the fill level.
pub struct CredentialBuffer {
    digits: Vec<Digit>,
    capacity: usize,
}

impl CredentialBuffer {
    /// Create an empty buffer that holds `capacity` digits.
    pub fn new(capacity: usize) -> Self {
        Self {
            digits: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a digit. Returns `false` (leaving the buffer untouched)
    /// when already full.
    pub fn push(&mut self, digit: Digit) -> bool {
        if self.digits.len() >= self.capacity {
            return false;
        }
        self.digits.push(digit);
        true
    }

    /// Remove the most recent digit, zeroizing it. Returns `false` on an
    /// empty buffer.
    pub fn pop(&mut self) -> bool {
        match self.digits.pop() {
            Some(mut digit) => {
                digit.zeroize();
                true
            }
            None => false,
        }
    }

    /// Zeroize and discard every entered digit.
    pub fn clear(&mut self) {
        self.digits.zeroize();
    }

    /// Number of digits currently entered.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether no digits have been entered.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Whether the buffer holds a full-length entry.
    pub fn is_full(&self) -> bool {
        self.digits.len() == self.capacity
    }

    /// The fixed credential length this buffer enforces.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot the current digits as a credential value.
    pub fn to_credential(&self) -> Credential {
        Credential::new(self.digits.clone())
    }

    /// Move the digits out as a credential, leaving the buffer empty.
    pub fn take_credential(&mut self) -> Credential {
        Credential::new(std::mem::take(&mut self.digits))
    }
}

impl fmt::Debug for CredentialBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CredentialBuffer({}/{})",
            self.digits.len(),
            self.capacity
        )
    }
}
