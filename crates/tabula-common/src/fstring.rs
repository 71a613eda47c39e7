//! The engine's length-prefixed string type.

use std::fmt;

/// On-disk encoding of an [`FString`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StringEncoding {
    /// One byte per char, positive length prefix.
    Latin1,
    /// UTF-16LE code units, negative length prefix.
    Utf16,
}

/// A non-null engine string together with the encoding it was stored in.
///
/// Keeping the encoding lets a read/write cycle reproduce the original bytes
/// even when a Latin-1 string would also fit in UTF-16 or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FString {
    value: String,
    encoding: StringEncoding,
}

impl FString {
    /// Create a string, choosing Latin-1 when every char fits in a byte.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let encoding = if value.chars().all(|c| (c as u32) <= 0xFF) {
            StringEncoding::Latin1
        } else {
            StringEncoding::Utf16
        };
        Self { value, encoding }
    }

    /// Create a string with an explicit encoding.
    ///
    /// A Latin-1 request for text that does not fit in Latin-1 is promoted to
    /// UTF-16 so the string can always be written back.
    pub fn with_encoding(value: String, encoding: StringEncoding) -> Self {
        let encoding = match encoding {
            StringEncoding::Latin1 if value.chars().any(|c| (c as u32) > 0xFF) => {
                StringEncoding::Utf16
            }
            other => other,
        };
        Self { value, encoding }
    }

    /// The decoded text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The encoding used on disk.
    #[inline]
    pub fn encoding(&self) -> StringEncoding {
        self.encoding
    }

    /// Size in bytes of the serialized form, including the length prefix.
    pub fn serialized_size(&self) -> usize {
        match self.encoding {
            StringEncoding::Latin1 => 4 + self.value.chars().count() + 1,
            StringEncoding::Utf16 => 4 + (self.value.encode_utf16().count() + 1) * 2,
        }
    }

    /// Consume and return the decoded text.
    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for FString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for FString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for FString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_choice() {
        assert_eq!(FString::new("hello").encoding(), StringEncoding::Latin1);
        assert_eq!(FString::new("caf\u{e9}").encoding(), StringEncoding::Latin1);
        assert_eq!(FString::new("\u{4e2d}\u{6587}").encoding(), StringEncoding::Utf16);
    }

    #[test]
    fn test_latin1_promoted_when_unrepresentable() {
        let s = FString::with_encoding("\u{263a}".to_string(), StringEncoding::Latin1);
        assert_eq!(s.encoding(), StringEncoding::Utf16);
    }

    #[test]
    fn test_serialized_size() {
        assert_eq!(FString::new("abc").serialized_size(), 4 + 4);
        assert_eq!(FString::new("\u{4e2d}").serialized_size(), 4 + 4);
    }
}
