#![forbid(unsafe_code)]

//! Opaque per-item payloads.
//!
//! A payload is a type tag plus raw bytes. The grid never interprets either;
//! it only stores, clones, and hands the payload back to item widgets and
//! query callers.
//!
//! ```
//! use gridinv_core::payload::ItemPayload;
//!
//! let p = ItemPayload::text("durability=87");
//! assert_eq!(p.type_tag, "text/plain");
//! assert_eq!(p.as_text(), Some("durability=87"));
//! ```

/// Tagged, copyable blob attached to a placed item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ItemPayload {
    /// MIME-like type identifier (e.g. `"item/weapon"`).
    pub type_tag: String,
    /// Raw serialized data.
    pub data: Vec<u8>,
}

impl ItemPayload {
    /// Create a payload with raw bytes.
    #[must_use]
    pub fn new(type_tag: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            type_tag: type_tag.into(),
            data,
        }
    }

    /// Create a UTF-8 text payload tagged `text/plain`.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        let s: String = text.into();
        Self::new("text/plain", s.into_bytes())
    }

    /// Decode the data as UTF-8, if it is valid.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}
