use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Text written in place of a redacted value.
pub const REDACTED: &str = "***";

/// A value that serializes as [`REDACTED`] until [`Sensitive::allow`] is called.
///
/// The latch is one-way: once allowed, every later serialization reveals the
/// value. `Debug` output is always redacted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Sensitive<T> {
    value: T,
    allow: bool,
}

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            allow: false,
        }
    }

    /// Permit future serializations to reveal the wrapped value.
    pub fn allow(&mut self) {
        self.allow = true;
    }

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.allow
    }

    /// Borrow the wrapped value regardless of the latch.
    ///
    /// Every read of the secret outside serialization goes through here.
    #[must_use]
    pub fn expose(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Display> Sensitive<T> {
    #[must_use]
    pub fn marshal_text(&self) -> String {
        if self.allow {
            self.value.to_string()
        } else {
            REDACTED.to_string()
        }
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Display> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.marshal_text())
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sensitive({REDACTED})")
    }
}

impl<T: fmt::Display> Serialize for Sensitive<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.marshal_text())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sensitive<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_until_allowed() {
        let mut secret = Sensitive::new("hunter2".to_string());
        assert_eq!(secret.marshal_text(), "***");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"***\"");

        secret.allow();
        assert_eq!(secret.marshal_text(), "hunter2");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"hunter2\"");
    }

    #[test]
    fn test_non_string_value() {
        let mut pin = Sensitive::new(4242_u32);
        assert_eq!(pin.to_string(), "***");
        pin.allow();
        assert_eq!(pin.to_string(), "4242");
    }

    #[test]
    fn test_debug_never_reveals() {
        let mut secret = Sensitive::new("hunter2".to_string());
        secret.allow();
        assert_eq!(format!("{secret:?}"), "Sensitive(***)");
    }

    #[test]
    fn test_deserialize_starts_locked() {
        let secret: Sensitive<String> = serde_json::from_str("\"abc\"").unwrap();
        assert!(!secret.is_allowed());
        assert_eq!(secret.expose(), "abc");
    }
}
