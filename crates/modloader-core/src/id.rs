use std::fmt;

/// A unique identifier naming one module definition in a table
///
/// The loader never interprets the contents; numeric strings, paths, or
/// hashes all work as long as the packaging step and the module bodies
/// agree on them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleId(String);

impl ModuleId {
    /// Create a module id from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value of this id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&ModuleId> for ModuleId {
    fn from(id: &ModuleId) -> Self {
        id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality() {
        let a = ModuleId::new("entry");
        let b = ModuleId::from("entry");
        let c: ModuleId = String::from("other").into();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_id_display_roundtrip() {
        let id = ModuleId::new("src/main");
        assert_eq!(id.to_string(), "src/main");
        assert_eq!(id.as_str(), "src/main");
    }
}
