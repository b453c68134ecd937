//! Value kinds for properties and metadata.
//!
//! A [`ValueKind`] pairs one [`BaseKind`] with a set of [`KindModifiers`].
//! The base kind says what a single value looks like (a boolean, a path, a
//! target framework moniker, ...); the modifiers say how values are combined
//! (semicolon or comma lists), whether only literal text is allowed, and
//! whether the permitted values come from a [`CustomTypeInfo`](crate::CustomTypeInfo).
//!
//! # Examples
//!
//! ```
//! use build_schema_core::{BaseKind, KindModifiers, ValueKind};
//!
//! let kind = ValueKind::new(BaseKind::String).with(KindModifiers::LIST);
//! assert!(kind.is_list());
//! assert!(!kind.is_literal());
//! assert_eq!(kind.base, BaseKind::String);
//! ```

use serde::Serialize;

/// The kind of a single value, independent of list/literal modifiers.
///
/// This is the full vocabulary used by language tooling. Only a subset can
/// be named from a hand-authored schema; see [`BaseKind::from_schema_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum BaseKind {
    /// No kind information (the default).
    #[default]
    Unknown = 0,
    Bool,
    Int,
    Float,
    String,
    Char,
    Guid,
    Url,
    Version,
    /// Version with an optional semver-style suffix.
    SuffixedVersion,
    /// Windows locale identifier.
    Lcid,
    Culture,
    /// SDK name.
    Sdk,
    /// SDK name with a `/version` suffix.
    SdkWithVersion,
    TargetName,
    ItemName,
    PropertyName,
    /// Target framework moniker, e.g. `net8.0`.
    TargetFramework,
    TargetFrameworkIdentifier,
    TargetFrameworkVersion,
    TargetFrameworkProfile,
    /// Runtime identifier, e.g. `linux-x64`.
    RuntimeId,
    Configuration,
    Platform,
    /// Message importance (`high`, `normal`, `low`).
    Importance,
    HostOs,
    File,
    Folder,
    /// Folder path that must end with a directory separator.
    FolderWithSlash,
    FileOrFolder,
    Extension,
    NuGetId,
    NuGetVersion,
    Condition,
    Expression,
    /// Value drawn from a custom type.
    CustomType,
}

impl BaseKind {
    /// Parses a base-kind token as written in a schema document.
    ///
    /// Matching is ASCII-case-insensitive. Kinds that exist in the vocabulary
    /// but are not meaningful in a hand-authored schema (conditions,
    /// expressions, ...) have no token and return `None`, as does
    /// `customtype`, which is only reachable through an `@Name` reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use build_schema_core::BaseKind;
    ///
    /// assert_eq!(BaseKind::from_schema_token("Bool"), Some(BaseKind::Bool));
    /// assert_eq!(BaseKind::from_schema_token("tfm"), Some(BaseKind::TargetFramework));
    /// assert_eq!(BaseKind::from_schema_token("condition"), None);
    /// ```
    pub fn from_schema_token(token: &str) -> Option<Self> {
        let kind = match token.to_ascii_lowercase().as_str() {
            "unknown" => Self::Unknown,
            "bool" => Self::Bool,
            "int" => Self::Int,
            "float" => Self::Float,
            "string" => Self::String,
            "char" => Self::Char,
            "guid" => Self::Guid,
            "url" => Self::Url,
            "version" => Self::Version,
            "lcid" => Self::Lcid,
            "culture" => Self::Culture,
            "sdk" => Self::Sdk,
            "tfm" => Self::TargetFramework,
            "rid" => Self::RuntimeId,
            "configuration" => Self::Configuration,
            "platform" => Self::Platform,
            "importance" => Self::Importance,
            "file" => Self::File,
            "folder" => Self::Folder,
            "path" => Self::FileOrFolder,
            "extension" => Self::Extension,
            "target" => Self::TargetName,
            "item" => Self::ItemName,
            "property" => Self::PropertyName,
            "nuget" => Self::NuGetId,
            _ => return None,
        };
        Some(kind)
    }
}

bitflags::bitflags! {
    /// Modifier flags combined with a [`BaseKind`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct KindModifiers: u32 {
        /// Semicolon-delimited list.
        const LIST = 1 << 8;
        /// Comma-delimited list.
        const COMMA_LIST = 1 << 9;
        /// Only literal text is allowed, no property or item expansion.
        const LITERAL = 1 << 10;
        /// Values come from a custom type.
        const CUSTOM_TYPE = 1 << 11;
    }
}

impl KindModifiers {
    /// Parses a modifier segment of a type token (`list`, `const`).
    pub fn from_schema_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "list" => Some(Self::LIST),
            "const" => Some(Self::LITERAL),
            _ => None,
        }
    }

    /// Modifiers implied by a list-separator string.
    ///
    /// # Examples
    ///
    /// ```
    /// use build_schema_core::KindModifiers;
    ///
    /// assert_eq!(KindModifiers::from_separators(";,"), KindModifiers::LIST | KindModifiers::COMMA_LIST);
    /// assert_eq!(KindModifiers::from_separators(" "), KindModifiers::empty());
    /// ```
    pub fn from_separators(separators: &str) -> Self {
        let mut modifiers = Self::empty();
        if separators.contains(';') {
            modifiers |= Self::LIST;
        }
        if separators.contains(',') {
            modifiers |= Self::COMMA_LIST;
        }
        modifiers
    }
}

/// A resolved value kind: base kind plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ValueKind {
    pub base: BaseKind,
    pub modifiers: KindModifiers,
}

impl ValueKind {
    /// The unknown kind with no modifiers.
    pub const UNKNOWN: Self = Self {
        base: BaseKind::Unknown,
        modifiers: KindModifiers::empty(),
    };

    /// Creates a kind with no modifiers.
    pub const fn new(base: BaseKind) -> Self {
        Self {
            base,
            modifiers: KindModifiers::empty(),
        }
    }

    /// Creates the kind used for values drawn from a custom type.
    pub const fn custom_type() -> Self {
        Self {
            base: BaseKind::CustomType,
            modifiers: KindModifiers::CUSTOM_TYPE,
        }
    }

    /// Adds modifiers.
    pub fn with(mut self, modifiers: KindModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Packs the kind into a single word: base kind in the low byte,
    /// modifiers above it.
    ///
    /// # Examples
    ///
    /// ```
    /// use build_schema_core::{BaseKind, KindModifiers, ValueKind};
    ///
    /// let kind = ValueKind::new(BaseKind::Bool).with(KindModifiers::LITERAL);
    /// assert_eq!(kind.bits() & 0xff, BaseKind::Bool as u32);
    /// assert_ne!(kind.bits() & KindModifiers::LITERAL.bits(), 0);
    /// ```
    pub fn bits(self) -> u32 {
        self.base as u32 | self.modifiers.bits()
    }

    pub fn is_unknown(self) -> bool {
        self.base == BaseKind::Unknown
    }

    /// Semicolon-delimited list.
    pub fn is_list(self) -> bool {
        self.modifiers.contains(KindModifiers::LIST)
    }

    pub fn is_comma_list(self) -> bool {
        self.modifiers.contains(KindModifiers::COMMA_LIST)
    }

    /// Either list form.
    pub fn allows_lists(self) -> bool {
        self.modifiers
            .intersects(KindModifiers::LIST | KindModifiers::COMMA_LIST)
    }

    pub fn is_literal(self) -> bool {
        self.modifiers.contains(KindModifiers::LITERAL)
    }

    pub fn is_custom_type(self) -> bool {
        self.modifiers.contains(KindModifiers::CUSTOM_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_tokens_are_case_insensitive() {
        assert_eq!(BaseKind::from_schema_token("STRING"), Some(BaseKind::String));
        assert_eq!(BaseKind::from_schema_token("Guid"), Some(BaseKind::Guid));
        assert_eq!(BaseKind::from_schema_token("Path"), Some(BaseKind::FileOrFolder));
    }

    #[test]
    fn test_vocabulary_outside_allow_list_is_rejected() {
        assert_eq!(BaseKind::from_schema_token("expression"), None);
        assert_eq!(BaseKind::from_schema_token("customtype"), None);
        assert_eq!(BaseKind::from_schema_token("sdkwithversion"), None);
        assert_eq!(BaseKind::from_schema_token(""), None);
    }

    #[test]
    fn test_modifier_tokens() {
        assert_eq!(KindModifiers::from_schema_token("list"), Some(KindModifiers::LIST));
        assert_eq!(KindModifiers::from_schema_token("Const"), Some(KindModifiers::LITERAL));
        assert_eq!(KindModifiers::from_schema_token("array"), None);
    }

    #[test]
    fn test_predicates() {
        let kind = ValueKind::custom_type().with(KindModifiers::COMMA_LIST);
        assert!(kind.is_custom_type());
        assert!(kind.is_comma_list());
        assert!(!kind.is_list());
        assert!(kind.allows_lists());
        assert!(!kind.is_unknown());
        assert!(ValueKind::default().is_unknown());
    }

    #[test]
    fn test_bits_keep_base_and_modifiers_apart() {
        let kind = ValueKind::new(BaseKind::CustomType).with(KindModifiers::all());
        assert_eq!(kind.bits() & 0xff, BaseKind::CustomType as u32);
        assert_eq!(kind.bits() & !0xff, KindModifiers::all().bits());
    }
}
