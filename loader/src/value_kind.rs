//! Resolution of type tokens into value kinds.
//!
//! A type token is a base kind followed by dash-separated modifiers, e.g.
//! `string`, `string-list`, `file-list-const`. A token starting with `@`
//! references a named custom type instead: `@Color`, `@Color-list`.

use std::sync::Arc;

use build_schema_core::{BaseKind, CustomTypeInfo, Diagnostics, KindModifiers, ValueKind};

use crate::custom_types::CustomTypeRegistry;

/// A value kind together with the custom type it resolved to, if any.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolvedKind {
    pub kind: ValueKind,
    pub custom_type: Option<Arc<CustomTypeInfo>>,
}

/// Resolves a type token.
///
/// Unknown base kinds and base kinds outside the schema allow-list degrade
/// to [`BaseKind::Unknown`] with a warning. Unknown modifiers are warned
/// about and skipped. A reference to an unregistered custom type keeps the
/// custom-type modifier and records an error.
pub(crate) fn resolve_kind(
    token: &str,
    registry: &CustomTypeRegistry,
    path: &str,
    diags: &mut Diagnostics,
) -> ResolvedKind {
    if let Some(reference) = token.strip_prefix('@') {
        return resolve_reference(reference, registry, path, diags);
    }

    let mut segments = token.split('-');
    let base_token = segments.next().unwrap_or_default();
    let base = BaseKind::from_schema_token(base_token).unwrap_or_else(|| {
        diags.warning(format!("unknown value kind '{base_token}' at '{path}'"));
        BaseKind::Unknown
    });

    let mut kind = ValueKind::new(base);
    for segment in segments {
        match KindModifiers::from_schema_token(segment) {
            Some(modifier) => kind = kind.with(modifier),
            None => diags.warning(format!("unknown value kind modifier '{segment}' at '{path}'")),
        }
    }

    ResolvedKind {
        kind,
        custom_type: None,
    }
}

/// Custom-type names may contain dashes, so the longest dash-joined prefix
/// naming a registered type wins and the remaining segments are modifiers.
/// When no prefix is registered, recognized modifiers are peeled from the
/// end and the rest is reported as the missing name.
fn resolve_reference(
    reference: &str,
    registry: &CustomTypeRegistry,
    path: &str,
    diags: &mut Diagnostics,
) -> ResolvedKind {
    let segments: Vec<&str> = reference.split('-').collect();

    let registered = (1..=segments.len()).rev().find_map(|len| {
        registry
            .get(&segments[..len].join("-"))
            .map(|custom_type| (len, Arc::clone(custom_type)))
    });
    if let Some((len, custom_type)) = registered {
        let mut kind = ValueKind::custom_type();
        for segment in &segments[len..] {
            match KindModifiers::from_schema_token(segment) {
                Some(modifier) => kind = kind.with(modifier),
                None => {
                    diags.warning(format!("unknown value kind modifier '{segment}' at '{path}'"))
                }
            }
        }
        return ResolvedKind {
            kind,
            custom_type: Some(custom_type),
        };
    }

    let mut name_len = segments.len();
    let mut modifiers = KindModifiers::empty();
    while name_len > 1 {
        let Some(modifier) = KindModifiers::from_schema_token(segments[name_len - 1]) else {
            break;
        };
        modifiers |= modifier;
        name_len -= 1;
    }
    let name = segments[..name_len].join("-");

    let kind = ValueKind::custom_type().with(modifiers);
    if name.is_empty() {
        diags.error(format!("custom type reference at '{path}' has no name"));
    } else {
        diags.error(format!("custom type '{name}' referenced at '{path}' is not defined"));
    }
    ResolvedKind {
        kind,
        custom_type: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(names: &[&str]) -> CustomTypeRegistry {
        names
            .iter()
            .map(|n| (*n, Arc::new(CustomTypeInfo::new(Some(n.to_string())))))
            .collect()
    }

    #[test]
    fn test_base_and_list_modifier() {
        let mut diags = Diagnostics::new();
        let resolved = resolve_kind("string-list", &CustomTypeRegistry::new(), "p", &mut diags);
        assert_eq!(resolved.kind.base, BaseKind::String);
        assert!(resolved.kind.is_list());
        assert!(!resolved.kind.is_literal());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_const_modifier_and_case() {
        let mut diags = Diagnostics::new();
        let resolved = resolve_kind("Bool-CONST", &CustomTypeRegistry::new(), "p", &mut diags);
        assert_eq!(resolved.kind.base, BaseKind::Bool);
        assert!(resolved.kind.is_literal());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_unknown_base_degrades_with_warning() {
        let mut diags = Diagnostics::new();
        let resolved = resolve_kind("condition-list", &CustomTypeRegistry::new(), "p", &mut diags);
        assert!(resolved.kind.is_unknown());
        assert!(resolved.kind.is_list());
        assert_eq!(diags.warning_count(), 1);
        assert!(!diags.has_errors());
    }

    #[test]
    fn test_unknown_modifier_is_skipped() {
        let mut diags = Diagnostics::new();
        let resolved = resolve_kind("int-array", &CustomTypeRegistry::new(), "p", &mut diags);
        assert_eq!(resolved.kind, ValueKind::new(BaseKind::Int));
        assert_eq!(diags.warning_count(), 1);
    }

    #[test]
    fn test_resolved_reference() {
        let mut diags = Diagnostics::new();
        let registry = registry_with(&["Color"]);
        let resolved = resolve_kind("@color", &registry, "p", &mut diags);
        assert!(resolved.kind.is_custom_type());
        assert_eq!(
            resolved.custom_type.unwrap().name.as_deref(),
            Some("Color")
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_dashed_reference_with_modifier() {
        let mut diags = Diagnostics::new();
        let registry = registry_with(&["target-os"]);
        let resolved = resolve_kind("@target-os-list", &registry, "p", &mut diags);
        assert!(resolved.kind.is_list());
        assert!(resolved.custom_type.is_some());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_reference_with_unknown_modifier_keeps_type() {
        let mut diags = Diagnostics::new();
        let registry = registry_with(&["Color"]);
        let resolved = resolve_kind("@Color-array", &registry, "properties/Tint/type", &mut diags);
        assert!(resolved.kind.is_custom_type());
        assert!(!resolved.kind.is_list());
        assert_eq!(resolved.custom_type.unwrap().name.as_deref(), Some("Color"));
        assert_eq!(diags.warning_count(), 1);
        assert!(!diags.has_errors());
        assert_eq!(
            diags.iter().next().unwrap().message,
            "unknown value kind modifier 'array' at 'properties/Tint/type'"
        );
    }

    #[test]
    fn test_longest_registered_name_wins() {
        let mut diags = Diagnostics::new();
        let registry = registry_with(&["target", "target-os"]);
        let resolved = resolve_kind("@target-os-list", &registry, "p", &mut diags);
        assert_eq!(resolved.custom_type.unwrap().name.as_deref(), Some("target-os"));
        assert!(resolved.kind.is_list());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_missing_reference_keeps_modifier() {
        let mut diags = Diagnostics::new();
        let resolved = resolve_kind("@Missing", &CustomTypeRegistry::new(), "p", &mut diags);
        assert!(resolved.kind.is_custom_type());
        assert!(resolved.custom_type.is_none());
        assert_eq!(diags.error_count(), 1);
    }

    #[test]
    fn test_empty_reference_is_error() {
        let mut diags = Diagnostics::new();
        let resolved = resolve_kind("@", &CustomTypeRegistry::new(), "p", &mut diags);
        assert!(resolved.kind.is_custom_type());
        assert_eq!(diags.error_count(), 1);
    }
}
