//! The two matching rules, kept as independent pure predicates.

use crate::naming::snake_case;
use crate::resolve::ResolvedName;
use crate::schema::AnnotationEntry;

/// Short name of the generic discovery-name marker field.
pub const FALLBACK_FIELD_NAME: &str = "service_name";

/// A per-service extension whose naming encodes its owner: the full name
/// starts with the package, and the short name starts with the service name,
/// either as declared (`pingservice_name`) or snake cased (`ping_service_name`).
///
/// Both prefixes compare byte-wise, ignoring ASCII case.
pub fn matches_convention(package: &str, service: &str, entry: &AnnotationEntry) -> bool {
    starts_with_ignore_ascii_case(&entry.full_name, package)
        && (starts_with_ignore_ascii_case(&entry.name, service)
            || starts_with_ignore_ascii_case(&entry.name, &snake_case(service)))
}

/// A generic `service_name` marker field.
pub fn matches_fallback(entry: &AnnotationEntry) -> bool {
    entry.name == FALLBACK_FIELD_NAME
}

/// Turns an entry into a candidate if either rule accepts it. The convention
/// rule is checked first.
pub fn candidate(package: &str, service: &str, entry: &AnnotationEntry) -> Option<ResolvedName> {
    if matches_convention(package, service, entry) {
        Some(ResolvedName {
            value: entry.value.clone(),
            full_name: entry.full_name.clone(),
            tag: Some(entry.tag),
        })
    } else if matches_fallback(entry) {
        let full_name = if package.is_empty() {
            service.to_string()
        } else {
            format!("{package}.{service}")
        };
        Some(ResolvedName {
            value: entry.value.clone(),
            full_name,
            tag: None,
        })
    } else {
        None
    }
}

fn starts_with_ignore_ascii_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}
