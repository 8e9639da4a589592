//! Discovery-name resolution.
//!
//! Given every schema file in the request and one target service,
//! [`resolve`] picks the option that names the service for the discovery
//! layer. The steps run in a fixed order:
//!
//! 1. find the file whose path equals the target's source file
//! 2. find the service declaration by name
//! 3. give up if the service never set an option
//! 4. collect candidates in declaration order, see [`candidate`]
//! 5. pick the first candidate, warning when there is more than one
//!
//! Any failure comes back as [`Resolution::Unresolved`]. It is up to the
//! caller what to do with it, the emitter renders its sentinel text into the
//! generated code so the broken service stays visible.
//!
//! Resolution is a pure function of its inputs apart from the lines it
//! appends to [`Diagnostics`].

mod diagnostics;
mod rules;
#[cfg(test)]
mod tests;

pub use diagnostics::*;
pub use rules::*;

use crate::schema::{SchemaFile, ServiceTarget};
use core::fmt;
use std::borrow::Cow;

/// The option a service was named by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedName {
    pub value: String,
    /// The option's full name, or `<package>.<service>` for the generic
    /// `service_name` marker.
    pub full_name: String,
    /// Field number of the option. Absent for the generic marker.
    pub tag: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnresolvedReason {
    SourceFileNotFound,
    ServiceNotFound,
    NoOptionsSet,
    NoMatchingOption,
}

impl UnresolvedReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SourceFileNotFound => "source file not found",
            Self::ServiceNotFound => "service not found",
            Self::NoOptionsSet => "no options set",
            Self::NoMatchingOption => "no matching option",
        }
    }
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unresolved {
    pub reason: UnresolvedReason,
    pub service: String,
}

impl Unresolved {
    /// Human-readable placeholder rendered in place of a discovery name, e.g.
    /// `UNRESOLVED no options set for PingService`.
    pub fn sentinel(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UNRESOLVED {} for {}", self.reason, self.service)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedName),
    Unresolved(Unresolved),
}

impl Resolution {
    /// The text to use as the discovery name: the resolved value, or the
    /// sentinel of an unresolved service.
    pub fn discovery_name(&self) -> Cow<'_, str> {
        match self {
            Self::Resolved(name) => Cow::Borrowed(&name.value),
            Self::Unresolved(unresolved) => Cow::Owned(unresolved.sentinel()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Resolves the discovery name of `target`.
pub fn resolve(
    files: &[SchemaFile],
    target: &ServiceTarget,
    diagnostics: &mut Diagnostics,
) -> Resolution {
    let unresolved = |reason: UnresolvedReason| {
        tracing::debug!(service = %target.name, %reason, "Discovery name not resolved");
        Resolution::Unresolved(Unresolved {
            reason,
            service: target.name.clone(),
        })
    };

    let Some(file) = files.iter().find(|f| f.path == target.source_file) else {
        return unresolved(UnresolvedReason::SourceFileNotFound);
    };
    let Some(service) = file.services.iter().find(|s| s.name == target.name) else {
        return unresolved(UnresolvedReason::ServiceNotFound);
    };
    let Some(options) = service.options.as_deref() else {
        return unresolved(UnresolvedReason::NoOptionsSet);
    };

    let candidates: Vec<ResolvedName> = options
        .iter()
        .filter_map(|entry| candidate(&file.package, &service.name, entry))
        .collect();

    let Some(selected) = candidates.first() else {
        return unresolved(UnresolvedReason::NoMatchingOption);
    };

    if candidates.len() > 1 {
        diagnostics.warn(format!(
            "Got multiple service names for {}: {}",
            service.name,
            join_candidates(&candidates)
        ));
    }
    diagnostics.info(format!(
        "Got gRPC service [{}] with name {}",
        selected.full_name, selected.value
    ));

    Resolution::Resolved(selected.clone())
}

fn join_candidates(candidates: &[ResolvedName]) -> String {
    candidates
        .iter()
        .map(|c| format!("[{}] = {:?}", c.full_name, c.value))
        .collect::<Vec<_>>()
        .join(", ")
}
