//! Optimistic-concurrency precondition taken from an `If-Match` header.

use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    /// `If-Match: *`
    Any,
    /// `If-Match: "<version>"`
    Exact(i64),
    /// `If-Match: "<version>", "<version>"`, any listed version passes
    OneOf(Vec<i64>),
}

impl VersionCheck {
    /// Fails with `PreconditionFailed` when `current` does not satisfy the check
    pub fn verify(&self, current: i64) -> DomainResult<()> {
        match self {
            VersionCheck::Any => Ok(()),
            VersionCheck::Exact(expected) if *expected == current => Ok(()),
            VersionCheck::Exact(expected) => Err(DomainError::PreconditionFailed {
                expected: *expected,
                actual: current,
            }),
            VersionCheck::OneOf(versions) if versions.contains(&current) => Ok(()),
            VersionCheck::OneOf(versions) => Err(DomainError::PreconditionFailed {
                expected: versions.iter().copied().max().unwrap_or_default(),
                actual: current,
            }),
        }
    }

    /// An absent header means last-writer-wins
    pub fn verify_optional(check: Option<VersionCheck>, current: i64) -> DomainResult<()> {
        match check {
            Some(check) => check.verify(current),
            None => Ok(()),
        }
    }
}
