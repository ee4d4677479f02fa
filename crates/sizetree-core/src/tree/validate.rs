/// Boundary checks on analyzer output.
///
/// The builder accepts any record set without failing; these checks report
/// inputs that would produce a misleading tree so the caller can decide
/// whether to proceed.
use crate::model::records::{AnalysisResult, Package, Section};
use compact_str::CompactString;
use thiserror::Error;

/// A non-fatal inconsistency in the input records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("section {section}: known size {known_size} exceeds file size {file_size}")]
    KnownExceedsFileSize {
        section: CompactString,
        file_size: u64,
        known_size: u64,
    },

    #[error("section {section}: {range} range 0x{start:x} - 0x{end:x} is inverted")]
    InvertedRange {
        section: CompactString,
        range: &'static str,
        start: u64,
        end: u64,
    },

    #[error("package map key {key:?} does not match package name {name:?}")]
    KeyMismatch {
        key: CompactString,
        name: CompactString,
    },

    #[error("sub-package {name:?} is not nested under its parent {parent:?}")]
    OutsideParent {
        parent: CompactString,
        name: CompactString,
    },
}

/// Collect every issue in `result`. An empty vec means the records are
/// consistent.
pub fn validate(result: &AnalysisResult) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for section in &result.sections {
        check_section(section, &mut issues);
    }

    for (key, pkg) in &result.packages {
        check_package(key, pkg, None, &mut issues);
    }

    issues
}

fn check_section(section: &Section, issues: &mut Vec<ValidationIssue>) {
    if section.known_size > section.file_size {
        issues.push(ValidationIssue::KnownExceedsFileSize {
            section: section.name.clone(),
            file_size: section.file_size,
            known_size: section.known_size,
        });
    }
    if section.end < section.offset {
        issues.push(ValidationIssue::InvertedRange {
            section: section.name.clone(),
            range: "offset",
            start: section.offset,
            end: section.end,
        });
    }
    if section.addr_end < section.addr {
        issues.push(ValidationIssue::InvertedRange {
            section: section.name.clone(),
            range: "address",
            start: section.addr,
            end: section.addr_end,
        });
    }
}

fn check_package(
    key: &str,
    pkg: &Package,
    parent: Option<&str>,
    issues: &mut Vec<ValidationIssue>,
) {
    if key != pkg.name.as_str() {
        issues.push(ValidationIssue::KeyMismatch {
            key: key.into(),
            name: pkg.name.clone(),
        });
    }
    if let Some(parent) = parent {
        if !pkg.name.starts_with(parent) {
            issues.push(ValidationIssue::OutsideParent {
                parent: parent.into(),
                name: pkg.name.clone(),
            });
        }
    }
    for (sub_key, sub) in &pkg.sub_packages {
        check_package(sub_key, sub, Some(pkg.name.as_str()), issues);
    }
}
