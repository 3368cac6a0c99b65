//! Shared contract texts for integration tests.
#![allow(dead_code)]

/// A contract whose Compensation section comes before its Scope of Work.
pub const COMPENSATION_FIRST: &str = "
    KNOW ALL MEN BY THESE PRESENTS:
This Contract of Employment is entered into by the Company and the Employee.

Position:
The Employee is hired as a Junior Developer.

Term of Employment:
The start date is January 20, 2026.

Compensation:
The Basic Pay shall be 25,000 PHP per month.

Scope of Work:
1. Debug legacy code.
2. Write documentation.

Benefits:
The employee receives 13th Month Pay.

Confidentiality:
The employee agrees to keep trade secrets confidential.

Termination:
Either party may terminate this agreement with notice.

Signatures:
Signed: ____________________
    ";

/// The same contract with sections in the mandated order.
pub const WELL_ORDERED: &str = "
    KNOW ALL MEN BY THESE PRESENTS:
This Contract of Employment is entered into by the Company and the Employee.

Position:
The Employee is hired as a Junior Developer.

Term of Employment:
The start date is January 20, 2026.

Scope of Work:
1. Debug legacy code.
2. Write documentation.

Compensation:
The Basic Pay shall be 25,000 PHP per month.

Benefits:
The employee receives 13th Month Pay.

Confidentiality:
The employee agrees to keep trade secrets confidential.

Termination:
Either party may terminate this agreement with notice.

Signatures:
Signed: ____________________
    ";

/// Writes `contents` to a fresh file under the target temp dir and returns its path.
pub fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("jobsafe-tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}
