//! Purpose: Shared core library crate used by the `numerus` CLI and tests.
//! Exports: `api` (stable conversion surface), `core` (numeral logic, errors).
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: Conversion functions stay pure; all I/O lives in the binary.
pub mod api;
pub mod core;
