//! Client for a code + tests execution sandbox.
//!
//! The user submits a code snippet and a test snippet to a remote execution
//! service and gets back pass/fail counts, coverage, a score and a raw
//! transcript. A selected "mission" (a declarative bundle of pass/fail
//! criteria) is judged against each completed run to award a verdict.
//! The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (catalog, evaluation, run-state
//!   transitions). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (HTTP service client, catalog and
//!   config files). Isolated behind seams to enable stubbing in tests.
//!
//! [`session`] coordinates core logic with I/O and is the single source of
//! truth every rendering surface (CLI report, web UI) reads from.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
