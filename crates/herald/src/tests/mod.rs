//! Test suites for bot bootstrap and startup.

mod support;
