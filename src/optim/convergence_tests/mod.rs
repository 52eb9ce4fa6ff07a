//! Property-based convergence tests for AdamR
//!
//! These tests validate optimizer behaviour on:
//! - Quadratic convergence (convex, optimal solution at origin)
//! - Ill-conditioned problems (tests numerical stability)
//! - High-dimensional problems (tests scalability)
//! - Numerical edge cases (very small/large gradients)
//! - Recovery dynamics (pull toward the starting point)
//!
//! Tests are organized by update branch:
//! - `plain_tests` - recovery disabled (coupled weight decay)
//! - `recover_tests` - recovery enabled

mod helpers;
