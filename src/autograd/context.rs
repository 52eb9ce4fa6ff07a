//! Gradient-recording mode
//!
//! A thread-local flag that autograd code consults before recording
//! backward ops. The optimizer applies its updates with recording disabled
//! and re-enables it around the user's loss closure.

use std::cell::Cell;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Check whether gradient recording is active on this thread
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(Cell::get)
}

/// Restores the previous mode when dropped
struct ModeGuard {
    previous: bool,
}

impl ModeGuard {
    fn set(enabled: bool) -> Self {
        let previous = GRAD_ENABLED.with(|flag| flag.replace(enabled));
        Self { previous }
    }
}

impl Drop for ModeGuard {
    fn drop(&mut self) {
        GRAD_ENABLED.with(|flag| flag.set(self.previous));
    }
}

/// Run `f` with gradient recording disabled
pub fn no_grad<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ModeGuard::set(false);
    f()
}

/// Run `f` with gradient recording enabled
pub fn enable_grad<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ModeGuard::set(true);
    f()
}
