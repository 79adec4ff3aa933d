//! Navigation guard and role dispatch for Rolegate.
//!
//! Two pure functions, no state, no I/O:
//!
//! - [`evaluate`]: the guard: (resolution, location) → allow or redirect.
//! - [`view_for`] / [`view_for_role`]: the dispatcher: role → which
//!   protected view to show.
//!
//! Plus [`settle`], which follows one redirect and proves the guard
//! comes to rest there. The controller relies on that property and the
//! configuration layer uses `settle` to reject route tables that break it.

mod dispatcher;
mod guard;

pub use dispatcher::{view_for, view_for_role, ViewVariant};
pub use guard::{after_redirect, evaluate, settle, GuardLoop};
