//! Session resolution for Rolegate.
//!
//! This crate turns two dependent async calls into one session state:
//!
//! 1. **Authentication check**: is there a valid session at all?
//!    ([`AuthVerifier`] trait)
//! 2. **Role lookup**: which role does the user have?
//!    ([`RoleProvider`] trait), only asked after step 1 said yes.
//! 3. **Resolution**: [`SessionResolver`] combines both into a
//!    [`Resolution`](rolegate_types::Resolution), mapping every failure to
//!    a least-privileged outcome.
//!
//! # How it fits in the stack
//!
//! ```text
//! Controller (above)  ← runs one resolution per trigger, keeps the newest
//!     ↕
//! Session Layer (this crate)  ← talks to the collaborators, never panics
//!     ↕
//! Types (below)  ← RoleId, RolePayload, Resolution
//! ```

#![allow(async_fn_in_trait)]

mod error;
mod resolver;
mod verifier;

pub use error::SessionError;
pub use resolver::{ResolutionTrace, SessionResolver};
pub use verifier::{AuthVerifier, RoleProvider};
