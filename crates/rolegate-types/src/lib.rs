//! Shared types for Rolegate.
//!
//! This crate defines the vocabulary every other layer speaks:
//!
//! - **Roles** ([`RoleId`], [`RolePayload`]): who the user is allowed to be.
//! - **Session** ([`SessionState`], [`Resolution`]): what we currently
//!   know about the user, as one tagged value.
//! - **Routes** ([`Location`], [`RouteTable`], [`Redirect`], [`Decision`]):
//!   where the user is, and where the guard wants them to be.
//! - **Errors** ([`RouteError`]): what can be wrong with a route table.
//!
//! # Architecture
//!
//! ```text
//! Session (resolver)  →  Guard (decision)  →  Controller (navigation)
//!          ↘                  ↓                  ↙
//!                 Types (this crate)
//! ```
//!
//! Nothing in here does I/O or holds state; every type is a plain value.

mod error;
mod role;
mod route;
mod session;

pub use error::{RouteError, UnknownRole};
pub use role::{RoleId, RolePayload};
pub use route::{Decision, Location, Redirect, RouteTable};
pub use session::{Resolution, SessionState};
