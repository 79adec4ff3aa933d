//! Controller actor: an isolated Tokio task that owns the session state.
//!
//! The actor runs resolver → guard → dispatcher on mount and after every
//! trigger. Resolutions run in their own tasks and report back through a
//! channel, tagged with the generation that started them:
//!
//! ```text
//!   handle ──Command──→ ┌────────────────────┐ ──replace()──→ Navigator
//!                       │  Controller actor  │
//!   resolution task ──→ │  state, generation │ ──snapshot──→ handle
//!     (generation, result) └────────────────────┘
//! ```
//!
//! A result is written only if its generation is still the current one.
//! Older results are counted and dropped. After teardown the actor is
//! gone, so late results have nowhere to land and no navigation can fire.

use std::ops::ControlFlow;
use std::sync::Arc;

use rolegate_guard::{after_redirect, evaluate, view_for_role};
use rolegate_session::{
    AuthVerifier, ResolutionTrace, RoleProvider, SessionResolver,
};
use rolegate_types::{
    Decision, Location, Redirect, Resolution, RouteTable, SessionState,
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    ControllerConfig, ControllerError, ControllerMetrics, ControllerSnapshot,
    InvalidationReason, Navigator, Screen, Trigger,
};

/// Commands sent to the controller actor through its channel.
enum Command {
    /// Start a new resolution cycle.
    Invalidate(InvalidationReason),

    /// The host moved; re-read the location and re-run the guard.
    Navigated,

    /// Go back one screen, falling back to home.
    GoBack,

    /// Request a snapshot of the current state.
    Snapshot {
        reply: oneshot::Sender<ControllerSnapshot>,
    },

    /// Stop the actor. `done` fires once it has stopped handling input.
    Teardown { done: oneshot::Sender<()> },
}

/// A redirect sent to the navigator, and the position it was sent from.
struct PendingRedirect {
    target: Redirect,
    from: Vec<String>,
}

/// A finished resolution, reported back by its task.
struct Completed {
    generation: u64,
    resolution: Resolution,
    trace: ResolutionTrace,
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Handle to a running controller. Used to send it commands.
///
/// Cheap to clone: it's just an `mpsc::Sender` wrapper. When every handle
/// is dropped the controller tears itself down.
#[derive(Clone)]
pub struct ControllerHandle {
    sender: mpsc::Sender<Command>,
}

impl ControllerHandle {
    /// Invalidates the session and starts a new resolution.
    ///
    /// Any resolution still in flight is superseded: its result will be
    /// discarded when it arrives.
    pub async fn invalidate(
        &self,
        reason: InvalidationReason,
    ) -> Result<(), ControllerError> {
        self.send(Command::Invalidate(reason)).await
    }

    /// Shorthand for `invalidate(InvalidationReason::Logout)`.
    pub async fn logout(&self) -> Result<(), ControllerError> {
        self.invalidate(InvalidationReason::Logout).await
    }

    /// Tells the controller the host's location changed.
    pub async fn navigated(&self) -> Result<(), ControllerError> {
        self.send(Command::Navigated).await
    }

    /// Goes back one screen. If the navigator can't, replaces to home.
    pub async fn go_back(&self) -> Result<(), ControllerError> {
        self.send(Command::GoBack).await
    }

    /// Requests the current snapshot.
    pub async fn snapshot(&self) -> Result<ControllerSnapshot, ControllerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Snapshot { reply: reply_tx }).await?;
        reply_rx.await.map_err(|_| ControllerError::TornDown)
    }

    /// Tears the controller down and waits until it has stopped.
    ///
    /// Resolutions still in flight keep running to completion, but their
    /// results are dropped and they can't trigger navigation.
    pub async fn teardown(&self) -> Result<(), ControllerError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.send(Command::Teardown { done: done_tx }).await?;
        done_rx.await.map_err(|_| ControllerError::TornDown)
    }

    /// Returns `true` once the actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn send(&self, cmd: Command) -> Result<(), ControllerError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| ControllerError::TornDown)
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The controller actor state. Runs inside a Tokio task.
pub struct Controller<A: AuthVerifier, R: RoleProvider, N: Navigator> {
    resolver: SessionResolver<A, R>,
    navigator: Arc<N>,
    routes: RouteTable,

    state: SessionState,
    generation: u64,
    location: Location,
    /// Navigator segments as of the last read.
    segments: Vec<String>,
    screen: Screen,
    /// Redirect already sent to the navigator. Cleared once the host
    /// reports a position other than the one it was sent from.
    pending_redirect: Option<PendingRedirect>,
    metrics: ControllerMetrics,

    commands: mpsc::Receiver<Command>,
    completed_tx: mpsc::UnboundedSender<Completed>,
    completed_rx: mpsc::UnboundedReceiver<Completed>,
}

impl<A, R, N> Controller<A, R, N>
where
    A: AuthVerifier,
    R: RoleProvider,
    N: Navigator,
{
    /// Validates the config, spawns the controller actor, and mounts it.
    ///
    /// Mounting starts the first resolution immediately; until it
    /// finishes the screen is [`Screen::Verifying`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(
        resolver: SessionResolver<A, R>,
        navigator: Arc<N>,
        config: ControllerConfig,
    ) -> Result<ControllerHandle, ControllerError> {
        let config = config.validated()?;
        let (sender, commands) = mpsc::channel(config.command_buffer);
        let (completed_tx, completed_rx) = mpsc::unbounded_channel();

        let actor = Self {
            resolver,
            navigator,
            routes: config.routes,
            state: SessionState::Loading,
            generation: 0,
            location: Location::WelcomeRoot,
            segments: Vec::new(),
            screen: Screen::Verifying,
            pending_redirect: None,
            metrics: ControllerMetrics::default(),
            commands,
            completed_tx,
            completed_rx,
        };
        tokio::spawn(actor.run());

        Ok(ControllerHandle { sender })
    }

    /// Runs the actor loop until teardown.
    async fn run(mut self) {
        tracing::info!("controller mounted");
        self.refresh_location();
        self.start_cycle(Trigger::Mount);

        let done = loop {
            tokio::select! {
                // Commands first, so a teardown beats any result that
                // is already waiting.
                biased;

                cmd = self.commands.recv() => match cmd {
                    Some(cmd) => {
                        if let ControlFlow::Break(done) = self.handle_command(cmd) {
                            break Some(done);
                        }
                    }
                    // Every handle dropped.
                    None => break None,
                },
                Some(completed) = self.completed_rx.recv() => {
                    self.apply(completed);
                }
            }
        };

        tracing::info!(
            generation = self.generation,
            "controller torn down"
        );
        if let Some(done) = done {
            let _ = done.send(());
        }
    }

    fn handle_command(&mut self, cmd: Command) -> ControlFlow<oneshot::Sender<()>> {
        match cmd {
            Command::Invalidate(reason) => {
                self.start_cycle(Trigger::Invalidated(reason));
            }
            Command::Navigated => {
                let previous = self.location;
                self.refresh_location();
                if previous != self.location {
                    tracing::debug!(
                        from = %previous,
                        to = %self.location,
                        "location group changed"
                    );
                }
                self.reconcile();
            }
            Command::GoBack => self.go_back(),
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            Command::Teardown { done } => return ControlFlow::Break(done),
        }
        ControlFlow::Continue(())
    }

    /// Starts a new resolution cycle and supersedes any in flight.
    fn start_cycle(&mut self, trigger: Trigger) {
        self.generation += 1;
        self.state = SessionState::Loading;
        self.screen = Screen::Verifying;
        self.pending_redirect = None;
        self.metrics.resolutions_started += 1;

        let generation = self.generation;
        tracing::info!(generation, %trigger, "resolving session");

        let resolver = self.resolver.clone();
        let completed_tx = self.completed_tx.clone();
        tokio::spawn(async move {
            let (resolution, trace) = resolver.resolve_traced().await;
            // The controller may be gone by now; the result is dropped then.
            let _ = completed_tx.send(Completed {
                generation,
                resolution,
                trace,
            });
        });
    }

    /// Writes a finished resolution, unless a newer cycle has started.
    fn apply(&mut self, completed: Completed) {
        if completed.generation != self.generation {
            self.metrics.stale_discarded += 1;
            tracing::debug!(
                generation = completed.generation,
                current = self.generation,
                resolution = %completed.resolution,
                "discarding stale resolution"
            );
            return;
        }

        self.metrics.resolutions_applied += 1;
        self.state = completed.resolution.into();
        self.refresh_location();
        match &completed.trace.failure {
            Some(failure) => tracing::info!(
                generation = self.generation,
                state = %self.state,
                role_lookup = completed.trace.role_lookup_issued,
                verification_failed = failure.is_verification_failure(),
                error = %failure,
                "session resolved after collaborator failure"
            ),
            None => tracing::info!(
                generation = self.generation,
                state = %self.state,
                role_lookup = completed.trace.role_lookup_issued,
                "session resolved"
            ),
        }
        self.reconcile();
    }

    /// Runs the guard for the current state and location, then renders
    /// or redirects.
    fn reconcile(&mut self) {
        // Suspend while loading: the guard is never consulted.
        let Some(resolution) = self.state.resolution() else {
            self.screen = Screen::Verifying;
            return;
        };

        match evaluate(resolution, self.location) {
            Decision::Allow => {
                self.pending_redirect = None;
                self.screen = match resolution {
                    Resolution::Authenticated(role) => {
                        Screen::Protected(view_for_role(role))
                    }
                    Resolution::Unauthenticated => Screen::Public(self.location),
                    // Never allowed by the guard; stay on the placeholder.
                    Resolution::AuthenticatedInvalidRole => {
                        Screen::Redirecting(Redirect::SignIn)
                    }
                };
                tracing::debug!(
                    location = %self.location,
                    screen = %self.screen,
                    "view allowed"
                );
            }
            Decision::RedirectTo(target) => {
                self.screen = Screen::Redirecting(target);

                let next = after_redirect(resolution, target);
                if next != resolution {
                    tracing::info!(
                        generation = self.generation,
                        "signing out session without a usable role"
                    );
                    self.state = next.into();
                }

                if self
                    .pending_redirect
                    .as_ref()
                    .is_some_and(|pending| pending.target == target)
                {
                    tracing::trace!(%target, "redirect already issued");
                    return;
                }
                self.pending_redirect = Some(PendingRedirect {
                    target,
                    from: self.segments.clone(),
                });
                self.metrics.redirects_issued += 1;

                let path = self.routes.path_for(target);
                tracing::info!(
                    generation = self.generation,
                    from = %self.location,
                    %target,
                    path,
                    "redirecting"
                );
                self.navigator.replace(path);
            }
        }
    }

    fn go_back(&mut self) {
        if let Err(e) = self.navigator.back() {
            self.metrics.navigation_fallbacks += 1;
            let home = self.routes.path_for(Redirect::Home);
            tracing::warn!(error = %e, path = home, "back navigation failed, going home");
            self.navigator.replace(home);
        }
    }

    /// Reads and classifies the navigator's position, logging the
    /// breadcrumb. A pending redirect is dropped once the host has moved
    /// away from where it was issued.
    fn refresh_location(&mut self) {
        self.segments = self.navigator.current_location();
        self.location = self.routes.classify(&self.segments);

        let breadcrumb = if self.segments.is_empty() {
            "root".to_string()
        } else {
            self.segments.join(" > ")
        };
        tracing::debug!(%breadcrumb, location = %self.location, "navigation breadcrumb");

        if self
            .pending_redirect
            .as_ref()
            .is_some_and(|pending| pending.from != self.segments)
        {
            self.pending_redirect = None;
        }
    }

    fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            generation: self.generation,
            state: self.state,
            location: self.location,
            screen: self.screen,
            metrics: self.metrics,
        }
    }
}
