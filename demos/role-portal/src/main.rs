use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rolegate::prelude::*;

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Token storage plus a user record, standing in for a real API.
struct Backend {
    token: Mutex<Option<String>>,
    role_id: i64,
    latency: Duration,
}

impl AuthVerifier for Backend {
    async fn is_authenticated(&self) -> Result<bool, SessionError> {
        tokio::time::sleep(self.latency).await;
        Ok(self.token.lock().map_err(|_| poisoned())?.is_some())
    }
}

impl RoleProvider for Backend {
    async fn user_role(&self) -> Result<Option<RolePayload>, SessionError> {
        tokio::time::sleep(self.latency).await;
        // The user service still answers with the old field name.
        let body = serde_json::json!({ "rous_id": self.role_id }).to_string();
        RolePayload::from_json(body.as_bytes())
            .map(Some)
            .map_err(|e| SessionError::RoleFetch(e.to_string()))
    }
}

fn poisoned() -> SessionError {
    SessionError::Verification("token store poisoned".into())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// A stack router that prints every move.
struct StackRouter {
    stack: Mutex<Vec<String>>,
    moved: AtomicBool,
}

impl StackRouter {
    fn new(start: &str) -> Self {
        Self {
            stack: Mutex::new(vec![start.to_string()]),
            moved: AtomicBool::new(false),
        }
    }

    fn push(&self, path: &str) {
        if let Ok(mut stack) = self.stack.lock() {
            println!("  user opens {path}");
            stack.push(path.to_string());
        }
        self.moved.store(true, Ordering::SeqCst);
    }

    /// Returns whether the router moved since the last call.
    fn take_moved(&self) -> bool {
        self.moved.swap(false, Ordering::SeqCst)
    }
}

impl Navigator for StackRouter {
    fn replace(&self, path: &str) {
        if let Ok(mut stack) = self.stack.lock() {
            println!("  router replaces with {path}");
            stack.pop();
            stack.push(path.to_string());
        }
        self.moved.store(true, Ordering::SeqCst);
    }

    fn current_location(&self) -> Vec<String> {
        self.stack
            .lock()
            .ok()
            .and_then(|stack| stack.last().map(|p| RouteTable::segments_of(p)))
            .unwrap_or_default()
    }

    fn back(&self) -> Result<(), NavigationError> {
        let mut stack = self
            .stack
            .lock()
            .map_err(|_| NavigationError::Rejected("router poisoned".into()))?;
        if stack.len() < 2 {
            return Err(NavigationError::NoHistory);
        }
        stack.pop();
        println!("  router goes back to {}", stack.last().map_or("/", |p| p.as_str()));
        self.moved.store(true, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Host loop
// ---------------------------------------------------------------------------

/// Plays the host: reports moves back to the controller until the screen
/// stops being a placeholder, then prints it.
async fn render(
    handle: &ControllerHandle,
    router: &StackRouter,
) -> Result<ControllerSnapshot, RolegateError> {
    loop {
        if router.take_moved() {
            handle.navigated().await?;
        }
        let snapshot = handle.snapshot().await?;
        if !snapshot.screen.is_placeholder() {
            println!("  screen: {} ({})", snapshot.screen, snapshot.state);
            return Ok(snapshot);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rolegate::telemetry::init("rolegate=info,role_portal=info");

    let config = RolegateConfig::from_json(r#"{"controller": {"command_buffer": 16}}"#)?;
    let backend = Arc::new(Backend {
        token: Mutex::new(None),
        role_id: 2,
        latency: Duration::from_millis(50),
    });
    let router = Arc::new(StackRouter::new("/"));
    let resolver = SessionResolver::from_shared(Arc::clone(&backend), Arc::clone(&backend));
    let handle = Controller::spawn(resolver, Arc::clone(&router), config.controller)?;

    println!("app launches on the welcome screen");
    render(&handle, &router).await?;

    println!("user tries to open their profile without signing in");
    router.push("/(tabs)/profile");
    render(&handle, &router).await?;

    println!("user signs in");
    *backend.token.lock().map_err(|_| "token store poisoned")? = Some("token".into());
    handle.invalidate(InvalidationReason::TokenChanged).await?;
    render(&handle, &router).await?;

    println!("user navigates back");
    handle.go_back().await?;
    render(&handle, &router).await?;

    println!("user logs out from the drawer");
    *backend.token.lock().map_err(|_| "token store poisoned")? = None;
    handle.logout().await?;
    let snapshot = render(&handle, &router).await?;

    tracing::info!(metrics = ?snapshot.metrics, "demo finished");
    handle.teardown().await?;
    Ok(())
}
