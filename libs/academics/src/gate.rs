//! Role-based gating of protected views
//!
//! [`decide`] is the whole decision table. [`SessionGate`] wraps it with the
//! one piece of state the table needs in practice: the last decision it
//! acted on, so that re-evaluating unchanged inputs never navigates twice.

use serde::Serialize;
use tracing::{debug, warn};

use crate::provider::SessionState;
use crate::role::Role;

/// Where a rejected visitor is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RedirectTarget {
    Login,
    Home,
}

impl RedirectTarget {
    pub fn path(self) -> &'static str {
        match self {
            RedirectTarget::Login => "/auth/login",
            RedirectTarget::Home => "/",
        }
    }
}

/// Outcome of gating a protected view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateDecision {
    /// The session is still being resolved; show a neutral placeholder
    Pending,
    RedirectLogin,
    RedirectHome,
    Render,
}

impl GateDecision {
    pub fn redirect_target(self) -> Option<RedirectTarget> {
        match self {
            GateDecision::RedirectLogin => Some(RedirectTarget::Login),
            GateDecision::RedirectHome => Some(RedirectTarget::Home),
            GateDecision::Pending | GateDecision::Render => None,
        }
    }
}

/// Receives the navigation side effect of a gate
pub trait Navigator {
    fn navigate(&mut self, target: RedirectTarget);
}

impl Navigator for Vec<RedirectTarget> {
    fn navigate(&mut self, target: RedirectTarget) {
        self.push(target);
    }
}

/// Decide what a protected view does for the given session state.
///
/// An empty `allowed_roles` admits any authenticated role.
pub fn decide(state: &SessionState, allowed_roles: &[Role]) -> GateDecision {
    match state {
        SessionState::Resolving => GateDecision::Pending,
        SessionState::Resolved(None) => GateDecision::RedirectLogin,
        SessionState::Resolved(Some(session)) => {
            if allowed_roles.is_empty() || allowed_roles.contains(&session.role()) {
                GateDecision::Render
            } else {
                GateDecision::RedirectHome
            }
        }
    }
}

/// Gate for one protected view
#[derive(Debug, Clone)]
pub struct SessionGate {
    allowed_roles: Vec<Role>,
    last_decision: Option<GateDecision>,
}

impl SessionGate {
    pub fn new(allowed_roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed_roles: allowed_roles.into_iter().collect(),
            last_decision: None,
        }
    }

    /// Gate that admits any authenticated role
    pub fn any_role() -> Self {
        Self {
            allowed_roles: Vec::new(),
            last_decision: None,
        }
    }

    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed_roles
    }

    /// Evaluate the gate and perform the redirect, if any.
    ///
    /// Navigation happens only when the decision differs from the previous
    /// evaluation, and never towards the path the visitor is already on.
    pub fn evaluate<N: Navigator + ?Sized>(
        &mut self,
        state: &SessionState,
        current_path: &str,
        navigator: &mut N,
    ) -> GateDecision {
        let decision = decide(state, &self.allowed_roles);

        if self.last_decision == Some(decision) {
            return decision;
        }
        self.last_decision = Some(decision);

        if decision == GateDecision::RedirectHome {
            if let SessionState::Resolved(Some(session)) = state {
                warn!(
                    "Access denied for role {} on {}",
                    session.role(),
                    current_path
                );
            }
        }

        if let Some(target) = decision.redirect_target() {
            if target.path() == current_path {
                debug!("Already on {}, skipping redirect", current_path);
            } else {
                navigator.navigate(target);
            }
        }

        decision
    }

    /// Forget the last decision, as when the protected view is mounted again
    pub fn reset(&mut self) {
        self.last_decision = None;
    }
}
