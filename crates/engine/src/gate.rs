//! Authorization gate: provider identity plus a local PIN and allow-list.
//!
//! Provider sign-in happens outside this crate; the gate only records its
//! outcome and layers the PIN check on top. Session state is explicit and
//! keyed by user id. A session is cleared on sign-out, on PIN mismatch, and
//! whenever the presented identity no longer matches the cached one.

use std::collections::HashMap;

use serde::Deserialize;

/// The authorization policy, injected from configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct GatePolicy {
    /// The 4-digit PIN checked after provider sign-in.
    pub pin: String,
    /// Provider emails admitted past sign-in. Empty admits everyone.
    #[serde(default)]
    pub allowed_emails: Vec<String>,
}

impl GatePolicy {
    pub fn allows(&self, email: &str) -> bool {
        self.allowed_emails.is_empty() || self.allowed_emails.iter().any(|allowed| allowed == email)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Unauthenticated,
    /// Provider identity accepted, PIN not yet verified.
    PinPending,
    Authorized,
    /// Terminal outcome of a rejected transition; never cached.
    Denied,
}

impl GateState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::PinPending => "pin_pending",
            Self::Authorized => "authorized",
            Self::Denied => "denied",
        }
    }
}

#[derive(Clone, Debug)]
struct Session {
    email: String,
    state: GateState,
}

#[derive(Debug)]
pub struct Gate {
    policy: GatePolicy,
    sessions: HashMap<String, Session>,
}

impl Gate {
    pub fn new(policy: GatePolicy) -> Self {
        Self {
            policy,
            sessions: HashMap::new(),
        }
    }

    /// Records a provider-verified identity.
    ///
    /// An identity outside the allow-list is `Denied` and its session is
    /// dropped (the caller must treat this as a forced sign-out). An
    /// already-authorized session for the same identity survives provider
    /// round-trips.
    pub fn provider_sign_in(&mut self, user_id: &str, email: &str) -> GateState {
        if !self.policy.allows(email) {
            self.sessions.remove(user_id);
            return GateState::Denied;
        }

        let state = match self.sessions.get(user_id) {
            Some(session) if session.email == email && session.state == GateState::Authorized => {
                GateState::Authorized
            }
            _ => GateState::PinPending,
        };
        self.sessions.insert(
            user_id.to_string(),
            Session {
                email: email.to_string(),
                state,
            },
        );
        state
    }

    /// Checks a submitted PIN for a provider-verified session.
    ///
    /// A wrong PIN clears the session entirely: the user must sign in with
    /// the provider again.
    pub fn submit_pin(&mut self, user_id: &str, email: &str, pin: &str) -> GateState {
        let known = match self.sessions.get(user_id) {
            Some(session) => session.email == email,
            None => false,
        };
        if !known {
            self.sessions.remove(user_id);
            return GateState::Unauthenticated;
        }

        if pin == self.policy.pin {
            if let Some(session) = self.sessions.get_mut(user_id) {
                session.state = GateState::Authorized;
            }
            GateState::Authorized
        } else {
            self.sessions.remove(user_id);
            GateState::Denied
        }
    }

    pub fn sign_out(&mut self, user_id: &str) {
        self.sessions.remove(user_id);
    }

    /// Current state for a presented identity. A cached session whose email
    /// no longer matches the identity is invalidated on the spot.
    pub fn state(&mut self, user_id: &str, email: &str) -> GateState {
        match self.sessions.get(user_id) {
            Some(session) if session.email == email => session.state,
            Some(_) => {
                self.sessions.remove(user_id);
                GateState::Unauthenticated
            }
            None => GateState::Unauthenticated,
        }
    }

    pub fn is_authorized(&mut self, user_id: &str, email: &str) -> bool {
        self.state(user_id, email) == GateState::Authorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> Gate {
        Gate::new(GatePolicy {
            pin: "1234".to_string(),
            allowed_emails: vec!["alice@example.com".to_string()],
        })
    }

    #[test]
    fn sign_in_then_correct_pin_authorizes() {
        let mut gate = gate();
        assert_eq!(
            gate.provider_sign_in("u1", "alice@example.com"),
            GateState::PinPending
        );
        assert_eq!(
            gate.submit_pin("u1", "alice@example.com", "1234"),
            GateState::Authorized
        );
        assert!(gate.is_authorized("u1", "alice@example.com"));
    }

    #[test]
    fn unknown_email_is_denied() {
        let mut gate = gate();
        assert_eq!(
            gate.provider_sign_in("u2", "mallory@example.com"),
            GateState::Denied
        );
        assert_eq!(gate.state("u2", "mallory@example.com"), GateState::Unauthenticated);
    }

    #[test]
    fn empty_allow_list_admits_everyone() {
        let mut gate = Gate::new(GatePolicy {
            pin: "1234".to_string(),
            allowed_emails: vec![],
        });
        assert_eq!(
            gate.provider_sign_in("u1", "anyone@example.com"),
            GateState::PinPending
        );
    }

    #[test]
    fn wrong_pin_forces_a_fresh_sign_in() {
        let mut gate = gate();
        gate.provider_sign_in("u1", "alice@example.com");
        assert_eq!(
            gate.submit_pin("u1", "alice@example.com", "0000"),
            GateState::Denied
        );
        // The session is gone; a bare PIN retry is not enough.
        assert_eq!(
            gate.submit_pin("u1", "alice@example.com", "1234"),
            GateState::Unauthenticated
        );
        // Signing in again restores the PIN step.
        assert_eq!(
            gate.provider_sign_in("u1", "alice@example.com"),
            GateState::PinPending
        );
    }

    #[test]
    fn authorization_survives_provider_round_trips() {
        let mut gate = gate();
        gate.provider_sign_in("u1", "alice@example.com");
        gate.submit_pin("u1", "alice@example.com", "1234");
        assert_eq!(
            gate.provider_sign_in("u1", "alice@example.com"),
            GateState::Authorized
        );
    }

    #[test]
    fn identity_change_invalidates_the_cache() {
        let mut gate = Gate::new(GatePolicy {
            pin: "1234".to_string(),
            allowed_emails: vec![],
        });
        gate.provider_sign_in("u1", "alice@example.com");
        gate.submit_pin("u1", "alice@example.com", "1234");

        assert_eq!(gate.state("u1", "other@example.com"), GateState::Unauthenticated);
        // The stale session was dropped, not just hidden.
        assert_eq!(gate.state("u1", "alice@example.com"), GateState::Unauthenticated);
    }

    #[test]
    fn sign_out_clears_the_session() {
        let mut gate = gate();
        gate.provider_sign_in("u1", "alice@example.com");
        gate.submit_pin("u1", "alice@example.com", "1234");
        gate.sign_out("u1");
        assert!(!gate.is_authorized("u1", "alice@example.com"));
    }
}
