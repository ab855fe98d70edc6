use attendance_api::domain::{BearerToken, GeoLocation};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Hr,
    Employee,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Hr => f.write_str("HR"),
            Role::Employee => f.write_str("Employee"),
        }
    }
}

/// A requested action cannot run yet; nothing was sent to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Precondition {
    #[error("Please log in as {0} first.")]
    NotLoggedIn(Role),
    #[error("Please share your location first.")]
    MissingLocation,
    #[error("Please scan the QR code to open this page.")]
    MissingScanToken,
}

/// Credentials and last location for one run of the dashboard.
///
/// Lives only in memory and is handed to every action handler explicitly.
#[derive(Debug, Default)]
pub struct Session {
    hr_token: Option<BearerToken>,
    employee_token: Option<BearerToken>,
    location: Option<GeoLocation>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, role: Role) -> &mut Option<BearerToken> {
        match role {
            Role::Hr => &mut self.hr_token,
            Role::Employee => &mut self.employee_token,
        }
    }

    pub fn token(&self, role: Role) -> Option<&BearerToken> {
        match role {
            Role::Hr => self.hr_token.as_ref(),
            Role::Employee => self.employee_token.as_ref(),
        }
    }

    pub fn is_logged_in(&self, role: Role) -> bool {
        self.token(role).is_some()
    }

    pub fn require(&self, role: Role) -> Result<&BearerToken, Precondition> {
        self.token(role).ok_or(Precondition::NotLoggedIn(role))
    }

    pub fn login(&mut self, role: Role, token: BearerToken) {
        *self.slot(role) = Some(token);
    }

    /// Returns whether a token was actually removed.
    pub fn logout(&mut self, role: Role) -> bool {
        self.slot(role).take().is_some()
    }

    pub fn location(&self) -> Option<GeoLocation> {
        self.location
    }

    pub fn set_location(&mut self, location: GeoLocation) {
        self.location = Some(location);
    }

    pub fn require_location(&self) -> Result<GeoLocation, Precondition> {
        self.location.ok_or(Precondition::MissingLocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_are_independent() {
        let mut session = Session::new();
        session.login(Role::Hr, BearerToken::new("hr"));

        assert!(session.is_logged_in(Role::Hr));
        assert_eq!(
            session.require(Role::Employee),
            Err(Precondition::NotLoggedIn(Role::Employee))
        );

        session.login(Role::Employee, BearerToken::new("emp"));
        assert!(session.logout(Role::Hr));
        assert!(!session.logout(Role::Hr));
        assert_eq!(
            session.require(Role::Employee).map(BearerToken::as_str),
            Ok("emp")
        );
    }

    #[test]
    fn location_is_required_before_marking() {
        let mut session = Session::new();
        assert_eq!(
            session.require_location(),
            Err(Precondition::MissingLocation)
        );

        let loc = GeoLocation {
            latitude: 1.0,
            longitude: 2.0,
        };
        session.set_location(loc);
        assert_eq!(session.require_location(), Ok(loc));
    }

    #[test]
    fn precondition_messages() {
        assert_eq!(
            Precondition::NotLoggedIn(Role::Hr).to_string(),
            "Please log in as HR first."
        );
        assert_eq!(
            Precondition::MissingScanToken.to_string(),
            "Please scan the QR code to open this page."
        );
    }
}
