//! Route table for the SPA.
//!
//! | Path                 | Route            |
//! |----------------------|------------------|
//! | `/`                  | `Gate`           |
//! | `/dash`              | `Dashboard`      |
//! | `/:channel`          | `Channel`        |
//! | `/:channel/password` | `PasswordPrompt` |

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use super::guard::{GuardDecision, NavigationGuard, RouteTransition};
use super::navigator::NavigationTarget;

/// The gate route; the only route reachable without a credential.
pub const GATE_PATH: &str = "/";

const DASHBOARD_SEGMENT: &str = "dash";
const PASSWORD_SEGMENT: &str = "password";

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Gate,
    Dashboard,
    Channel(String),
    PasswordPrompt(String),
}

impl AppRoute {
    /// Match a path (query and fragment ignored) against the route table.
    /// Segments are percent-decoded, so `/a%3Fb` is the channel `a?b`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<String> = path_only(path)
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect();
        match segments.as_slice() {
            [] => Some(Self::Gate),
            [dash] if dash == DASHBOARD_SEGMENT => Some(Self::Dashboard),
            [channel] => Some(Self::Channel(channel.clone())),
            [channel, password] if password == PASSWORD_SEGMENT => Some(Self::PasswordPrompt(channel.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Gate => GATE_PATH.to_owned(),
            Self::Dashboard => format!("/{DASHBOARD_SEGMENT}"),
            Self::Channel(channel) => format!("/{}", encode_segment(channel)),
            Self::PasswordPrompt(channel) => format!("/{}/{PASSWORD_SEGMENT}", encode_segment(channel)),
        }
    }

    #[must_use]
    pub fn target(&self) -> NavigationTarget {
        NavigationTarget::new(self.path())
    }
}

/// What the router shows for a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    Render(AppRoute),
    Redirect(String),
    NotFound,
}

/// Run `guard` on the transition, then match the target. A redirect means
/// no page is mounted for the original target.
#[must_use]
pub fn resolve(guard: &dyn NavigationGuard, transition: &RouteTransition) -> RouteOutcome {
    if let GuardDecision::Redirect(target) = guard.check(transition) {
        return RouteOutcome::Redirect(target);
    }
    AppRoute::parse(&transition.to).map_or(RouteOutcome::NotFound, RouteOutcome::Render)
}

/// Escape a value so it stays one path segment. `.` and `..` are escaped
/// too, or URL normalisation would drop them.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    match segment {
        "." => "%2E".to_owned(),
        ".." => "%2E%2E".to_owned(),
        _ => utf8_percent_encode(segment, SEGMENT).to_string(),
    }
}

#[must_use]
pub fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Strip the query string and fragment from a full path.
#[must_use]
pub fn path_only(full_path: &str) -> &str {
    full_path.split(['?', '#']).next().unwrap_or_default()
}

/// Where the password prompt sends the user afterwards: `cb` when it is a
/// local path, otherwise the channel itself.
#[must_use]
pub fn password_return_path(channel: &str, cb: Option<&str>) -> String {
    match cb {
        Some(cb) if cb.starts_with('/') && !cb.starts_with("//") => cb.to_owned(),
        _ => AppRoute::Channel(channel.to_owned()).path(),
    }
}

/// Validate a user-typed channel name. Names must fit in one path segment
/// and must not shadow the dashboard route.
#[must_use]
pub fn normalize_channel_name(input: &str) -> Option<String> {
    let name = input.trim();
    if name.is_empty() || name == DASHBOARD_SEGMENT || name.contains(['/', '?', '#', '%']) {
        return None;
    }
    Some(name.to_owned())
}
