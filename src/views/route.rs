//! Path resolution with the session guard.
//!
//! The guard is a client-side convenience only. Authorization is whatever
//! the backend enforces on each request.

use super::events::Route;
use crate::session::Session;

pub struct Router;

impl Router {
    /// Resolve a path to the route that should be shown.
    ///
    /// Guarded routes fall back to the welcome page without a session;
    /// empty and unknown paths redirect there too.
    pub fn resolve(path: &str, session: &Session) -> Route {
        let requested = match path.trim().trim_matches('/') {
            "welcome" => Route::Welcome,
            "movies" => Route::Movies,
            "profile" => Route::Profile,
            other => {
                tracing::debug!("Unknown path '{}', redirecting to welcome", other);
                Route::Welcome
            }
        };

        if Self::can_activate(requested, session) {
            requested
        } else {
            tracing::debug!("No session for {}, redirecting to welcome", requested);
            Route::Welcome
        }
    }

    pub fn can_activate(route: Route, session: &Session) -> bool {
        !route.requires_session() || session.is_logged_in()
    }
}
