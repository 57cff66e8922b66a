//! Routing table.
//!
//! ```text
//! /                -> movie list
//! /login           -> login form
//! /logout          -> logout
//! /movie/:movieId  -> movie detail
//! /profile         -> profile
//! anything else    -> redirect to /
//! ```
//!
//! The movie detail route does not derive its URL from the path. The
//! movie list passes the movie's own link (and the category title for
//! display) as [`NavState`] when navigating.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    MovieList,
    Login,
    Logout,
    MovieDetail { movie_id: String },
    Profile,
}

/// Result of matching a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matched {
    Route(Route),
    /// Unknown path; the router replaces it with this route.
    Redirect(Route),
}

impl Matched {
    pub fn route(&self) -> &Route {
        match self {
            Matched::Route(route) | Matched::Redirect(route) => route,
        }
    }
}

impl Route {
    pub fn recognize(path: &str) -> Matched {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] => Matched::Route(Route::MovieList),
            ["login"] => Matched::Route(Route::Login),
            ["logout"] => Matched::Route(Route::Logout),
            ["profile"] => Matched::Route(Route::Profile),
            ["movie", id] if !id.is_empty() => Matched::Route(Route::MovieDetail {
                movie_id: (*id).to_string(),
            }),
            _ => Matched::Redirect(Route::MovieList),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::MovieList => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Logout => "/logout".to_string(),
            Route::MovieDetail { movie_id } => format!("/movie/{movie_id}"),
            Route::Profile => "/profile".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Transient state handed to the next view on navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    Movie {
        /// The movie document's own URL, taken from the list item's controls.
        movie_url: String,
        category_title: Option<String>,
    },
}

impl NavState {
    pub fn movie_url(&self) -> &str {
        match self {
            NavState::Movie { movie_url, .. } => movie_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_known_paths() {
        assert_eq!(Route::recognize("/"), Matched::Route(Route::MovieList));
        assert_eq!(Route::recognize(""), Matched::Route(Route::MovieList));
        assert_eq!(Route::recognize("/login"), Matched::Route(Route::Login));
        assert_eq!(Route::recognize("/logout/"), Matched::Route(Route::Logout));
        assert_eq!(Route::recognize("/profile"), Matched::Route(Route::Profile));
        assert_eq!(
            Route::recognize("/movie/42"),
            Matched::Route(Route::MovieDetail {
                movie_id: "42".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_paths_redirect_home() {
        for path in ["/movies", "/movie", "/movie/1/reviews", "/admin"] {
            assert_eq!(
                Route::recognize(path),
                Matched::Redirect(Route::MovieList),
                "{path}"
            );
        }
    }

    #[test]
    fn test_path_round_trip() {
        let route = Route::MovieDetail {
            movie_id: "7".to_string(),
        };
        assert_eq!(route.path(), "/movie/7");
        assert_eq!(Route::recognize(&route.path()).route(), &route);
    }
}
