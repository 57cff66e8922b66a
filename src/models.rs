//! Domain bodies carried inside Mason documents.

use serde::{Deserialize, Serialize};

use crate::mason::{Collection, MasonDoc};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub director: Option<String>,
    /// Running time in minutes.
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
}

/// Body posted to the login control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub type MovieDoc = MasonDoc<Movie>;
pub type ReviewDoc = MasonDoc<Review>;
pub type UserDoc = MasonDoc<User>;
pub type CategoryDoc = MasonDoc<Category>;

pub type MovieList = MasonDoc<Collection<Movie>>;
pub type ReviewList = MasonDoc<Collection<Review>>;
pub type CategoryList = MasonDoc<Collection<Category>>;

impl Movie {
    /// "1h 52min" style running time.
    pub fn running_time(&self) -> Option<String> {
        self.length.map(|minutes| match (minutes / 60, minutes % 60) {
            (0, m) => format!("{m}min"),
            (h, 0) => format!("{h}h"),
            (h, m) => format!("{h}h {m}min"),
        })
    }
}

impl Review {
    /// Rating rendered as filled/empty stars out of five.
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(5 - filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_movie_doc() {
        let doc: MovieDoc = serde_json::from_value(json!({
            "id": 1,
            "title": "JamesCrow",
            "director": "JamesCrow",
            "length": 60,
            "release_date": "2022-01-03",
            "category_id": 1,
            "@controls": { "self": { "href": "/api/movies/1/" } }
        }))
        .unwrap();
        assert_eq!(doc.body.title, "JamesCrow");
        assert_eq!(doc.body.length, Some(60));
        assert_eq!(doc.self_href(), Some("/api/movies/1/"));
    }

    #[test]
    fn test_decode_sparse_movie() {
        let movie: Movie = serde_json::from_value(json!({ "id": 2, "title": "BigMan" })).unwrap();
        assert_eq!(movie.director, None);
        assert_eq!(movie.running_time(), None);
    }

    #[test]
    fn test_running_time() {
        let mut movie: Movie = serde_json::from_value(json!({ "id": 1, "title": "t" })).unwrap();
        movie.length = Some(112);
        assert_eq!(movie.running_time().unwrap(), "1h 52min");
        movie.length = Some(120);
        assert_eq!(movie.running_time().unwrap(), "2h");
        movie.length = Some(45);
        assert_eq!(movie.running_time().unwrap(), "45min");
    }

    #[test]
    fn test_review_stars() {
        let review: Review = serde_json::from_value(json!({
            "id": 1,
            "rating": 3,
            "comment": "JamesCrow REVIEW",
            "author": "dummyGuy"
        }))
        .unwrap();
        assert_eq!(review.stars(), "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}");
    }

    #[test]
    fn test_decode_user() {
        let user: UserDoc = serde_json::from_value(json!({
            "id": 1,
            "username": "dummyGuy1",
            "email_address": "dummyGuy1@gmail.com",
            "role": "Basic User"
        }))
        .unwrap();
        assert_eq!(user.body.role.as_deref(), Some("Basic User"));
    }

    #[test]
    fn test_credentials_body() {
        let body = serde_json::to_value(Credentials {
            username: "dd".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "username": "dd", "password": "secret" }));
    }
}
