//! Data side of each view.
//!
//! These functions do the fetching and link-following for the movie list,
//! movie detail, reviews, profile, login and logout views. Rendering lives
//! in the front ends; they only decide what to show for each
//! [`ViewState`].

use serde_json::Value;

use crate::endpoints::{Endpoint, Endpoints};
use crate::error::FetchError;
use crate::http::{HttpClient, get_doc, post_doc};
use crate::mason::{ControlName, Namespace};
use crate::models::{
    Category, CategoryList, Credentials, Movie, MovieDoc, MovieList, Review, ReviewList, UserDoc,
};
use crate::route::NavState;
use crate::session::{AppAction, SessionState};
use crate::view::{DependentInput, Mounted, ViewState, load};

/// One row of the movie list.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieEntry {
    pub movie: Movie,
    pub category_title: Option<String>,
    /// Navigation state for the detail view; `None` when the item has no
    /// `self` link to follow.
    pub nav: Option<NavState>,
}

/// Load the movie list from the `moviesAll` endpoint.
///
/// Category titles come from `categoriesAll` when the API offers it. A
/// failure there only leaves the titles blank.
pub async fn load_movie_list<C>(
    client: &C,
    endpoints: &Endpoints,
    mounted: &Mounted,
) -> Option<ViewState<Vec<MovieEntry>>>
where
    C: HttpClient + ?Sized,
{
    let state: ViewState<MovieList> =
        load(client, endpoints.get(Endpoint::MoviesAll), mounted).await?;
    let list = match state {
        ViewState::Loaded(list) => list,
        other => return Some(other.map(|_| Vec::new())),
    };

    let categories = match endpoints.get(Endpoint::CategoriesAll) {
        Some(url) => match get_doc::<C, CategoryList>(client, url).await {
            Ok(doc) => doc.body.items.into_iter().map(|item| item.body).collect(),
            Err(err) => {
                log::warn!("Category titles unavailable: {err}");
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    if !mounted.is_mounted() {
        return None;
    }

    let entries = list
        .body
        .items
        .into_iter()
        .map(|item| movie_entry(item, &categories))
        .collect();
    Some(ViewState::Loaded(entries))
}

fn movie_entry(item: MovieDoc, categories: &[Category]) -> MovieEntry {
    let category_title = item
        .body
        .category_id
        .and_then(|id| categories.iter().find(|c| c.id == id))
        .map(|c| c.title.clone());
    let nav = item.self_href().map(|href| NavState::Movie {
        movie_url: href.to_string(),
        category_title: category_title.clone(),
    });
    MovieEntry {
        movie: item.body,
        category_title,
        nav,
    }
}

/// Load the movie the list navigated to.
pub async fn load_movie<C>(
    client: &C,
    nav: Option<&NavState>,
    mounted: &Mounted,
) -> Option<ViewState<MovieDoc>>
where
    C: HttpClient + ?Sized,
{
    load(client, nav.map(NavState::movie_url), mounted).await
}

/// Reviews link for the detail view's reviews section.
pub fn reviews_input(movie: &ViewState<MovieDoc>, namespace: &Namespace) -> DependentInput<String> {
    movie.child(|doc| {
        doc.controls
            .href(namespace, ControlName::ReviewsForMovie)
            .map(str::to_string)
    })
}

/// Load reviews once the parent movie has provided its link.
///
/// `Pending` input yields `Loading` without a request; `Absent` yields
/// `Unavailable`.
pub async fn load_reviews<C>(
    client: &C,
    input: &DependentInput<String>,
    mounted: &Mounted,
) -> Option<ViewState<Vec<Review>>>
where
    C: HttpClient + ?Sized,
{
    if let DependentInput::Pending = input {
        return Some(ViewState::Loading);
    }
    let state: ViewState<ReviewList> =
        load(client, input.ready().map(String::as_str), mounted).await?;
    Some(state.map(|list| list.body.items.into_iter().map(|item| item.body).collect()))
}

/// The URL the profile view fetches, if it may fetch at all.
pub fn profile_url<'a>(endpoints: &'a Endpoints, session: &'a SessionState) -> Option<&'a str> {
    if !session.is_logged_in() {
        return None;
    }
    session
        .user_url
        .as_deref()
        .or_else(|| endpoints.get(Endpoint::CurrentUser))
}

pub async fn load_profile<C>(
    client: &C,
    endpoints: &Endpoints,
    session: &SessionState,
    mounted: &Mounted,
) -> Option<ViewState<UserDoc>>
where
    C: HttpClient + ?Sized,
{
    load(client, profile_url(endpoints, session), mounted).await
}

/// Submit credentials to the login control.
///
/// Returns the session update to dispatch. The user URL is the response's
/// `self` link when it has one, else the root's `currentUser` endpoint.
pub async fn login<C>(
    client: &C,
    login_url: &str,
    endpoints: &Endpoints,
    credentials: &Credentials,
) -> Result<AppAction, FetchError>
where
    C: HttpClient + ?Sized,
{
    let body = post_doc(client, login_url, credentials).await?;
    let user_url = login_user_url(&body)
        .or_else(|| endpoints.get(Endpoint::CurrentUser).map(str::to_string));
    Ok(AppAction::LoggedIn {
        username: credentials.username.clone(),
        user_url,
    })
}

fn login_user_url(body: &Value) -> Option<String> {
    body.get("@controls")?
        .get(ControlName::SelfLink.as_str())?
        .get("href")?
        .as_str()
        .map(str::to_string)
}

/// Session update performed by the logout view.
pub fn logout() -> AppAction {
    AppAction::LoggedOut
}
