//! Movie list, movie detail and the reviews section.

use std::rc::Rc;

use moviereview_client::models::{MovieDoc, Review};
use moviereview_client::views::{self, MovieEntry};
use moviereview_client::{
    DependentInput, Endpoint, Endpoints, MountGuard, Namespace, NavState, Route, ViewState,
};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::{EmptyState, ErrorMessage, Loading};
use crate::http::GlooClient;
use crate::router::Navigate;

#[derive(Properties, PartialEq)]
pub struct MovieListProps {
    pub endpoints: Endpoints,
    pub navigate: Callback<Navigate>,
}

#[function_component(MovieList)]
pub fn movie_list(props: &MovieListProps) -> Html {
    let state = use_state(|| {
        ViewState::<Vec<MovieEntry>>::for_input(props.endpoints.get(Endpoint::MoviesAll))
    });

    {
        let state = state.clone();
        use_effect_with(props.endpoints.clone(), move |endpoints| {
            let guard = MountGuard::new();
            let mounted = guard.handle();
            let endpoints = endpoints.clone();
            spawn_local(async move {
                let next = views::load_movie_list(&GlooClient, &endpoints, &mounted).await;
                if let Some(next) = next {
                    state.set(next);
                }
            });
            move || drop(guard)
        });
    }

    match &*state {
        ViewState::Unavailable => {
            html! { <EmptyState message="Movies are not available right now." /> }
        }
        ViewState::Loading => html! { <Loading /> },
        ViewState::Errored(message) => html! { <ErrorMessage message={message.clone()} /> },
        ViewState::Loaded(entries) if entries.is_empty() => {
            html! { <EmptyState message="No movies yet." /> }
        }
        ViewState::Loaded(entries) => html! {
            <ul class="movie-list">
                { for entries.iter().map(|entry| movie_row(entry, &props.navigate)) }
            </ul>
        },
    }
}

fn movie_row(entry: &MovieEntry, navigate: &Callback<Navigate>) -> Html {
    let movie = &entry.movie;
    let category = entry.category_title.clone().unwrap_or_default();
    let details = [movie.release_date.clone(), movie.running_time()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" | ");

    match &entry.nav {
        Some(nav) => {
            let navigate = navigate.clone();
            let nav = nav.clone();
            let movie_id = movie.id.to_string();
            let onclick = Callback::from(move |_: MouseEvent| {
                navigate.emit(Navigate {
                    to: Route::MovieDetail {
                        movie_id: movie_id.clone(),
                    },
                    nav: Some(nav.clone()),
                });
            });
            html! {
                <li class="movie-item clickable" {onclick}>
                    <span class="movie-title">{ &movie.title }</span>
                    <span class="movie-category">{ category }</span>
                    <span class="movie-details">{ details }</span>
                </li>
            }
        }
        None => html! {
            <li class="movie-item">
                <span class="movie-title">{ &movie.title }</span>
                <span class="movie-category">{ category }</span>
                <span class="movie-details">{ details }</span>
            </li>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct MovieDetailProps {
    pub nav: Option<Rc<NavState>>,
    pub namespace: Namespace,
    pub on_title: Callback<String>,
}

#[function_component(MovieDetail)]
pub fn movie_detail(props: &MovieDetailProps) -> Html {
    let movie_url = props.nav.as_ref().map(|nav| nav.movie_url().to_string());
    let state = use_state(|| ViewState::<MovieDoc>::for_input(movie_url.as_deref()));

    {
        let state = state.clone();
        let nav = props.nav.clone();
        let on_title = props.on_title.clone();
        use_effect_with(movie_url, move |_| {
            let guard = MountGuard::new();
            let mounted = guard.handle();
            spawn_local(async move {
                let next = views::load_movie(&GlooClient, nav.as_deref(), &mounted).await;
                if let Some(next) = next {
                    if let ViewState::Loaded(doc) = &next {
                        on_title.emit(doc.body.title.clone());
                    }
                    state.set(next);
                }
            });
            move || drop(guard)
        });
    }

    let category_title = props.nav.as_deref().and_then(|nav| match nav {
        NavState::Movie { category_title, .. } => category_title.clone(),
    });
    let reviews = views::reviews_input(&*state, &props.namespace);
    let reviews_ready = !matches!(reviews, DependentInput::Pending);

    html! {
        <div class="movie-detail">
            { movie_information(&*state, category_title) }
            // The reviews section mounts only after the movie itself has loaded.
            if reviews_ready {
                <Reviews input={reviews} />
            }
        </div>
    }
}

fn movie_information(state: &ViewState<MovieDoc>, category_title: Option<String>) -> Html {
    match state {
        ViewState::Unavailable => html! {
            <EmptyState message="Open a movie from the movie list to see its details." />
        },
        ViewState::Loading => html! { <Loading /> },
        ViewState::Errored(message) => html! { <ErrorMessage message={message.clone()} /> },
        ViewState::Loaded(doc) => {
            let movie = &doc.body;
            html! {
                <section class="movie-information">
                    <h2>{ &movie.title }</h2>
                    <dl>
                        if let Some(category) = category_title {
                            <dt>{ "Category" }</dt><dd>{ category }</dd>
                        }
                        if let Some(director) = &movie.director {
                            <dt>{ "Director" }</dt><dd>{ director }</dd>
                        }
                        if let Some(date) = &movie.release_date {
                            <dt>{ "Release date" }</dt><dd>{ date }</dd>
                        }
                        if let Some(length) = movie.running_time() {
                            <dt>{ "Length" }</dt><dd>{ length }</dd>
                        }
                    </dl>
                </section>
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ReviewsProps {
    pub input: DependentInput<String>,
}

#[function_component(Reviews)]
pub fn reviews(props: &ReviewsProps) -> Html {
    let state = use_state(|| {
        ViewState::<Vec<Review>>::for_input(props.input.ready().map(String::as_str))
    });

    {
        let state = state.clone();
        use_effect_with(props.input.clone(), move |input| {
            let guard = MountGuard::new();
            let mounted = guard.handle();
            let input = input.clone();
            spawn_local(async move {
                let next = views::load_reviews(&GlooClient, &input, &mounted).await;
                if let Some(next) = next {
                    state.set(next);
                }
            });
            move || drop(guard)
        });
    }

    html! {
        <section class="movie-reviews">
            <h3>{ "Reviews" }</h3>
            {
                match &*state {
                    ViewState::Unavailable => html! {
                        <EmptyState message="Reviews are not available for this movie." />
                    },
                    ViewState::Loading => html! { <Loading label="Loading reviews..." /> },
                    ViewState::Errored(message) => html! { <ErrorMessage message={message.clone()} /> },
                    ViewState::Loaded(reviews) if reviews.is_empty() => html! {
                        <EmptyState message="No reviews yet." />
                    },
                    ViewState::Loaded(reviews) => html! {
                        <ul class="review-list">
                            { for reviews.iter().map(review_row) }
                        </ul>
                    },
                }
            }
        </section>
    }
}

fn review_row(review: &Review) -> Html {
    html! {
        <li class="review">
            <span class="review-rating">{ review.stars() }</span>
            <span class="review-author">{ review.author.as_deref().unwrap_or("anonymous") }</span>
            if let Some(date) = &review.date {
                <span class="review-date">{ date }</span>
            }
            if let Some(comment) = &review.comment {
                <p class="review-comment">{ comment }</p>
            }
        </li>
    }
}
