//! Shared page chrome and status displays.

use moviereview_client::{Route, SessionState};
use yew::prelude::*;

use crate::router::Navigate;

/// Page header with title and navigation links.
#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub page_title: AttrValue,
    pub session: SessionState,
    pub navigate: Callback<Navigate>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let link = |route: Route, label: &'static str| {
        let navigate = props.navigate.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            navigate.emit(Navigate::to(route.clone()));
        });
        html! { <a class="nav-link" href="#" {onclick}>{ label }</a> }
    };

    html! {
        <header class="header">
            <div class="header-left">
                <h1>{ &props.page_title }</h1>
            </div>
            <nav class="header-right">
                { link(Route::MovieList, "Movies") }
                if props.session.is_logged_in() {
                    { link(Route::Profile, "My Profile") }
                    { link(Route::Logout, "Logout") }
                } else {
                    { link(Route::Login, "Login") }
                }
            </nav>
        </header>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="footer">
            <span class="footer-build">
                { format!("Build: {} {}", env!("BUILD_COMMIT"), env!("BUILD_TIMESTAMP")) }
            </span>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or(AttrValue::Static("Loading..."))]
    pub label: AttrValue,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="loading" role="status">
            <span class="spinner" />
            { &props.label }
        </div>
    }
}

/// Inline error for a view whose fetch failed.
#[derive(Properties, PartialEq)]
pub struct ErrorMessageProps {
    pub message: AttrValue,
}

#[function_component(ErrorMessage)]
pub fn error_message(props: &ErrorMessageProps) -> Html {
    html! { <div class="error">{ &props.message }</div> }
}

/// Placeholder for a feature the API does not currently offer.
#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub message: AttrValue,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    html! { <div class="empty-state">{ &props.message }</div> }
}
