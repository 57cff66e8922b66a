//! Main application component.
//!
//! The shell bootstraps from the API root exactly once. Until that has
//! finished it shows a spinner; if it fails it shows a full-page error and
//! nothing else mounts. Only a successful bootstrap renders the routes, and
//! every view receives the resolved endpoints as a prop.

use std::rc::Rc;

use moviereview_client::{
    AppAction, AppStore, BootState, ClientConfig, Endpoints, MountGuard, Namespace, Route,
    SessionState, UNAVAILABLE_MESSAGE, bootstrap,
};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::account::{Login, Logout, Profile};
use crate::components::{Footer, Header, Loading};
use crate::http::GlooClient;
use crate::movies::{MovieDetail, MovieList};
use crate::router::{Current, Navigate, use_router};

/// Root document location baked in at build time.
pub const API_ROOT_URL: &str = env!("API_ROOT_URL");

/// Reducer wrapper so the store can live in `use_reducer`.
#[derive(Clone, Default, PartialEq)]
pub struct Store(AppStore);

impl Reducible for Store {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: AppAction) -> Rc<Self> {
        Rc::new(Store(self.0.reduce(action)))
    }
}

fn config() -> ClientConfig {
    ClientConfig {
        root_url: API_ROOT_URL.to_string(),
        namespace: Namespace::default(),
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_reducer(Store::default);
    let (current, navigate) = use_router();

    {
        let dispatcher = store.dispatcher();
        use_effect_with((), move |_| {
            let guard = MountGuard::new();
            let mounted = guard.handle();
            spawn_local(async move {
                let state = bootstrap(&GlooClient, &config()).await;
                if let BootState::Failed = state {
                    gloo::console::error!(format!("Bootstrap from {API_ROOT_URL} failed"));
                }
                mounted.deliver(state, |state| {
                    dispatcher.dispatch(AppAction::BootstrapFinished(state))
                });
            });
            move || drop(guard)
        });
    }

    let dispatch = {
        let dispatcher = store.dispatcher();
        Callback::from(move |action: AppAction| dispatcher.dispatch(action))
    };

    match &store.0.boot {
        BootState::Loading => html! {
            <div class="app-loading"><Loading /></div>
        },
        BootState::Failed => html! {
            <div class="app-loading-error">{ UNAVAILABLE_MESSAGE }</div>
        },
        BootState::Ready(endpoints) => html! {
            <Routes
                current={current}
                endpoints={endpoints.clone()}
                session={store.0.session.clone()}
                {dispatch}
                {navigate}
            />
        },
    }
}

#[derive(Properties, PartialEq)]
struct RoutesProps {
    current: Current,
    endpoints: Endpoints,
    session: SessionState,
    dispatch: Callback<AppAction>,
    navigate: Callback<Navigate>,
}

fn default_title(route: &Route) -> &'static str {
    match route {
        Route::MovieList => "Movies",
        Route::Login => "Login",
        Route::Logout => "Logout",
        Route::MovieDetail { .. } => "Movie Item",
        Route::Profile => "My Profile",
    }
}

/// The route tree, mounted only after a successful bootstrap.
#[function_component(Routes)]
fn routes(props: &RoutesProps) -> Html {
    let route = props.current.route().clone();
    let title = use_state(|| default_title(&route).to_string());

    {
        let title = title.clone();
        use_effect_with(route.clone(), move |route| {
            title.set(default_title(route).to_string());
        });
    }

    let on_title = {
        let title = title.clone();
        Callback::from(move |text: String| title.set(text))
    };

    let page = match &route {
        Route::MovieList => html! {
            <MovieList endpoints={props.endpoints.clone()} navigate={props.navigate.clone()} />
        },
        Route::Login => html! {
            <Login
                endpoints={props.endpoints.clone()}
                dispatch={props.dispatch.clone()}
                navigate={props.navigate.clone()}
            />
        },
        Route::Logout => html! {
            <Logout dispatch={props.dispatch.clone()} navigate={props.navigate.clone()} />
        },
        Route::MovieDetail { movie_id } => html! {
            <MovieDetail
                key={movie_id.clone()}
                nav={props.current.nav.clone()}
                namespace={Namespace::default()}
                {on_title}
            />
        },
        Route::Profile => html! {
            <Profile endpoints={props.endpoints.clone()} session={props.session.clone()} />
        },
    };

    html! {
        <div class="app">
            <Header
                page_title={(*title).clone()}
                session={props.session.clone()}
                navigate={props.navigate.clone()}
            />
            <main class="main">{ page }</main>
            <Footer />
        </div>
    }
}
