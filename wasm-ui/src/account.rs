//! Login, logout and profile views.

use moviereview_client::models::{Credentials, UserDoc};
use moviereview_client::views;
use moviereview_client::{AppAction, Endpoint, Endpoints, MountGuard, Route, SessionState, ViewState};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::{EmptyState, ErrorMessage, Loading};
use crate::http::GlooClient;
use crate::router::Navigate;

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub endpoints: Endpoints,
    pub dispatch: Callback<AppAction>,
    pub navigate: Callback<Navigate>,
}

/// Submission state of the login form.
#[derive(Clone, PartialEq)]
enum Submit {
    Idle,
    Sending,
    Failed(String),
}

#[function_component(Login)]
pub fn login(props: &LoginProps) -> Html {
    let username = use_node_ref();
    let password = use_node_ref();
    let submit = use_state(|| Submit::Idle);
    let guard = use_memo((), |_| MountGuard::new());

    let Some(login_url) = props.endpoints.get(Endpoint::Login).map(str::to_string) else {
        return html! { <EmptyState message="Login is not available right now." /> };
    };

    let onsubmit = {
        let username = username.clone();
        let password = password.clone();
        let submit = submit.clone();
        let endpoints = props.endpoints.clone();
        let dispatch = props.dispatch.clone();
        let navigate = props.navigate.clone();
        let mounted = guard.handle();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (Some(user), Some(pass)) = (
                username.cast::<HtmlInputElement>(),
                password.cast::<HtmlInputElement>(),
            ) else {
                return;
            };
            let credentials = Credentials {
                username: user.value(),
                password: pass.value(),
            };
            if credentials.username.is_empty() {
                submit.set(Submit::Failed("Enter a username.".to_string()));
                return;
            }

            submit.set(Submit::Sending);
            let submit = submit.clone();
            let login_url = login_url.clone();
            let endpoints = endpoints.clone();
            let dispatch = dispatch.clone();
            let navigate = navigate.clone();
            let mounted = mounted.clone();
            spawn_local(async move {
                let result = views::login(&GlooClient, &login_url, &endpoints, &credentials).await;
                if !mounted.is_mounted() {
                    return;
                }
                match result {
                    Ok(action) => {
                        dispatch.emit(action);
                        navigate.emit(Navigate::to(Route::Profile));
                    }
                    Err(err) => {
                        gloo::console::warn!(format!("Login failed: {err}"));
                        submit.set(Submit::Failed(err.user_message()));
                    }
                }
            });
        })
    };

    let sending = *submit == Submit::Sending;
    html! {
        <form class="login-form" {onsubmit}>
            <label>
                { "Username" }
                <input ref={username} type="text" autocomplete="username" disabled={sending} />
            </label>
            <label>
                { "Password" }
                <input ref={password} type="password" autocomplete="current-password" disabled={sending} />
            </label>
            if let Submit::Failed(message) = &*submit {
                <ErrorMessage message={message.clone()} />
            }
            <button type="submit" disabled={sending}>
                { if sending { "Logging in..." } else { "Login" } }
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct LogoutProps {
    pub dispatch: Callback<AppAction>,
    pub navigate: Callback<Navigate>,
}

/// Clears the session on mount and returns to the movie list.
#[function_component(Logout)]
pub fn logout(props: &LogoutProps) -> Html {
    {
        let dispatch = props.dispatch.clone();
        let navigate = props.navigate.clone();
        use_effect_with((), move |_| {
            dispatch.emit(views::logout());
            navigate.emit(Navigate::to(Route::MovieList));
        });
    }

    html! { <Loading label="Logging out..." /> }
}

#[derive(Properties, PartialEq)]
pub struct ProfileProps {
    pub endpoints: Endpoints,
    pub session: SessionState,
}

/// What the profile shows before its fetch resolves.
fn profile_state(endpoints: &Endpoints, session: &SessionState) -> ViewState<UserDoc> {
    ViewState::for_input(views::profile_url(endpoints, session))
}

#[function_component(Profile)]
pub fn profile(props: &ProfileProps) -> Html {
    let state = use_state(|| profile_state(&props.endpoints, &props.session));

    {
        let state = state.clone();
        use_effect_with(
            (props.endpoints.clone(), props.session.clone()),
            move |(endpoints, session)| {
                // A session change under a mounted view restarts the fetch.
                state.set(profile_state(endpoints, session));
                let guard = MountGuard::new();
                let mounted = guard.handle();
                let endpoints = endpoints.clone();
                let session = session.clone();
                spawn_local(async move {
                    let next = views::load_profile(&GlooClient, &endpoints, &session, &mounted).await;
                    if let Some(next) = next {
                        state.set(next);
                    }
                });
                move || drop(guard)
            },
        );
    }

    match &*state {
        ViewState::Unavailable if !props.session.is_logged_in() => {
            html! { <EmptyState message="Log in to see your profile." /> }
        }
        ViewState::Unavailable => {
            html! { <EmptyState message="Profiles are not available right now." /> }
        }
        ViewState::Loading => html! { <Loading /> },
        ViewState::Errored(message) => html! { <ErrorMessage message={message.clone()} /> },
        ViewState::Loaded(user) => {
            let user = &user.body;
            html! {
                <section class="user-profile">
                    <h2>{ &user.username }</h2>
                    <dl>
                        if let Some(email) = &user.email_address {
                            <dt>{ "Email" }</dt><dd>{ email }</dd>
                        }
                        if let Some(role) = &user.role {
                            <dt>{ "Role" }</dt><dd>{ role }</dd>
                        }
                    </dl>
                </section>
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_state_follows_session() {
        let mut endpoints = Endpoints::new();
        endpoints.set(Endpoint::CurrentUser, "/api/me/");

        let anonymous = SessionState::default();
        assert_eq!(profile_state(&endpoints, &anonymous), ViewState::Unavailable);

        let logged_in = SessionState {
            username: Some("dd".to_string()),
            user_url: None,
        };
        assert_eq!(profile_state(&endpoints, &logged_in), ViewState::Loading);
        assert_eq!(profile_state(&Endpoints::new(), &logged_in), ViewState::Unavailable);
    }
}
