//! History-driven routing.
//!
//! The current path is matched with [`Route::recognize`]. Navigation pushes
//! a new history entry carrying the optional [`NavState`] for the target
//! view; the state survives back/forward but not a page reload.

use std::rc::Rc;

use gloo::history::{BrowserHistory, History};
use moviereview_client::{Matched, NavState, Route};
use yew::prelude::*;

/// Where the app currently is.
#[derive(Clone, Debug, PartialEq)]
pub struct Current {
    pub matched: Matched,
    pub nav: Option<Rc<NavState>>,
}

impl Current {
    fn read(history: &BrowserHistory) -> Self {
        let location = history.location();
        Self {
            matched: Route::recognize(location.path()),
            nav: location.state::<NavState>(),
        }
    }

    pub fn route(&self) -> &Route {
        self.matched.route()
    }
}

/// Navigation request emitted by views.
#[derive(Clone, Debug, PartialEq)]
pub struct Navigate {
    pub to: Route,
    pub nav: Option<NavState>,
}

impl Navigate {
    pub fn to(route: Route) -> Self {
        Self {
            to: route,
            nav: None,
        }
    }
}

/// Current route plus a callback that moves to another one.
#[hook]
pub fn use_router() -> (Current, Callback<Navigate>) {
    let history = use_memo((), |_| BrowserHistory::new());
    let current = use_state(|| Current::read(&history));

    {
        let history = history.clone();
        let current = current.clone();
        use_effect_with((), move |_| {
            let reader = (*history).clone();
            let listener = history.listen(move || current.set(Current::read(&reader)));
            move || drop(listener)
        });
    }

    // Unknown paths are replaced with the route they redirect to.
    {
        let history = history.clone();
        use_effect_with(current.matched.clone(), move |matched| {
            if let Matched::Redirect(route) = matched {
                history.replace(route.path());
            }
        });
    }

    let navigate = {
        let history = history.clone();
        Callback::from(move |request: Navigate| match request.nav {
            Some(nav) => history.push_with_state(request.to.path(), nav),
            None => history.push(request.to.path()),
        })
    };

    ((*current).clone(), navigate)
}
