//! CLI tool to browse the movie review API from a terminal.
//!
//! Usage:
//!   movie-browse endpoints
//!   movie-browse movies
//!   movie-browse movie /api/movies/1/
//!   movie-browse reviews /api/movies/1/reviews/
//!   movie-browse login <username> <password>
//!
//! Every command bootstraps from the API root first and exits non-zero if
//! the root cannot be resolved.

use clap::{Parser, Subcommand};
use log::LevelFilter;
use moviereview_client::config::{DEFAULT_ROOT_URL, NAMESPACE_VAR, ROOT_URL_VAR};
use moviereview_client::mason::DEFAULT_NAMESPACE;
use moviereview_client::models::{Credentials, MovieDoc, Review};
use moviereview_client::view::{MountGuard, ViewState};
use moviereview_client::{
    AppAction, AppStore, BootState, ClientConfig, DependentInput, Endpoint, Endpoints, NavState,
    ReqwestClient, UNAVAILABLE_MESSAGE, bootstrap, views,
};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::process;
use url::Url;

/// Browse movies and reviews by following the API's hypermedia controls.
#[derive(Parser)]
#[command(name = "movie-browse")]
struct Cli {
    /// URL of the API root document
    #[arg(long, env = ROOT_URL_VAR, default_value = DEFAULT_ROOT_URL)]
    root: String,

    /// Namespace prefix of the API's link relations
    #[arg(long, env = NAMESPACE_VAR, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show which endpoints the root document offers
    Endpoints,
    /// List all movies
    Movies,
    /// Show one movie and its reviews
    Movie {
        /// The movie's own URL, as printed by `movies`
        url: String,
    },
    /// List the reviews behind a reviews link
    Reviews {
        /// A movie's reviews URL, as offered by its `reviews-for-movie` control
        url: String,
    },
    /// Log in and show the profile
    Login { username: String, password: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let base = match Url::parse(&cli.root) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Invalid root URL '{}': {e}", cli.root);
            process::exit(2);
        }
    };
    let config = ClientConfig::new(cli.root.clone(), cli.namespace.clone());
    let client = ReqwestClient::new(base);

    let store = AppStore::default().reduce(AppAction::BootstrapFinished(
        bootstrap(&client, &config).await,
    ));
    let endpoints = match &store.boot {
        BootState::Ready(endpoints) => endpoints.clone(),
        _ => {
            eprintln!("{UNAVAILABLE_MESSAGE}");
            process::exit(1);
        }
    };

    let guard = MountGuard::new();
    let mounted = guard.handle();

    match cli.command {
        Command::Endpoints => print_endpoints(&endpoints),
        Command::Movies => {
            let Some(state) = views::load_movie_list(&client, &endpoints, &mounted).await else {
                return;
            };
            match state {
                ViewState::Loaded(entries) if entries.is_empty() => println!("No movies yet."),
                ViewState::Loaded(entries) => {
                    for entry in entries {
                        println!(
                            "{:<40} {:<16} {}",
                            entry.movie.title,
                            entry.category_title.as_deref().unwrap_or("-"),
                            entry.nav.as_ref().map(NavState::movie_url).unwrap_or("(no link)")
                        );
                    }
                }
                other => exit_on_state(&other, "movie list"),
            }
        }
        Command::Movie { url } => {
            let nav = NavState::Movie {
                movie_url: url,
                category_title: None,
            };
            let Some(movie) = views::load_movie(&client, Some(&nav), &mounted).await else {
                return;
            };
            let ViewState::Loaded(doc) = &movie else {
                exit_on_state(&movie, "movie");
                return;
            };
            print_movie(doc);

            let input = views::reviews_input(&movie, &config.namespace);
            if let DependentInput::Absent = input {
                println!("\nReviews are not available for this movie.");
                return;
            }
            match views::load_reviews(&client, &input, &mounted).await {
                Some(ViewState::Loaded(reviews)) if reviews.is_empty() => {
                    println!("\nNo reviews yet.")
                }
                Some(ViewState::Loaded(reviews)) => {
                    println!("\nReviews:");
                    print_reviews(&reviews);
                }
                Some(ViewState::Errored(message)) => println!("\nReviews failed to load: {message}"),
                _ => {}
            }
        }
        Command::Reviews { url } => {
            let input = DependentInput::Ready(url);
            let Some(state) = views::load_reviews(&client, &input, &mounted).await else {
                return;
            };
            match state {
                ViewState::Loaded(reviews) if reviews.is_empty() => println!("No reviews yet."),
                ViewState::Loaded(reviews) => print_reviews(&reviews),
                other => exit_on_state(&other, "reviews"),
            }
        }
        Command::Login { username, password } => {
            let Some(login_url) = endpoints.get(Endpoint::Login) else {
                eprintln!("This API does not offer a login.");
                process::exit(1);
            };
            let credentials = Credentials { username, password };
            let store = match views::login(&client, login_url, &endpoints, &credentials).await {
                Ok(action) => store.reduce(action),
                Err(e) => {
                    eprintln!("Login failed: {}", e.user_message());
                    process::exit(1);
                }
            };
            match views::load_profile(&client, &endpoints, &store.session, &mounted).await {
                Some(ViewState::Loaded(user)) => {
                    println!("Logged in as {}", user.body.username);
                    if let Some(email) = &user.body.email_address {
                        println!("Email: {email}");
                    }
                    if let Some(role) = &user.body.role {
                        println!("Role:  {role}");
                    }
                }
                Some(ViewState::Unavailable) => {
                    println!("Logged in as {}", credentials.username);
                    println!("(profile not offered by this API)");
                }
                Some(other) => exit_on_state(&other, "profile"),
                None => {}
            }
        }
    }
}

fn print_endpoints(endpoints: &Endpoints) {
    for (endpoint, url) in endpoints.entries() {
        println!("{:<14} {}", endpoint.to_string(), url.unwrap_or("(not offered)"));
    }
}

fn print_movie(doc: &MovieDoc) {
    let movie = &doc.body;
    println!("{}", movie.title);
    if let Some(director) = &movie.director {
        println!("Director: {director}");
    }
    if let Some(date) = &movie.release_date {
        println!("Released: {date}");
    }
    if let Some(running_time) = movie.running_time() {
        println!("Length:   {running_time}");
    }
}

fn print_reviews(reviews: &[Review]) {
    for review in reviews {
        println!(
            "  {} {} - {}",
            review.stars(),
            review.author.as_deref().unwrap_or("anonymous"),
            review.comment.as_deref().unwrap_or("")
        );
    }
}

fn exit_on_state<T>(state: &ViewState<T>, what: &str) {
    match state {
        ViewState::Unavailable => {
            eprintln!("The API does not offer the {what}.");
            process::exit(1);
        }
        ViewState::Errored(message) => {
            eprintln!("Failed to load the {what}: {message}");
            process::exit(1);
        }
        ViewState::Loading | ViewState::Loaded(_) => {}
    }
}
