//! # mymdb Main Entry Point
//!
//! Command-line front end over the view models.

use anyhow::Result;
use mymdb::cmd_args::{Command, CommandLineArgs, FavoriteAction};
use mymdb::config;
use mymdb::session::IniFileStore;
use mymdb::views::{
    render, DialogState, LoginForm, MovieListView, MovieLookup, NavigationView, ProfileView,
    RegistrationForm, Route, Router, ViewEvent, WelcomePage,
};
use mymdb::{ApiClient, Credentials, Session, UserDetails};
use tracing_subscriber::{filter::Directive, fmt::time::ChronoLocal, EnvFilter};

/// Dependencies that log too much below `warn`
const QUIET_TARGETS: &[&str] = &[
    "reqwest",
    "hyper",
    "hyper_util",
    "h2",
    "tokio",
    "tracing",
    "tracing_subscriber",
    "tower",
    "rustls",
    "tokio_rustls",
];

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let cmd_args = CommandLineArgs::parse();

    let profile = config::load_profile(cmd_args.profile(), &config::get_profile_path())?;
    let session_path = config::expand_path(&config::get_session_path())?;
    let session = Session::new(IniFileStore::open(&session_path)?);
    let api = ApiClient::new(&profile, session.clone())?;

    let output = Output {
        verbose: cmd_args.verbose(),
    };
    run(cmd_args.command().clone(), api, session, &output).await
}

fn init_tracing_subscriber() {
    let mut filter = EnvFilter::from_env(format!(
        "{}_LOG_LEVEL",
        env!("CARGO_PKG_NAME").to_uppercase()
    ));
    for target in QUIET_TARGETS {
        if let Ok(directive) = format!("{target}=warn").parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}

struct Output {
    verbose: bool,
}

impl Output {
    /// Notifications are always shown, navigation only in verbose mode
    fn events(&self, events: Vec<ViewEvent>) {
        for event in events {
            match event {
                ViewEvent::Notify(_) => println!("{}", render::event(&event)),
                ViewEvent::Navigate(_) if self.verbose => println!("{}", render::event(&event)),
                ViewEvent::Navigate(_) => {}
            }
        }
    }

    fn dialog(&self, state: &DialogState) {
        if let Some(text) = render::dialog(state) {
            println!("{text}");
        }
    }

    fn login_prompt(&self) {
        let mut welcome = WelcomePage::new();
        welcome.open_movies_dialog();
        self.dialog(welcome.dialog());
    }
}

async fn run(command: Command, api: ApiClient, session: Session, output: &Output) -> Result<()> {
    match command {
        Command::Register {
            username,
            password,
            email,
            birthday,
        } => {
            let mut form = RegistrationForm::new(api);
            form.user_data = UserDetails {
                username,
                password,
                email,
                birthday: birthday.unwrap_or_default(),
            };
            form.register().await;
            output.events(form.collect_pending_events());
        }
        Command::Login { username, password } => {
            let mut form = LoginForm::new(api, session);
            form.user_data = Credentials { username, password };
            form.login().await?;
            output.events(form.collect_pending_events());
        }
        Command::Logout => {
            let mut nav = NavigationView::new(session, Route::Movies);
            nav.logout()?;
            println!("Logged out");
            output.events(nav.collect_pending_events());
        }
        Command::Status => match session.user() {
            Some(user) if session.is_logged_in() => println!("Logged in as {}", user.username),
            _ => println!("Not logged in"),
        },
        Command::Movies => {
            if Router::resolve("movies", &session) != Route::Movies {
                output.login_prompt();
                return Ok(());
            }
            let mut view = MovieListView::new(api, session);
            view.init().await;
            for movie in view.movies() {
                println!("{}", render::movie_line(movie, view.is_favorite(&movie.id)));
            }
            output.events(view.collect_pending_events());
        }
        Command::Movie { id } => {
            let mut view = MovieListView::new(api, session);
            view.show_movie(MovieLookup::Id(&id)).await;
            output.dialog(view.dialog());
            output.events(view.collect_pending_events());
        }
        Command::MovieTitle { title } => {
            let mut view = MovieListView::new(api, session);
            view.show_movie(MovieLookup::Title(&title)).await;
            output.dialog(view.dialog());
            output.events(view.collect_pending_events());
        }
        Command::Director { name } => {
            let mut view = MovieListView::new(api, session);
            view.show_director(&name).await;
            output.dialog(view.dialog());
            output.events(view.collect_pending_events());
        }
        Command::Genre { name } => {
            let mut view = MovieListView::new(api, session);
            view.show_genre(&name).await;
            output.dialog(view.dialog());
            output.events(view.collect_pending_events());
        }
        Command::Profile => {
            if Router::resolve("profile", &session) != Route::Profile {
                output.login_prompt();
                return Ok(());
            }
            let mut view = ProfileView::new(api, session);
            view.init().await;
            if let Some(user) = view.user() {
                println!("{}", render::user_summary(user));
            }
            for movie in view.favorite_movies() {
                println!("{}", render::movie_line(movie, true));
            }
            output.events(view.collect_pending_events());
        }
        Command::UpdateProfile {
            username,
            password,
            email,
            birthday,
        } => {
            let mut view = ProfileView::new(api, session);
            if view.edit_stored_user() {
                let form = view.updated_user_mut();
                if let Some(username) = username {
                    form.username = username;
                }
                if let Some(password) = password {
                    form.password = password;
                }
                if let Some(email) = email {
                    form.email = email;
                }
                if let Some(birthday) = birthday {
                    form.birthday = birthday;
                }
                view.update_user().await?;
            }
            output.events(view.collect_pending_events());
        }
        Command::DeleteAccount { yes } => {
            if !yes {
                println!("Account not deleted. Pass --yes to confirm; this cannot be undone.");
                return Ok(());
            }
            let mut view = ProfileView::new(api, session);
            view.delete_account(yes).await?;
            output.events(view.collect_pending_events());
        }
        Command::Favorite { action } => {
            let mut view = MovieListView::new(api, session);
            match action {
                FavoriteAction::Add { movie_id } => view.add_favorite(&movie_id).await,
                FavoriteAction::Remove { movie_id } => view.remove_favorite(&movie_id).await,
                FavoriteAction::Toggle { movie_id } => {
                    view.init().await;
                    view.toggle_favorite(&movie_id).await;
                }
            }
            output.events(view.collect_pending_events());
        }
        Command::Route { path } => {
            println!("{}", Router::resolve(&path, &session));
        }
    }
    Ok(())
}
