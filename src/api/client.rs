//! # API Client
//!
//! Maps the MyMDB backend endpoints onto typed async calls.

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use crate::config::ClientProfile;
use crate::models::{Credentials, Director, Genre, LoginResponse, Movie, User, UserDetails};
use crate::session::Session;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Whether a request carries the session's bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Anonymous,
    Bearer,
}

/// Client for the MyMDB REST backend
///
/// Cloning is cheap: the underlying connection pool and the session
/// storage are shared between clones.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(profile: &ClientProfile, session: Session) -> anyhow::Result<Self> {
        tracing::debug!("Creating ApiClient for {}", profile.server());
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(profile.insecure())
            .build()?;

        Ok(Self {
            http,
            base_url: profile.server().clone(),
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build an endpoint URL below the base. Each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // The profile rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url, auth: Auth) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match auth {
            Auth::Anonymous => builder,
            Auth::Bearer => match self.session.token() {
                Some(token) => builder.bearer_auth(token),
                None => {
                    tracing::debug!("No session token, sending request without authorization");
                    builder
                }
            },
        }
    }

    /// Send a request and return the body of a 2xx response
    async fn execute(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request.send().await.map_err(ApiError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::transport)?;

        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), &body));
        }
        tracing::debug!("Response {} ({} bytes)", status.as_u16(), body.len());
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.execute(request).await?;
        decode(&body)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments);
        self.fetch(self.request(Method::GET, url, Auth::Bearer)).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
        auth: Auth,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        self.fetch(self.request(method, url, auth).json(body)).await
    }

    /// `POST /users/register`
    pub async fn register(&self, details: &UserDetails) -> ApiResult<User> {
        self.send_json(Method::POST, &["users", "register"], details, Auth::Anonymous)
            .await
    }

    /// `POST /login`
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.send_json(Method::POST, &["login"], credentials, Auth::Anonymous)
            .await
    }

    /// `GET /movies`
    pub async fn list_movies(&self) -> ApiResult<Vec<Movie>> {
        self.get(&["movies"]).await
    }

    /// `GET /movies/{id}`
    pub async fn get_movie(&self, movie_id: &str) -> ApiResult<Movie> {
        self.get(&["movies", movie_id]).await
    }

    /// `GET /movies/title/{title}`
    pub async fn get_movie_by_title(&self, title: &str) -> ApiResult<Movie> {
        self.get(&["movies", "title", title]).await
    }

    /// `GET /directors/{name}`
    pub async fn get_director(&self, name: &str) -> ApiResult<Director> {
        self.get(&["directors", name]).await
    }

    /// `GET /genres/{name}`
    pub async fn get_genre(&self, name: &str) -> ApiResult<Genre> {
        self.get(&["genres", name]).await
    }

    /// `GET /user/{id}`
    pub async fn get_user(&self, user_id: &str) -> ApiResult<User> {
        self.get(&["user", user_id]).await
    }

    /// The `FavoriteMovies` of `GET /user/{id}`
    pub async fn get_favorites(&self, user_id: &str) -> ApiResult<Vec<String>> {
        let user = self.get_user(user_id).await?;
        Ok(user.favorite_movies)
    }

    /// `POST /users/{id}/movies/{movieId}`
    ///
    /// Whether adding an existing favorite duplicates it is up to the backend.
    pub async fn add_favorite(&self, user_id: &str, movie_id: &str) -> ApiResult<User> {
        let empty = serde_json::Map::new();
        self.send_json(
            Method::POST,
            &["users", user_id, "movies", movie_id],
            &empty,
            Auth::Bearer,
        )
        .await
    }

    /// `DELETE /users/{id}/movies/{movieId}`
    pub async fn remove_favorite(&self, user_id: &str, movie_id: &str) -> ApiResult<User> {
        let url = self.endpoint(&["users", user_id, "movies", movie_id]);
        self.fetch(self.request(Method::DELETE, url, Auth::Bearer))
            .await
    }

    /// `PUT /users/{id}`
    pub async fn update_user(&self, user_id: &str, patch: &UserDetails) -> ApiResult<User> {
        self.send_json(Method::PUT, &["users", user_id], patch, Auth::Bearer)
            .await
    }

    /// `DELETE /users/{id}`. Whatever body comes back is discarded.
    pub async fn delete_user(&self, user_id: &str) -> ApiResult<()> {
        let url = self.endpoint(&["users", user_id]);
        self.execute(self.request(Method::DELETE, url, Auth::Bearer))
            .await
            .map(|_| ())
    }
}

/// Decode a 2xx body. An empty body reads as `{}`.
fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let text = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(text).map_err(|e| ApiError::decode(e, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let profile = ClientProfile::new(base, false).unwrap();
        ApiClient::new(&profile, Session::in_memory()).unwrap()
    }

    #[test]
    fn endpoint_should_join_segments_below_base() {
        let client = client("https://mymdb.example.com/");
        let url = client.endpoint(&["users", "u1", "movies", "m1"]);
        assert_eq!(url.as_str(), "https://mymdb.example.com/users/u1/movies/m1");
    }

    #[test]
    fn endpoint_should_keep_base_path_prefix() {
        let client = client("https://example.com/api/");
        let url = client.endpoint(&["movies"]);
        assert_eq!(url.as_str(), "https://example.com/api/movies");
    }

    #[test]
    fn endpoint_should_percent_encode_segments() {
        let client = client("https://example.com/");
        let url = client.endpoint(&["movies", "title", "The Good/Bad"]);
        assert_eq!(
            url.as_str(),
            "https://example.com/movies/title/The%20Good%2FBad"
        );
    }

    #[test]
    fn decode_should_treat_empty_body_as_empty_object() {
        let value: serde_json::Value = decode("").unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn decode_should_reject_mismatched_schema() {
        let result: ApiResult<Vec<Movie>> = decode(r#"{"not":"a list"}"#);
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }
}
