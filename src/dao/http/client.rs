use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::dao::{
    models::{
        HighscoreRecord, LatestScoreRecord, MachineRecord, MatchSuggestionRecord,
        PlayerProgressRecord, PlayerRecord, TotalHighscoreRecord,
    },
    scoreboard::ScoreboardApi,
    transport::ApiResult,
};

use super::{
    config::HttpApiConfig,
    error::{HttpApiError, HttpApiResult},
};

const PLAYERS: &str = "players";
const MACHINES: &str = "pinball";
const MACHINE_HIGHSCORE: &str = "highscore";
const LATEST_SCORES: &str = "latestscores";
const TOTAL_HIGHSCORE: &str = "total_highscore";
const PLAYER_DETAILS: &str = "get_player";
const MATCH_SUGGESTION: &str = "matchsuggestion";
const FREE_SCORES: &str = "getfreescores";

/// [`ScoreboardApi`] implementation issuing JSON GET requests with `reqwest`.
#[derive(Clone)]
pub struct HttpScoreboardApi {
    client: Client,
    base_url: Arc<Url>,
}

impl HttpScoreboardApi {
    /// Build the client; the base URL is validated once so endpoints can be derived infallibly.
    pub fn new(config: HttpApiConfig) -> HttpApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| HttpApiError::ClientBuilder { source })?;

        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|_| {
            HttpApiError::InvalidBaseUrl {
                url: config.base_url.clone(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(HttpApiError::InvalidBaseUrl {
                url: config.base_url,
            });
        }

        Ok(Self {
            client,
            base_url: Arc::new(base_url),
        })
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = (*self.base_url).clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T>(&self, url: Url) -> HttpApiResult<T>
    where
        T: DeserializeOwned,
    {
        let path = url.path().to_string();
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|source| HttpApiError::RequestSend {
                    path: path.clone(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpApiError::RequestStatus { path, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| HttpApiError::DecodeResponse { path, source })
    }

    fn fetch<T>(&self, segments: &[&str]) -> BoxFuture<'static, ApiResult<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let api = self.clone();
        let url = self.endpoint(segments);
        Box::pin(async move { api.get_json(url).await.map_err(Into::into) })
    }
}

impl ScoreboardApi for HttpScoreboardApi {
    fn players(&self) -> BoxFuture<'static, ApiResult<Vec<PlayerRecord>>> {
        self.fetch(&[PLAYERS])
    }

    fn machines(&self) -> BoxFuture<'static, ApiResult<Vec<MachineRecord>>> {
        self.fetch(&[MACHINES])
    }

    fn machine_highscores(
        &self,
        machine: &str,
    ) -> BoxFuture<'static, ApiResult<Vec<HighscoreRecord>>> {
        self.fetch(&[MACHINE_HIGHSCORE, machine])
    }

    fn latest_scores(&self) -> BoxFuture<'static, ApiResult<Vec<LatestScoreRecord>>> {
        self.fetch(&[LATEST_SCORES])
    }

    fn total_highscores(&self) -> BoxFuture<'static, ApiResult<Vec<TotalHighscoreRecord>>> {
        self.fetch(&[TOTAL_HIGHSCORE])
    }

    fn player_progress(&self, player: &str) -> BoxFuture<'static, ApiResult<PlayerProgressRecord>> {
        self.fetch(&[PLAYER_DETAILS, player])
    }

    fn match_suggestion(
        &self,
        player1: &str,
        player2: &str,
    ) -> BoxFuture<'static, ApiResult<MatchSuggestionRecord>> {
        self.fetch(&[MATCH_SUGGESTION, player1, player2])
    }

    fn free_scores(&self) -> BoxFuture<'static, ApiResult<Vec<String>>> {
        self.fetch(&[FREE_SCORES])
    }
}
