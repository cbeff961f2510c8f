use crate::core::endpoints::Endpoints;
use crate::core::fetcher::DataFetcher;
use crate::domain::model::{empty_spell_map, FightQuery, RankingQuery};
use crate::domain::ports::{EndpointConfig, FightRenderer, JsonSource};
use crate::utils::error::{FetchError, FetchResult, Result};
use serde_json::Value;
use tracing::{Instrument, Span};

const GENERATION_HINT: &str = "Confirm the ranking update job has run for this spec and boss";

/// The three data call sites, each with its own failure policy.
///
/// `fetch_*` return the raw [`FetchResult`]. `load_*` never fail: they log
/// under the client's span and fall back (nothing rendered, `{}`, `None`).
pub struct LorrgsClient<S: JsonSource = DataFetcher> {
    source: S,
    endpoints: Endpoints,
    span: Span,
}

impl LorrgsClient<DataFetcher> {
    pub fn from_config<C: EndpointConfig + ?Sized>(config: &C) -> Result<Self> {
        Ok(Self::new(DataFetcher::new(), Endpoints::from_config(config)?))
    }
}

impl<S: JsonSource> LorrgsClient<S> {
    pub fn new(source: S, endpoints: Endpoints) -> Self {
        Self {
            source,
            endpoints,
            span: tracing::info_span!("lorrgs"),
        }
    }

    /// Emits every event of this client under `span`, which the host owns.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get(&self, what: &str, url: url::Url) -> FetchResult {
        async {
            tracing::info!("Fetching {} from: {}", what, url);
            self.source.fetch(url.as_str()).await
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn fetch_fight_data(&self, query: &FightQuery) -> FetchResult {
        self.get("fight data", self.endpoints.fight_analysis(query))
            .await
    }

    pub async fn fetch_spell_data(&self, spec_slug: &str) -> FetchResult {
        self.get("spell data", self.endpoints.spell_list(spec_slug))
            .await
    }

    pub async fn fetch_ranking_data(&self, query: &RankingQuery) -> FetchResult {
        self.get("ranking data", self.endpoints.ranking(query)).await
    }

    pub async fn fetch_boss_data(&self, short_name: &str) -> FetchResult {
        self.get("boss data", self.endpoints.boss_data(short_name))
            .await
    }

    /// Loads a fight and hands it to `renderer`. On failure nothing is rendered.
    pub async fn load_fight_data<R>(&self, query: &FightQuery, renderer: &R)
    where
        R: FightRenderer + ?Sized,
    {
        match self.fetch_fight_data(query).await {
            Ok(data) => {
                self.span.in_scope(|| {
                    tracing::debug!(report = %query.report_id, fight = query.fight_id, "Fight data received");
                });
                renderer.render(&data, &query.spec_slug);
            }
            Err(err) => self.span.in_scope(|| {
                tracing::error!(
                    report = %query.report_id,
                    fight = query.fight_id,
                    "❌ Failed to fetch fight data: {}",
                    err
                );
            }),
        }
    }

    /// Spell mapping for a spec, or `{}` when it cannot be loaded.
    pub async fn load_spell_data(&self, spec_slug: &str) -> Value {
        match self.fetch_spell_data(spec_slug).await {
            Ok(spells) => spells,
            Err(err) => {
                self.span.in_scope(|| {
                    tracing::error!(spec = spec_slug, "❌ Failed to fetch spell data: {}", err);
                });
                empty_spell_map()
            }
        }
    }

    /// Precomputed ranking, or `None` when the file is missing or unreadable.
    pub async fn load_ranking_data(&self, query: &RankingQuery) -> Option<Value> {
        match self.fetch_ranking_data(query).await {
            Ok(ranking) => Some(ranking),
            Err(err) => {
                self.report_static_failure("ranking", &query.file_name(), &err);
                None
            }
        }
    }

    /// Boss timeline written by the same update job as the rankings.
    pub async fn load_boss_data(&self, short_name: &str) -> Option<Value> {
        match self.fetch_boss_data(short_name).await {
            Ok(boss) => Some(boss),
            Err(err) => {
                self.report_static_failure("boss", &format!("boss_{}.json", short_name), &err);
                None
            }
        }
    }

    fn report_static_failure(&self, kind: &str, file: &str, err: &FetchError) {
        let _entered = self.span.enter();
        if err.is_not_found() {
            tracing::warn!(file, "⚠️ No {} file generated yet", kind);
        } else {
            tracing::error!(file, "❌ Failed to load {} file: {}", kind, err);
        }
        tracing::warn!("💡 {}", GENERATION_HINT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;
    use std::sync::Mutex;

    /// Answers every URL with the same canned result and remembers what was asked.
    struct CannedSource {
        answer: fn() -> FetchResult,
        requested: Mutex<Vec<String>>,
    }

    impl CannedSource {
        fn new(answer: fn() -> FetchResult) -> Self {
            Self {
                answer,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl JsonSource for CannedSource {
        async fn fetch(&self, url: &str) -> FetchResult {
            self.requested.lock().unwrap().push(url.to_string());
            (self.answer)()
        }
    }

    fn canned_client(answer: fn() -> FetchResult) -> LorrgsClient<CannedSource> {
        let endpoints = Endpoints::new("http://127.0.0.1:5000", "http://127.0.0.1:5000").unwrap();
        LorrgsClient::new(CannedSource::new(answer), endpoints)
    }

    fn not_found() -> FetchResult {
        Err(FetchError::HttpStatus {
            status: 404,
            message: None,
        })
    }

    #[test]
    fn test_renderer_receives_payload_and_spec() {
        let client = canned_client(|| Ok(json!({"players": []})));
        let seen = RefCell::new(None);

        tokio_test::block_on(client.load_fight_data(
            &FightQuery::new("abc", 1),
            &|data: &Value, spec: &str| {
                *seen.borrow_mut() = Some((data.clone(), spec.to_string()));
            },
        ));

        assert_eq!(
            seen.into_inner(),
            Some((json!({"players": []}), "redmage-redmage".to_string()))
        );
        assert_eq!(
            client.source.requested.lock().unwrap().as_slice(),
            ["http://127.0.0.1:5000/api/fight_analysis/abc/1?spec=redmage-redmage"]
        );
    }

    #[test]
    fn test_renderer_not_called_on_failure() {
        let client = canned_client(not_found);
        let calls = RefCell::new(0);

        tokio_test::block_on(client.load_fight_data(
            &FightQuery::new("abc", 99),
            &|_: &Value, _: &str| *calls.borrow_mut() += 1,
        ));

        assert_eq!(calls.into_inner(), 0);
    }

    #[test]
    fn test_spell_fallback_is_empty_object() {
        let client = canned_client(not_found);
        let spells = tokio_test::block_on(client.load_spell_data("paladin"));
        assert_eq!(spells, json!({}));
    }

    #[test]
    fn test_ranking_fallback_is_none() {
        let client = canned_client(not_found);
        let ranking = tokio_test::block_on(
            client.load_ranking_data(&RankingQuery::new("paladin-paladin", "lindwurm")),
        );
        assert!(ranking.is_none());

        let client = canned_client(|| {
            Err(FetchError::from(
                serde_json::from_str::<Value>("{").unwrap_err(),
            ))
        });
        assert!(tokio_test::block_on(client.load_boss_data("m4s")).is_none());
    }
}
