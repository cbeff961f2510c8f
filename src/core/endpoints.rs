use crate::domain::model::{FightQuery, RankingQuery};
use crate::domain::ports::EndpointConfig;
use crate::utils::error::{LorrgsError, Result};
use std::sync::atomic::{AtomicI64, Ordering};
use url::Url;

/// Hands out millisecond timestamps that strictly increase, even when two
/// calls land in the same millisecond.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicI64,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            }) {
            Ok(prev) | Err(prev) => now.max(prev + 1),
        }
    }
}

/// Builds every URL the client requests.
#[derive(Debug)]
pub struct Endpoints {
    api_base: Url,
    static_base: Url,
    cache_buster: CacheBuster,
}

fn parse_base(field: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| LorrgsError::InvalidConfigValueError {
        field: field.to_string(),
        value: raw.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    if url.cannot_be_a_base() {
        return Err(LorrgsError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    // parse_base rejected cannot-be-a-base URLs
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

impl Endpoints {
    pub fn new(api_base: &str, static_base: &str) -> Result<Self> {
        Ok(Self {
            api_base: parse_base("api_base", api_base)?,
            static_base: parse_base("static_base", static_base)?,
            cache_buster: CacheBuster::new(),
        })
    }

    pub fn from_config<C: EndpointConfig + ?Sized>(config: &C) -> Result<Self> {
        Self::new(config.api_base(), config.static_base())
    }

    /// `{api}/api/fight_analysis/{report}/{fight}?spec={spec}`
    pub fn fight_analysis(&self, query: &FightQuery) -> Url {
        let fight_id = query.fight_id.to_string();
        let mut url = with_segments(
            &self.api_base,
            &["api", "fight_analysis", &query.report_id, &fight_id],
        );
        url.query_pairs_mut().append_pair("spec", &query.spec_slug);
        url
    }

    /// `{api}/api/specs/{spec}/spells`
    pub fn spell_list(&self, spec_slug: &str) -> Url {
        with_segments(&self.api_base, &["api", "specs", spec_slug, "spells"])
    }

    /// `{static}/data/spec_ranking_{spec}_{boss}.json?t={millis}`
    pub fn ranking(&self, query: &RankingQuery) -> Url {
        self.static_file(&query.file_name())
    }

    /// `{static}/data/boss_{short_name}.json?t={millis}`
    pub fn boss_data(&self, short_name: &str) -> Url {
        self.static_file(&format!("boss_{}.json", short_name))
    }

    fn static_file(&self, file_name: &str) -> Url {
        let mut url = with_segments(&self.static_base, &["data", file_name]);
        url.query_pairs_mut()
            .append_pair("t", &self.cache_buster.next().to_string());
        url
    }
}
