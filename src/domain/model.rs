use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Spec used when a fight is requested without one.
pub const DEFAULT_SPEC_SLUG: &str = "redmage-redmage";

/// One boss encounter inside a report, filtered to a single spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightQuery {
    pub report_id: String,
    pub fight_id: u32,
    pub spec_slug: String,
}

impl FightQuery {
    pub fn new(report_id: impl Into<String>, fight_id: u32) -> Self {
        Self {
            report_id: report_id.into(),
            fight_id,
            spec_slug: DEFAULT_SPEC_SLUG.to_string(),
        }
    }

    pub fn with_spec(mut self, spec_slug: impl Into<String>) -> Self {
        self.spec_slug = spec_slug.into();
        self
    }
}

/// Identifies one precomputed ranking file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingQuery {
    pub spec_slug: String,
    pub boss_slug: String,
}

impl RankingQuery {
    pub fn new(spec_slug: impl Into<String>, boss_slug: impl Into<String>) -> Self {
        Self {
            spec_slug: spec_slug.into(),
            boss_slug: boss_slug.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("spec_ranking_{}_{}.json", self.spec_slug, self.boss_slug)
    }
}

/// Fallback for a spell list that could not be loaded.
pub fn empty_spell_map() -> Value {
    Value::Object(serde_json::Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fight_query_defaults_to_red_mage() {
        let query = FightQuery::new("abc", 1);
        assert_eq!(query.spec_slug, "redmage-redmage");

        let query = query.with_spec("paladin-paladin");
        assert_eq!(query.spec_slug, "paladin-paladin");
    }

    #[test]
    fn test_ranking_file_name() {
        let query = RankingQuery::new("warrior-warrior", "vamp-fatale");
        assert_eq!(query.file_name(), "spec_ranking_warrior-warrior_vamp-fatale.json");
    }

    #[test]
    fn test_empty_spell_map_is_empty_object() {
        assert_eq!(empty_spell_map(), serde_json::json!({}));
    }
}
