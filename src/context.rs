//! Explicit page context handed to chart controllers.

use std::sync::Arc;

use tracing::info;

use crate::fetch::{FetchError, SnapshotSource, SnapshotStore, StoreError};
use crate::models::{EnumsInfo, RankingRecord, Seasons, StatId};
use crate::stats::{Collection, Mode};

/// Layout metadata, seasons and the raw stats store for one page.
pub struct StatsContext {
    enums: Arc<EnumsInfo>,
    seasons: Arc<Seasons>,
    store: SnapshotStore,
}

impl StatsContext {
    pub fn new(source: Arc<dyn SnapshotSource>, enums: EnumsInfo, seasons: Seasons) -> Self {
        let enums = Arc::new(enums);
        Self {
            store: SnapshotStore::new(source, enums.clone()),
            enums,
            seasons: Arc::new(seasons),
        }
    }

    pub fn enums(&self) -> &Arc<EnumsInfo> {
        &self.enums
    }

    pub fn seasons(&self) -> &Arc<Seasons> {
        &self.seasons
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// The mode's snapshots, fetched once per context.
    pub async fn mode(&self, mode_id: StatId) -> Result<Arc<Mode>, StoreError> {
        self.store.fetch_mode(mode_id).await
    }

    /// A team's ranking history; fetched on every call.
    pub async fn ranking_history(
        &self,
        team_id: i64,
    ) -> Result<Collection<RankingRecord>, FetchError> {
        let records = self.store.source().fetch_ranking_history(team_id).await?;
        info!(team_id, records = records.len(), "Ranking history loaded");
        Ok(Collection::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawSnapshot, Season, StatLayout};
    use async_trait::async_trait;

    struct FixedSource;

    #[async_trait]
    impl SnapshotSource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch_mode(&self, mode_id: StatId) -> Result<Vec<RawSnapshot>, FetchError> {
            Ok(vec![RawSnapshot {
                id: 1,
                mode_id,
                season_id: 28,
                season_version: 2,
                stat_version: 1,
                data_time: 1000,
                data: vec![3.0, 2.0, 1.0, 0.0],
            }])
        }

        async fn fetch_ranking_history(
            &self,
            _team_id: i64,
        ) -> Result<Vec<RankingRecord>, FetchError> {
            Ok(vec![RankingRecord {
                id: 1,
                data_time: 1000,
                season_id: 28,
                season_version: 2,
                version: 2,
                world_rank: 1,
                world_count: 10,
                region_rank: 1,
                region_count: 5,
                league_rank: 1,
                league_count: 2,
                ladder_rank: 1,
                ladder_count: 2,
                points: 100.0,
                wins: 3,
                losses: 1,
                mmr: Some(4000),
            }])
        }
    }

    fn context() -> StatsContext {
        let mut enums = EnumsInfo::default();
        enums
            .stat
            .insert(1, StatLayout::from_ids(4, vec![2], vec![0], vec![0], vec![0]));
        let seasons = Seasons::new(vec![Season {
            id: 28,
            number: 1,
            year: 2016,
            start: 0,
            end: 2000,
            color: "#ff6666".to_string(),
        }]);
        StatsContext::new(Arc::new(FixedSource), enums, seasons)
    }

    #[tokio::test]
    async fn test_context_resolves_mode() {
        let context = context();
        let mode = context.mode(11).await.unwrap();

        assert_eq!(mode.last().unwrap().get(2, 0, 0, 0), &[3.0, 2.0, 1.0, 0.0]);
        assert_eq!(context.seasons().get(28).unwrap().year, 2016);
    }

    #[tokio::test]
    async fn test_context_ranking_history() {
        let history = context().ranking_history(99).await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.get_last().unwrap().mmr, Some(4000));
    }
}
