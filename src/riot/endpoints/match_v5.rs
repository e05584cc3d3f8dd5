use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::{FetchError, MatchDto};

/// Upper bound accepted by the `count` parameter of the ids endpoint.
pub const MAX_MATCH_IDS: u32 = 100;

impl RiotClient {
    /// Get match IDs played by a PUUID between two epoch-second bounds
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match_ids_between(
        &self,
        region: Region,
        puuid: &str,
        start_time: i64,
        end_time: i64,
        count: u32,
    ) -> Result<Vec<String>, FetchError> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids",
            self.route(region),
            urlencoding::encode(puuid)
        );
        let query = [
            ("startTime", start_time.to_string()),
            ("endTime", end_time.to_string()),
            ("count", count.min(MAX_MATCH_IDS).to_string()),
        ];

        self.get(&url, &query).await
    }

    /// Get match details by match ID
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match(&self, region: Region, match_id: &str) -> Result<MatchDto, FetchError> {
        let url = format!(
            "{}/lol/match/v5/matches/{}",
            self.route(region),
            urlencoding::encode(match_id)
        );

        self.get(&url, &[]).await
    }
}
