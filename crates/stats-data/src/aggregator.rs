//! Per-game and cross-game kill statistics.

use stats_core::classifier::{is_kill, is_world_cause, mentions_world, parse_kill};
use stats_core::models::{
    AggregateStatistics, KillEvent, Session, SessionRanking, SessionStatistics,
};
use tracing::debug;

use crate::ranking::{frequency_ranking, score_ranking, RankBy};

// ── StatisticsAggregator ──────────────────────────────────────────────────────

/// Stateless helper that derives statistics from session lines.
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    /// Every structured kill in `lines`, in line order.
    ///
    /// Malformed `Kill:` lines are skipped; they only affect their own entry.
    pub fn kill_events(lines: &[String]) -> Vec<KillEvent> {
        lines
            .iter()
            .filter_map(|line| match parse_kill(line) {
                Ok(kill) => kill,
                Err(e) => {
                    debug!("skipping kill line: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Statistics for one game.
    pub fn session_statistics(session: &Session) -> SessionStatistics {
        let lines = session.lines();

        let total_kills = lines.iter().filter(|line| is_kill(line)).count();
        let kills_by_world = lines.iter().filter(|line| mentions_world(line)).count();
        let kills_by_cause = Self::kills_by_cause(lines);

        let ranking_causes = frequency_ranking(&kills_by_cause, RankBy::Cause);
        let ranking_killers = frequency_ranking(&kills_by_cause, RankBy::Killer);

        SessionStatistics {
            total_kills,
            kills_by_cause,
            kills_by_world,
            ranking_causes,
            ranking_killers,
        }
    }

    /// Score leaderboard for one game, alongside its non-world kills.
    pub fn session_ranking(session: &Session) -> SessionRanking {
        let kills = Self::kill_events(session.lines());
        let ranking = score_ranking(&kills);
        let kills_by_cause = kills
            .into_iter()
            .filter(|kill| !is_world_cause(kill))
            .collect();

        SessionRanking {
            ranking,
            kills_by_cause,
        }
    }

    /// Statistics for every session, in the order given.
    pub fn aggregate(sessions: &[Session]) -> AggregateStatistics {
        let statistics = sessions.iter().map(Self::session_statistics).collect();
        Self::from_statistics(statistics)
    }

    /// Wrap already computed per-session statistics.
    ///
    /// `total_games` is reported as the session count plus one.
    pub fn from_statistics(statistics: Vec<SessionStatistics>) -> AggregateStatistics {
        AggregateStatistics {
            total_games: statistics.len() + 1,
            statistics,
        }
    }

    fn kills_by_cause(lines: &[String]) -> Vec<KillEvent> {
        Self::kill_events(lines)
            .into_iter()
            .filter(|kill| !is_world_cause(kill))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use stats_core::models::{RankingEntry, ScoreEntry};

    fn session(raw: &[&str]) -> Session {
        Session::new(raw.iter().map(|s| s.to_string()).collect())
    }

    fn sample_game() -> Session {
        session(&[
            r"  0:00 InitGame: \sv_floodProtect\1\sv_maxPing\0",
            " 20:34 ClientConnect: 2",
            " 20:42 Item: 2 item_armor_body",
            " 20:54 Kill: 1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT",
            " 21:07 Kill: 1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT",
            " 22:06 Kill: 2 3 7: Isgalamido killed Mocinha by MOD_ROCKET_SPLASH",
            " 22:18 Kill: 2 2 7: Isgalamido killed Isgalamido by MOD_ROCKET_SPLASH",
            " 22:40 Kill: 3 2 6: Mocinha killed Isgalamido by MOD_ROCKET",
            " 23:03 ShutdownGame:",
        ])
    }

    // ── session_statistics ────────────────────────────────────────────────────

    #[test]
    fn test_single_player_kill() {
        let game = session(&[
            "  0:00 InitGame: x",
            "  0:25 Kill: 2 3 6: PlayerA killed PlayerB by MOD_ROCKET",
            "  1:00 ShutdownGame:",
        ]);
        let stats = StatisticsAggregator::session_statistics(&game);
        assert_eq!(stats.total_kills, 1);
        assert_eq!(
            stats.kills_by_cause,
            vec![KillEvent::new("PlayerA", "PlayerB", "MOD_ROCKET")]
        );
        assert_eq!(stats.kills_by_world, 0);
    }

    #[test]
    fn test_world_cause_counted_but_not_listed() {
        let game = session(&[
            "  0:00 InitGame: x",
            "  0:25 Kill: 2 2 1: PlayerA killed PlayerA by <world>",
            "  1:00 ShutdownGame:",
        ]);
        let stats = StatisticsAggregator::session_statistics(&game);
        assert_eq!(stats.total_kills, 1);
        assert_eq!(stats.kills_by_world, 1);
        assert!(stats.kills_by_cause.is_empty());
        assert!(stats.ranking_causes.is_empty());
    }

    #[test]
    fn test_sample_game_statistics() {
        let stats = StatisticsAggregator::session_statistics(&sample_game());
        assert_eq!(stats.total_kills, 5);
        assert_eq!(stats.kills_by_world, 2);
        // World-killer lines have a regular cause, so they stay listed.
        assert_eq!(stats.kills_by_cause.len(), 5);
        // Tied at two, MOD_TRIGGER_HURT was seen first.
        assert_eq!(
            stats.ranking_causes,
            vec![
                RankingEntry {
                    key: "MOD_TRIGGER_HURT".to_string(),
                    quantity: 2
                },
                RankingEntry {
                    key: "MOD_ROCKET_SPLASH".to_string(),
                    quantity: 2
                },
                RankingEntry {
                    key: "MOD_ROCKET".to_string(),
                    quantity: 1
                },
            ]
        );
        assert_eq!(stats.ranking_killers[0].key, "<world>");
        assert_eq!(stats.ranking_killers[0].quantity, 2);
        assert_eq!(stats.ranking_killers[1].key, "Isgalamido");
    }

    #[test]
    fn test_malformed_kill_line_counted_not_extracted() {
        let game = session(&[
            "  0:00 InitGame: x",
            "  0:10 Kill: 2 3 7: Isgalamido fragged Mocinha",
            "  0:20 Kill: 2 3 7: Isgalamido killed Mocinha by MOD_SHOTGUN",
            "  1:00 ShutdownGame:",
        ]);
        let stats = StatisticsAggregator::session_statistics(&game);
        assert_eq!(stats.total_kills, 2);
        assert_eq!(stats.kills_by_cause.len(), 1);
        assert_eq!(stats.kills_by_cause[0].cause, "MOD_SHOTGUN");
    }

    #[test]
    fn test_world_lines_counted_independently_of_kills() {
        let game = session(&[
            "  0:00 InitGame: x",
            "  0:10 say: <world> is watching",
            "  1:00 ShutdownGame:",
        ]);
        let stats = StatisticsAggregator::session_statistics(&game);
        assert_eq!(stats.total_kills, 0);
        assert_eq!(stats.kills_by_world, 1);
    }

    // ── session_ranking ───────────────────────────────────────────────────────

    #[test]
    fn test_sample_game_ranking() {
        let ranking = StatisticsAggregator::session_ranking(&sample_game());
        // A suicide nets zero for the player.
        assert_eq!(
            ranking.ranking,
            vec![
                ScoreEntry {
                    player: "Mocinha".to_string(),
                    score: 0
                },
                ScoreEntry {
                    player: "Isgalamido".to_string(),
                    score: -2
                },
            ]
        );
        assert_eq!(ranking.kills_by_cause.len(), 5);
    }

    #[test]
    fn test_ranking_kill_to_world() {
        let game = session(&[
            "  0:00 InitGame: x",
            "  0:10 Kill: 2 3 6: A killed B by MOD_ROCKET",
            "  0:20 Kill: 2 1022 6: A killed <world> by MOD_FALLING",
            "  1:00 ShutdownGame:",
        ]);
        let ranking = StatisticsAggregator::session_ranking(&game);
        assert_eq!(ranking.ranking.len(), 2);
        assert_eq!(ranking.ranking[0].player, "A");
        assert_eq!(ranking.ranking[0].score, 2);
        assert_eq!(ranking.ranking[1].player, "B");
        assert_eq!(ranking.ranking[1].score, -1);
    }

    // ── aggregate ─────────────────────────────────────────────────────────────

    #[test]
    fn test_aggregate_total_games_is_count_plus_one() {
        let agg = StatisticsAggregator::aggregate(&[sample_game(), sample_game()]);
        assert_eq!(agg.total_games, 3);
        assert_eq!(agg.statistics.len(), 2);
    }

    #[test]
    fn test_aggregate_empty() {
        let agg = StatisticsAggregator::aggregate(&[]);
        assert_eq!(agg.total_games, 1);
        assert!(agg.statistics.is_empty());
    }

    #[test]
    fn test_aggregate_preserves_session_order() {
        let quiet = session(&["  0:00 InitGame: x", "  1:00 ShutdownGame:"]);
        let agg = StatisticsAggregator::aggregate(&[sample_game(), quiet]);
        assert_eq!(agg.statistics[0].total_kills, 5);
        assert_eq!(agg.statistics[1].total_kills, 0);
    }
}
