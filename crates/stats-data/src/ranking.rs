//! Frequency and score rankings over a game's kills.

use std::collections::HashMap;

use stats_core::classifier::WORLD;
use stats_core::models::{KillEvent, RankingEntry, ScoreEntry};

// ── Tally ─────────────────────────────────────────────────────────────────────

/// Per-key accumulator that remembers the order keys were first seen in.
#[derive(Debug, Default)]
struct Tally<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V: Default> Tally<V> {
    fn entry(&mut self, key: &str) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot].1
    }

    fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

// ── Frequency ranking ─────────────────────────────────────────────────────────

/// Which field of a [`KillEvent`] a frequency ranking groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Cause,
    Killer,
}

impl RankBy {
    fn key<'a>(&self, kill: &'a KillEvent) -> &'a str {
        match self {
            RankBy::Cause => &kill.cause,
            RankBy::Killer => &kill.killer,
        }
    }
}

/// Count occurrences of each distinct key, highest count first.
/// Equal counts keep first-seen order.
pub fn frequency_ranking(kills: &[KillEvent], by: RankBy) -> Vec<RankingEntry> {
    let mut tally: Tally<u32> = Tally::default();
    for kill in kills {
        *tally.entry(by.key(kill)) += 1;
    }

    let mut ranking: Vec<RankingEntry> = tally
        .into_entries()
        .into_iter()
        .map(|(key, quantity)| RankingEntry { key, quantity })
        .collect();
    ranking.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranking
}

// ── Score ranking ─────────────────────────────────────────────────────────────

/// Zero-sum leaderboard for one game.
///
/// A kill of `<world>` only credits the killer; any other kill credits the
/// killer and debits the victim. The `<world>` entry is dropped, then every
/// name is reduced to its last whitespace-separated word and scores of
/// names that reduce to the same word are summed. Highest score first,
/// ties in first-seen order.
pub fn score_ranking(kills: &[KillEvent]) -> Vec<ScoreEntry> {
    let mut scores: Tally<i64> = Tally::default();
    for kill in kills {
        *scores.entry(&kill.killer) += 1;
        if kill.killed != WORLD {
            *scores.entry(&kill.killed) -= 1;
        }
    }

    let mut merged: Tally<i64> = Tally::default();
    for (player, score) in scores.into_entries() {
        if player == WORLD {
            continue;
        }
        *merged.entry(canonical_player(&player)) += score;
    }

    let mut ranking: Vec<ScoreEntry> = merged
        .into_entries()
        .into_iter()
        .map(|(player, score)| ScoreEntry { player, score })
        .collect();
    ranking.sort_by(|a, b| b.score.cmp(&a.score));
    ranking
}

/// Last whitespace-delimited word of a player name.
fn canonical_player(name: &str) -> &str {
    name.split_whitespace().last().unwrap_or(name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn kill(killer: &str, killed: &str, cause: &str) -> KillEvent {
        KillEvent::new(killer, killed, cause)
    }

    fn score(player: &str, score: i64) -> ScoreEntry {
        ScoreEntry {
            player: player.to_string(),
            score,
        }
    }

    // ── frequency_ranking ─────────────────────────────────────────────────────

    #[test]
    fn test_frequency_by_cause() {
        let kills = vec![
            kill("A", "B", "MOD_ROCKET"),
            kill("A", "C", "MOD_ROCKET"),
            kill("B", "A", "MOD_SHOTGUN"),
        ];
        let ranking = frequency_ranking(&kills, RankBy::Cause);
        assert_eq!(
            ranking,
            vec![
                RankingEntry {
                    key: "MOD_ROCKET".to_string(),
                    quantity: 2
                },
                RankingEntry {
                    key: "MOD_SHOTGUN".to_string(),
                    quantity: 1
                },
            ]
        );
    }

    #[test]
    fn test_frequency_ties_keep_first_seen_order() {
        let kills = vec![
            kill("Zeh", "A", "MOD_X"),
            kill("Mal", "A", "MOD_X"),
            kill("Isgalamido", "A", "MOD_X"),
            kill("Mal", "A", "MOD_X"),
        ];
        let keys: Vec<String> = frequency_ranking(&kills, RankBy::Killer)
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["Mal", "Zeh", "Isgalamido"]);
    }

    #[test]
    fn test_frequency_empty() {
        assert!(frequency_ranking(&[], RankBy::Cause).is_empty());
    }

    // ── score_ranking ─────────────────────────────────────────────────────────

    #[test]
    fn test_score_kill_and_world_kill() {
        let kills = vec![kill("A", "B", "MOD_ROCKET"), kill("A", "<world>", "MOD_FALLING")];
        assert_eq!(score_ranking(&kills), vec![score("A", 2), score("B", -1)]);
    }

    #[test]
    fn test_score_world_killer_removed() {
        let kills = vec![
            kill("<world>", "Isgalamido", "MOD_TRIGGER_HURT"),
            kill("<world>", "Isgalamido", "MOD_TRIGGER_HURT"),
            kill("Mocinha", "Zeh", "MOD_RAILGUN"),
        ];
        assert_eq!(
            score_ranking(&kills),
            vec![score("Mocinha", 1), score("Zeh", -1), score("Isgalamido", -2)]
        );
    }

    #[test]
    fn test_score_names_collapse_to_last_word() {
        let kills = vec![
            kill("Dono da Bola", "Zeh", "MOD_ROCKET"),
            kill("Bola", "Zeh", "MOD_ROCKET"),
        ];
        assert_eq!(score_ranking(&kills), vec![score("Bola", 2), score("Zeh", -2)]);
    }

    #[test]
    fn test_score_ties_keep_first_seen_order() {
        let kills = vec![kill("A", "B", "MOD_X"), kill("C", "D", "MOD_X")];
        assert_eq!(
            score_ranking(&kills),
            vec![score("A", 1), score("C", 1), score("B", -1), score("D", -1)]
        );
    }

    #[test]
    fn test_score_empty() {
        assert!(score_ranking(&[]).is_empty());
    }

    // ── canonical_player ──────────────────────────────────────────────────────

    #[test]
    fn test_canonical_player() {
        assert_eq!(canonical_player("Assasinu Credi"), "Credi");
        assert_eq!(canonical_player("Zeh"), "Zeh");
        assert_eq!(canonical_player(""), "");
    }
}
