//! Property tests for the matchup tables and finishing odds

use dohyo::bout::phase::{Choice, Kimarite, Phase, SignatureMove, Technique};
use dohyo::bout::resolution::{finish_chance, finish_odds, CornerContext};
use dohyo::bout::stats::{BoutStats, Stat};
use dohyo::bout::tables::{choices_for, matchup};
use dohyo::bout::wrestler::WrestlerBuild;
use dohyo::core::config::FinishTuning;
use dohyo::core::types::PerSide;
use proptest::prelude::*;

fn competitive_choice(phase: Phase) -> impl Strategy<Value = Choice> {
    proptest::sample::select(choices_for(phase).to_vec())
}

fn table_pair() -> impl Strategy<Value = (Choice, Choice)> {
    prop_oneof![
        (competitive_choice(Phase::Tachiai), competitive_choice(Phase::Tachiai)),
        (competitive_choice(Phase::Technique), competitive_choice(Phase::Technique)),
    ]
}

fn finish_move() -> impl Strategy<Value = Kimarite> {
    proptest::sample::select(vec![
        Kimarite::Yorikiri,
        Kimarite::Oshidashi,
        Kimarite::Uwatenage,
        Kimarite::Hatakikomi,
    ])
}

fn stats_strategy() -> impl Strategy<Value = BoutStats> {
    proptest::collection::vec(-10i32..10, 10).prop_map(|values| {
        let mut stats = BoutStats::new();
        for (stat, value) in Stat::ALL.iter().zip(values) {
            stats.add(*stat, value);
        }
        stats
    })
}

proptest! {
    #[test]
    fn matchup_probabilities_sum_to_one((east, west) in table_pair()) {
        let [p_east, p_west] = matchup(east, west).unwrap();
        prop_assert!((p_east + p_west - 1.0).abs() < 1e-9);
        prop_assert!(p_east > 0.0 && p_east < 1.0);
    }

    #[test]
    fn mirrored_matchup_is_complement((east, west) in table_pair()) {
        let forward = matchup(east, west).unwrap();
        let mirror = matchup(west, east).unwrap();
        prop_assert!((forward[0] - mirror[1]).abs() < 1e-9);
    }

    #[test]
    fn finish_chance_never_drops_when_a_stat_rises(
        stats in stats_strategy(),
        stat_index in 0usize..10,
        bump in 1i32..5,
        finish in finish_move(),
    ) {
        let tuning = FinishTuning::default();
        let build = WrestlerBuild::balanced(SignatureMove::Yorikiri);
        let technique = Some(Technique::Grip);

        let mut raised = stats;
        raised.add(Stat::ALL[stat_index], bump);

        let before = finish_chance(&stats, &build, finish, technique, &tuning);
        let after = finish_chance(&raised, &build, finish, technique, &tuning);
        prop_assert!(after >= before);
        prop_assert!((tuning.min_chance..=tuning.max_chance).contains(&after));
    }

    #[test]
    fn east_share_never_drops_when_an_east_stat_rises(
        east in stats_strategy(),
        west in stats_strategy(),
        stat_index in 0usize..10,
        bump in 1i32..5,
        moves in (finish_move(), finish_move()),
    ) {
        let tuning = FinishTuning::default();
        let east_build = WrestlerBuild::balanced(SignatureMove::Uwatenage);
        let west_build = WrestlerBuild::balanced(SignatureMove::Oshidashi);
        let corners = PerSide::new(
            CornerContext {
                name: "Kirishima",
                build: &east_build,
                technique: Some(Technique::Grip),
            },
            CornerContext {
                name: "Onosato",
                build: &west_build,
                technique: Some(Technique::Tsuppari),
            },
        );
        let moves = PerSide::new(moves.0, moves.1);

        let mut raised = east;
        raised.add(Stat::ALL[stat_index], bump);

        let before = finish_odds(&PerSide::new(east, west), &corners, moves, &tuning);
        let after = finish_odds(&PerSide::new(raised, west), &corners, moves, &tuning);
        prop_assert!(after.east_share >= before.east_share - 1e-12);
        prop_assert!(after.east_share > 0.0 && after.east_share < 1.0);
    }
}
