use std::time::Duration;

use maze_agents::{
    registry::{AgentConfig, AgentKind, EnemyKind},
    sim::{Match, MatchOptions, MatchOutcome, MatchReport},
    WorkerOptions,
};
use types::{GridCoord, MazeFixture};

fn worker() -> WorkerOptions {
    WorkerOptions {
        poll_interval: Duration::from_millis(1),
        ..Default::default()
    }
}

fn options(diamonds_to_win: usize) -> MatchOptions {
    MatchOptions {
        tick: Duration::from_millis(5),
        max_ticks: 2_000,
        diamonds_to_win,
        seed: 11,
    }
}

fn play(fixture: &MazeFixture, config: AgentConfig, options: MatchOptions) -> MatchReport {
    let config = config.validate().unwrap();
    Match::start(
        fixture,
        config.build_planner(),
        config.build_enemies(),
        worker(),
        options,
    )
    .unwrap()
    .run()
    .unwrap()
}

fn assert_trail_is_walkable(fixture: &MazeFixture, report: &MatchReport) {
    let walkability = types::WalkabilityMatrix::compute(&fixture.maze);

    assert_eq!(report.trail.first(), Some(&fixture.start));
    for (a, b) in report.trail.iter().zip(report.trail.iter().skip(1)) {
        assert_eq!(a.manhattan(b), 1, "{} -> {}", a, b);
        // Collected goals turn into free ground, both are walkable
        assert!(walkability.is_walkable(*b), "{} is not walkable", b);
    }
}

#[test]
fn bfs_collects_the_diamond() {
    let fixture = MazeFixture::from_json(include_str!("../../types/fixtures/small.json")).unwrap();
    let report = play(
        &fixture,
        AgentConfig {
            kind: AgentKind::Bfs,
            ..Default::default()
        },
        options(1),
    );

    assert_eq!(report.outcome, MatchOutcome::Won);
    assert_eq!(report.collected, 1);
    assert_eq!(report.trail.last(), Some(&GridCoord::new(1, 7)));
    assert_trail_is_walkable(&fixture, &report);
}

#[test]
fn relocated_diamonds_are_chased_down() {
    let fixture = MazeFixture::from_json(include_str!("../../types/fixtures/small.json")).unwrap();
    let report = play(
        &fixture,
        AgentConfig {
            kind: AgentKind::AStar,
            ..Default::default()
        },
        options(3),
    );

    assert_eq!(report.outcome, MatchOutcome::Won);
    assert_eq!(report.collected, 3);
}

#[test]
fn filled_maze_is_emptied() {
    let fixture = MazeFixture::from_json(include_str!("../../types/fixtures/filled.json")).unwrap();
    assert!(fixture.is_filled());

    for kind in [AgentKind::Greedy, AgentKind::AStar] {
        let report = play(
            &fixture,
            AgentConfig {
                kind,
                filled: true,
                ..Default::default()
            },
            options(usize::MAX),
        );

        assert_eq!(report.outcome, MatchOutcome::Won, "{}", kind);
        assert_eq!(report.collected, 7, "{}", kind);
    }
}

#[test]
fn stranded_agent_gets_caught() {
    let fixture = MazeFixture::from_json(
        r#"{
            "cells": [
                [1, 1, 1, 1, 1, 1, 1],
                [1, 0, 0, 0, 0, 0, 1],
                [1, 1, 1, 1, 1, 1, 1],
                [1, 0, 2, 0, 0, 0, 1],
                [1, 1, 1, 1, 1, 1, 1]
            ],
            "start": [1, 1],
            "enemies": [[1, 4]]
        }"#,
    )
    .unwrap();

    let report = play(
        &fixture,
        AgentConfig {
            kind: AgentKind::Bfs,
            enemy_count: 1,
            enemy_kind: EnemyKind::Chaser,
            ..Default::default()
        },
        options(1),
    );

    assert_eq!(report.outcome, MatchOutcome::Lost);
    assert_eq!(report.trail, vec![GridCoord::new(1, 1)]);
}

#[test]
fn adversarial_match_makes_legal_moves() {
    let fixture = MazeFixture::from_json(include_str!("../../types/fixtures/arena.json")).unwrap();

    for kind in [AgentKind::AlphaBeta, AgentKind::Expectimax] {
        let report = play(
            &fixture,
            AgentConfig {
                kind,
                enemy_count: 1,
                enemy_kind: EnemyKind::Random,
                seed: Some(5),
                ..Default::default()
            },
            MatchOptions {
                max_ticks: 200,
                ..options(1)
            },
        );

        assert!(report.ticks <= 200);
        assert_trail_is_walkable(&fixture, &report);
    }
}

#[test]
fn mismatched_enemy_planners_are_rejected() {
    let fixture = MazeFixture::from_json(include_str!("../../types/fixtures/arena.json")).unwrap();
    let config = AgentConfig::default();

    let started = Match::start(
        &fixture,
        config.build_planner(),
        vec![],
        worker(),
        options(1),
    );
    assert!(started.is_err());
}
