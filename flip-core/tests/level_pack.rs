// The bundled level pack: parsing, unlock progression and known solutions.

use flip_core::{FlipError, LevelRepository, MoveOutcome, Progress, Ruleset, Session};

const PACK: &str = include_str!("../../levels.json");

fn session() -> Session {
    let repo = LevelRepository::from_json(PACK).expect("bundled pack parses");
    Session::new(repo, Default::default()).unwrap()
}

fn play(s: &mut Session, moves: &[((i32, i32), (i32, i32))]) -> usize {
    let mut last = 0;
    for &((fx, fy), (tx, ty)) in moves {
        s.deselect();
        s.select_piece_at(fx, fy);
        match s.attempt_move(tx, ty) {
            MoveOutcome::Moved(report) => last = report.moves_made,
            other => panic!("({fx}, {fy}) -> ({tx}, {ty}) refused: {other:?}"),
        }
    }
    last
}

#[test]
fn pack_parses_with_expected_rulesets() {
    let repo = LevelRepository::from_json(PACK).unwrap();
    assert_eq!(repo.len(), 4);
    let ids: Vec<&str> = repo.levels().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["intro-1", "intro-2", "walls-1", "duel-1"]);
    assert_eq!(repo.get(2).unwrap().grid.wall_count(), 1);
    assert_eq!(repo.get(3).unwrap().ruleset(), Ruleset::Duel);
    assert!(repo.levels().iter().all(|l| !l.grid.is_uniform()));
}

#[test]
fn every_level_survives_compact_export() {
    let repo = LevelRepository::from_json(PACK).unwrap();
    for level in repo.levels() {
        let text = level.to_compact_json();
        assert_eq!(&flip_core::Level::from_json(&text).unwrap(), level);
    }
}

#[test]
fn locked_levels_cannot_be_loaded() {
    let mut s = session();
    assert!(matches!(s.load_level(1), Err(FlipError::LevelLocked { index: 1 })));
    assert!(matches!(s.load_next_level(), Err(FlipError::LevelLocked { index: 1 })));
    assert_eq!(s.current_index(), Some(0));
}

#[test]
fn stored_progress_unlocks_and_solutions_clear() {
    let mut repo = LevelRepository::from_json(PACK).unwrap();
    let stored = vec![
        Progress {
            id: "intro-1".into(),
            best_moves: Some(9),
        },
        Progress {
            id: "intro-2".into(),
            best_moves: Some(11),
        },
    ];
    assert_eq!(repo.apply_progress(&stored), 2);
    let mut s = Session::new(repo, Default::default()).unwrap();

    s.load_level(2).unwrap();
    let n = play(&mut s, &[((0, 0), (0, 4)), ((4, 0), (3, 1))]);
    assert_eq!(n, 2);
    assert!(s.is_cleared());
    assert!(s.level().is_perfect());

    assert!(s.load_next_level().unwrap());
    assert_eq!(s.current_index(), Some(3));
    let n = play(&mut s, &[((0, 0), (0, 2)), ((3, 3), (3, 1))]);
    assert_eq!(n, 2);
    assert!(s.is_cleared());
    assert!(!s.load_next_level().unwrap());

    let progress = s.repository().progress();
    assert_eq!(progress.len(), 4);
    assert_eq!(progress[3].best_moves, Some(2));
}
