use hitseeker::{
    AnalyzerOptions, CoordinateAlignment, CoordinateNavigator, Direction, EngineError,
    GridCoordinate, GuessResult, MoveAnalyzer, PreviousMove, RectangularGrid, ShipSize,
    ShipStatus, ShipType, SHIPS, STANDARD_GRID,
};

fn c(s: &str) -> GridCoordinate {
    let column = s.chars().next().unwrap();
    let row = s[1..].parse().unwrap();
    GridCoordinate::new(column, row)
}

fn analyzer() -> MoveAnalyzer<RectangularGrid> {
    MoveAnalyzer::new(STANDARD_GRID, &SHIPS, AnalyzerOptions::default())
}

fn play(analyzer: &mut MoveAnalyzer<RectangularGrid>, moves: &[(&str, GuessResult)]) {
    for &(target, result) in moves {
        analyzer.record(PreviousMove::new(c(target), result)).unwrap();
    }
}

fn status_of(analyzer: &MoveAnalyzer<RectangularGrid>, name: &str) -> String {
    analyzer
        .fleet()
        .ships()
        .iter()
        .find(|s| s.ship().name() == name)
        .unwrap()
        .status()
        .to_string()
}

use GuessResult::{Hit, Miss, Sunk};

#[test]
fn test_hits_form_alignments() {
    let mut a = analyzer();
    play(&mut a, &[("C3", Hit), ("C4", Hit)]);
    assert_eq!(a.hits(), &[c("C3"), c("C4")]);
    assert_eq!(a.alignments().len(), 1);
    assert_eq!(a.alignments()[0].to_string(), "VERTICAL,(C3,C4)");
    assert_eq!(a.alignments()[0].open_extremums(), vec![c("C2"), c("C5")]);
}

#[test]
fn test_miss_removes_extremum() {
    let mut a = analyzer();
    play(&mut a, &[("C3", Hit), ("C4", Hit), ("C5", Miss)]);
    assert_eq!(a.alignments()[0].open_extremums(), vec![c("C2")]);
    // a miss recorded before the alignment exists is applied on refresh
    let mut b = analyzer();
    play(&mut b, &[("C5", Miss), ("C3", Hit), ("C4", Hit)]);
    assert_eq!(b.alignments()[0].open_extremums(), vec![c("C2")]);
}

#[test]
fn test_repeated_move_is_ignored() {
    let mut a = analyzer();
    play(&mut a, &[("C3", Hit), ("C3", Hit)]);
    assert_eq!(a.previous_moves().len(), 1);
    assert_eq!(a.hits(), &[c("C3")]);
}

#[test]
fn test_alignment_certainty() {
    let nav = CoordinateNavigator::new(STANDARD_GRID);
    let mut a = analyzer();
    play(
        &mut a,
        &[("A2", Miss), ("B2", Miss), ("C1", Miss), ("A1", Hit), ("B1", Hit)],
    );
    let run = CoordinateAlignment::complete(Direction::Horizontal, &[c("A1"), c("B1")], &nav)
        .unwrap();
    assert!(a.is_alignment_certain(&run));

    let mut open = analyzer();
    play(&mut open, &[("A2", Miss), ("B2", Miss), ("A1", Hit), ("B1", Hit)]);
    assert!(!open.is_alignment_certain(&run));

    let gapped = CoordinateAlignment::complete(Direction::Horizontal, &[c("A1"), c("C1")], &nav)
        .unwrap();
    assert!(!a.is_alignment_certain(&gapped));
}

#[test]
fn test_two_cell_sunk_is_certain() {
    let mut a = analyzer();
    play(&mut a, &[("C3", Hit), ("B3", Sunk)]);
    assert_eq!(status_of(&a, "Destroyer"), "SUNK[HORIZONTAL,(B3,C3)]");
    assert!(a.hits().is_empty());
    assert!(a.alignments().is_empty());
    assert_eq!(a.min_ship_size(), Some(ShipSize::Three));
}

#[test]
fn test_open_sunk_run_is_unverified() {
    let mut a = analyzer();
    play(&mut a, &[("E5", Hit), ("F5", Hit), ("G5", Sunk)]);
    assert_eq!(status_of(&a, "Cruiser"), "NON_VERIFIED_SUNK[HORIZONTAL,(E5,F5,G5)]");
    assert!(a.hits().is_empty());
}

#[test]
fn test_enclosed_sunk_run_is_certain() {
    let mut a = analyzer();
    play(
        &mut a,
        &[
            ("D1", Miss),
            ("A2", Miss),
            ("B2", Miss),
            ("C2", Miss),
            ("A1", Hit),
            ("B1", Hit),
            ("C1", Sunk),
        ],
    );
    assert_eq!(status_of(&a, "Cruiser"), "SUNK[HORIZONTAL,(A1,B1,C1)]");
    assert_eq!(a.verified_max_ship_size(), Some(ShipSize::Five));
}

#[test]
fn test_unverified_ship_confirmed_later() {
    let mut a = analyzer();
    play(&mut a, &[("E5", Hit), ("F5", Hit), ("G5", Sunk)]);
    play(
        &mut a,
        &[
            ("D5", Miss),
            ("H5", Miss),
            ("E4", Miss),
            ("F4", Miss),
            ("G4", Miss),
            ("E6", Miss),
            ("F6", Miss),
            ("G6", Miss),
        ],
    );
    // confirmation happens on the next sinking shot
    play(&mut a, &[("A9", Hit), ("A10", Sunk)]);
    assert_eq!(status_of(&a, "Cruiser"), "SUNK[HORIZONTAL,(E5,F5,G5)]");
    assert_eq!(status_of(&a, "Destroyer"), "SUNK[VERTICAL,(A9,A10)]");
}

#[test]
fn test_backtrack_on_duplicate_size() {
    let mut a = analyzer();
    play(
        &mut a,
        &[
            ("D1", Miss),
            ("A2", Miss),
            ("B2", Miss),
            ("C2", Miss),
            ("A1", Hit),
            ("B1", Hit),
            ("C1", Sunk),
            ("E5", Hit),
            ("F5", Hit),
            ("G5", Sunk),
        ],
    );
    assert_eq!(status_of(&a, "Cruiser"), "SUNK[HORIZONTAL,(A1,B1,C1)]");
    assert_eq!(status_of(&a, "Submarine"), "NON_VERIFIED_SUNK[HORIZONTAL,(E5,F5,G5)]");

    play(&mut a, &[("A8", Hit), ("B8", Hit), ("C8", Sunk)]);
    assert_eq!(status_of(&a, "Submarine"), "NON_VERIFIED_SUNK[HORIZONTAL,(A8,B8,C8)]");
    assert_eq!(a.hits(), &[c("E5"), c("F5"), c("G5")]);
    let suspicious: Vec<String> = a.suspicious_alignments().iter().map(|s| s.to_string()).collect();
    assert_eq!(suspicious, vec!["HORIZONTAL,(A8,B8,C8)", "HORIZONTAL,(E5,F5,G5)"]);
    // the re-surfaced hits are targeted again
    assert_eq!(a.alignments().len(), 1);
    assert_eq!(a.alignments()[0].open_extremums(), vec![c("D5"), c("H5")]);
}

#[test]
fn test_contradiction_when_no_ship_fits() {
    let fleet = [
        ShipType::new("Cruiser", ShipSize::Three),
        ShipType::new("Destroyer", ShipSize::Two),
    ];
    let mut a = MoveAnalyzer::new(STANDARD_GRID, &fleet, AnalyzerOptions::default());
    play(&mut a, &[("A1", Hit), ("B1", Sunk)]);
    assert_eq!(status_of(&a, "Destroyer"), "SUNK[HORIZONTAL,(A1,B1)]");
    a.record(PreviousMove::new(c("D4"), Hit)).unwrap();
    let err = a.record(PreviousMove::new(c("E4"), Sunk)).unwrap_err();
    match err {
        EngineError::Contradiction { reason, snapshot } => {
            assert!(reason.contains("E4"));
            assert!(snapshot.contains("Destroyer"));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_long_sunk_run_is_shrunk_to_free_ship() {
    let fleet = [
        ShipType::new("Cruiser", ShipSize::Three),
        ShipType::new("Destroyer", ShipSize::Two),
    ];
    let mut a = MoveAnalyzer::new(STANDARD_GRID, &fleet, AnalyzerOptions::default());
    play(
        &mut a,
        &[("C2", Hit), ("A2", Hit), ("B2", Hit), ("D2", Hit), ("E2", Sunk)],
    );
    assert_eq!(status_of(&a, "Cruiser"), "NON_VERIFIED_SUNK[HORIZONTAL,(C2,D2,E2)]");
    assert_eq!(a.hits(), &[c("A2"), c("B2")]);
}

#[test]
fn test_sunk_run_reopens_ship_holding_its_next_cell() {
    let fleet = [
        ShipType::new("Battleship", ShipSize::Four),
        ShipType::new("Cruiser", ShipSize::Three),
        ShipType::new("Destroyer", ShipSize::Two),
    ];
    let mut a = MoveAnalyzer::new(STANDARD_GRID, &fleet, AnalyzerOptions::default());
    play(&mut a, &[("J9", Hit), ("J10", Sunk)]);
    // the Battleship is C1..C4, the Cruiser A5..C5
    play(
        &mut a,
        &[("C5", Hit), ("C1", Hit), ("C2", Hit), ("C4", Hit), ("C3", Sunk)],
    );
    assert_eq!(status_of(&a, "Battleship"), "NON_VERIFIED_SUNK[VERTICAL,(C2,C3,C4,C5)]");
    assert_eq!(a.hits(), &[c("C1")]);

    play(&mut a, &[("A5", Hit), ("B5", Sunk)]);
    assert_eq!(status_of(&a, "Battleship"), "NOT_FOUND");
    assert_eq!(status_of(&a, "Cruiser"), "NON_VERIFIED_SUNK[HORIZONTAL,(A5,B5,C5)]");
    assert_eq!(status_of(&a, "Destroyer"), "SUNK[VERTICAL,(J9,J10)]");
    assert_eq!(a.hits(), &[c("C1"), c("C2"), c("C3"), c("C4")]);
}

#[test]
fn test_move_ledger_queries() {
    let mut a = analyzer();
    play(&mut a, &[("A1", Miss), ("C3", Hit), ("B3", Sunk), ("J10", Miss)]);
    let moves = a.previous_moves();
    assert_eq!(moves.len(), 4);
    assert_eq!(moves.last(), Some(&PreviousMove::new(c("J10"), Miss)));
    assert_eq!(moves.known_coordinates(), vec![c("A1"), c("C3"), c("B3"), c("J10")]);
    assert_eq!(moves.hit_coordinates(), vec![c("C3"), c("B3")]);
    assert_eq!(moves.sunk_coordinates(), vec![c("B3")]);
    assert_eq!(moves.miss_coordinates(), vec![c("A1"), c("J10")]);
    assert!(moves.is_miss(c("J10")));
    assert!(!moves.is_miss(c("C3")));
}

#[test]
fn test_orphan_hit_corrects_unverified_ship() {
    let mut a = analyzer();
    play(&mut a, &[("B3", Hit), ("C3", Hit), ("D3", Hit), ("A3", Sunk)]);
    assert_eq!(status_of(&a, "Battleship"), "NON_VERIFIED_SUNK[HORIZONTAL,(A3,B3,C3,D3)]");

    play(&mut a, &[("E2", Miss), ("E4", Miss), ("F3", Miss), ("E3", Sunk)]);
    assert_eq!(status_of(&a, "Battleship"), "SUNK[HORIZONTAL,(B3,C3,D3,E3)]");
    assert_eq!(a.hits(), &[c("A3")]);
    assert!(a.suspicious_alignments().is_empty());
}

#[test]
fn test_size_tracking_disabled() {
    let options = AnalyzerOptions {
        track_ship_sizes: false,
    };
    let mut a = MoveAnalyzer::new(STANDARD_GRID, &SHIPS, options);
    play(&mut a, &[("C3", Hit), ("B3", Sunk), ("F6", Hit), ("F7", Hit), ("F8", Sunk)]);
    assert!(a
        .fleet()
        .ships()
        .iter()
        .all(|s| *s.status() == ShipStatus::NotFound));
    assert!(a.hits().is_empty());
    assert!(a.alignments().is_empty());
}

#[test]
fn test_snapshot_lists_state() {
    let mut a = analyzer();
    play(&mut a, &[("C3", Hit), ("C4", Hit)]);
    let snapshot = a.snapshot();
    assert!(snapshot.contains("C3:HIT"));
    assert!(snapshot.contains("alignment VERTICAL,(C3,C4)"));
    assert!(snapshot.contains("Carrier (5): NOT_FOUND"));
}
