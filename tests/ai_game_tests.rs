use hitseeker::{
    play_match, AiPlayer, BoardError, Direction, GridCoordinate, GuessResult, Player,
    StrategyConfig, TargetBoard, GuessGrid, SHIPS, STANDARD_GRID, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(column: char, row: u8) -> GridCoordinate {
    GridCoordinate::new(column, row)
}

fn fixed_board() -> TargetBoard<hitseeker::RectangularGrid> {
    let mut board = TargetBoard::new(STANDARD_GRID);
    board.place(SHIPS[0], c('A', 1), Direction::Horizontal).unwrap();
    board.place(SHIPS[1], c('H', 3), Direction::Vertical).unwrap();
    board.place(SHIPS[2], c('B', 5), Direction::Vertical).unwrap();
    board.place(SHIPS[3], c('D', 9), Direction::Horizontal).unwrap();
    board.place(SHIPS[4], c('E', 4), Direction::Horizontal).unwrap();
    board
}

#[test]
fn test_target_board_answers() {
    let mut board = fixed_board();
    assert_eq!(board.guess(c('J', 10)).unwrap(), GuessResult::Miss);
    assert_eq!(board.guess(c('E', 4)).unwrap(), GuessResult::Hit);
    assert_eq!(board.guess(c('F', 4)).unwrap(), GuessResult::Sunk);
    assert_eq!(board.guess(c('F', 4)).unwrap_err(), BoardError::AlreadyGuessed);
    assert_eq!(board.guess(c('K', 1)).unwrap_err(), BoardError::OutOfBounds);
    assert!(!board.all_sunk());
}

#[test]
fn test_target_board_rejects_bad_placements() {
    let mut board = fixed_board();
    assert_eq!(
        board.place(SHIPS[4], c('J', 1), Direction::Horizontal).unwrap_err(),
        BoardError::ShipOutOfBounds
    );
    assert_eq!(
        board.place(SHIPS[4], c('A', 1), Direction::Vertical).unwrap_err(),
        BoardError::ShipOverlaps
    );
}

#[test]
fn test_spaced_layout_has_no_touching_ships() {
    let mut rng = SmallRng::seed_from_u64(99);
    let board = TargetBoard::random(STANDARD_GRID, &SHIPS, &mut rng, true).unwrap();
    let ships: Vec<_> = board.ships().collect();
    assert_eq!(ships.len(), SHIPS.len());
    let cells: usize = ships.iter().map(|(_, cells)| cells.len()).sum();
    assert_eq!(cells, TOTAL_SHIP_CELLS);
    for (i, (_, a)) in ships.iter().enumerate() {
        for (_, b) in ships.iter().skip(i + 1) {
            for x in a.iter() {
                for y in b.iter() {
                    let dc = (x.column() as i32 - y.column() as i32).abs();
                    let dr = (x.row() as i32 - y.row() as i32).abs();
                    assert!(dc + dr > 1, "{} touches {}", x, y);
                }
            }
        }
    }
}

#[test]
fn test_ai_sinks_fixed_layout() {
    let mut rng = SmallRng::seed_from_u64(123);
    let mut board = fixed_board();
    let mut player = AiPlayer::new(STANDARD_GRID, &SHIPS, StrategyConfig::default());
    let report = play_match(&mut player, &mut board, &mut rng, 100).unwrap();
    assert!(report.won);
    assert!(board.all_sunk());
    assert_eq!(report.hits, TOTAL_SHIP_CELLS);
    assert_eq!(report.turns, report.hits + report.misses);
    assert!(player.strategy().analyzer().fleet().all_found());
}

#[test]
fn test_ai_vs_spaced_layouts() {
    for seed in 0..12u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = TargetBoard::random(STANDARD_GRID, &SHIPS, &mut rng, true).unwrap();
        let mut player = AiPlayer::new(STANDARD_GRID, &SHIPS, StrategyConfig::default());
        let report = play_match(&mut player, &mut board, &mut rng, 100).unwrap();
        assert!(report.won, "seed {} did not finish", seed);
        assert!(report.turns <= 100);
        assert_eq!(report.hits, TOTAL_SHIP_CELLS);
    }
}

#[test]
fn test_ai_vs_touching_layouts() {
    let seeds = (0..12u64).chain([75, 104, 139, 207, 344, 386, 481]);
    for seed in seeds {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = TargetBoard::random(STANDARD_GRID, &SHIPS, &mut rng, false).unwrap();
        let mut player = AiPlayer::new(STANDARD_GRID, &SHIPS, StrategyConfig::default());
        let report = play_match(&mut player, &mut board, &mut rng, 100).unwrap();
        assert!(report.won, "seed {} did not finish", seed);
        assert_eq!(report.hits, TOTAL_SHIP_CELLS);
    }
}

#[test]
fn test_ai_with_screening() {
    let config = StrategyConfig {
        screening: true,
        ..StrategyConfig::default()
    };
    for seed in 100..106u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = TargetBoard::random(STANDARD_GRID, &SHIPS, &mut rng, true).unwrap();
        let mut player = AiPlayer::new(STANDARD_GRID, &SHIPS, config);
        let report = play_match(&mut player, &mut board, &mut rng, 100).unwrap();
        assert!(report.won, "seed {} did not finish", seed);
    }
}

#[test]
fn test_ai_never_repeats_a_shot() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut board = TargetBoard::random(STANDARD_GRID, &SHIPS, &mut rng, true).unwrap();
    let mut player = AiPlayer::new(STANDARD_GRID, &SHIPS, StrategyConfig::default());
    let mut grid = GuessGrid::new(STANDARD_GRID);
    for _ in 0..100 {
        let target = player.select_target(&mut rng, &grid).unwrap();
        let result = board.guess(target).unwrap();
        assert!(grid.record(target, result));
        player.handle_guess_result(target, result);
        if result == GuessResult::Won {
            break;
        }
    }
    player.finish().unwrap();
    assert!(board.all_sunk());
}

#[test]
fn test_report_serializes() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut board = fixed_board();
    let mut player = AiPlayer::new(STANDARD_GRID, &SHIPS, StrategyConfig::default());
    let report = play_match(&mut player, &mut board, &mut rng, 100).unwrap();
    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["won"], true);
    assert_eq!(json["hits"], TOTAL_SHIP_CELLS);
}
