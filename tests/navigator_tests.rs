use hitseeker::{
    CoordinateNavigator, Direction, EngineError, GridCoordinate, RectangularGrid, ShipSize,
    STANDARD_GRID,
};

fn c(column: char, row: u8) -> GridCoordinate {
    GridCoordinate::new(column, row)
}

fn navigator() -> CoordinateNavigator<RectangularGrid> {
    CoordinateNavigator::new(STANDARD_GRID)
}

#[test]
fn test_surroundings_in_the_middle() {
    let nav = navigator();
    assert_eq!(
        nav.surrounding_coordinates(c('C', 3)),
        vec![c('C', 2), c('D', 3), c('C', 4), c('B', 3)]
    );
}

#[test]
fn test_surroundings_in_corners() {
    let nav = navigator();
    assert_eq!(nav.surrounding_coordinates(c('A', 1)), vec![c('B', 1), c('A', 2)]);
    assert_eq!(nav.surrounding_coordinates(c('J', 10)), vec![c('J', 9), c('I', 10)]);
}

#[test]
fn test_all_coordinates_canonical_order() {
    let nav = navigator();
    let all = nav.all_coordinates();
    assert_eq!(all.len(), 100);
    assert_eq!(all[0], c('A', 1));
    assert_eq!(all[1], c('A', 2));
    assert_eq!(all[10], c('B', 1));
    assert_eq!(all[99], c('J', 10));
}

#[test]
fn test_distance() {
    let nav = navigator();
    assert_eq!(nav.calculate_distance(c('C', 3), c('C', 7)).unwrap(), Some(4));
    assert_eq!(nav.calculate_distance(c('F', 2), c('B', 2)).unwrap(), Some(4));
    assert_eq!(nav.calculate_distance(c('A', 1), c('J', 1)).unwrap(), Some(9));
}

#[test]
fn test_distance_requires_alignment() {
    let nav = navigator();
    let err = nav.calculate_distance(c('A', 1), c('B', 2)).unwrap_err();
    assert!(matches!(err, EngineError::NonAlignedCoordinates { .. }));
    let err = nav.calculate_distance(c('A', 1), c('A', 1)).unwrap_err();
    assert!(matches!(err, EngineError::NonAlignedCoordinates { .. }));
}

#[test]
fn test_direction_between() {
    let nav = navigator();
    assert_eq!(nav.direction_between(c('A', 1), c('D', 1)), Some(Direction::Horizontal));
    assert_eq!(nav.direction_between(c('A', 1), c('A', 4)), Some(Direction::Vertical));
    assert_eq!(nav.direction_between(c('A', 1), c('B', 2)), None);
}

#[test]
fn test_find_alignments_groups_by_axis() {
    let nav = navigator();
    let hits = [c('C', 3), c('C', 4), c('D', 3)];
    let alignments = nav.find_alignments(&hits, 4).unwrap();
    let rendered: Vec<String> = alignments.iter().map(|a| a.to_string()).collect();
    assert_eq!(rendered, vec!["HORIZONTAL,(C3,D3)", "VERTICAL,(C3,C4)"]);
}

#[test]
fn test_find_alignments_respects_max_distance() {
    let nav = navigator();
    let hits = [c('C', 1), c('C', 6)];
    assert!(nav.find_alignments(&hits, 4).unwrap().is_empty());
    let alignments = nav.find_alignments(&hits, 5).unwrap();
    assert_eq!(alignments.len(), 1);
    assert_eq!(
        alignments[0].gaps(),
        &[c('C', 2), c('C', 3), c('C', 4), c('C', 5)]
    );
}

#[test]
fn test_find_alignments_drops_subsets() {
    let nav = navigator();
    let hits = [c('B', 5), c('C', 5), c('D', 5)];
    let alignments = nav.find_alignments(&hits, 4).unwrap();
    assert_eq!(alignments.len(), 1);
    assert_eq!(alignments[0].to_string(), "HORIZONTAL,(B5,C5,D5)");
}

#[test]
fn test_single_hit_has_no_alignment() {
    let nav = navigator();
    assert!(nav.find_alignments(&[c('E', 5)], 4).unwrap().is_empty());
}

#[test]
fn test_screening_pattern_covers_every_run() {
    let nav = navigator();
    for size in ShipSize::ALL {
        let pattern = nav.traverse_grid(size);
        let len = size.len() as u8;
        for column in 0..10u8 {
            for start in 1..=(11 - len) {
                let column = (b'A' + column) as char;
                let vertical = (start..start + len).any(|row| pattern.contains(&c(column, row)));
                assert!(vertical, "vertical run at {}{} of size {} escapes", column, start, size);
            }
        }
        for row in 1..=10u8 {
            for start in 0..=(10 - len) {
                let horizontal = (start..start + len)
                    .any(|col| pattern.contains(&c((b'A' + col) as char, row)));
                assert!(horizontal, "horizontal run at row {} of size {} escapes", row, size);
            }
        }
    }
}

#[test]
fn test_screening_pattern_size() {
    let nav = navigator();
    assert_eq!(nav.traverse_grid(ShipSize::Two).len(), 50);
    assert_eq!(nav.traverse_grid(ShipSize::Five).len(), 20);
}

#[test]
fn test_sort_coordinates_dedups() {
    let nav = navigator();
    let mut coords = vec![c('B', 2), c('A', 3), c('B', 2), c('A', 1)];
    nav.sort_coordinates(&mut coords);
    assert_eq!(coords, vec![c('A', 1), c('A', 3), c('B', 2)]);
}

#[test]
fn test_rectangular_grid_bounds() {
    assert!(RectangularGrid::new(0, 5).is_none());
    assert!(RectangularGrid::new(27, 5).is_none());
    let grid = RectangularGrid::new(4, 3).unwrap();
    let nav = CoordinateNavigator::new(grid);
    assert_eq!(nav.all_coordinates().len(), 12);
    assert_eq!(nav.step(c('D', 1), Direction::Horizontal, true), None);
    assert_eq!(nav.step(c('A', 3), Direction::Vertical, true), None);
    assert_eq!(nav.step(c('A', 2), Direction::Vertical, true), Some(c('A', 3)));
}
