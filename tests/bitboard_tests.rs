use broadside::{BitBoard, BitBoardError, Coordinate, GridMask};

#[test]
fn test_try_new_sizes() {
    let ok = BitBoard::<u64, 8>::try_new();
    assert!(ok.is_ok());

    let err = BitBoard::<u8, 3>::try_new();
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { .. })));

    assert!(GridMask::try_new().is_ok());
}

#[test]
fn test_get_set() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.set(1, 1).unwrap();
    assert!(bb.get(1, 1).unwrap());
    assert!(!bb.get(1, 2).unwrap());

    bb.set(2, 3).unwrap();
    assert_eq!(bb.count_ones(), 2);
    assert_eq!(bb.cells().collect::<Vec<_>>(), vec![(1, 1), (2, 3)]);
}

#[test]
fn test_out_of_bounds() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert_eq!(
        bb.set(4, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 4, col: 0 })
    );
    assert!(bb.get(0, 4).is_err());
}

#[test]
fn test_coordinates_and_set_ops() {
    let b4 = Coordinate::parse("B4").unwrap();
    let j10 = Coordinate::parse("J10").unwrap();

    let mut a = GridMask::new();
    a.insert(b4).unwrap();
    let mut b = GridMask::new();
    b.insert(j10).unwrap();

    assert!(a.contains(b4));
    assert!(!a.contains(j10));
    assert_eq!((a | b).count_ones(), 2);
    assert!((a & b).is_empty());
    assert_eq!((a | b).cells().last(), Some((9, 9)));
}
