use gridcalc_common::{CellValue, FormulaExpr, Operator};
use gridcalc_eval::Grid;
use gridcalc_workbook::backends::csv::{self, SaveDestination};
use proptest::prelude::*;

#[test]
fn csv_roundtrip_simple() {
    let input = "1,2,\"hello\"\n3,4.5,=R0C0+R1C1\n";
    let load = csv::read_str(input).unwrap();
    assert_eq!(load.grid.bounds(), (2, 3));
    assert_eq!(load.grid.cell_at(0, 0), Some(&CellValue::Integer(1)));
    assert_eq!(load.grid.cell_at(1, 1), Some(&CellValue::Double(4.5)));
    assert_eq!(
        load.grid.cell_at(1, 2),
        Some(&CellValue::Formula(FormulaExpr::CoordCoord {
            row1: 0,
            col1: 0,
            row2: 1,
            col2: 1,
            op: Operator::Add,
        }))
    );

    let out = csv::write_grid_to(&load.grid, SaveDestination::Bytes)
        .unwrap()
        .unwrap();
    let again = csv::read_bytes(&out).unwrap();
    assert_eq!(again.grid, load.grid);
}

#[test]
fn save_then_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.txt");
    let grid = Grid::from_rows(vec![
        vec![
            CellValue::Text("with, comma".into()),
            CellValue::Text("quote \" and \\".into()),
            CellValue::empty(),
        ],
        vec![
            CellValue::Double(0.1),
            CellValue::Integer(-12),
            FormulaExpr::LitCoord {
                lit: 2.5,
                row: 1,
                col: 0,
                op: Operator::Ge,
                lit_is_left: false,
            }
            .into(),
        ],
    ]);
    csv::write_grid_to(&grid, SaveDestination::Path(&path)).unwrap();
    let load = csv::read_path(&path).unwrap();
    assert_eq!(load.grid, grid);
    assert!(load.rejected.is_empty());
}

#[test]
fn writer_destination() {
    let grid = Grid::from_rows(vec![vec![CellValue::Integer(1), CellValue::Double(2.0)]]);
    let mut buf: Vec<u8> = Vec::new();
    csv::write_grid_to(&grid, SaveDestination::Writer(&mut buf)).unwrap();
    assert_eq!(buf, b"1,2.0\n");
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = csv::read_path(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(
        err,
        gridcalc_workbook::WorkbookError::Open { .. }
    ));
}

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        any::<i64>().prop_map(CellValue::Integer),
        (-1.0e9f64..1.0e9).prop_map(CellValue::Double),
        "[ -~]{0,10}".prop_map(CellValue::Text),
        (0u32..20, 0u32..20, 0u32..20, 0u32..20).prop_map(|(a, b, c, d)| {
            FormulaExpr::CoordCoord {
                row1: a,
                col1: b,
                row2: c,
                col2: d,
                op: Operator::Sub,
            }
            .into()
        }),
    ]
}

proptest! {
    #[test]
    fn saved_grids_load_back(rows in prop::collection::vec(prop::collection::vec(cell(), 1..5), 1..5)) {
        let grid = Grid::from_rows(rows);
        let text = csv::to_text(&grid).unwrap();
        let load = csv::read_str(&text).unwrap();
        prop_assert!(load.rejected.is_empty());
        prop_assert_eq!(load.grid, grid);
    }
}
