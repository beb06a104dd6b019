use schedgen::catalog::Catalog;
use schedgen::tabular::Table;
use schedgen::{read_pinned, read_settings, read_taken, CourseCode, RowDefect, ScheduleError, UserSettings};

const USER_HEADER: &str = "taken,semesters_left,min_credits,max_credits,next_fall,pin_course,pin_semester,pin_take\n";

fn catalog() -> Catalog {
    let table = Table::from_csv_str(
        "course-list.csv",
        "code,fall,spring,credits,workload\nCS-5,1,0,3,10\nCS-70,1,1,3,12,CS-5\nMATH-19,1,1,4,8\n",
    )
    .unwrap();
    Catalog::load(&table).unwrap()
}

fn user(body: &str) -> Table {
    Table::from_csv_str("user.csv", &format!("{}{}", USER_HEADER, body)).unwrap()
}

#[test]
fn taken_skips_empty_cells() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1\n,,,,,CS-70,2,1\nMATH-19\n");
    let taken = read_taken(&t, &cat).unwrap();

    assert_eq!(taken.len(), 2);
    assert!(taken.contains("CS-5"));
    assert!(taken.contains("MATH-19"));
    assert_eq!(taken.catalog_id(), cat.id());
}

#[test]
fn taken_unknown_code_fails() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1\nPHYS-24\n");
    let err = read_taken(&t, &cat).unwrap_err();
    assert!(matches!(err, ScheduleError::UnknownCourse { ref code, .. } if code.as_str() == "PHYS-24"));
}

#[test]
fn settings_come_from_first_data_row() {
    let t = user("CS-5,4,12,18,1,CS-70,2,1\nMATH-19,9,9,9,0\n");
    let s = read_settings(&t).unwrap();
    assert_eq!(s, UserSettings { semesters_left: 4, min_credits: 12, max_credits: 18, next_semester_is_fall: true });
}

#[test]
fn settings_with_few_fields_is_malformed() {
    let t = user("CS-5,4,12\n");
    let err = read_settings(&t).unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedRow { defect: RowDefect::TooFewFields { .. }, .. }));
}

#[test]
fn settings_with_text_number_is_malformed() {
    let t = user(",four,12,18,1\n");
    let err = read_settings(&t).unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::MalformedRow { defect: RowDefect::InvalidNumber { field: "semesters_left", .. }, .. }
    ));
}

#[test]
fn settings_without_data_row_is_malformed() {
    let t = user("");
    let err = read_settings(&t).unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedRow { defect: RowDefect::MissingRow, .. }));
}

#[test]
fn pinned_has_one_key_per_semester_including_zero() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1\n");
    let pinned = read_pinned(&t, &cat, 4).unwrap();

    let keys: Vec<u32> = pinned.semesters().collect();
    assert_eq!(keys, vec![0, 1, 2, 3, 4]);
    for s in 0..=4 {
        assert!(pinned.pins(s).unwrap().is_empty());
    }
    assert!(pinned.pins(5).is_none());
}

#[test]
fn pinned_reads_take_and_skip() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1,CS-70,2,1\n,,,,,MATH-19,2,0\n,,,,,MATH-19,3,1\n");
    let pinned = read_pinned(&t, &cat, 4).unwrap();

    let s2 = pinned.pins(2).unwrap();
    assert_eq!(s2.len(), 2);
    assert_eq!(s2.get("CS-70"), Some(&true));
    assert_eq!(s2.get("MATH-19"), Some(&false));
    assert_eq!(pinned.pins(3).unwrap().get("MATH-19"), Some(&true));
    assert_eq!(pinned.pin_count(), 3);
}

#[test]
fn pin_at_semester_zero_is_invalid() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1,CS-70,0,1\n");
    let err = read_pinned(&t, &cat, 4).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidSemester { semester: 0, semesters_left: 4, .. }));
}

#[test]
fn pin_beyond_horizon_is_invalid() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1,CS-70,5,1\n");
    let err = read_pinned(&t, &cat, 4).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidSemester { semester: 5, .. }));
}

#[test]
fn pin_unknown_course_fails() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1,CS-999,2,1\n");
    let err = read_pinned(&t, &cat, 4).unwrap_err();
    assert!(matches!(err, ScheduleError::UnknownCourse { .. }));
}

#[test]
fn conflicting_pins_in_same_semester_are_rejected() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1,CS-70,2,1\n,,,,,CS-70,2,0\n");
    let err = read_pinned(&t, &cat, 4).unwrap_err();
    match err {
        ScheduleError::DuplicatePin { code, semester, line } => {
            assert_eq!(code, CourseCode::from("CS-70"));
            assert_eq!(semester, 2);
            assert_eq!(line, 3);
        }
        other => panic!("se esperaba DuplicatePin, llegó {:?}", other),
    }
}

#[test]
fn repeated_identical_pin_is_rejected_too() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1,CS-70,2,1\n,,,,,CS-70,2,1\n");
    assert!(matches!(read_pinned(&t, &cat, 4), Err(ScheduleError::DuplicatePin { .. })));
}

#[test]
fn pin_with_bad_flag_is_malformed() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1,CS-70,2,maybe\n");
    let err = read_pinned(&t, &cat, 4).unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedRow { defect: RowDefect::InvalidFlag { field: "pin_take", .. }, .. }));
}

#[test]
fn pin_negative_semester_is_invalid() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1,CS-5,-1,1\n");
    let err = read_pinned(&t, &cat, 4).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidSemester { semester: -1, semesters_left: 4, line: 2 }));
}

#[test]
fn pin_with_text_semester_is_malformed() {
    let cat = catalog();
    let t = user("CS-5,4,12,18,1,CS-70,dos,1\n");
    let err = read_pinned(&t, &cat, 4).unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::MalformedRow { defect: RowDefect::InvalidNumber { field: "pin_semester", .. }, .. }
    ));
}

#[test]
fn settings_with_absurd_horizon_is_rejected() {
    let t = user("CS-5,4294967295,12,18,1\n");
    let err = read_settings(&t).unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::MalformedRow { defect: RowDefect::InvalidValue { field: "semesters_left", .. }, .. }
    ));
}
