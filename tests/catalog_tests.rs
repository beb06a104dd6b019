use rust_decimal::Decimal;
use schedgen::catalog::Catalog;
use schedgen::tabular::Table;
use schedgen::{CourseCode, RowDefect, ScheduleError};

const HEADER: &str = "code,fall,spring,credits,workload,prereqs\n";

fn catalog(body: &str) -> Result<Catalog, ScheduleError> {
    let table = Table::from_csv_str("course-list.csv", &format!("{}{}", HEADER, body)).unwrap();
    Catalog::load(&table)
}

#[test]
fn fields_round_trip_exactly() {
    let cat = catalog("CS-5,1,0,3,10\nCS-70,1,1,1.5,12,CS-5\n").unwrap();

    assert_eq!(cat.len(), 2);
    assert!(cat.contains("CS-70"));

    let c = cat.lookup("CS-70").unwrap();
    assert_eq!(c.code(), &CourseCode::from("CS-70"));
    assert!(c.in_fall);
    assert!(c.in_spring);
    assert_eq!(c.credits, Decimal::new(15, 1));
    assert_eq!(c.workload, 12);
    assert_eq!(c.prereqs, vec![CourseCode::from("CS-5")]);

    let c = cat.lookup("CS-5").unwrap();
    assert!(c.in_fall);
    assert!(!c.in_spring);
    assert_eq!(c.credits, Decimal::new(3, 0));
    assert!(c.prereqs.is_empty());
}

#[test]
fn header_row_is_never_parsed() {
    // la cabecera tiene flags no numéricos; si se parseara fallaría
    let cat = catalog("MATH-19,1,1,4,8\n").unwrap();
    assert_eq!(cat.len(), 1);
    assert!(!cat.contains("code"));
}

#[test]
fn lookups_are_case_sensitive() {
    let cat = catalog("CS-5,1,0,3,10\n").unwrap();
    assert!(cat.lookup("cs-5").is_none());
}

#[test]
fn forward_prerequisite_references_resolve() {
    let cat = catalog("CS-121,1,0,3,15,CS-70\nCS-70,1,1,3,12,CS-5\nCS-5,1,0,3,10\n").unwrap();
    assert_eq!(cat.lookup("CS-121").unwrap().prereqs, vec![CourseCode::from("CS-70")]);
}

#[test]
fn ragged_trailing_columns_are_ignored() {
    let cat = catalog("CS-5,1,0,3,10,,,\nCS-70,1,1,3,12,CS-5,,\n").unwrap();
    assert!(cat.lookup("CS-5").unwrap().prereqs.is_empty());
    assert_eq!(cat.lookup("CS-70").unwrap().prereqs.len(), 1);
}

#[test]
fn duplicate_code_fails_even_with_different_fields() {
    let err = catalog("CS-5,1,0,3,10\nCS-5,0,1,4,2\n").unwrap_err();
    match err {
        ScheduleError::DuplicateCourse { code, line } => {
            assert_eq!(code, CourseCode::from("CS-5"));
            assert_eq!(line, 3);
        }
        other => panic!("se esperaba DuplicateCourse, llegó {:?}", other),
    }
}

#[test]
fn short_row_is_malformed() {
    let err = catalog("CS-5,1,0,3\n").unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::MalformedRow { defect: RowDefect::TooFewFields { expected: 5, found: 4 }, line: 2, .. }
    ));
}

#[test]
fn non_binary_flag_is_malformed() {
    let err = catalog("CS-5,true,0,3,10\n").unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedRow { defect: RowDefect::InvalidFlag { field: "fall", .. }, .. }));
}

#[test]
fn non_numeric_credits_are_malformed() {
    let err = catalog("CS-5,1,0,three,10\n").unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedRow { defect: RowDefect::InvalidNumber { field: "credits", .. }, .. }));
}

#[test]
fn unresolved_prerequisite_is_unknown_course() {
    let err = catalog("CS-70,1,1,3,12,CS-5\n").unwrap_err();
    match err {
        ScheduleError::UnknownCourse { code, referenced_from, .. } => {
            assert_eq!(code, CourseCode::from("CS-5"));
            assert!(referenced_from.contains("CS-70"));
        }
        other => panic!("se esperaba UnknownCourse, llegó {:?}", other),
    }
}

#[test]
fn prerequisite_cycle_is_rejected() {
    let err = catalog("A,1,1,3,1,B\nB,1,1,3,1,A\n").unwrap_err();
    assert!(matches!(err, ScheduleError::PrerequisiteCycle { .. }));

    let err = catalog("SELF,1,1,3,1,SELF\n").unwrap_err();
    assert!(matches!(err, ScheduleError::PrerequisiteCycle { .. }));
}

#[test]
fn iteration_visits_every_course_once() {
    let cat = catalog("B,1,1,3,1\nA,1,1,3,1\nC,0,1,2,1\n").unwrap();
    let mut codes: Vec<&str> = cat.iter().map(|c| c.code().as_str()).collect();
    codes.sort();
    assert_eq!(codes, vec!["A", "B", "C"]);
}
