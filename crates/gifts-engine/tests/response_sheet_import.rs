use std::io::Write;

use gifts_engine::gifts::{
    confidence_label, score, ConfidenceLabel, Gift, ResponseSheetError, ResponseSheetImporter,
};

#[test]
fn sample_sheet_scores_discernment_first() {
    let data = include_bytes!("../sample_responses.csv");

    let responses = ResponseSheetImporter::from_reader(&data[..]).expect("sample sheet imports");
    let result = score(&responses).expect("sample answers are valid");

    assert_eq!(responses.len(), 50);
    assert_eq!(result.primary, Gift::Discernment);
    assert_eq!(result.secondary, Gift::Wisdom);
    assert!((result.margin - 1.0).abs() < 1e-9);
    assert!(!result.needs_tiebreak);
    assert_eq!(confidence_label(result.margin), ConfidenceLabel::High);
}

#[test]
fn importer_reads_sheets_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "gifts-engine-sheet-{}.csv",
        std::process::id()
    ));
    {
        let mut file = std::fs::File::create(&path).expect("create temp sheet");
        writeln!(file, "Question,Response").expect("write header");
        for question in 1..=50 {
            writeln!(file, "{question},{}", if question <= 5 { 5 } else { 1 })
                .expect("write row");
        }
    }

    let responses = ResponseSheetImporter::from_path(&path).expect("sheet imports");
    std::fs::remove_file(&path).ok();

    let result = score(&responses).expect("valid answers");
    assert_eq!(result.primary, Gift::Teaching);
}

#[test]
fn missing_files_surface_io_errors() {
    let missing = std::env::temp_dir().join("gifts-engine-no-such-sheet.csv");

    match ResponseSheetImporter::from_path(missing) {
        Err(ResponseSheetError::Io(_)) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn non_numeric_answers_are_csv_errors() {
    let csv = "Question,Response\n1,agree\n";

    match ResponseSheetImporter::from_reader(csv.as_bytes()) {
        Err(ResponseSheetError::Csv(_)) => {}
        other => panic!("expected csv error, got {other:?}"),
    }
}

#[test]
fn out_of_range_answers_are_left_for_the_engine() {
    let mut csv = String::from("Question,Response\n");
    for question in 1..=50 {
        let answer = if question == 9 { 7 } else { 3 };
        csv.push_str(&format!("{question},{answer}\n"));
    }

    let responses = ResponseSheetImporter::from_reader(csv.as_bytes()).expect("sheet imports");

    assert_eq!(responses[8], 7);
    assert!(score(&responses).is_err());
}
