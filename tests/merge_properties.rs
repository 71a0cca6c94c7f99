use table_merger::export::{CsvQuoting, ExportFormat, ExportOptions};
use table_merger::merger::{IngestOutcome, TableMerger};

fn merged(payloads: &[&str]) -> TableMerger {
    let mut m = TableMerger::new();
    for p in payloads {
        m.ingest(p);
    }
    m
}

#[test]
fn overlapping_headers_union_in_first_seen_order() {
    let m = merged(&["A\tB\n1\t2", "B\tC\n3\t4"]);

    assert_eq!(m.headers().as_slice(), ["A", "B", "C"]);
    assert_eq!(m.snapshot().rows, vec![vec!["1", "2", ""], vec!["", "3", "4"]]);
}

#[test]
fn header_count_equals_distinct_names_across_files() {
    let m = merged(&[
        "x\ty\tz\n1\t2\t3",
        "z\tw\n4\t5",
        "y\tv\tx\tw\n6\t7\t8\t9",
    ]);

    assert_eq!(m.headers().as_slice(), ["x", "y", "z", "w", "v"]);
    assert_eq!(
        m.snapshot().rows,
        vec![
            vec!["1", "2", "3", "", ""],
            vec!["", "", "4", "5", ""],
            vec!["8", "6", "", "9", "7"],
        ]
    );
}

#[test]
fn header_only_file_adds_headers_but_no_rows() {
    let mut m = merged(&["A\n1"]);
    let outcome = m.ingest("A\tB\n");

    assert_eq!(outcome.rows_appended(), 0);
    assert_eq!(m.headers().as_slice(), ["A", "B"]);
    assert_eq!(m.row_count(), 1);
}

#[test]
fn all_blank_file_is_a_no_op() {
    let mut m = merged(&["A\tB\n1\t2"]);
    let before = m.export(ExportFormat::Tsv).unwrap();

    assert_eq!(m.ingest("\n\n   \n \t \n"), IngestOutcome::Empty);
    assert_eq!(m.export(ExportFormat::Tsv).unwrap(), before);
}

#[test]
fn reingesting_same_file_duplicates_rows_only() {
    let file = "A\tB\n1\t2\n3\t4";
    let mut m = merged(&[file]);
    m.ingest(file);

    assert_eq!(m.headers().as_slice(), ["A", "B"]);
    assert_eq!(m.row_count(), 4);
    assert_eq!(m.snapshot().rows[2], m.snapshot().rows[0]);
}

#[test]
fn export_is_repeatable_without_intervening_ingest() {
    let m = merged(&["A\tB\n1\t2", "C\n\"q\""]);

    for format in [ExportFormat::Tsv, ExportFormat::Csv] {
        assert_eq!(m.export(format).unwrap(), m.export(format).unwrap());
    }
}

#[test]
fn csv_export_of_single_cell_table() {
    let m = merged(&["A\nx"]);
    assert_eq!(m.export(ExportFormat::Csv).unwrap(), "\"A\"\n\"x\"");
}

#[test]
fn tsv_export_reingests_to_the_same_rows() {
    let m = merged(&["id\tname\n1\tAda\n2\tGrace", "id\tcity\n3\tOslo"]);
    let tsv = m.export(ExportFormat::Tsv).unwrap();

    let reloaded = merged(&[tsv.as_str()]);
    assert_eq!(reloaded.snapshot(), m.snapshot());
}

#[test]
fn rows_ingested_before_new_headers_export_blank_for_them() {
    let m = merged(&["A\n1", "B\n2", "C\n3"]);

    assert_eq!(m.export(ExportFormat::Tsv).unwrap(), "A\tB\tC\n1\t\t\n\t2\t\n\t\t3");
}

#[test]
fn csv_quoting_modes_differ_only_on_embedded_quotes() {
    let m = merged(&["quote\tplain\nsay \"hi\"\tok"]);
    let escaped = m.export(ExportFormat::Csv).unwrap();
    let legacy = m
        .export_with(&ExportOptions::new(ExportFormat::Csv).with_csv_quoting(CsvQuoting::Legacy))
        .unwrap();

    assert_eq!(escaped, "\"quote\",\"plain\"\n\"say \"\"hi\"\"\",\"ok\"");
    assert_eq!(legacy, "\"quote\",\"plain\"\n\"say \"hi\"\",\"ok\"");
}

#[test]
fn escaped_csv_reads_back_with_csv_reader() {
    let m = merged(&["name\tnote\nAda\ta,b \"c\""]);
    let out = m.export(ExportFormat::Csv).unwrap();

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(out.as_bytes());
    let records: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][1], "a,b \"c\"");
}

#[test]
fn empty_merger_exports_empty_string() {
    let m = TableMerger::new();
    assert_eq!(m.export(ExportFormat::Tsv).unwrap(), "");
    assert_eq!(m.export(ExportFormat::Csv).unwrap(), "");
}
