#[cfg(test)]
mod tests {
    use calamine::{Data, Reader, Xlsx, open_workbook};
    use std::path::Path;

    use journal_config::OutputConfig;
    use journal_core::{Category, JournalEntry, Skill};
    use journal_writer::{COLUMNS, EntryWriter, XlsxWriter, entry_row};

    fn entry(topic: &str) -> JournalEntry {
        JournalEntry {
            date: "2024-01-15".into(),
            raw_text: "Spent the afternoon writing Cypress tests".into(),
            category: Category::Productivity,
            area_of_work: "Testing Automation".into(),
            ai_tool_used: "GitHub Copilot".into(),
            task_topic: topic.into(),
            what_i_did: "Wrote Cypress tests.".into(),
            outcome_impact: "Checkout regressions caught in CI.".into(),
            skill_upskilled: Skill::TestingAutomation,
        }
    }

    fn read_rows(path: &Path, sheet: &str) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let range = workbook.worksheet_range(sheet).unwrap();
        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_creates_workbook_with_header_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("journal.xlsx");
        let writer = XlsxWriter::new(&path, "Journal");

        let written = writer.append(&entry("Cypress checkout tests")).unwrap();
        assert_eq!(written, path);
        assert!(path.exists());

        let rows = read_rows(&path, "Journal");
        assert_eq!(rows.len(), 2);
        let headers: Vec<&str> = COLUMNS.iter().map(|(h, _)| *h).collect();
        assert_eq!(rows[0], headers);
        assert_eq!(
            rows[1],
            vec![
                "2024-01-15",
                "Productivity",
                "Testing Automation",
                "GitHub Copilot",
                "Cypress checkout tests",
                "Wrote Cypress tests.",
                "Checkout regressions caught in CI.",
                "Testing Automation",
            ]
        );
    }

    #[test]
    fn test_appends_below_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.xlsx");
        let writer = XlsxWriter::new(&path, "Journal");

        writer.append(&entry("first")).unwrap();
        writer.append(&entry("second")).unwrap();
        writer.append(&entry("third")).unwrap();

        let rows = read_rows(&path, "Journal");
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0], "Date");
        assert_eq!(rows[1][4], "first");
        assert_eq!(rows[2][4], "second");
        assert_eq!(rows[3][4], "third");
    }

    #[test]
    fn test_raw_text_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.xlsx");
        XlsxWriter::new(&path, "Journal")
            .append(&entry("topic"))
            .unwrap();

        let rows = read_rows(&path, "Journal");
        assert_eq!(rows[1].len(), 8);
        assert!(!rows[1].iter().any(|c| c.contains("Spent the afternoon")));
    }

    #[test]
    fn test_other_sheets_survive_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let notes = workbook.add_worksheet();
        notes.set_name("Notes").unwrap();
        notes.write_string(0, 0, "keep me").unwrap();
        notes.write_number(1, 0, 42).unwrap();
        workbook.save(&path).unwrap();

        XlsxWriter::new(&path, "Journal")
            .append(&entry("topic"))
            .unwrap();

        let notes = read_rows(&path, "Notes");
        assert_eq!(notes[0][0], "keep me");
        assert_eq!(notes[1][0], "42");
        let journal = read_rows(&path, "Journal");
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn test_from_config_uses_output_section() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig {
            dir: dir.path().join("out"),
            file_name: "work.xlsx".into(),
            sheet_name: "Log".into(),
        };
        let writer = XlsxWriter::from_config(&output);
        assert_eq!(writer.path(), dir.path().join("out").join("work.xlsx"));

        writer.append(&entry("topic")).unwrap();
        assert_eq!(read_rows(writer.path(), "Log").len(), 2);
    }

    #[test]
    fn test_entry_row_follows_column_order() {
        let row = entry_row(&entry("topic"));
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[1], "Productivity");
        assert_eq!(row[7], "Testing Automation");
    }
}
