#[cfg(test)]
mod tests {
    use crate::tools::export::*;
    use crate::types::{CardRecord, Flag, Mode};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record() -> CardRecord {
        CardRecord {
            title: "Connor Bedard".into(),
            set: "2024-25 SP Game Used Hockey Gold Parallel".into(),
            subset_or_insert: "Legends".into(),
            card_number: "12".into(),
            year: "2024-25".into(),
            rarity: "Gold".into(),
            quantity_owned: 3,
            subject_points: 0,
            combine_needed: 0,
            physical: Flag::No,
            locked: Flag::No,
            wishlist: Flag::No,
            serial: "?/149".into(),
            raw_text: "line one\nline two".into(),
        }
    }

    #[test]
    fn test_csv_header_and_row() {
        let csv = to_csv(&[record()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Title,Set,Subset/Insert,Card #,Year,Rarity/Parallel,Qty,SubjPoints,CombineNeeded,Physical,Locked,Wishlist,Serial,RawText")
        );
        assert_eq!(
            lines.next(),
            Some("Connor Bedard,2024-25 SP Game Used Hockey Gold Parallel,Legends,12,2024-25,Gold,3,0,0,No,No,No,?/149,line one line two")
        );
        assert_eq!(lines.next(), None);
        assert!(csv.ends_with('\n'));
        assert!(!csv.contains('\r'));
    }

    #[test]
    fn test_csv_quotes_commas_and_quotes() {
        let mut r = record();
        r.title = r#"He said "Gold", rare"#.into();
        let csv = to_csv(&[r]).unwrap();
        assert!(csv.contains(r#""He said ""Gold"", rare""#));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], r#"He said "Gold", rare"#);
        assert_eq!(row.len(), 14);
    }

    #[test]
    fn test_csv_unset_flags_are_empty() {
        let mut r = record();
        r.physical = Flag::Unset;
        r.locked = Flag::Unset;
        r.wishlist = Flag::Unset;
        let csv = to_csv(&[r]).unwrap();
        assert!(csv.lines().nth(1).unwrap().contains(",0,0,,,,?/149,"));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = to_json(&[record()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["cardNumber"], "12");
        assert_eq!(value[0]["quantityOwned"], 3);
        assert_eq!(value[0]["physical"], "No");
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 5).unwrap();
        assert_eq!(default_file_name(Mode::Checklist, Format::Json, date), "epack_checklist_2024-11-05.json");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!(" json ".parse::<Format>().unwrap(), Format::Json);
        assert!("xml".parse::<Format>().is_err());
    }

    #[test]
    fn test_write_records_all_or_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("cards.csv");

        let err = write_records(&path, &[], Format::Csv, Mode::Collection).unwrap_err();
        assert!(matches!(err, crate::ExportError::NoCards { .. }));
        assert!(!path.exists());

        write_records(&path, &[record()], Format::Csv, Mode::Collection).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert_eq!(body.lines().count(), 2);
    }
}
