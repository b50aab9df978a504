//! Write/read round-trip tests for the XLSX backend

use std::io::Write;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use textready_core::{CellData, CellValue, DisplayFormat, Workbook};
use textready_xlsx::{XlsxReader, XlsxWriter};

fn temp_xlsx() -> tempfile::NamedTempFile {
    tempfile::Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .expect("create temp file")
}

#[test]
fn round_trip_values() {
    let mut workbook = Workbook::new();
    let sheet = workbook.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "hello world").unwrap();
    sheet.set_cell_value("B1", 42.5).unwrap();
    sheet.set_cell_value("C1", true).unwrap();
    sheet.set_cell_value("A3", "second row gap").unwrap();

    let file = temp_xlsx();
    XlsxWriter::write_file(&workbook, file.path()).unwrap();
    let loaded = XlsxReader::read_file(file.path()).unwrap();

    assert_eq!(loaded.sheet_count(), 1);
    let sheet = loaded.worksheet(0).unwrap();
    assert_eq!(sheet.get_value("A1").unwrap(), CellValue::text("hello world"));
    assert_eq!(sheet.get_value("B1").unwrap(), CellValue::Number(42.5));
    assert_eq!(sheet.get_value("C1").unwrap(), CellValue::Boolean(true));
    assert_eq!(sheet.get_value("A3").unwrap(), CellValue::text("second row gap"));
    assert_eq!(sheet.used_range().unwrap().to_string(), "A1:C3");
}

#[test]
fn round_trip_text_format() {
    let mut workbook = Workbook::new();
    let sheet = workbook.worksheet_mut(0).unwrap();
    sheet
        .set_cell_at(
            0,
            1,
            CellData::with_format(CellValue::text("0123"), DisplayFormat::Text),
        )
        .unwrap();
    // Format-only cell with no value
    sheet
        .set_display_format_at(1, 1, DisplayFormat::Text)
        .unwrap();

    let file = temp_xlsx();
    XlsxWriter::write_file(&workbook, file.path()).unwrap();
    let loaded = XlsxReader::read_file(file.path()).unwrap();

    let sheet = loaded.worksheet(0).unwrap();
    assert_eq!(sheet.get_value_at(0, 1), CellValue::text("0123"));
    assert_eq!(sheet.display_format_at(0, 1), DisplayFormat::Text);
    // The blank formatted cell survives the trip
    assert_eq!(sheet.get_value_at(1, 1), CellValue::Empty);
    assert_eq!(sheet.display_format_at(1, 1), DisplayFormat::Text);
}

#[test]
fn round_trip_datetime() {
    let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap();

    let mut workbook = Workbook::new();
    let sheet = workbook.worksheet_mut(0).unwrap();
    sheet.set_cell_value_at(0, 0, CellValue::DateTime(dt)).unwrap();

    let file = temp_xlsx();
    XlsxWriter::write_file(&workbook, file.path()).unwrap();
    let loaded = XlsxReader::read_file(file.path()).unwrap();

    assert_eq!(
        loaded.worksheet(0).unwrap().get_value_at(0, 0),
        CellValue::DateTime(dt)
    );
}

#[test]
fn round_trip_multiple_sheets() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet_with_name("Extra").unwrap();
    workbook
        .worksheet_mut(1)
        .unwrap()
        .set_cell_value("A1", "on extra")
        .unwrap();

    let file = temp_xlsx();
    XlsxWriter::write_file(&workbook, file.path()).unwrap();
    let loaded = XlsxReader::read_file(file.path()).unwrap();

    assert_eq!(loaded.sheet_names(), vec!["Sheet1", "Extra"]);
    assert_eq!(
        loaded.worksheet(1).unwrap().get_value("A1").unwrap(),
        CellValue::text("on extra")
    );
}

#[test]
fn round_trip_xml_special_characters() {
    let mut workbook = Workbook::new();
    let sheet = workbook.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "a < b & c > \"d\"").unwrap();

    let file = temp_xlsx();
    XlsxWriter::write_file(&workbook, file.path()).unwrap();
    let loaded = XlsxReader::read_file(file.path()).unwrap();

    assert_eq!(
        loaded.worksheet(0).unwrap().get_value("A1").unwrap(),
        CellValue::text("a < b & c > \"d\"")
    );
}

#[test]
fn reject_non_xlsx_zip() {
    // A valid ZIP that is not a spreadsheet
    let file = temp_xlsx();
    {
        let inner = std::fs::File::create(file.path()).unwrap();
        let mut zip = zip::ZipWriter::new(inner);
        zip.start_file("readme.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"not a workbook").unwrap();
        zip.finish().unwrap();
    }

    let err = XlsxReader::read_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Content_Types"));
}

/// Hand-built archive exercising the shared-strings and styles paths our own
/// writer never produces (the writer emits inline strings only).
#[test]
fn read_shared_strings_and_date_styles() {
    let file = temp_xlsx();
    {
        let inner = std::fs::File::create(file.path()).unwrap();
        let mut zip = zip::ZipWriter::new(inner);
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#,
        )
        .unwrap();

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
        )
        .unwrap();

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets><sheet name="Data" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
        )
        .unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
        )
        .unwrap();

        zip.start_file("xl/sharedStrings.xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="2" uniqueCount="2">
    <si><t>shared one</t></si>
    <si><t>line_x000a_break</t></si>
</sst>"#,
        )
        .unwrap();

        zip.start_file("xl/styles.xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <cellXfs count="3">
        <xf numFmtId="0"/>
        <xf numFmtId="49"/>
        <xf numFmtId="14"/>
    </cellXfs>
</styleSheet>"#,
        )
        .unwrap();

        zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>
        <row r="1">
            <c r="A1" t="s"><v>0</v></c>
            <c r="B1" t="s" s="1"><v>1</v></c>
            <c r="C1" s="2"><v>45366</v></c>
        </row>
    </sheetData>
</worksheet>"#,
        )
        .unwrap();

        zip.finish().unwrap();
    }

    let loaded = XlsxReader::read_file(file.path()).unwrap();
    let sheet = loaded.worksheet(0).unwrap();

    assert_eq!(loaded.sheet_names(), vec!["Data"]);
    assert_eq!(sheet.get_value("A1").unwrap(), CellValue::text("shared one"));
    assert_eq!(
        sheet.get_value("B1").unwrap(),
        CellValue::text("line\nbreak")
    );
    assert_eq!(sheet.display_format_at(0, 1), DisplayFormat::Text);

    let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(sheet.get_value("C1").unwrap(), CellValue::DateTime(expected));
}
