//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{read_styles_xml, CellXf};
use textready_core::cell::serial_to_datetime;
use textready_core::{CellAddress, CellData, CellValue, Workbook, Worksheet};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        // A full escape is `_xHHHH_`: 7 bytes with 4 hex digits
        let decoded = if tail.len() >= 7
            && tail.as_bytes()[6] == b'_'
            && tail.as_bytes()[2..6].iter().all(u8::is_ascii_hexdigit)
        {
            u32::from_str_radix(&tail[2..6], 16)
                .ok()
                .and_then(char::from_u32)
        } else {
            None
        };

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &tail[7..];
            }
            None => {
                result.push_str("_x");
                rest = &tail[2..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        // Read shared strings (if present)
        let shared_strings = Self::read_shared_strings(&mut archive)?;

        // Read styles (if present)
        let cell_xfs = Self::read_styles(&mut archive)?;

        // Read workbook.xml to get sheet info
        let sheet_info = Self::read_workbook_xml(&mut archive)?;

        // Read workbook.xml.rels to get sheet paths
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        // Create workbook
        let mut workbook = Workbook::empty();

        // Read each worksheet
        for (name, r_id) in &sheet_info {
            if let Some(path) = sheet_paths.get(r_id) {
                let sheet_idx = workbook.add_worksheet_with_name(name)?;
                if let Some(worksheet) = workbook.worksheet_mut(sheet_idx) {
                    Self::read_worksheet(
                        &mut archive,
                        path,
                        worksheet,
                        &shared_strings,
                        &cell_xfs,
                    )?;
                }
            }
        }

        // Ensure at least one sheet exists
        if workbook.is_empty() {
            workbook.add_worksheet()?;
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"t" if in_si => {
                        in_t = true;
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"t" => {
                        in_t = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Vec<CellXf>> {
        let file = match archive.by_name("xl/styles.xml") {
            Ok(f) => f,
            Err(_) => return Ok(vec![CellXf::default()]),
        };
        read_styles_xml(file)
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let mut name = None;
                    let mut r_id = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => {
                                name = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"r:id" => {
                                r_id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = if let Some(stripped) = target.strip_prefix('/') {
                                stripped.to_string()
                            } else {
                                format!("xl/{}", target)
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet from the archive
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
        cell_xfs: &[CellXf],
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();

        // Current cell state
        let mut cell_ref: Option<String> = None;
        let mut cell_type: Option<String> = None;
        let mut cell_xf: Option<usize> = None;
        let mut cell_value: Option<String> = None;
        let mut inline_string = String::new();
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_formula = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"c" => {
                        in_cell = true;
                        (cell_ref, cell_type, cell_xf) = Self::parse_cell_attrs(&e);
                        cell_value = None;
                        inline_string.clear();
                    }
                    b"v" if in_cell => {
                        in_value = true;
                    }
                    b"f" if in_cell => {
                        // Formula text is skipped; the cached <v> is the value
                        in_formula = true;
                    }
                    b"is" if in_cell => {
                        in_inline_str = true;
                    }
                    b"t" if in_inline_str => {
                        in_inline_text = true;
                    }
                    _ => {}
                },
                Ok(Event::Empty(e)) => {
                    if e.name().as_ref() == b"c" {
                        // Cells with no children still carry their format tag
                        let (r, t, s) = Self::parse_cell_attrs(&e);
                        Self::commit_cell(
                            worksheet,
                            r,
                            t,
                            s,
                            None,
                            "",
                            shared_strings,
                            cell_xfs,
                        )?;
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        Self::commit_cell(
                            worksheet,
                            cell_ref.take(),
                            cell_type.take(),
                            cell_xf.take(),
                            cell_value.take(),
                            &inline_string,
                            shared_strings,
                            cell_xfs,
                        )?;
                        in_cell = false;
                    }
                    b"v" => in_value = false,
                    b"f" => in_formula = false,
                    b"is" => in_inline_str = false,
                    b"t" if in_inline_text => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_formula {
                        // Ignore
                    } else if in_value {
                        if let Ok(text) = e.unescape() {
                            cell_value.get_or_insert_with(String::new).push_str(&text);
                        }
                    } else if in_inline_text {
                        if let Ok(text) = e.unescape() {
                            inline_string.push_str(&text);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    fn parse_cell_attrs(
        e: &quick_xml::events::BytesStart<'_>,
    ) -> (Option<String>, Option<String>, Option<usize>) {
        let mut cell_ref = None;
        let mut cell_type = None;
        let mut cell_xf = None;

        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => {
                    cell_ref = attr.unescape_value().ok().map(|s| s.to_string());
                }
                b"t" => {
                    cell_type = attr.unescape_value().ok().map(|s| s.to_string());
                }
                b"s" => {
                    cell_xf = attr
                        .unescape_value()
                        .ok()
                        .and_then(|s| s.parse::<usize>().ok());
                }
                _ => {}
            }
        }

        (cell_ref, cell_type, cell_xf)
    }

    /// Store one parsed cell into the worksheet
    #[allow(clippy::too_many_arguments)]
    fn commit_cell(
        worksheet: &mut Worksheet,
        cell_ref: Option<String>,
        cell_type: Option<String>,
        cell_xf: Option<usize>,
        cell_value: Option<String>,
        inline_string: &str,
        shared_strings: &[String],
        cell_xfs: &[CellXf],
    ) -> XlsxResult<()> {
        let Some(cell_ref) = cell_ref else {
            return Ok(());
        };
        let addr = CellAddress::parse(&cell_ref)
            .map_err(|_| XlsxError::Parse(format!("invalid cell reference '{}'", cell_ref)))?;

        let xf = cell_xf
            .and_then(|i| cell_xfs.get(i))
            .copied()
            .unwrap_or_default();

        let value = match cell_type.as_deref() {
            Some("s") => {
                let idx = cell_value.as_deref().and_then(|v| v.parse::<usize>().ok());
                match idx.and_then(|i| shared_strings.get(i)) {
                    Some(s) => CellValue::Text(s.clone()),
                    None => {
                        log::warn!(
                            "cell {}: unresolved shared string index {:?}",
                            cell_ref,
                            cell_value
                        );
                        CellValue::Empty
                    }
                }
            }
            Some("str") => CellValue::Text(decode_excel_escapes(
                cell_value.as_deref().unwrap_or(""),
            )),
            Some("inlineStr") => CellValue::Text(decode_excel_escapes(inline_string)),
            Some("b") => CellValue::Boolean(cell_value.as_deref() == Some("1")),
            // Error literals (#N/A etc.) pass through as text
            Some("e") => CellValue::Text(cell_value.unwrap_or_default()),
            _ => match cell_value {
                Some(v) => match v.parse::<f64>() {
                    Ok(n) if xf.is_date => match serial_to_datetime(n) {
                        Some(dt) => CellValue::DateTime(dt),
                        None => CellValue::Number(n),
                    },
                    Ok(n) => CellValue::Number(n),
                    Err(_) => {
                        log::warn!("cell {}: unparseable numeric value '{}'", cell_ref, v);
                        CellValue::Text(v)
                    }
                },
                None => CellValue::Empty,
            },
        };

        worksheet.set_cell_at(addr.row, addr.col, CellData::with_format(value, xf.display))?;
        Ok(())
    }
}
