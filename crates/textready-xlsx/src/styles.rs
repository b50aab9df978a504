//! Number-format handling for styles.xml
//!
//! Only the slice of styles.xml this tool acts on survives the parse: for
//! each `cellXfs` entry, whether cells render as literal text and whether a
//! numeric value is really a date. Fonts, fills, and borders are skipped.

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use textready_core::DisplayFormat;

/// Fixed xf index for the general format on write
pub(crate) const XF_GENERAL: u32 = 0;
/// Fixed xf index for the text format (`@`) on write
pub(crate) const XF_TEXT: u32 = 1;
/// Fixed xf index for the datetime format on write
pub(crate) const XF_DATETIME: u32 = 2;

/// The datetime number format written for [`XF_DATETIME`] (m/d/yy h:mm)
const DATETIME_NUM_FMT_ID: u32 = 22;

/// What the reader keeps about one `cellXfs` entry
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CellXf {
    /// The display tag carried into the cell model
    pub display: DisplayFormat,
    /// Numeric values under this xf are date serials
    pub is_date: bool,
}

/// Parse styles.xml into per-xf format info.
///
/// Index 0 is guaranteed present so cells without an `s` attribute resolve.
pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<Vec<CellXf>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();

    let mut numfmts: HashMap<u32, String> = HashMap::new();
    let mut xf_fmt_ids: Vec<u32> = Vec::new();
    let mut in_num_fmts = false;
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"numFmts" => {
                    in_num_fmts = true;
                }
                b"cellXfs" => {
                    in_cell_xfs = true;
                }
                b"numFmt" if in_num_fmts => {
                    let mut id = None;
                    let mut code = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"numFmtId" => {
                                id = attr.unescape_value().ok().and_then(|s| s.parse().ok())
                            }
                            b"formatCode" => {
                                code = attr.unescape_value().ok().map(|s| s.to_string())
                            }
                            _ => {}
                        }
                    }
                    if let (Some(id), Some(code)) = (id, code) {
                        numfmts.insert(id, code);
                    }
                }
                b"xf" if in_cell_xfs => {
                    let mut num_fmt_id = 0u32;
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"numFmtId" {
                            num_fmt_id = attr
                                .unescape_value()
                                .ok()
                                .and_then(|s| s.parse().ok())
                                .unwrap_or(0);
                        }
                    }
                    xf_fmt_ids.push(num_fmt_id);
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"numFmts" => in_num_fmts = false,
                b"cellXfs" => in_cell_xfs = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let mut xfs: Vec<CellXf> = xf_fmt_ids
        .iter()
        .map(|&id| {
            let code = numfmts.get(&id).map(String::as_str);
            CellXf {
                display: if is_text_format(id, code) {
                    DisplayFormat::Text
                } else {
                    DisplayFormat::General
                },
                is_date: is_date_format(id, code),
            }
        })
        .collect();

    if xfs.is_empty() {
        xfs.push(CellXf::default());
    }

    Ok(xfs)
}

fn is_text_format(num_fmt_id: u32, code: Option<&str>) -> bool {
    num_fmt_id == DisplayFormat::TEXT_NUM_FMT_ID || code.map_or(false, |c| c.trim() == "@")
}

/// Heuristic date detection: built-in date ids, or custom codes containing
/// date/time placeholders with no quoted literal text.
fn is_date_format(num_fmt_id: u32, code: Option<&str>) -> bool {
    if (14..=22).contains(&num_fmt_id) {
        return true;
    }
    match code {
        Some(c) => {
            let lower = c.to_lowercase();
            (lower.contains('y')
                || lower.contains('m')
                || lower.contains('d')
                || lower.contains('h')
                || lower.contains('s'))
                && !lower.contains('"')
        }
        None => false,
    }
}

/// The fixed styles.xml written for every output workbook.
///
/// cellXfs order must match [`XF_GENERAL`], [`XF_TEXT`], [`XF_DATETIME`].
pub(crate) fn styles_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
  <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
  <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
  <cellXfs count="3">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="{}" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
    <xf numFmtId="{}" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
  </cellXfs>
</styleSheet>"#,
        DisplayFormat::TEXT_NUM_FMT_ID,
        DATETIME_NUM_FMT_ID
    )
}
