// ==========================================
// RAB 导入引擎 - 文件解析器实现
// ==========================================
// 职责: 二进制文件 → 工作表名列表 + 单元格网格（外部解码器封装）
// 支持: Excel (.xlsx/.xlsm/.xlsb/.xls/.ods) / CSV (.csv)
// ==========================================

use crate::config::import_config::DEFAULT_HEADER_SCAN_ROWS;
use crate::domain::types::{CellValue, Grid};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use csv::{ByteRecord, ReaderBuilder};
use std::io::Cursor;
use std::path::Path;

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
const CSV_EXTENSIONS: &[&str] = &["csv"];

// ==========================================
// SpreadsheetSource Trait
// ==========================================
// 用途: 已打开的工作簿（工作表名 + 按名读取网格）
pub trait SpreadsheetSource {
    /// 工作表名（保持工作簿中的顺序）
    fn sheet_names(&self) -> Vec<String>;

    /// 读取指定工作表的网格，空白单元格为 CellValue::Empty
    fn read_grid(&mut self, sheet_name: &str) -> ImportResult<Grid>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 按文件类型打开工作簿
// 实现者: ExcelParser, CsvParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    fn open(&self, bytes: Vec<u8>, file_name: &str) -> ImportResult<Box<dyn SpreadsheetSource>>;
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

pub struct ExcelWorkbook {
    sheets: Sheets<Cursor<Vec<u8>>>,
}

impl FileParser for ExcelParser {
    fn open(&self, bytes: Vec<u8>, _file_name: &str) -> ImportResult<Box<dyn SpreadsheetSource>> {
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        Ok(Box::new(ExcelWorkbook { sheets }))
    }
}

impl SpreadsheetSource for ExcelWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_grid(&mut self, sheet_name: &str) -> ImportResult<Grid> {
        let range = self.sheets.worksheet_range(sheet_name)?;
        Ok(range_to_grid(&range))
    }
}

/// calamine 会裁掉前导空行 / 空列，这里补回以保持绝对行列位置
fn range_to_grid(range: &Range<Data>) -> Grid {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut grid: Grid = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(convert_cell));
        grid.push(cells);
    }
    grid
}

/// calamine 单元格 → CellValue（日期取序列号，错误值视为空白）
pub fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            CellValue::from(s.as_str())
        }
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

/// CSV 视为只有一个工作表的工作簿（表名取文件名）
pub struct CsvWorkbook {
    sheet_name: String,
    grid: Grid,
}

impl FileParser for CsvParser {
    fn open(&self, bytes: Vec<u8>, file_name: &str) -> ImportResult<Box<dyn SpreadsheetSource>> {
        let grid = parse_csv_grid(&bytes)?;
        let sheet_name = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("Sheet1")
            .to_string();

        Ok(Box::new(CsvWorkbook { sheet_name, grid }))
    }
}

impl SpreadsheetSource for CsvWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        vec![self.sheet_name.clone()]
    }

    fn read_grid(&mut self, sheet_name: &str) -> ImportResult<Grid> {
        if sheet_name != self.sheet_name {
            return Err(ImportError::SheetNotFound(sheet_name.to_string()));
        }
        Ok(self.grid.clone())
    }
}

/// 解析 CSV 字节为网格
///
/// - 不假设首行为表头（表头由 HeaderLocator 识别）
/// - 允许行长度不一致
/// - 空行保留为空白行（csv 默认跳过空行，这里按行号补回），保证行位置不偏移
/// - 分号分隔的文件（逗号作小数点的地区常见）自动识别
pub fn parse_csv_grid(bytes: &[u8]) -> ImportResult<Grid> {
    let content = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let delimiter = detect_delimiter(content, DEFAULT_HEADER_SCAN_ROWS);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // 允许行长度不一致
        .delimiter(delimiter)
        .from_reader(content);

    let mut grid: Grid = Vec::new();
    let mut record = ByteRecord::new();
    let mut next_line: u64 = 1;
    while reader.read_byte_record(&mut record)? {
        // 读完记录后的位置: line() 为已消费的 '\n' 数 + 1
        let end = reader.position();
        let consumed = end.byte() as usize;
        let ends_with_newline = consumed > 0 && content.get(consumed - 1) == Some(&b'\n');
        let last_line = if ends_with_newline { end.line() - 1 } else { end.line() };

        // 引号内换行的记录占多行
        let embedded_newlines = record.iter().flatten().filter(|b| **b == b'\n').count() as u64;
        let first_line = last_line.saturating_sub(embedded_newlines).max(1);

        // csv 会跳过空行，按空行数补回空白行
        for _ in next_line..first_line {
            grid.push(Vec::new());
        }
        next_line = last_line + 1;

        let row = record
            .iter()
            .map(|field| CellValue::from(String::from_utf8_lossy(field).into_owned()))
            .collect();
        grid.push(row);
    }

    Ok(grid)
}

/// 在前 scan_lines 行内比较分号与逗号数量（标题行通常不含分隔符）
fn detect_delimiter(content: &[u8], scan_lines: usize) -> u8 {
    let (semicolons, commas) = content
        .split(|b| *b == b'\n')
        .take(scan_lines)
        .flatten()
        .fold((0usize, 0usize), |(s, c), b| match b {
            b';' => (s + 1, c),
            b',' => (s, c + 1),
            _ => (s, c),
        });

    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 文件扩展名是否受支持
    pub fn is_supported<P: AsRef<Path>>(file_path: P) -> bool {
        let ext = extension_of(file_path.as_ref());
        EXCEL_EXTENSIONS.contains(&ext.as_str()) || CSV_EXTENSIONS.contains(&ext.as_str())
    }
}

impl FileParser for UniversalFileParser {
    fn open(&self, bytes: Vec<u8>, file_name: &str) -> ImportResult<Box<dyn SpreadsheetSource>> {
        let ext = extension_of(Path::new(file_name));

        if CSV_EXTENSIONS.contains(&ext.as_str()) {
            CsvParser.open(bytes, file_name)
        } else if EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            ExcelParser.open(bytes, file_name)
        } else {
            Err(ImportError::UnsupportedFormat(ext))
        }
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
