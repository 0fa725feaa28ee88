use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{SalaryDataset, SalaryRecord, REQUIRED_COLUMNS};
use crate::error::LoadError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// String columns in the order [`record_at`] consumes them.
const TEXT_COLUMNS: [&str; 6] = [
    "senioridade",
    "contrato",
    "porte_empresa",
    "cargo",
    "remoto",
    "residencia_iso3",
];

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Where the current dataset came from, so it can be loaded again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    pub fn load(&self) -> Result<SalaryDataset, LoadError> {
        match self {
            DataSource::Url(url) => load_url(url),
            DataSource::File(path) => load_file(path),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch a CSV over HTTP and parse it. Any non-success status is an error.
pub fn load_url(url: &str) -> Result<SalaryDataset, LoadError> {
    let http_error = |source: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(http_error)?;
    let body = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.bytes())
        .map_err(http_error)?;

    log::debug!("Fetched {} bytes from {url}", body.len());
    parse_csv(body.as_ref())
}

/// Load a salary dataset from a local file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the dataset's column names
/// * `.json`    – `[{ "ano": 2023, "senioridade": "...", ... }, ...]`
/// * `.parquet` – one column per field, any integer/float/string encoding
pub fn load_file(path: &Path) -> Result<SalaryDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => parse_csv(open(path)?),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row. Every column in [`REQUIRED_COLUMNS`]
/// must be present; any other columns are ignored.
pub fn parse_csv<R: Read>(input: R) -> Result<SalaryDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|&&col| !headers.iter().any(|h| h == col))
    {
        return Err(LoadError::MissingColumn(missing.to_string()));
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SalaryRecord>().enumerate() {
        let record = result.map_err(|e| LoadError::InvalidRow {
            row: row_no + 1,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    log::debug!("Parsed {} CSV records", records.len());
    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<SalaryDataset, LoadError> {
    let records: Vec<SalaryRecord> = serde_json::from_reader(BufReader::new(open(path)?))?;
    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): every column is cast to the type the
/// record needs, so `ano` may be stored as int32, int64 or float.
fn load_parquet(path: &Path) -> Result<SalaryDataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let offset = records.len();
        records.extend(records_from_batch(&batch, offset)?);
    }

    log::debug!("Read {} Parquet records from {}", records.len(), path.display());
    Ok(SalaryDataset::from_records(records))
}

/// Look up a column by name and cast it to `data_type`.
fn column_as(batch: &RecordBatch, name: &str, data_type: &DataType) -> Result<ArrayRef, LoadError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
    Ok(cast(col, data_type)?)
}

fn cast_error(name: &str, expected: &str) -> LoadError {
    LoadError::Arrow(ArrowError::CastError(format!(
        "column '{name}' could not be read as {expected}"
    )))
}

fn records_from_batch(batch: &RecordBatch, row_offset: usize) -> Result<Vec<SalaryRecord>, LoadError> {
    let years = column_as(batch, "ano", &DataType::Int64)?;
    let years = years
        .as_primitive_opt::<Int64Type>()
        .ok_or_else(|| cast_error("ano", "Int64"))?;

    let salaries = column_as(batch, "usd", &DataType::Float64)?;
    let salaries = salaries
        .as_primitive_opt::<Float64Type>()
        .ok_or_else(|| cast_error("usd", "Float64"))?;

    let text_arrays: Vec<ArrayRef> = TEXT_COLUMNS
        .iter()
        .map(|name| column_as(batch, name, &DataType::Utf8))
        .collect::<Result<_, _>>()?;
    let texts: Vec<&StringArray> = text_arrays
        .iter()
        .zip(TEXT_COLUMNS)
        .map(|(arr, name)| arr.as_string_opt::<i32>().ok_or_else(|| cast_error(name, "Utf8")))
        .collect::<Result<_, _>>()?;

    (0..batch.num_rows())
        .map(|row| {
            let row_no = row_offset + row + 1;
            let null_error = |name: &str| LoadError::InvalidRow {
                row: row_no,
                message: format!("null value in '{name}'"),
            };

            if years.is_null(row) {
                return Err(null_error("ano"));
            }
            if salaries.is_null(row) {
                return Err(null_error("usd"));
            }
            let mut text = Vec::with_capacity(TEXT_COLUMNS.len());
            for (arr, name) in texts.iter().zip(TEXT_COLUMNS) {
                if arr.is_null(row) {
                    return Err(null_error(name));
                }
                text.push(arr.value(row).to_string());
            }

            Ok(record_at(years.value(row), salaries.value(row), text))
        })
        .collect()
}

/// Assemble a record from the text cells in [`TEXT_COLUMNS`] order.
fn record_at(year: i64, salary_usd: f64, text: Vec<String>) -> SalaryRecord {
    let mut text = text.into_iter();
    let mut next = || text.next().unwrap_or_default();
    SalaryRecord {
        year,
        seniority: next(),
        contract: next(),
        company_size: next(),
        role: next(),
        salary_usd,
        remote: next(),
        residence_iso3: next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int32Array};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    const CSV: &str = "\
ano,senioridade,contrato,cargo,salario,moeda,usd,residencia,remoto,empresa,porte_empresa,residencia_iso3
2023,Senior,CLT,Data Scientist,120000,USD,120000,US,Remoto,US,Grande,USA
2023,Junior,CLT,Analyst,200000,BRL,40000.5,BR,Presencial,BR,Pequena,BRA
";

    #[test]
    fn test_parse_csv_ignores_extra_columns() {
        let ds = parse_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].role, "Data Scientist");
        assert_eq!(ds.records[0].company_size, "Grande");
        assert_eq!(ds.records[1].salary_usd, 40000.5);
        assert_eq!(ds.records[1].residence_iso3, "BRA");
    }

    #[test]
    fn test_parse_csv_trims_headers_and_accepts_float_years() {
        let csv = " ano , senioridade,contrato,porte_empresa,cargo,usd,remoto,residencia_iso3\n\
                   2024.0,Pleno,PJ,Media,Data Engineer,85000,Hibrido,PRT\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[0].year, 2024);
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let csv = "ano,senioridade,contrato,porte_empresa,cargo,remoto,residencia_iso3\n";
        match parse_csv(csv.as_bytes()) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "usd"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_csv_reports_bad_row() {
        let csv = "ano,senioridade,contrato,porte_empresa,cargo,usd,remoto,residencia_iso3\n\
                   2023,Senior,CLT,Grande,Analyst,100,Remoto,USA\n\
                   2023,Senior,CLT,Grande,Analyst,lots,Remoto,USA\n";
        match parse_csv(csv.as_bytes()) {
            Err(LoadError::InvalidRow { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_csv_header_only_is_empty_dataset() {
        let csv = REQUIRED_COLUMNS.join(",") + "\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_load_file_csv_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("salaries.CSV");
        std::fs::write(&csv_path, CSV).unwrap();
        assert_eq!(load_file(&csv_path).unwrap().len(), 2);

        let json_path = dir.path().join("salaries.json");
        let mut file = File::create(&json_path).unwrap();
        write!(
            file,
            r#"[{{"ano": 2022, "senioridade": "Senior", "contrato": "CLT",
                "porte_empresa": "Grande", "cargo": "Data Scientist", "usd": 130000,
                "remoto": "Remoto", "residencia_iso3": "CAN", "salario": 1}}]"#
        )
        .unwrap();
        let ds = load_file(&json_path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].residence_iso3, "CAN");
    }

    #[test]
    fn test_load_file_unsupported_extension() {
        let err = load_file(Path::new("salaries.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn test_load_file_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::FileRead { .. }));
    }

    fn write_parquet(path: &Path, batch: &RecordBatch) {
        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
    }

    fn text_field(name: &str) -> Field {
        Field::new(name, DataType::Utf8, true)
    }

    #[test]
    fn test_load_parquet_casts_column_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("ano", DataType::Int32, false),
            text_field("senioridade"),
            text_field("contrato"),
            text_field("porte_empresa"),
            text_field("cargo"),
            Field::new("usd", DataType::Float64, false),
            text_field("remoto"),
            text_field("residencia_iso3"),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![2023, 2021])),
                Arc::new(StringArray::from(vec!["Senior", "Junior"])),
                Arc::new(StringArray::from(vec!["CLT", "PJ"])),
                Arc::new(StringArray::from(vec!["Grande", "Pequena"])),
                Arc::new(StringArray::from(vec!["Data Scientist", "Analyst"])),
                Arc::new(Float64Array::from(vec![120000.0, 40000.0])),
                Arc::new(StringArray::from(vec!["Remoto", "Presencial"])),
                Arc::new(StringArray::from(vec!["USA", "BRA"])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salaries.parquet");
        write_parquet(&path, &batch);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].year, 2023);
        assert_eq!(ds.records[1].contract, "PJ");
        assert_eq!(ds.records[1].remote, "Presencial");
        assert_eq!(ds.records[0].salary_usd, 120000.0);
    }

    #[test]
    fn test_load_parquet_rejects_nulls_and_missing_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("ano", DataType::Int32, false),
            text_field("senioridade"),
            text_field("contrato"),
            text_field("porte_empresa"),
            text_field("cargo"),
            Field::new("usd", DataType::Float64, false),
            text_field("remoto"),
            text_field("residencia_iso3"),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![2023])),
                Arc::new(StringArray::from(vec![Some("Senior")])),
                Arc::new(StringArray::from(vec![Some("CLT")])),
                Arc::new(StringArray::from(vec![Some("Grande")])),
                Arc::new(StringArray::from(vec![None::<&str>])),
                Arc::new(Float64Array::from(vec![1.0])),
                Arc::new(StringArray::from(vec![Some("Remoto")])),
                Arc::new(StringArray::from(vec![Some("USA")])),
            ],
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nulls.parquet");
        write_parquet(&path, &batch);
        match load_file(&path) {
            Err(LoadError::InvalidRow { row, message }) => {
                assert_eq!(row, 1);
                assert!(message.contains("cargo"));
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }

        let schema = Arc::new(Schema::new(vec![Field::new("ano", DataType::Int32, false)]));
        let batch = RecordBatch::try_new(schema, vec![Arc::new(Int32Array::from(vec![2023]))]).unwrap();
        let path = dir.path().join("narrow.pq");
        write_parquet(&path, &batch);
        assert!(matches!(load_file(&path), Err(LoadError::MissingColumn(col)) if col == "usd"));
    }

    #[test]
    fn test_data_source_display() {
        let url = DataSource::Url("https://example.org/data.csv".to_string());
        assert_eq!(url.to_string(), "https://example.org/data.csv");
        let file = DataSource::File(PathBuf::from("data/salaries.csv"));
        assert_eq!(file.to_string(), "data/salaries.csv");
    }

    #[test]
    fn test_data_source_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salaries.csv");
        std::fs::write(&path, CSV).unwrap();
        let ds = DataSource::File(path).load().unwrap();
        assert_eq!(ds.len(), 2);
    }
}
