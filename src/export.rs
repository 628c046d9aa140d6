/// Tabular export of the reading collection.
use std::str::FromStr;

use crate::domain::WeatherReading;
use crate::errors::{ApiError, ApiResult};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "weather-readings.csv",
            ExportFormat::Xlsx => "weather-readings.xlsx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(ApiError::Export(format!(
                "unsupported export format: {other}"
            ))),
        }
    }
}

const HEADER: [&str; 6] = [
    "createdAt",
    "temperature",
    "humidity",
    "windSpeed",
    "rainProbability",
    "insight",
];

/// Serialize the full ordered collection in the requested format.
///
/// An empty collection yields a valid header-only artifact.
pub fn export_readings(readings: &[WeatherReading], format: ExportFormat) -> ApiResult<Vec<u8>> {
    match format {
        ExportFormat::Csv => to_csv(readings),
        ExportFormat::Xlsx => to_xlsx(readings),
    }
}

fn to_csv(readings: &[WeatherReading]) -> ApiResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|e| ApiError::Export(e.to_string()))?;

    for r in readings {
        writer
            .write_record(&[
                r.created_at.to_rfc3339(),
                r.temperature.to_string(),
                r.humidity.to_string(),
                r.wind_speed.to_string(),
                r.rain_probability.to_string(),
                r.insight.clone(),
            ])
            .map_err(|e| ApiError::Export(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ApiError::Export(e.to_string()))
}

fn to_xlsx(readings: &[WeatherReading]) -> ApiResult<Vec<u8>> {
    use rust_xlsxwriter::Workbook;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in HEADER.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *name)
            .map_err(|e| ApiError::Export(e.to_string()))?;
    }

    for (i, r) in readings.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet
            .write_string(row, 0, r.created_at.to_rfc3339())
            .and_then(|s| s.write_number(row, 1, r.temperature))
            .and_then(|s| s.write_number(row, 2, r.humidity as f64))
            .and_then(|s| s.write_number(row, 3, r.wind_speed))
            .and_then(|s| s.write_number(row, 4, r.rain_probability as f64))
            .and_then(|s| s.write_string(row, 5, &r.insight))
            .map_err(|e| ApiError::Export(e.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ApiError::Export(e.to_string()))
}
