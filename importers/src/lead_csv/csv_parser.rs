use csv::ReaderBuilder;
use shared_types::ImportError;
use std::collections::HashMap;

pub struct CsvRecordParser {
    delimiter: u8,
}

impl CsvRecordParser {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Parse raw bytes into one map per data row, keyed by normalized header.
    ///
    /// Headers are lowercased, stripped of `/` and trimmed, so variant
    /// spellings like `Email/1` and `email1` land in the same column. Rows
    /// shorter than the header are padded with empty strings; extra trailing
    /// fields are dropped. Quoted fields follow RFC 4180, including doubled
    /// quotes.
    pub fn parse_to_records(
        &self,
        content: &[u8],
    ) -> Result<Vec<HashMap<String, String>>, ImportError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(content);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::ParseError(e.to_string()))?
            .iter()
            .map(normalize_header)
            .collect();

        let mut records = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| ImportError::ParseError(e.to_string()))?;

            let mut map = HashMap::new();
            for (i, header) in headers.iter().enumerate() {
                let value = record.get(i).unwrap_or("").trim().to_string();
                map.insert(header.clone(), value);
            }
            records.push(map);
        }

        Ok(records)
    }
}

impl Default for CsvRecordParser {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.to_lowercase().replace('/', "").trim().to_string()
}
