pub mod lead_csv;
