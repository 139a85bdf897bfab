#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::Workbook;
use service_pricing_pipeline::config::PipelineConfig;

pub const HEADERS: [&str; 11] = [
    "SERVICE",
    "PRODUCT INDEX",
    "DEPARTMENT",
    "SPECIALTY",
    "CATEGORY",
    "NATURE OF ENT. PROCEDURE",
    "",
    "SP. 1",
    "SP. 2",
    "SP. 3",
    "SP. 4",
];

/// A cell in the sample sheet.
#[derive(Clone, Copy)]
pub enum Cell {
    Text(&'static str),
    Num(f64),
    Blank,
}

use Cell::{Blank, Num, Text};

/// Rows below the header, shaped like the real price list: body-part heading rows with only a
/// SERVICE cell, service rows, and a few incomplete rows that cleaning must drop.
pub fn sample_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![Text("HEAD")],
        vec![
            Text("Service A"),
            Text("HC-SER-0001"),
            Text("Electrocardiography"),
            Text("Cardiology"),
            Text("Fetal Medicine"),
            Text("Diagnostic Imaging"),
            Blank,
            Num(100.0),
            Num(200.0),
            Num(150.0),
            Num(300.0),
        ],
        vec![
            Text("Service B"),
            Text("HC-SER-0002"),
            Text("Radiology"),
            Text("Neurology"),
            Text("Adult"),
            Text("Therapeutic"),
            Text("see note"),
            Num(120.0),
            Blank,
            Num(90.0),
            Blank,
        ],
        vec![Text("Chest")],
        vec![
            Text("Service C"),
            Text("HC-SER-0003"),
            Text("Radiology"),
            Text("Pulmonology"),
            Text("Adult"),
            Text("Diagnostic Imaging"),
            Blank,
            Num(80.0),
            Num(85.0),
            Num(70.0),
            Num(95.0),
        ],
        vec![
            Text("Service D"),
            Blank,
            Text("Radiology"),
            Blank,
            Blank,
            Blank,
            Blank,
            Num(50.0),
        ],
        vec![
            Text("Service E"),
            Text("HC-SER-0005"),
            Text("Radiology"),
            Blank,
            Blank,
            Blank,
            Blank,
            Blank,
            Num(60.0),
        ],
    ]
}

pub fn write_workbook(path: &Path, sheet: &str, headers: &[&str], rows: &[Vec<Cell>]) {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name(sheet).unwrap();

    for (col, h) in headers.iter().enumerate() {
        if !h.is_empty() {
            ws.write_string(0, col as u16, *h).unwrap();
        }
    }
    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Text(s) => {
                    ws.write_string(r, col as u16, *s).unwrap();
                }
                Num(n) => {
                    ws.write_number(r, col as u16, *n).unwrap();
                }
                Blank => {}
            }
        }
    }

    wb.save(path).unwrap();
}

pub fn write_sample_workbook(path: &Path) {
    write_workbook(path, "Sheet1", &HEADERS, &sample_rows());
}

pub fn write_csv(path: &Path, headers: &[&str], rows: &[Vec<Cell>]) {
    let mut wtr = csv::Writer::from_path(path).unwrap();
    wtr.write_record(headers).unwrap();
    for row in rows {
        let mut record: Vec<String> = row
            .iter()
            .map(|c| match c {
                Text(s) => s.to_string(),
                Num(n) => n.to_string(),
                Blank => String::new(),
            })
            .collect();
        record.resize(headers.len(), String::new());
        wtr.write_record(&record).unwrap();
    }
    wtr.flush().unwrap();
}

pub fn write_sample_csv(path: &Path) {
    write_csv(path, &HEADERS, &sample_rows());
}

pub fn config_for(raw: &Path, processed: &Path, api_url: &str) -> PipelineConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("RAW_DATA", raw.display().to_string()),
        ("PROCESSED_DATA", processed.display().to_string()),
        ("MOCKY_API", api_url.to_string()),
        ("BODY_PARTS", "Head,Chest,Abdomen".to_string()),
        ("SERVICE_PROVIDERS", "SP. 1,SP. 2,SP. 3,SP. 4".to_string()),
    ]);
    PipelineConfig::from_lookup(|k| vars.get(k).cloned()).unwrap()
}
