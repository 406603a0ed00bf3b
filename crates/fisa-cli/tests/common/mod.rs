#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub const PLAN: &str = r#"{"discipline": [
    {
        "cod": "IG.TC.101",
        "denumire_ro": "Geologie inginerească",
        "denumire_en": "Engineering Geology",
        "categoria": "DA",
        "credite": 5,
        "nr_ore_saptamana": {"curs": 2, "seminar": 0, "proiect": 0, "lucrari": 1},
        "an": 1,
        "semestru": 1
    },
    {
        "cod": "IG.TC.102",
        "denumire_ro": "Mecanica pământurilor",
        "denumire_en": "Soil Mechanics",
        "categoria": "DOB",
        "credite": 4,
        "nr_ore_saptamana": {"curs": 2, "seminar": 1, "proiect": 0, "lucrari": 0},
        "an": 1,
        "semestru": 2
    }
]}"#;

/// Values written into a generated sheet.
pub struct Sheet<'a> {
    pub code: &'a str,
    pub curriculum_hours: &'a str,
}

impl Default for Sheet<'_> {
    fn default() -> Self {
        Self {
            code: "IG.TC.101",
            curriculum_hours: "50",
        }
    }
}

pub struct TestEnv {
    tmp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    /// The binary with its user config directory pointed into the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("fisa").expect("fisa binary");
        cmd.env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"));
        cmd
    }

    pub fn write_plan(&self) -> PathBuf {
        let path = self.path().join("plan.json");
        fs::write(&path, PLAN).expect("write plan");
        path
    }

    pub fn write_sheet(&self, name: &str, sheet: Sheet<'_>) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, build_docx(&sheet_xml(&sheet))).expect("write sheet");
        path
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

fn table(rows: &[&[(usize, &str)]]) -> String {
    let mut xml = String::from("<w:tbl>");
    for row in rows {
        let width = row.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
        xml.push_str("<w:tr>");
        for col in 0..width {
            let text = row
                .iter()
                .find(|(i, _)| *i == col)
                .map(|(_, t)| *t)
                .unwrap_or("");
            xml.push_str(&format!("<w:tc><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:tc>"));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

fn sheet_xml(sheet: &Sheet<'_>) -> String {
    let code = format!("Cod: {}", sheet.code);
    let tables = [
        table(&[&[(0, "Universitatea"), (1, "Facultatea")]]),
        table(&[
            &[(4, "Geologie inginerească / Engineering Geology")],
            &[(4, code.as_str()), (8, "DA")],
            &[(4, "Titular")],
            &[(4, "I")],
            &[(6, "E")],
        ]),
        table(&[
            &[(2, "3"), (4, "2"), (6, "0"), (8, "1"), (10, "0")],
            &[(2, sheet.curriculum_hours)],
        ]),
        table(&[
            &[(1, "ore")],
            &[(1, "40")],
            &[(1, "20")],
            &[(1, "15")],
            &[(1, "2")],
            &[(1, "75")],
            &[(1, "125")],
            &[(1, "5")],
        ]),
    ];
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        tables.concat()
    )
}

fn build_docx(document_xml: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .expect("start part");
    writer
        .write_all(document_xml.as_bytes())
        .expect("write part");
    writer.finish().expect("finish archive").into_inner()
}
