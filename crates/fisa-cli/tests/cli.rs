mod common;

use std::fs;

use predicates::str::contains;
use serde_json::Value;

use common::{Sheet, TestEnv};

fn path_arg(path: &std::path::Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn extract_prints_record() {
    let env = TestEnv::new();
    let sheet = env.write_sheet("sheet.docx", Sheet::default());

    let json = env.run_json(&["extract", path_arg(&sheet)]);

    assert_eq!(json["status"], "success");
    assert_eq!(json["filename"], "sheet.docx");
    assert_eq!(json["data"]["code"], "IG.TC.101");
    assert_eq!(json["data"]["name_foreign"], "Engineering Geology");
    assert_eq!(json["data"]["credits"], 5);
    assert_eq!(json["data"]["time_distribution"]["exams"], 2);
    assert!(json.get("warnings").is_none());
}

#[test]
fn extract_text_format() {
    let env = TestEnv::new();
    let sheet = env.write_sheet("sheet.docx", Sheet::default());

    env.cmd()
        .args(["extract", path_arg(&sheet), "-f", "text"])
        .assert()
        .success()
        .stdout(contains("Code: IG.TC.101"))
        .stdout(contains("Category: DA"));
}

#[test]
fn extract_rejects_other_formats() {
    let env = TestEnv::new();
    let path = env.path().join("sheet.pdf");
    fs::write(&path, b"%PDF-1.4").unwrap();

    env.cmd()
        .args(["extract", path_arg(&path)])
        .assert()
        .failure()
        .stderr(contains("DOCX"));
}

#[test]
fn extract_reports_broken_archive() {
    let env = TestEnv::new();
    let path = env.path().join("broken.docx");
    fs::write(&path, b"not a zip archive").unwrap();

    env.cmd()
        .args(["extract", path_arg(&path)])
        .assert()
        .failure()
        .stderr(contains("Failed to read"));
}

#[test]
fn validate_matching_sheet() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    let sheet = env.write_sheet("sheet.docx", Sheet::default());

    let json = env.run_json(&["validate", path_arg(&sheet), "--plan", path_arg(&plan)]);

    assert_eq!(json["code_overridden"], false);
    let report = &json["validation"];
    assert_eq!(report["status"], "success");
    assert_eq!(report["name"], "Geologie inginerească");
    assert_eq!(report["statistics"]["total"], 13);
    assert_eq!(report["statistics"]["ok"], 13);
    assert_eq!(
        report["validations"]["plan_comparison"]["name_native"]["similarity"],
        1.0
    );
}

#[test]
fn validate_error_verdict_still_exits_zero() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    let sheet = env.write_sheet(
        "sheet.docx",
        Sheet {
            curriculum_hours: "70",
            ..Sheet::default()
        },
    );

    let json = env.run_json(&["validate", path_arg(&sheet), "--plan", path_arg(&plan)]);

    let report = &json["validation"];
    assert_eq!(report["status"], "error");
    let check = &report["validations"]["arithmetic"]["total_semester_sum"];
    assert_eq!(check["status"], "error");
    assert_eq!(check["observed"], 125);
    assert_eq!(check["expected"], 145);
}

#[test]
fn validate_unknown_code_override() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    let sheet = env.write_sheet("sheet.docx", Sheet::default());

    let json = env.run_json(&[
        "validate",
        path_arg(&sheet),
        "--plan",
        path_arg(&plan),
        "--code",
        "IG.TC.999",
    ]);

    assert_eq!(json["code_overridden"], true);
    let report = &json["validation"];
    assert_eq!(report["status"], "error");
    assert_eq!(report["code"], "IG.TC.999");
    assert_eq!(report["message"], "code not found in reference set");
    assert_eq!(report["validations"], Value::Null);
}

#[test]
fn validate_code_override_uses_selected_discipline() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    let sheet = env.write_sheet("sheet.docx", Sheet::default());

    let json = env.run_json(&[
        "validate",
        path_arg(&sheet),
        "--plan",
        path_arg(&plan),
        "--code",
        "IG.TC.102",
    ]);

    let report = &json["validation"];
    assert_eq!(report["code"], "IG.TC.102");
    assert_eq!(report["status"], "error");
    assert_eq!(report["validations"]["plan_comparison"]["credits"]["expected"], 4);
    assert_eq!(report["validations"]["plan_comparison"]["code"]["status"], "ok");
}

#[test]
fn validate_accepts_extracted_json_record() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    let sheet = env.write_sheet("sheet.docx", Sheet::default());

    let extracted = env.run_json(&["extract", path_arg(&sheet)]);
    let record = env.path().join("record.json");
    fs::write(&record, extracted["data"].to_string()).unwrap();

    let json = env.run_json(&["validate", path_arg(&record), "--plan", path_arg(&plan)]);
    assert_eq!(json["validation"]["status"], "success");
}

#[test]
fn validate_text_format() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    let sheet = env.write_sheet("sheet.docx", Sheet::default());

    env.cmd()
        .args(["validate", path_arg(&sheet), "--plan", path_arg(&plan), "-f", "text"])
        .assert()
        .success()
        .stdout(contains("plan_comparison"))
        .stdout(contains("13 checks: 13 ok, 0 warnings, 0 errors"));
}

#[test]
fn validate_requires_plan() {
    let env = TestEnv::new();
    let sheet = env.write_sheet("sheet.docx", Sheet::default());
    let missing = env.path().join("missing.json");

    env.cmd()
        .args(["validate", path_arg(&sheet), "--plan", path_arg(&missing)])
        .assert()
        .failure()
        .stderr(contains("Curriculum plan not found"));
}

#[test]
fn validate_uses_config_tunables() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    let sheet = env.write_sheet("sheet.docx", Sheet::default());
    let config = env.path().join("fisa.json");
    fs::write(&config, r#"{"validation": {"exam_hours_min": 3}}"#).unwrap();

    let json = env.run_json(&[
        "-c",
        path_arg(&config),
        "validate",
        path_arg(&sheet),
        "--plan",
        path_arg(&plan),
    ]);

    let check = &json["validation"]["validations"]["interval"]["exams_hours"];
    assert_eq!(check["status"], "error");
    assert_eq!(check["expected"], serde_json::json!([3, 3]));
}

#[test]
fn batch_writes_summary() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    env.write_sheet("a.docx", Sheet::default());
    env.write_sheet(
        "b.docx",
        Sheet {
            curriculum_hours: "70",
            ..Sheet::default()
        },
    );
    let summary = env.path().join("summary.csv");
    let reports = env.path().join("reports");
    let pattern = format!("{}/*.docx", env.path().display());

    env.cmd()
        .args([
            "batch",
            &pattern,
            "--plan",
            path_arg(&plan),
            "-j",
            "2",
            "--summary",
            path_arg(&summary),
            "--output-dir",
            path_arg(&reports),
        ])
        .assert()
        .success()
        .stdout(contains("Validated 2 files"));

    let csv = fs::read_to_string(&summary).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("filename,status,code"));
    assert!(lines[1].starts_with("a.docx,success,IG.TC.101"));
    assert!(lines[2].starts_with("b.docx,error,IG.TC.101"));

    let report: Value =
        serde_json::from_str(&fs::read_to_string(reports.join("b.docx.json")).unwrap()).unwrap();
    assert_eq!(report["status"], "error");
}

#[test]
fn batch_skips_plan_and_reports() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    let sheet = env.write_sheet("a.docx", Sheet::default());

    let extracted = env.run_json(&["extract", path_arg(&sheet)]);
    fs::write(env.path().join("a.json"), extracted["data"].to_string()).unwrap();

    let reports = env.path().join("reports");
    fs::create_dir_all(&reports).unwrap();
    fs::write(reports.join("old.docx.json"), "{}").unwrap();

    let pattern = format!("{}/**/*", env.path().display());
    let summary = env.path().join("summary.csv");

    env.cmd()
        .args([
            "batch",
            &pattern,
            "--plan",
            path_arg(&plan),
            "--summary",
            path_arg(&summary),
            "--output-dir",
            path_arg(&reports),
        ])
        .assert()
        .success()
        .stdout(contains("Validated 2 files"));

    let csv = fs::read_to_string(&summary).unwrap();
    assert!(!csv.contains("plan.json"));
    assert!(!csv.contains("old.docx.json"));
    assert!(reports.join("a.docx.json").exists());
    assert!(reports.join("a.json.json").exists());
}

#[test]
fn batch_stops_on_unreadable_sheet() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    env.write_sheet("a.docx", Sheet::default());
    fs::write(env.path().join("broken.docx"), b"garbage").unwrap();
    let pattern = format!("{}/*.docx", env.path().display());

    env.cmd()
        .args(["batch", &pattern, "--plan", path_arg(&plan)])
        .assert()
        .failure()
        .stderr(contains("broken.docx"));
}

#[test]
fn batch_continue_on_error() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    env.write_sheet("a.docx", Sheet::default());
    fs::write(env.path().join("broken.docx"), b"garbage").unwrap();
    let summary = env.path().join("summary.csv");
    let pattern = format!("{}/*.docx", env.path().display());

    env.cmd()
        .args([
            "batch",
            &pattern,
            "--plan",
            path_arg(&plan),
            "--summary",
            path_arg(&summary),
            "--continue-on-error",
        ])
        .assert()
        .success()
        .stdout(contains("Failed files:"));

    let csv = fs::read_to_string(&summary).unwrap();
    assert!(csv.contains("broken.docx,failed"));
    assert!(csv.contains("a.docx,success"));
}

#[test]
fn batch_without_matches_fails() {
    let env = TestEnv::new();
    let plan = env.write_plan();
    let pattern = format!("{}/*.docx", env.path().display());

    env.cmd()
        .args(["batch", &pattern, "--plan", path_arg(&plan)])
        .assert()
        .failure()
        .stderr(contains("No matching files"));
}

#[test]
fn plan_list_and_show() {
    let env = TestEnv::new();
    let plan = env.write_plan();

    let list = env.run_json(&["plan", "--plan", path_arg(&plan), "list", "-f", "json"]);
    assert_eq!(list.as_array().map(Vec::len), Some(2));
    assert_eq!(list[1]["code"], "IG.TC.102");
    assert_eq!(list[1]["semester"], 2);

    let shown = env.run_json(&["plan", "--plan", path_arg(&plan), "show", "IG.TC.102"]);
    assert_eq!(shown["name_native"], "Mecanica pământurilor");
    assert_eq!(shown["category"], "DOB");
    assert_eq!(shown["weekly_hours"]["seminar"], 1);

    env.cmd()
        .args(["plan", "--plan", path_arg(&plan), "show", "XX.YY.000"])
        .assert()
        .failure()
        .stderr(contains("Discipline not found"));
}

#[test]
fn plan_dump_prints_full_plan() {
    let env = TestEnv::new();
    let plan = env.write_plan();

    let dump = env.run_json(&["plan", "--plan", path_arg(&plan), "dump"]);

    let disciplines = dump["discipline"].as_array().unwrap();
    assert_eq!(disciplines.len(), 2);
    assert_eq!(disciplines[0]["code"], "IG.TC.101");
    assert_eq!(disciplines[0]["name_foreign"], "Engineering Geology");
    assert_eq!(disciplines[0]["weekly_hours"]["lab"], 1);
    assert_eq!(disciplines[1]["year"], 1);
}

#[test]
fn config_init_get_set() {
    let env = TestEnv::new();
    let config = env.path().join("fisa.json");
    let config_arg = path_arg(&config);

    env.cmd()
        .args(["-c", config_arg, "config", "init"])
        .assert()
        .success()
        .stdout(contains("Created configuration file"));

    env.cmd()
        .args(["-c", config_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    let value = env.run_json(&["-c", config_arg, "config", "get", "validation.hours_per_credit"]);
    assert_eq!(value, 25);

    env.cmd()
        .args(["-c", config_arg, "config", "set", "validation.hours_per_credit", "30"])
        .assert()
        .success();

    let value = env.run_json(&["-c", config_arg, "config", "get", "validation.hours_per_credit"]);
    assert_eq!(value, 30);
}

#[test]
fn config_set_rejects_bad_values() {
    let env = TestEnv::new();
    let config = env.path().join("fisa.json");
    let config_arg = path_arg(&config);

    env.cmd()
        .args(["-c", config_arg, "config", "set", "validation.no_such_key", "1"])
        .assert()
        .failure()
        .stderr(contains("Configuration key not found"));

    env.cmd()
        .args(["-c", config_arg, "config", "set", "validation.warning_threshold", "0.99"])
        .assert()
        .failure()
        .stderr(contains("Invalid configuration"));

    assert!(!config.exists());
}

#[test]
fn config_path_uses_user_config_dir() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(contains("fisa/config.json"))
        .stdout(contains("not created"));
}
