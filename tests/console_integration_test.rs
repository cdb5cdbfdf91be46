use anyhow::Result;
use clap::Parser;
use small_roster::{CliConfig, Console, LocalStorage, RosterConfig, Settings};
use tempfile::TempDir;

fn run_console(settings: Settings, out_dir: &TempDir, script: &str) -> Result<(String, usize)> {
    let storage = LocalStorage::new(out_dir.path().to_str().unwrap().to_string());
    let mut console = Console::new(settings, storage, "roster.csv");
    let mut output = Vec::new();
    console.run(script.as_bytes(), &mut output)?;
    Ok((String::from_utf8(output)?, console.session().store().len()))
}

#[test]
fn test_config_file_seeds_and_exports() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("roster.toml");
    std::fs::write(
        &config_path,
        r#"
[roster]
title = "1소대 사이즈 현황"

[display]
chart_width = 20

[export]
format = "json"

[[seed]]
name = "홍길동"
hat_size = "L"
cloth_size = "XL"
allergies = ["곡류: 밀"]

[[seed]]
name = "강감찬"
"#,
    )?;

    let file_config = RosterConfig::from_file(&config_path)?;
    let cli = CliConfig::parse_from(["small-roster", "--config", config_path.to_str().unwrap()]);
    let settings = Settings::resolve(&cli, Some(&file_config))?;

    let (output, len) = run_console(settings, &temp_dir, "export snapshot\nquit\n")?;

    assert!(output.starts_with("1소대 사이즈 현황"));
    assert_eq!(len, 2);

    let data = std::fs::read(temp_dir.path().join("snapshot"))?;
    let json: serde_json::Value = serde_json::from_slice(&data)?;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["강감찬", "홍길동"]);
    assert_eq!(json[1]["allergies"], "곡류: 밀");
    assert_eq!(json[0]["allergies"], "없음");
    Ok(())
}

#[test]
fn test_full_session_with_csv_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let cli = CliConfig::parse_from(["small-roster", "--no-seed"]);
    let settings = Settings::resolve(&cli, None)?;

    let script = "\
add 이순신 XL XXL 9,10
add 김유신 S M
add 박문수
delete 2
yes
delete 1
delete 1
export out/roster.csv
stats
";
    let (output, len) = run_console(settings, &temp_dir, script)?;

    assert!(output.contains("등록된 정보가 없습니다."));
    assert!(output.contains("박문수의 정보를 정말 삭제할까요?"));
    assert!(output.contains("박문수 정보를 삭제했습니다"));
    assert!(output.contains("김유신 삭제 요청을 취소했습니다"));
    assert!(output.contains("[옷 사이즈별 인원 수]"));
    assert_eq!(len, 2);

    let mut reader = csv::Reader::from_path(temp_dir.path().join("out/roster.csv"))?;
    let names: Vec<String> = reader
        .records()
        .map(|r| r.map(|record| record[1].to_string()))
        .collect::<std::result::Result<_, _>>()?;
    assert_eq!(names, vec!["김유신", "이순신"]);
    Ok(())
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("bad.toml");
    std::fs::write(&config_path, "[display]\nchart_width = 2\n")?;

    let file_config = RosterConfig::from_file(&config_path)?;
    let cli = CliConfig::parse_from(["small-roster"]);
    assert!(Settings::resolve(&cli, Some(&file_config)).is_err());

    assert!(RosterConfig::from_file(temp_dir.path().join("missing.toml")).is_err());
    Ok(())
}
