use crate::app::command::Command;
use crate::app::export::export_roster;
use crate::app::render;
use crate::core::session::{DeleteRequest, Session};
use crate::core::{ConfigProvider, Storage};
use crate::utils::error::{RosterError, Result};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

/// Line-oriented front end. Each command is handled to completion, including
/// re-rendering, before the next line is read.
pub struct Console<C: ConfigProvider, S: Storage> {
    session: Session,
    config: C,
    storage: S,
    default_export_path: String,
}

impl<C: ConfigProvider, S: Storage> Console<C, S> {
    pub fn new(config: C, storage: S, default_export_path: impl Into<String>) -> Self {
        let session = Session::with_seed(&config.seed_records());
        tracing::info!("Session started with {} records", session.store().len());
        Self {
            session,
            config,
            storage,
            default_export_path: default_export_path.into(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Parses and handles one line. Input errors come back as `Err` with the
    /// session unchanged.
    pub fn execute(&mut self, line: &str) -> Result<Reply> {
        match Command::parse(line)? {
            Some(command) => self.handle(command),
            None => Ok(Reply::text("")),
        }
    }

    pub fn handle(&mut self, command: Command) -> Result<Reply> {
        tracing::debug!("Handling {:?}", command);
        let reply = match command {
            Command::Add {
                name,
                hat_size,
                cloth_size,
                allergies,
            } => {
                // 추가 후 전체 화면 다시 그리기
                let id = self.session.add(&name, hat_size, cloth_size, &allergies)?;
                let added = self
                    .session
                    .store()
                    .get(id)
                    .map(|r| r.name.clone())
                    .unwrap_or(name);
                Reply::text(format!("✅ {} 정보를 추가했습니다.\n\n{}", added, self.page()))
            }
            Command::List => Reply::text(self.table()),
            Command::Delete { row } => {
                // 정렬된 화면의 행 번호를 레코드 id 로 변환
                let id = self.session.row_id(row)?;
                match self.session.request_delete(id)? {
                    DeleteRequest::Pending(record) => Reply::text(render::render_delete_prompt(&record)),
                    DeleteRequest::Withdrawn(record) => {
                        Reply::text(format!("{} 삭제 요청을 취소했습니다.\n", record.name))
                    }
                }
            }
            Command::Confirm => {
                let removed = self.session.confirm()?;
                Reply::text(format!(
                    "✅ {} 정보를 삭제했습니다.\n\n{}",
                    removed.name,
                    self.page()
                ))
            }
            Command::Cancel => match self.session.cancel() {
                Some(_) => Reply::text("삭제를 취소했습니다.\n"),
                None => return Err(RosterError::command("There is no pending delete to cancel")),
            },
            Command::Stats => Reply::text(self.charts()),
            Command::Allergies => Reply::text(render::render_allergy_options()),
            Command::Export { path } => {
                // 경로 확장자가 없으면 설정된 형식 사용
                let path = path.unwrap_or_else(|| self.default_export_path.clone());
                let rows = self.session.rows();
                let format = export_roster(&self.storage, &rows, &path, self.config.export_format())?;
                Reply::text(format!(
                    "📁 {}명의 정보를 {:?} 형식으로 {}에 저장했습니다.\n",
                    rows.len(),
                    format,
                    path
                ))
            }
            Command::Help => Reply::text(render::HELP),
            Command::Quit => Reply {
                text: String::new(),
                quit: true,
            },
        };
        Ok(reply)
    }

    fn table(&self) -> String {
        render::render_table(&self.session.rows())
    }

    fn charts(&self) -> String {
        let stats = self.session.stats();
        render::render_stats(&stats, self.session.store().len(), self.config.chart_width())
    }

    /// Full view: sorted list followed by the charts.
    pub fn page(&self) -> String {
        let charts = self.charts();
        if charts.is_empty() {
            self.table()
        } else {
            format!("{}\n{}", self.table(), charts)
        }
    }

    /// Reads commands until `quit` or end of input. Only failures on the
    /// streams themselves end the loop early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        // 시작 화면
        writeln!(output, "{}\n", self.config.title())?;
        write!(output, "{}", self.page())?;
        writeln!(output, "\n`help` 로 명령어를 확인하세요.")?;

        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok(reply) => {
                    write!(output, "{}", reply.text)?;
                    if reply.quit {
                        break;
                    }
                }
                Err(e) => {
                    // 입력 오류는 알리고 계속 진행
                    tracing::warn!("{} (severity: {:?})", e, e.severity());
                    writeln!(output, "⚠️  {}", e.user_friendly_message())?;
                    if !e.is_recoverable() {
                        return Err(e);
                    }
                }
            }
            output.flush()?;
        }

        tracing::info!("Session ended with {} records", self.session.store().len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::core::session::ConfirmState;

    struct NullStorage;

    impl Storage for NullStorage {
        fn write_file(&self, _path: &str, _data: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    fn console() -> Console<Settings, NullStorage> {
        Console::new(Settings::default(), NullStorage, "roster.csv")
    }

    #[test]
    fn test_add_rerenders_page() {
        let mut console = console();
        let reply = console.execute("add 홍길동 M L").unwrap();
        assert!(reply.text.contains("홍길동 정보를 추가했습니다"));
        assert!(reply.text.contains("알레르기: 없음"));
        assert!(reply.text.contains("[알레르기별 인원 수]"));
        assert_eq!(console.session().store().len(), 4);
    }

    #[test]
    fn test_add_name_with_spaces() {
        let mut console = console();
        console.execute(r#"add "John Smith" M L"#).unwrap();
        console.execute(r#"add "남궁 민수" XL"#).unwrap();

        let names: Vec<&str> = console.session().rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["김민수", "남궁 민수", "박철수", "이영희", "John Smith"]);

        let err = console.execute("add 남궁 민수").unwrap_err();
        assert!(matches!(err, RosterError::UnknownSizeError { .. }));
        assert_eq!(console.session().store().len(), 5);
    }

    #[test]
    fn test_add_without_name_changes_nothing() {
        let mut console = console();
        let err = console.execute("add").unwrap_err();
        assert_eq!(err.user_friendly_message(), "이름을 입력해주세요.");
        assert_eq!(console.session().store().len(), 3);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut console = console();
        let prompt = console.execute("delete 1").unwrap();
        assert!(prompt.text.contains("김민수의 정보를 정말 삭제할까요?"));
        assert_eq!(console.session().store().len(), 3);

        let reply = console.execute("yes").unwrap();
        assert!(reply.text.contains("김민수 정보를 삭제했습니다"));
        assert_eq!(console.session().store().len(), 2);
        assert_eq!(console.session().confirm_state(), ConfirmState::Idle);
    }

    #[test]
    fn test_delete_then_no() {
        let mut console = console();
        console.execute("delete 3").unwrap();
        console.execute("no").unwrap();
        assert_eq!(console.session().store().len(), 3);
        assert!(console.execute("no").is_err());
    }

    #[test]
    fn test_delete_out_of_range_row() {
        let mut console = console();
        let err = console.execute("delete 9").unwrap_err();
        assert!(matches!(err, RosterError::NotFoundError { .. }));
        assert_eq!(console.session().store().len(), 3);
    }

    #[test]
    fn test_bad_export_path_keeps_session_running() {
        let mut console = console();
        let err = console.execute("export a\0b.csv").unwrap_err();
        assert!(err.is_recoverable());

        let input = "export a\0b.csv\nadd 홍길동\nquit\n";
        let mut output = Vec::new();
        console.run(input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("is not a usable export path"));
        assert!(text.contains("홍길동 정보를 추가했습니다"));
        assert_eq!(console.session().store().len(), 4);
    }

    #[test]
    fn test_run_loop_survives_input_errors() {
        let mut console = console();
        let input = "add\nadd 홍길동 S S 1\nbogus\nlist\nquit\nadd 무시됨\n";
        let mut output = Vec::new();
        console.run(input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("이름을 입력해주세요."));
        assert!(text.contains("Unknown command 'bogus'"));
        assert!(text.contains("유제품: 우유"));
        assert_eq!(console.session().store().len(), 4);
    }
}
