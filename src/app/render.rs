use crate::core::aggregate::{CountTable, RosterStats};
use crate::domain::model::{PersonRecord, ALLERGY_OPTIONS};
use std::fmt::Write;

pub const NO_RECORDS: &str = "등록된 정보가 없습니다.";

const FILLED: char = '█';
const EMPTY: char = '░';

struct ChartSpec {
    title: &'static str,
    empty_notice: &'static str,
}

const HAT_CHART: ChartSpec = ChartSpec {
    title: "모자 사이즈별 인원 수",
    empty_notice: "모자 사이즈 데이터가 없습니다.",
};

const CLOTH_CHART: ChartSpec = ChartSpec {
    title: "옷 사이즈별 인원 수",
    empty_notice: "옷 사이즈 데이터가 없습니다.",
};

const ALLERGY_CHART: ChartSpec = ChartSpec {
    title: "알레르기별 인원 수",
    empty_notice: "알레르기 정보가 없습니다.",
};

/// Numbered rows in the order given. Row numbers are 1-based and are what
/// `delete <row>` refers to.
pub fn render_table(rows: &[&PersonRecord]) -> String {
    if rows.is_empty() {
        return format!("{}\n", NO_RECORDS);
    }

    let mut out = String::new();
    for (i, record) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {}  모자: {}  옷: {}  알레르기: {}",
            i + 1,
            record.name,
            record.hat_size,
            record.cloth_size,
            record.allergies
        );
    }
    out
}

pub fn render_bar(share: f64, width: usize) -> String {
    let filled = ((share * width as f64).round() as usize).min(width);
    let mut bar = String::with_capacity(width * FILLED.len_utf8());
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(width - filled));
    bar
}

fn render_chart(out: &mut String, spec: &ChartSpec, table: &CountTable, width: usize) {
    let _ = writeln!(out, "[{}]", spec.title);
    let slices = table.slices();
    if slices.is_empty() {
        let _ = writeln!(out, "  {}", spec.empty_notice);
        return;
    }
    for slice in slices {
        let _ = writeln!(
            out,
            "  {} {:>5.1}% {:>3}  {}",
            render_bar(slice.share, width),
            slice.share * 100.0,
            slice.count,
            slice.label
        );
    }
}

/// The three proportion charts. An empty roster shows nothing at all.
pub fn render_stats(stats: &RosterStats, record_count: usize, width: usize) -> String {
    if record_count == 0 {
        return String::new();
    }

    let mut out = String::new();
    render_chart(&mut out, &HAT_CHART, &stats.hat_sizes, width);
    out.push('\n');
    render_chart(&mut out, &CLOTH_CHART, &stats.cloth_sizes, width);
    out.push('\n');
    render_chart(&mut out, &ALLERGY_CHART, &stats.allergies, width);
    out
}

pub fn render_allergy_options() -> String {
    let mut out = String::new();
    for (i, option) in ALLERGY_OPTIONS.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, option);
    }
    out
}

pub fn render_delete_prompt(record: &PersonRecord) -> String {
    format!(
        "⚠️  {}의 정보를 정말 삭제할까요? (yes / no)\n",
        record.name
    )
}

pub const HELP: &str = "\
명령어:
  add <이름> [모자 사이즈] [옷 사이즈] [알레르기 번호,...]   정보 추가 (기본값: M, L)
      띄어쓰기가 있는 이름은 따옴표로 감싸세요: add \"남궁 민수\" M L
  list                                                        등록된 정보 목록
  delete <번호>                                               삭제 요청 (같은 번호를 다시 입력하면 취소)
  yes | no                                                    삭제 확인 / 취소
  stats                                                       통계 그래프
  allergies                                                   알레르기 번호 목록
  export [경로]                                               CSV 또는 JSON으로 내보내기
  help                                                        도움말
  quit                                                        종료
";
