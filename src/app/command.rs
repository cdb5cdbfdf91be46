use crate::domain::model::{allergy_option, Size};
use crate::utils::error::{RosterError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        name: String,
        hat_size: Size,
        cloth_size: Size,
        allergies: Vec<&'static str>,
    },
    List,
    /// 1-based row of the sorted view.
    Delete { row: usize },
    Confirm,
    Cancel,
    Stats,
    Allergies,
    Export { path: Option<String> },
    Help,
    Quit,
}

impl Command {
    /// Parses one console line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match verb.to_lowercase().as_str() {
            "add" | "추가" => parse_add(rest)?,
            "list" | "ls" | "목록" => Self::List,
            "delete" | "del" | "rm" | "삭제" => Self::Delete {
                row: parse_row(&args)?,
            },
            "yes" | "y" | "예" => Self::Confirm,
            "no" | "n" | "아니요" => Self::Cancel,
            "stats" | "통계" => Self::Stats,
            "allergies" | "알레르기" => Self::Allergies,
            "export" => Self::Export {
                path: args.first().map(|p| p.to_string()),
            },
            "help" | "?" | "도움말" => Self::Help,
            "quit" | "exit" | "q" | "종료" => Self::Quit,
            other => return Err(RosterError::command(format!("Unknown command '{}'", other))),
        };
        Ok(Some(command))
    }
}

fn parse_add(input: &str) -> Result<Command> {
    let (name, rest) = split_name(input.trim())?;
    // A missing name is the same user error as an empty one.
    if name.trim().is_empty() {
        return Err(RosterError::validation("name", "Name cannot be empty"));
    }

    let args: Vec<&str> = rest.split_whitespace().collect();
    let hat_size = match args.first() {
        Some(s) => s.parse()?,
        None => Size::DEFAULT_HAT,
    };
    let cloth_size = match args.get(1) {
        Some(s) => s.parse()?,
        None => Size::DEFAULT_CLOTH,
    };
    let allergies = parse_allergy_numbers(&args.get(2..).unwrap_or_default().join(" "))?;

    Ok(Command::Add {
        name,
        hat_size,
        cloth_size,
        allergies,
    })
}

/// Takes the leading name off `input`. A name in double quotes may contain
/// spaces; otherwise the name is the first word.
fn split_name(input: &str) -> Result<(String, &str)> {
    if let Some(quoted) = input.strip_prefix('"') {
        let end = quoted
            .find('"')
            .ok_or_else(|| RosterError::command("Unterminated quote in name"))?;
        return Ok((quoted[..end].to_string(), &quoted[end + 1..]));
    }
    Ok(match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_string(), rest),
        None => (input.to_string(), ""),
    })
}

/// Resolves "2, 11" style selections against the allergy vocabulary.
/// Duplicates are dropped, selection order is kept.
pub fn parse_allergy_numbers(input: &str) -> Result<Vec<&'static str>> {
    let mut selected: Vec<&'static str> = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let tag = part
            .parse::<usize>()
            .ok()
            .and_then(allergy_option)
            .ok_or_else(|| {
                RosterError::command(format!(
                    "'{}' is not an allergy number; run `allergies` for the list",
                    part
                ))
            })?;
        if !selected.contains(&tag) {
            selected.push(tag);
        }
    }
    Ok(selected)
}

fn parse_row(args: &[&str]) -> Result<usize> {
    let raw = args
        .first()
        .ok_or_else(|| RosterError::command("delete needs a row number"))?;
    raw.parse()
        .map_err(|_| RosterError::command(format!("'{}' is not a row number", raw)))
}
