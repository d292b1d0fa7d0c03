//! Line commands typed at the directory prompt.

use anyhow::{anyhow, bail, Context};
use shared::domain::StudentId;

pub const HELP: &str = "\
Commands:
  set <fullName|email|major> <value>   edit the new-student form
  submit                               add the student in the form
  remove <id>                          remove a student (asks first)
  get <id>                             fetch one student from the server
  show                                 redraw the page
  help                                 show this help
  quit                                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Set { field: String, value: String },
    Submit,
    Remove(StudentId),
    Get(StudentId),
    Quit,
}

/// Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "show" | "list" | "ls" => Command::Show,
        "submit" | "add" => Command::Submit,
        "quit" | "exit" | "q" => Command::Quit,
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None if !rest.is_empty() => (rest, ""),
                None => bail!("usage: set <fullName|email|major> <value>"),
            };
            Command::Set {
                field: field.to_string(),
                value: value.to_string(),
            }
        }
        "remove" | "rm" | "delete" => Command::Remove(parse_id(rest)?),
        "get" => Command::Get(parse_id(rest)?),
        other => return Err(anyhow!("unknown command '{other}'; type 'help'")),
    };
    Ok(Some(command))
}

fn parse_id(raw: &str) -> anyhow::Result<StudentId> {
    let id = raw
        .parse::<i64>()
        .with_context(|| format!("expected a numeric student id, got '{raw}'"))?;
    Ok(StudentId(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_ignored() {
        assert_eq!(parse_command("   ").expect("parse"), None);
    }

    #[test]
    fn set_keeps_inner_spaces_of_the_value() {
        assert_eq!(
            parse_command("set fullName  Nguyen Van A ").expect("parse"),
            Some(Command::Set {
                field: "fullName".into(),
                value: "Nguyen Van A".into(),
            })
        );
    }

    #[test]
    fn set_without_value_clears_the_field() {
        assert_eq!(
            parse_command("set major").expect("parse"),
            Some(Command::Set {
                field: "major".into(),
                value: String::new(),
            })
        );
        assert!(parse_command("set").is_err());
    }

    #[test]
    fn remove_needs_a_numeric_id() {
        assert_eq!(
            parse_command("remove 12").expect("parse"),
            Some(Command::Remove(StudentId(12)))
        );
        assert!(parse_command("remove twelve").is_err());
    }

    #[test]
    fn unknown_verb_is_rejected() {
        let err = parse_command("frobnicate").expect_err("unknown");
        assert!(err.to_string().contains("frobnicate"));
    }
}
