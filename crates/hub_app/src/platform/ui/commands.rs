use hub_core::{DocOperation, FileId, Msg, PdfOperation, View};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  go <landing|dashboard|image|pdf|doc|history>   switch view
  sidebar | close | menu | theme                 toggle chrome
  upload                                          select the sample files
  remove <id> | rename <id>                       file actions
  convert | download | dismiss                    conversion job
  tab <merge|reorder|unlock|compress>             PDF toolkit tab
  input <text> | clear                            document assistant text
  doc <summarize|polish|translate|actions>        run an AI operation
  ok                                              dismiss alert
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{command}`: invalid argument `{value}`")]
    InvalidArgument { command: &'static str, value: String },
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let msg = match head.to_ascii_lowercase().as_str() {
        "" => return Ok(Command::Empty),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "go" => {
            let arg = required("go", rest, "a view name")?;
            let view = View::from_slug(arg).ok_or_else(|| invalid("go", arg))?;
            Msg::Navigate(view)
        }
        "sidebar" => Msg::ToggleSidebar,
        "close" => Msg::CloseSidebar,
        "menu" => Msg::ToggleLandingMenu,
        "theme" => Msg::ToggleTheme,
        "upload" => Msg::MockFilesSelected,
        "remove" => Msg::FileRemoved(file_id("remove", rest)?),
        "rename" => Msg::SmartRenameClicked(file_id("rename", rest)?),
        "convert" => Msg::ConvertClicked,
        "download" => Msg::DownloadAllClicked,
        "dismiss" => Msg::DismissJobNotice,
        "tab" => {
            let arg = required("tab", rest, "a PDF operation")?;
            let op = PdfOperation::from_label(arg).ok_or_else(|| invalid("tab", arg))?;
            Msg::PdfOperationSelected(op)
        }
        // Keeps inner spacing of the text as typed.
        "input" => Msg::DocInputChanged(rest.to_string()),
        "clear" => Msg::DocInputCleared,
        "doc" => {
            let arg = required("doc", rest, "an AI operation")?;
            let op = DocOperation::from_keyword(arg).ok_or_else(|| invalid("doc", arg))?;
            Msg::DocOperationClicked(op)
        }
        "ok" => Msg::AlertDismissed,
        _ => return Err(CommandError::Unknown(head.to_string())),
    };
    Ok(Command::Dispatch(msg))
}

fn required<'a>(
    command: &'static str,
    rest: &'a str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(rest)
    }
}

fn invalid(command: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}

fn file_id(command: &'static str, rest: &str) -> Result<FileId, CommandError> {
    let arg = required(command, rest, "a file id")?;
    arg.parse().map_err(|_| invalid(command, arg))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn dispatch(line: &str) -> Msg {
        match parse_command(line) {
            Ok(Command::Dispatch(msg)) => msg,
            other => panic!("{line:?} parsed to {other:?}"),
        }
    }

    #[test]
    fn navigation_accepts_short_names_and_slugs() {
        assert_eq!(dispatch("go image"), Msg::Navigate(View::ImageTool));
        assert_eq!(dispatch("GO tool-pdf"), Msg::Navigate(View::PdfTool));
        assert_eq!(dispatch("  go   dashboard "), Msg::Navigate(View::Dashboard));
    }

    #[test]
    fn file_actions_need_numeric_ids() {
        assert_eq!(dispatch("remove 2"), Msg::FileRemoved(2));
        assert_eq!(dispatch("rename 3"), Msg::SmartRenameClicked(3));
        assert_eq!(
            parse_command("remove two"),
            Err(CommandError::InvalidArgument {
                command: "remove",
                value: "two".to_string()
            })
        );
        assert!(matches!(
            parse_command("rename"),
            Err(CommandError::MissingArgument { command: "rename", .. })
        ));
    }

    #[test]
    fn input_keeps_text_after_command() {
        assert_eq!(
            dispatch("input Met with  Ana; follow up Friday."),
            Msg::DocInputChanged("Met with  Ana; follow up Friday.".to_string())
        );
    }

    #[test]
    fn doc_and_tab_operations() {
        assert_eq!(
            dispatch("doc actions"),
            Msg::DocOperationClicked(DocOperation::ExtractActions)
        );
        assert_eq!(
            dispatch("tab unlock"),
            Msg::PdfOperationSelected(PdfOperation::Unlock)
        );
        assert!(parse_command("doc sing").is_err());
    }

    #[test]
    fn control_words() {
        assert_eq!(parse_command(""), Ok(Command::Empty));
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(
            parse_command("fly"),
            Err(CommandError::Unknown("fly".to_string()))
        );
    }
}
