use crate::error::Result;
use crate::output::write_response;
use crate::session::Session;
use std::io::BufRead;
use termcolor::WriteColor;

const PROMPT: &str = "> ";

/// Interactive command loop.
///
/// Prompts with `> `, runs each line through the session and writes the
/// response, until `exit` or end of input. Saves the snapshot on the way
/// out when `autosave_on_exit` is configured.
pub fn run_repl<R, W>(session: &mut Session, input: R, output: &mut W) -> Result<()>
where
    R: BufRead,
    W: WriteColor,
{
    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        if let Some(response) = session.handle_line(&line) {
            write_response(output, &response)?;
            if response.ends_session() {
                break;
            }
        }
    }

    if session.config().autosave_on_exit {
        session.save()?;
    }
    Ok(())
}
