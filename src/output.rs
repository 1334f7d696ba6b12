//! Output formatting for command responses

use crate::session::Response;
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print a response to stdout
pub fn print_response(response: &Response, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_response(&mut stdout, response)
}

/// Write a response line, coloring its status prefix
pub fn write_response<W: WriteColor>(out: &mut W, response: &Response) -> io::Result<()> {
    let text = response.to_string();

    let (prefix, color) = match response {
        Response::Failure(_) => ("index error", Color::Red),
        Response::LoadFailed => ("WARNING", Color::Yellow),
        Response::Indexed(_) => ("index ok", Color::Green),
        Response::Results(_) => ("query results", Color::Green),
        _ => ("", Color::Cyan),
    };

    if prefix.is_empty() {
        out.set_color(ColorSpec::new().set_fg(Some(color)))?;
        writeln!(out, "{}", text)?;
        out.reset()?;
        return Ok(());
    }

    // Status prefix in bold, payload plain
    let rest = text.strip_prefix(prefix).unwrap_or(&text);
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", prefix)?;
    out.reset()?;
    writeln!(out, "{}", rest)?;

    Ok(())
}
