use std::io::{self, Write};

/// Writes `message` to stdout and, when given, to `writer` as well.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        eprintln!("Failed to write to stdout: {e}");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}

/// Like [`println`], but for stderr. A failed write to stderr is returned
/// since there is nowhere left to report it.
pub fn eprintln(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    writeln!(io::stderr(), "{message}")?;

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}
