use crate::Result;
use crate::misc::ColorMode;
use crate::summary::RunSummary;
use core::fmt::Write;
use owo_colors::OwoColorize;

const SEPARATOR_WIDTH: usize = 50;

pub fn generate<W: Write>(summary: &RunSummary, color: ColorMode, writer: &mut W) -> Result<()> {
    ConsoleReporter {
        writer,
        colorize: color.should_colorize(),
    }
    .generate_report(summary)
}

struct ConsoleReporter<'a, W: Write> {
    writer: &'a mut W,
    colorize: bool,
}

enum TextStyle {
    Bold,
    Success,
    Failure,
}

impl<W: Write> ConsoleReporter<'_, W> {
    fn generate_report(&mut self, summary: &RunSummary) -> Result<()> {
        self.write_styled("GitHub Actions Summary", &TextStyle::Bold)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "-".repeat(SEPARATOR_WIDTH))?;

        write!(self.writer, "Successes   : ")?;
        self.write_styled(
            &format!("{} ({:.1}%)", summary.successes, summary.success_rate),
            &TextStyle::Success,
        )?;
        writeln!(self.writer)?;

        write!(self.writer, "Failures    : ")?;
        self.write_styled(
            &format!("{} ({:.1}%)", summary.failures, summary.failure_rate),
            &TextStyle::Failure,
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "Total Runs  : {}", summary.total)?;
        writeln!(self.writer)?;

        self.write_styled("Duration (seconds)", &TextStyle::Bold)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "    Max.     : {:.2}", summary.durations.max)?;
        writeln!(self.writer, "    Min.     : {:.2}", summary.durations.min)?;
        writeln!(self.writer, "    Avg.     : {:.2}", summary.durations.average)?;
        writeln!(self.writer, "    Median   : {:.2}", summary.durations.median)?;
        Ok(())
    }

    fn write_styled(&mut self, text: &str, style: &TextStyle) -> Result<()> {
        if self.colorize {
            match style {
                TextStyle::Bold => write!(self.writer, "{}", text.bold())?,
                TextStyle::Success => write!(self.writer, "{}", text.green())?,
                TextStyle::Failure => write!(self.writer, "{}", text.red())?,
            }
        } else {
            write!(self.writer, "{text}")?;
        }
        Ok(())
    }
}
