use crate::Result;
use crate::summary::RunSummary;
use core::f64::consts::TAU;
use core::fmt::Write;

/// Pie slice and legend color for successful runs.
const SUCCESS_COLOR: &str = "#4caf50";

/// Pie slice and legend color for failed runs.
const FAILURE_COLOR: &str = "#f44336";

pub fn generate<W: Write>(summary: &RunSummary, title: &str, writer: &mut W) -> Result<()> {
    let mut generator = HtmlGenerator::new(writer, title);
    generator.generate(summary)
}

struct HtmlGenerator<'a, W: Write> {
    writer: &'a mut W,
    title: &'a str,
}

impl<'a, W: Write> HtmlGenerator<'a, W> {
    const fn new(writer: &'a mut W, title: &'a str) -> Self {
        Self { writer, title }
    }

    fn generate(&mut self, summary: &RunSummary) -> Result<()> {
        self.write_header()?;
        self.write_styles()?;
        self.write_body_start()?;
        self.write_title()?;
        self.write_summary_section(summary)?;
        self.write_stats_section(summary)?;
        self.write_footer()?;
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "<!DOCTYPE html>")?;
        writeln!(self.writer, "<html lang=\"en\">")?;
        writeln!(self.writer, "<head>")?;
        writeln!(self.writer, "<meta charset=\"UTF-8\">")?;
        writeln!(
            self.writer,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(self.writer, "<title>{}</title>", html_escape(self.title))?;
        Ok(())
    }

    fn write_styles(&mut self) -> Result<()> {
        writeln!(self.writer, "<style>")?;
        writeln!(self.writer, ":root {{")?;
        writeln!(self.writer, "  color-scheme: light dark;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "@media (prefers-color-scheme: light) {{")?;
        writeln!(self.writer, "  :root {{")?;
        writeln!(self.writer, "    --bg-primary: #ffffff;")?;
        writeln!(self.writer, "    --bg-secondary: #f5f5f5;")?;
        writeln!(self.writer, "    --text-primary: #1a1a1a;")?;
        writeln!(self.writer, "    --text-secondary: #666666;")?;
        writeln!(self.writer, "    --border-color: #e0e0e0;")?;
        writeln!(self.writer, "    --shadow: rgba(0, 0, 0, 0.1);")?;
        writeln!(self.writer, "  }}")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "@media (prefers-color-scheme: dark) {{")?;
        writeln!(self.writer, "  :root {{")?;
        writeln!(self.writer, "    --bg-primary: #1e1e1e;")?;
        writeln!(self.writer, "    --bg-secondary: #2d2d2d;")?;
        writeln!(self.writer, "    --text-primary: #e0e0e0;")?;
        writeln!(self.writer, "    --text-secondary: #b0b0b0;")?;
        writeln!(self.writer, "    --border-color: #404040;")?;
        writeln!(self.writer, "    --shadow: rgba(0, 0, 0, 0.3);")?;
        writeln!(self.writer, "  }}")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "* {{")?;
        writeln!(self.writer, "  margin: 0;")?;
        writeln!(self.writer, "  padding: 0;")?;
        writeln!(self.writer, "  box-sizing: border-box;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "body {{")?;
        writeln!(
            self.writer,
            "  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;"
        )?;
        writeln!(self.writer, "  background: var(--bg-primary);")?;
        writeln!(self.writer, "  color: var(--text-primary);")?;
        writeln!(self.writer, "  line-height: 1.6;")?;
        writeln!(self.writer, "  padding: 20px;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".container {{")?;
        writeln!(self.writer, "  max-width: 900px;")?;
        writeln!(self.writer, "  margin: 0 auto;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "h1 {{")?;
        writeln!(self.writer, "  font-size: 2rem;")?;
        writeln!(self.writer, "  margin-bottom: 1.5rem;")?;
        writeln!(self.writer, "  text-align: center;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".section {{")?;
        writeln!(self.writer, "  background: var(--bg-secondary);")?;
        writeln!(self.writer, "  border-radius: 8px;")?;
        writeln!(self.writer, "  padding: 20px;")?;
        writeln!(self.writer, "  margin-bottom: 20px;")?;
        writeln!(self.writer, "  box-shadow: 0 2px 4px var(--shadow);")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".section h2 {{")?;
        writeln!(self.writer, "  font-size: 1.3rem;")?;
        writeln!(self.writer, "  margin-bottom: 15px;")?;
        writeln!(self.writer, "  padding-bottom: 8px;")?;
        writeln!(self.writer, "  border-bottom: 1px solid var(--border-color);")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "table {{")?;
        writeln!(self.writer, "  width: 100%;")?;
        writeln!(self.writer, "  border-collapse: collapse;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "th, td {{")?;
        writeln!(self.writer, "  text-align: left;")?;
        writeln!(self.writer, "  padding: 8px 12px;")?;
        writeln!(self.writer, "  border-bottom: 1px solid var(--border-color);")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "th {{")?;
        writeln!(self.writer, "  color: var(--text-secondary);")?;
        writeln!(self.writer, "  font-weight: 600;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".chart-row {{")?;
        writeln!(self.writer, "  display: flex;")?;
        writeln!(self.writer, "  align-items: center;")?;
        writeln!(self.writer, "  justify-content: center;")?;
        writeln!(self.writer, "  gap: 30px;")?;
        writeln!(self.writer, "  flex-wrap: wrap;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".legend {{")?;
        writeln!(self.writer, "  list-style: none;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".legend li {{")?;
        writeln!(self.writer, "  display: flex;")?;
        writeln!(self.writer, "  align-items: center;")?;
        writeln!(self.writer, "  gap: 8px;")?;
        writeln!(self.writer, "  margin-bottom: 6px;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;

        writeln!(self.writer, ".swatch {{")?;
        writeln!(self.writer, "  display: inline-block;")?;
        writeln!(self.writer, "  width: 14px;")?;
        writeln!(self.writer, "  height: 14px;")?;
        writeln!(self.writer, "  border-radius: 3px;")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer, "</style>")?;
        Ok(())
    }

    fn write_body_start(&mut self) -> Result<()> {
        writeln!(self.writer, "</head>")?;
        writeln!(self.writer, "<body>")?;
        writeln!(self.writer, "<div class=\"container\">")?;
        Ok(())
    }

    fn write_title(&mut self) -> Result<()> {
        writeln!(self.writer, "<h1>{}</h1>", html_escape(self.title))?;
        Ok(())
    }

    fn write_summary_section(&mut self, summary: &RunSummary) -> Result<()> {
        writeln!(self.writer, "<div class=\"section\">")?;
        writeln!(self.writer, "<h2>Repository Summary</h2>")?;
        writeln!(self.writer, "<table>")?;
        writeln!(self.writer, "<tbody>")?;
        writeln!(
            self.writer,
            "<tr><td><strong>Repository</strong></td><td>{}</td></tr>",
            html_escape(&summary.repo_name)
        )?;
        writeln!(self.writer, "<tr><td><strong>Total Runs</strong></td><td>{}</td></tr>", summary.total)?;
        writeln!(
            self.writer,
            "<tr><td><strong>Success</strong></td><td>{} ({:.1}%)</td></tr>",
            summary.successes, summary.success_rate
        )?;
        writeln!(
            self.writer,
            "<tr><td><strong>Failure</strong></td><td>{} ({:.1}%)</td></tr>",
            summary.failures, summary.failure_rate
        )?;
        writeln!(self.writer, "</tbody>")?;
        writeln!(self.writer, "</table>")?;
        writeln!(self.writer, "</div>")?;
        Ok(())
    }

    fn write_stats_section(&mut self, summary: &RunSummary) -> Result<()> {
        writeln!(self.writer, "<div class=\"section\">")?;
        writeln!(self.writer, "<h2>Stats &amp; Chart</h2>")?;

        writeln!(self.writer, "<table>")?;
        writeln!(self.writer, "<thead>")?;
        writeln!(self.writer, "<tr><th>Metric</th><th>Time (seconds)</th></tr>")?;
        writeln!(self.writer, "</thead>")?;
        writeln!(self.writer, "<tbody>")?;
        writeln!(self.writer, "<tr><td>Average</td><td>{:.2}</td></tr>", summary.durations.average)?;
        writeln!(self.writer, "<tr><td>Median</td><td>{:.2}</td></tr>", summary.durations.median)?;
        writeln!(self.writer, "<tr><td>Min</td><td>{:.2}</td></tr>", summary.durations.min)?;
        writeln!(self.writer, "<tr><td>Max</td><td>{:.2}</td></tr>", summary.durations.max)?;
        writeln!(self.writer, "</tbody>")?;
        writeln!(self.writer, "</table>")?;

        self.write_pie_chart(summary)?;

        writeln!(self.writer, "</div>")?;
        Ok(())
    }

    /// Emit the success-vs-failure breakdown as an inline SVG pie, so the
    /// report stays self-contained with no external scripts.
    fn write_pie_chart(&mut self, summary: &RunSummary) -> Result<()> {
        writeln!(self.writer, "<div class=\"chart-row\">")?;
        writeln!(
            self.writer,
            "<svg viewBox=\"0 0 200 200\" width=\"260\" height=\"260\" role=\"img\" aria-label=\"Success vs failure breakdown\">"
        )?;

        if summary.failures == 0 {
            writeln!(self.writer, "<circle cx=\"100\" cy=\"100\" r=\"90\" fill=\"{SUCCESS_COLOR}\"/>")?;
        } else if summary.successes == 0 {
            writeln!(self.writer, "<circle cx=\"100\" cy=\"100\" r=\"90\" fill=\"{FAILURE_COLOR}\"/>")?;
        } else {
            #[expect(clippy::cast_precision_loss, reason = "run counts are far below f64 precision limits")]
            let fraction = summary.successes as f64 / summary.total as f64;
            let angle = fraction * TAU;

            // Both slices start/end on the ray from the center through the end
            // of the success arc; the success slice begins at 12 o'clock.
            let end_x = 100.0 + 90.0 * angle.sin();
            let end_y = 100.0 - 90.0 * angle.cos();
            let large = u8::from(fraction > 0.5);

            writeln!(
                self.writer,
                "<path d=\"M 100 100 L 100 10 A 90 90 0 {large} 1 {end_x:.2} {end_y:.2} Z\" fill=\"{SUCCESS_COLOR}\"/>"
            )?;
            writeln!(
                self.writer,
                "<path d=\"M 100 100 L {end_x:.2} {end_y:.2} A 90 90 0 {} 1 100 10 Z\" fill=\"{FAILURE_COLOR}\"/>",
                1 - large
            )?;
        }

        writeln!(self.writer, "</svg>")?;

        writeln!(self.writer, "<ul class=\"legend\">")?;
        writeln!(
            self.writer,
            "<li><span class=\"swatch\" style=\"background: {SUCCESS_COLOR}\"></span>Successes: {} ({:.1}%)</li>",
            summary.successes, summary.success_rate
        )?;
        writeln!(
            self.writer,
            "<li><span class=\"swatch\" style=\"background: {FAILURE_COLOR}\"></span>Failures: {} ({:.1}%)</li>",
            summary.failures, summary.failure_rate
        )?;
        writeln!(self.writer, "</ul>")?;
        writeln!(self.writer, "</div>")?;
        Ok(())
    }

    fn write_footer(&mut self) -> Result<()> {
        writeln!(self.writer, "</div>")?; // container
        writeln!(self.writer, "</body>")?;
        writeln!(self.writer, "</html>")?;
        Ok(())
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
