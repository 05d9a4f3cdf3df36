//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use hat_resolver::{diagnostics, ResolverResult};
use hat_types::{ColorChoice, Version};
use serde::Serialize;
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

#[derive(Serialize)]
struct LoaderInfo<'a> {
    name: &'a str,
    version: String,
    cli_version: &'static str,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render a resolution result
    pub fn render_resolution(&self, result: &ResolverResult) -> io::Result<()> {
        if self.json_output {
            return Self::render_json(result);
        }

        if result.is_empty() {
            println!("No mods to load.");
            return Ok(());
        }

        if result.load_order.is_empty() {
            println!("No mods can be loaded.");
        } else {
            println!("{}", self.heading("Mods in their order of appearance:"));
            let mut table = Self::table(&["#", "Mod", "Version", "Author", "Depends on"]);
            for (position, resolved) in result.load_order.iter().enumerate() {
                let metadata = &resolved.metadata;
                table.add_row(vec![
                    Cell::new(position + 1),
                    self.name_cell(&metadata.name),
                    Cell::new(metadata.version),
                    Cell::new(or_dash(&metadata.author)),
                    Cell::new(or_dash(&resolved.dependencies.join(", "))),
                ]);
            }
            println!("{table}");
        }

        if !result.invalid.is_empty() {
            println!();
            println!("{}", self.heading("Rejected mods:"));
            let mut table = Self::table(&["Mod", "Version", "Reason", "Details"]);
            for invalid in &result.invalid {
                let reason = Cell::new(diagnostics::label(&invalid.status));
                table.add_row(vec![
                    Cell::new(&invalid.metadata.name),
                    Cell::new(invalid.metadata.version),
                    if self.supports_color() {
                        reason.fg(Color::Red)
                    } else {
                        reason
                    },
                    Cell::new(diagnostics::detail(&invalid.status)),
                ]);
            }
            println!("{table}");
        }

        Ok(())
    }

    /// Render the loader identity
    pub fn render_loader(&self, name: &str, version: Version) -> io::Result<()> {
        let info = LoaderInfo {
            name,
            version: version.to_string(),
            cli_version: env!("CARGO_PKG_VERSION"),
        };
        if self.json_output {
            return Self::render_json(&info);
        }
        println!("{} {}", self.style_name(info.name), info.version);
        Ok(())
    }

    fn render_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    fn table(headers: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                headers
                    .iter()
                    .map(|header| Cell::new(header).add_attribute(Attribute::Bold)),
            );
        table
    }

    fn name_cell(&self, name: &str) -> Cell {
        let cell = Cell::new(name);
        if self.supports_color() {
            cell.fg(Color::Green)
        } else {
            cell
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.supports_color() {
            Style::new().bold().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn style_name(&self, name: &str) -> String {
        if self.supports_color() {
            Style::new().bold().cyan().apply_to(name).to_string()
        } else {
            name.to_string()
        }
    }

    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}
