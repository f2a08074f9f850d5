use crate::cli::{ColorChoice, OutputFormat};
use std::io::IsTerminal;

/// Decide whether text output gets ANSI colors. JSON and HTML never do.
pub fn init(choice: ColorChoice, format: OutputFormat) {
    let should_color = format == OutputFormat::Text
        && match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            // Respect NO_COLOR (https://no-color.org/) and pipes
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        };

    colored::control::set_override(should_color);
}
