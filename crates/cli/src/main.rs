//! hookmux CLI application entry point
//!
//! This is the minimal main entry point that delegates to the library.

use clap::Parser;
use hookmux::error::CommandError;

fn main() {
    // Configure miette for error reporting
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(false)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();

    let cli = hookmux::Cli::parse();

    if let Err(e) = hookmux::run(cli) {
        // A failing hook already reported itself; pass its exit code on to git
        if let Some(CommandError::HookFailed { code, .. }) = e.downcast_ref::<CommandError>() {
            std::process::exit(*code);
        }

        let miette_error = miette::Report::msg(format!("{e:#}"));
        eprintln!("{miette_error:?}");
        std::process::exit(1);
    }
}
