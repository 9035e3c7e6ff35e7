use crate::cli::PatternsArgs;
use crate::error::Result;
use lifelab::core::io::library::load_library;
use lifelab::core::models::pattern::PatternLibrary;
use tracing::info;

pub fn run(args: PatternsArgs) -> Result<()> {
    let library = match &args.library {
        Some(path) => {
            info!("Loading pattern library from {:?}", path);
            load_library(path)?
        }
        None => PatternLibrary::builtin(),
    };

    println!("{} pattern(s) available:", library.len());
    for category in library.categories() {
        println!("\n{}", category);
        let Some(templates) = library.patterns_in(category) else {
            continue;
        };
        for template in templates {
            println!(
                "  {:<16} {}x{}, {} live cell(s)",
                template.name(),
                template.rows(),
                template.cols(),
                template.population()
            );
        }
    }
    Ok(())
}
