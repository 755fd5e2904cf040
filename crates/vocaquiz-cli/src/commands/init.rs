//! The `vocaquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("vocaquiz.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("words.tsv"), SAMPLE_WORDS)?;

    println!("\nNext steps:");
    println!("  1. Add your own words to words.tsv (word<TAB>reading<TAB>meaning<TAB>remarks)");
    println!("  2. Run: vocaquiz validate --catalog words.tsv");
    println!("  3. Run: vocaquiz play");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# vocaquiz configuration

questions_per_set = 10
options_per_question = 4

# Word list to quiz on. Remove to use the bundled list.
catalog = "words.tsv"

# Where history and review progress are kept.
store_dir = "${HOME}/.local/share/vocaquiz"

# Uncomment for a reproducible question order.
# seed = 42
"#;

const SAMPLE_WORDS: &str = "# word\treading\tmeaning\tremarks
ephemeral\t\tlasting for a very short time
ubiquitous\t\tpresent everywhere at once
candid\t\ttruthful and straightforward
diligent\t\tshowing care and effort in work
lucid\t\texpressed clearly; easy to understand
prudent\t\tacting with care for the future
tenacious\t\tholding firmly to a purpose\tfrom Latin tenere, to hold
verbose\t\tusing more words than needed
";
