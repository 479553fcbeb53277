use wordlight_core::highlight::{OverflowPolicy, Palette};
use wordlight_core::report::ProcessOptions;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Overflow {
    /// Reuse the palette from the first style (default)
    Cycle,
    /// Leave words past the last style unwrapped
    Unstyled,
}

impl From<Overflow> for OverflowPolicy {
    fn from(o: Overflow) -> Self {
        match o {
            Overflow::Cycle => OverflowPolicy::Cycle,
            Overflow::Unstyled => OverflowPolicy::Unstyled,
        }
    }
}

/// Options shared by every command that highlights documents.
#[derive(Debug, Clone, clap::Args)]
pub struct ProcessArgs {
    /// Inline CSS style for matched words, in rank order. Repeat the flag for
    /// several styles; `|` separates them in the environment variable
    #[arg(long = "palette", env = "WORDLIGHT_PALETTE", value_delimiter = '|')]
    pub palette: Vec<String>,

    /// What to do with matched words once the palette is exhausted
    #[arg(long, env = "WORDLIGHT_OVERFLOW", default_value = "cycle")]
    pub overflow: Overflow,

    /// Trim whitespace around the entries of the word list
    #[arg(long, env = "WORDLIGHT_TRIM_WORDS", default_value = "false")]
    pub trim_words: bool,
}

impl ProcessArgs {
    pub fn process_options(&self) -> ProcessOptions {
        let palette = if self.palette.is_empty() {
            Palette::default()
        } else {
            Palette::new(self.palette.iter().cloned())
        };

        ProcessOptions {
            palette,
            overflow: self.overflow.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, clap::Parser)]
    struct TestCli {
        #[clap(flatten)]
        process: ProcessArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        let options = cli.process.process_options();

        assert_eq!(options.palette, Palette::default());
        assert_eq!(options.overflow, OverflowPolicy::Cycle);
        assert!(!cli.process.trim_words);
    }

    #[test]
    fn test_custom_palette_and_overflow() {
        let cli = TestCli::try_parse_from([
            "test",
            "--palette",
            "color: red;",
            "--palette",
            "color: blue;",
            "--overflow",
            "unstyled",
            "--trim-words",
        ])
        .unwrap();
        let options = cli.process.process_options();

        assert_eq!(options.palette.styles(), ["color: red;", "color: blue;"]);
        assert_eq!(options.overflow, OverflowPolicy::Unstyled);
        assert!(cli.process.trim_words);
    }
}
